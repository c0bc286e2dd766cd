use crate::{error::Error, Result};
use kgc::BiasTable;
use log::{debug, info};
use std::io::{BufRead, BufReader};
use std::path::Path;
use walkdir::WalkDir;

/// Opens a plain or compressed input, `-` reads from stdin
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let (rdr, format) = if path == Path::new("-") {
        niffler::get_reader(Box::new(std::io::stdin()))?
    } else {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        niffler::from_path(path)?
    };
    debug!("Opened {} as {:?}", path.display(), format);
    Ok(Box::new(BufReader::new(rdr)))
}

/// Reads every bias table in `folder`, in file name order. The sample name is the file
/// name up to its first `.`, hidden files are skipped.
pub fn read_bias_folder<P: AsRef<Path>>(folder: P) -> Result<Vec<(String, BiasTable)>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(Error::NotADirectory(folder.display().to_string()));
    }
    info!("Reading bias tables from {}...", folder.display());

    let mut tables = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        let sample = file_name.split('.').next().unwrap_or_default().to_string();
        if sample.is_empty() {
            debug!("Skipping hidden file {}", entry.path().display());
            continue;
        }

        let table = BiasTable::from_reader(open_input(entry.path())?)
            .map_err(|e| Error::BiasTableError(entry.path().display().to_string(), e))?;
        debug!(
            "Sample {} has {} GC values in {}",
            sample,
            table.rows().len(),
            entry.path().display()
        );
        tables.push((sample, table));
    }

    if tables.is_empty() {
        return Err(Error::NoBiasTables(folder.display().to_string()));
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    static TABLE: &str = "GC\tNum. Positions\tOverlapping Reads\tAvg. Coverage\n0.40\t2\t8\t4.0\n";

    #[test]
    fn test_read_bias_folder() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("s2.gc.txt"), TABLE).unwrap();
        fs::write(dir.path().join("s1.gc.txt"), TABLE).unwrap();
        fs::write(dir.path().join(".hidden"), "junk").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let tables = read_bias_folder(dir.path()).unwrap();
        let samples = tables.iter().map(|(s, _)| s.as_str()).collect::<Vec<_>>();
        assert_eq!(samples, vec!["s1", "s2"]);
        assert_eq!(tables[0].1.avg_coverage(), Some(4.0));
    }

    #[test]
    fn test_empty_bias_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_bias_folder(dir.path()),
            Err(Error::NoBiasTables(_))
        ));
    }

    #[test]
    fn test_missing_input() {
        assert!(matches!(
            open_input("tests/no_such_file.txt"),
            Err(Error::FileNotFound(_))
        ));
    }
}
