/*! Batch reading utilities

Reads batch files written by [crate::io::BatchWriter] back into texts.
!*/
use std::path::{Path, PathBuf};

use log::debug;

use crate::{error::Error, io::SEPARATOR};

/// Split batch file content on [SEPARATOR].
/// Entries are trimmed, and empty ones are dropped.
pub fn split_batch(content: &str) -> Vec<&str> {
    content
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Sorted list of `*.txt` files in `dir`.
pub fn batch_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = dir.join("*.txt");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {dir:?}")))?;

    let mut files = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    files.sort();
    debug!("{} batch files in {dir:?}", files.len());
    Ok(files)
}

/// Read every text of every batch file in `dir`, in file name order.
pub fn read_batches(dir: &Path) -> Result<Vec<String>, Error> {
    let mut texts = Vec::new();
    for file in batch_files(dir)? {
        let content = std::fs::read_to_string(&file)?;
        texts.extend(split_batch(&content).into_iter().map(String::from));
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        let content = format!("  a b c {SEPARATOR}{SEPARATOR}d e f{SEPARATOR}\n");
        assert_eq!(split_batch(&content), vec!["a b c", "d e f"]);
        assert!(split_batch("").is_empty());
    }

    #[test]
    fn multiline_texts() {
        let content = format!("line one\nline two{SEPARATOR}=== not a separator{SEPARATOR}");
        assert_eq!(
            split_batch(&content),
            vec!["line one\nline two", "=== not a separator"]
        );
    }

    #[test]
    fn read_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("src_000001.txt"), format!("c{SEPARATOR}")).unwrap();
        std::fs::write(
            dir.path().join("src_000000.txt"),
            format!("a{SEPARATOR}b{SEPARATOR}"),
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        assert_eq!(read_batches(dir.path()).unwrap(), vec!["a", "b", "c"]);
    }
}
