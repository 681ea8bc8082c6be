use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Creates the output directory if needed; an existing file in its place is an error.
pub fn ensure_dir<P: AsRef<Path>>(p: P) -> Result<()> {
    let p = p.as_ref();
    if p.is_file() {
        bail!("Output path is a file: {}", p.display());
    }
    if !p.exists() {
        fs::create_dir_all(p)
            .with_context(|| format!("Failed to create output directory {}", p.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        assert!(ensure_dir(&file).is_err());
    }
}
