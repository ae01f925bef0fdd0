use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Hands finished bytes to the user under a suggested filename.
pub trait Delivery: Send + Sync {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Saves into a directory. The file appears whole or not at all.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(filename);

        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&target).map_err(|e| e.error)?;

        log::info!("Saved {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }
}
