//! Persistence of group snapshots.
//!
//! The settlement core never touches storage. Callers load a snapshot on
//! start, save the full snapshot after every mutation and clear it on reset.

use crate::error::Result;
use crate::group::Group;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Storage for the single group snapshot.
pub trait GroupStore {
    /// Returns the stored group, or an empty group if nothing is stored.
    fn load(&self) -> Result<Group>;

    /// Replaces the stored snapshot.
    fn save(&mut self, group: &Group) -> Result<()>;

    /// Removes the stored snapshot.
    fn clear(&mut self) -> Result<()>;
}

/// Stores the snapshot as JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GroupStore for JsonFileStore {
    fn load(&self) -> Result<Group> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Group::new());
            }
            Err(e) => return Err(e.into()),
        };

        let group: Group = serde_json::from_reader(BufReader::new(file))?;
        if let Err(e) = group.validate() {
            warn!("Rejecting snapshot at {}: {}", self.path.display(), e);
            return Err(e.into());
        }

        debug!(
            "Loaded {} participants from {}",
            group.len(),
            self.path.display()
        );
        Ok(group)
    }

    fn save(&mut self, group: &Group) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, group)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        debug!(
            "Saved {} participants to {}",
            group.len(),
            self.path.display()
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared snapshot at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Group>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl GroupStore for MemoryStore {
    fn load(&self) -> Result<Group> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, group: &Group) -> Result<()> {
        self.snapshot = Some(group.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }
}
