//! Persist the best score in a single slot (XDG config or ~/.config/blockfall).
//!
//! The slot holds one decimal integer. Reads degrade to zero; writes replace
//! the file atomically by writing a sibling temp file and renaming it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

const DIR_NAME: &str = "blockfall";
const FILENAME: &str = "best_score";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score slot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("best score slot {path} holds {content:?}, not a score")]
    Corrupt { path: PathBuf, content: String },
}

/// A single named slot holding the best score.
pub trait ScoreSlot {
    /// Stored value, `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

impl<S: ScoreSlot + ?Sized> ScoreSlot for Box<S> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        (**self).save(best)
    }
}

/// Stored best score, treating a missing or unreadable slot as 0.
pub fn load_best<S: ScoreSlot + ?Sized>(slot: &S) -> u32 {
    slot.load().ok().flatten().unwrap_or(0)
}

/// Default slot path: `$XDG_CONFIG_HOME/blockfall/best_score`, else `~/.config/...`, else `./`.
pub fn default_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(DIR_NAME).join(FILENAME)
}

/// Best score kept in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileSlot {
    fn default() -> Self {
        Self::new(default_path())
    }
}

impl ScoreSlot for FileSlot {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<u32>()
            .map(Some)
            .map_err(|_| StoreError::Corrupt {
                path: self.path.clone(),
                content: trimmed.to_string(),
            })
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let written = write_then_rename(&tmp, &self.path, best);
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written.map_err(|e| self.io_err(e))
    }
}

fn write_then_rename(tmp: &Path, path: &Path, best: u32) -> io::Result<()> {
    let mut f = fs::File::create(tmp)?;
    writeln!(f, "{}", best)?;
    f.sync_all()?;
    drop(f);
    fs::rename(tmp, path)
}

/// Best score kept in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    value: Option<u32>,
    writes: u32,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(best: u32) -> Self {
        Self {
            value: Some(best),
            writes: 0,
        }
    }

    /// Number of successful saves.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreSlot for MemorySlot {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.value = Some(best);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir()
            .join(format!("blockfall_best_{tag}_{nanos}"))
            .join(FILENAME)
    }

    #[test]
    fn missing_file_loads_as_none() {
        let slot = FileSlot::new(unique_temp_path("missing"));
        assert!(matches!(slot.load(), Ok(None)));
        assert_eq!(load_best(&slot), 0);
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let path = unique_temp_path("save");
        let mut slot = FileSlot::new(&path);

        slot.save(4200).unwrap();
        assert_eq!(slot.load().unwrap(), Some(4200));
        assert_eq!(fs::read_to_string(&path).unwrap(), "4200\n");
        assert!(!path.with_extension("tmp").exists());

        slot.save(5000).unwrap();
        assert_eq!(load_best(&slot), 5000);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let path = unique_temp_path("blocked");
        // A non-empty directory where the slot file should be: the rename fails.
        fs::create_dir_all(path.join("occupied")).unwrap();

        let mut slot = FileSlot::new(&path);
        assert!(matches!(slot.save(10), Err(StoreError::Io { .. })));
        assert!(!path.with_extension("tmp").exists());
        assert!(path.is_dir());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn garbage_is_corrupt_and_degrades_to_zero() {
        let path = unique_temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "lots\n").unwrap();

        let slot = FileSlot::new(&path);
        assert!(matches!(slot.load(), Err(StoreError::Corrupt { .. })));
        assert_eq!(load_best(&slot), 0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn default_path_ends_in_slot_name() {
        let path = default_path();
        assert!(path.ends_with(Path::new(DIR_NAME).join(FILENAME)));
    }

    #[test]
    fn memory_slot_counts_writes() {
        let mut slot = MemorySlot::with_value(10);
        assert_eq!(load_best(&slot), 10);
        slot.save(20).unwrap();
        assert_eq!(slot.writes(), 1);
        assert_eq!(load_best(&slot), 20);
    }
}
