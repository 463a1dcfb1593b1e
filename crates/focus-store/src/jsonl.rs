//! Line-delimited JSON session store
//!
//! Each line of `sessions.jsonl` holds one serialized session. The store
//! lives in the platform data directory:
//! - Linux: `$XDG_DATA_HOME/focus` or `~/.local/share/focus`
//! - macOS: `~/Library/Application Support/focus`
//! - Windows: `%APPDATA%\focus`
//!
//! You can override the directory using the `FOCUS_DATA_PATH` environment variable.
//!
//! # Examples
//!
//! ```no_run
//! use focus_core::source::SessionSource;
//! use focus_store::JsonlStore;
//!
//! # fn example() -> focus_core::Result<()> {
//! let store = JsonlStore::new()?;
//! let records = store.get_sessions(None, None)?;
//! println!("{} sessions recorded", records.len());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use focus_core::error::{FocusError, Result};
use focus_core::source::SessionSource;
use focus_core::types::Session;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable that overrides the data directory
pub const DATA_PATH_ENV: &str = "FOCUS_DATA_PATH";

const SESSIONS_FILE: &str = "sessions.jsonl";

/// Only the field a range query needs
#[derive(Deserialize)]
struct RecordKey {
    start_time: DateTime<Utc>,
}

/// Session store backed by a `.jsonl` file
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    closed: bool,
}

impl JsonlStore {
    /// Open the store in the default data directory, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns [`FocusError::NoDataDirectory`] when no data directory can be
    /// determined, or a storage error when it cannot be created.
    pub fn new() -> Result<Self> {
        let dir = Self::discover_data_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(Self::open(dir.join(SESSIONS_FILE)))
    }

    /// Use `path` as the sessions file. The file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!("Using session store at {}", path.display());
        Self {
            path,
            closed: false,
        }
    }

    fn discover_data_dir() -> Result<PathBuf> {
        if let Ok(custom_path) = std::env::var(DATA_PATH_ENV) {
            debug!("Using {} override: {}", DATA_PATH_ENV, custom_path);
            return Ok(PathBuf::from(custom_path));
        }

        dirs::data_dir()
            .map(|dir| dir.join("focus"))
            .ok_or(FocusError::NoDataDirectory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a session record
    pub fn insert(&mut self, session: &Session) -> Result<()> {
        let line = serde_json::to_string(session)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Every non-blank line with its start time, in file order
    fn read_records(&self) -> Result<Vec<(DateTime<Utc>, String)>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Session file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let key: RecordKey = serde_json::from_str(&line)?;
            records.push((key.start_time, line));
        }
        Ok(records)
    }
}

fn in_range(t: DateTime<Utc>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    start.is_none_or(|s| t >= s) && end.is_none_or(|e| t <= e)
}

impl SessionSource for JsonlStore {
    fn get_sessions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<String>> {
        let mut records: Vec<_> = self
            .read_records()?
            .into_iter()
            .filter(|(t, _)| in_range(*t, start, end))
            .collect();
        records.sort_by_key(|(t, _)| *t);

        debug!("Loaded {} session records", records.len());
        Ok(records.into_iter().map(|(_, line)| line).collect())
    }

    fn delete_sessions(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let records = self.read_records()?;
        let before = records.len();
        let kept: Vec<_> = records
            .into_iter()
            .filter(|(t, _)| !in_range(*t, start, end))
            .collect();

        if kept.len() == before {
            return Ok(());
        }

        let tmp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            for (_, line) in &kept {
                writeln!(writer, "{line}")?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        info!("Deleted {} sessions", before - kept.len());
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            debug!("Closed session store at {}", self.path.display());
        }
    }
}
