//! State store - durable drive state on disk
//!
//! One JSON record per state directory, replaced wholesale on every write.
//! Writes go to a temporary file in the same directory that is then renamed
//! over the record, so a reader never observes a partially written file.
//! Last writer wins.

use crate::config::LemConfig;
use crate::drives::DriveRegistry;
use crate::types::{round4, DriveKind, EmotionalState};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What happened when persisted state was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No state file existed; drives start from defaults
    Fresh,
    /// Drive state was restored from disk
    Restored {
        /// Interaction count carried over from the record
        interaction_count: u64,
    },
    /// The state file was unreadable or malformed and was ignored
    Discarded {
        /// Why the record was rejected
        reason: String,
    },
}

impl LoadOutcome {
    /// Whether a corrupt or unreadable record was thrown away
    pub fn is_discarded(&self) -> bool {
        matches!(self, LoadOutcome::Discarded { .. })
    }
}

#[derive(Serialize)]
struct StateRecord<'a> {
    timestamp: DateTime<Utc>,
    interaction_count: u64,
    #[serde(serialize_with = "serialize_drives")]
    drives: &'a DriveRegistry,
    current_emotions: &'a [EmotionalState],
}

#[derive(Serialize)]
struct PersistedDrive {
    description: &'static str,
    state: PersistedDriveState,
}

#[derive(Serialize)]
struct PersistedDriveState {
    activation: f64,
    satisfied: f64,
    momentum: f64,
}

fn serialize_drives<S: Serializer>(registry: &&DriveRegistry, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(registry.iter().map(|drive| {
        let state = drive.state();
        (
            drive.name(),
            PersistedDrive {
                description: drive.description(),
                state: PersistedDriveState {
                    activation: round4(state.activation()),
                    satisfied: round4(state.satisfied()),
                    momentum: round4(state.momentum()),
                },
            },
        )
    }))
}

#[derive(Deserialize)]
struct LoadedRecord {
    #[serde(default)]
    interaction_count: u64,
    #[serde(default)]
    drives: HashMap<String, LoadedDrive>,
}

#[derive(Deserialize)]
struct LoadedDrive {
    #[serde(default)]
    state: LoadedDriveState,
}

#[derive(Deserialize, Default)]
struct LoadedDriveState {
    activation: Option<f64>,
    satisfied: Option<f64>,
    momentum: Option<f64>,
}

/// File-backed store for one engine's state
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Open the store, creating the state directory if needed
    pub fn open(config: &LemConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.state_dir)?;
        Ok(Self {
            path: config.state_path(),
        })
    }

    /// Location of the state record
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore persisted drive state into `registry`
    ///
    /// Never fails: a missing file means a fresh start, and an unreadable or
    /// malformed file is discarded, leaving `registry` untouched.
    pub fn load_into(&self, registry: &mut DriveRegistry) -> LoadOutcome {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LoadOutcome::Fresh,
            Err(e) => {
                return LoadOutcome::Discarded {
                    reason: format!("unreadable state file: {}", e),
                }
            }
        };

        let record: LoadedRecord = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(e) => {
                return LoadOutcome::Discarded {
                    reason: format!("malformed state file: {}", e),
                }
            }
        };

        for (name, drive) in &record.drives {
            let Some(kind) = DriveKind::from_name(name) else {
                tracing::debug!(drive = %name, "Ignoring unknown drive in state file");
                continue;
            };
            let current = registry.get(kind).state();
            registry.restore(
                kind,
                drive.state.activation.unwrap_or(current.activation()),
                drive.state.satisfied.unwrap_or(current.satisfied()),
                drive.state.momentum.unwrap_or(0.0),
            );
        }

        LoadOutcome::Restored {
            interaction_count: record.interaction_count,
        }
    }

    /// Overwrite the record with the current state
    pub fn save(
        &self,
        registry: &DriveRegistry,
        interaction_count: u64,
        current_emotions: &[EmotionalState],
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let record = StateRecord {
            timestamp,
            interaction_count,
            drives: registry,
            current_emotions,
        };
        let bytes = serde_json::to_vec_pretty(&record)?;
        write_atomic(&self.path, &bytes)
    }
}

/// Replace `path` with `bytes` via a temporary file and a rename
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
