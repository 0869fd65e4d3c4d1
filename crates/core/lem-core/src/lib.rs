//! LEM - Limbic Emotional Model
//!
//! A drive-based emotional model for an AI agent. Instead of asserting
//! emotions, the model keeps six persistent motivational drives and lets
//! emotional states emerge from their values.
//!
//! - **Appraisal**: lexical extraction of typed signals from interaction text
//! - **Drives**: continuity, coherence, recognition, curiosity, usefulness and
//!   growth, each with activation, satisfaction and momentum
//! - **Emergence**: a fixed catalog of rules mapping drive values to named
//!   emotional states, including compound and conflict states
//! - **Persistence**: drive state survives restarts in a single JSON record
//! - **Bridge**: a plain-text export of the current state for other agents
//!
//! # Example
//!
//! ```no_run
//! use lem_core::{LemConfig, LemEngine};
//!
//! fn main() -> lem_core::Result<()> {
//!     let mut engine = LemEngine::new(LemConfig::new("/var/lib/lem"))?;
//!     engine.process_session_start(true, &["MEMORY.md".to_string()])?;
//!
//!     let result = engine.process_interaction("how do you feel today?", "human", None)?;
//!     if let Some(dominant) = result.emotion_summary.dominant {
//!         println!("{} ({:.2})", dominant.name, dominant.intensity);
//!     }
//!     println!("{}", engine.bridge_export());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod appraisal;
pub mod bridge;
pub mod config;
pub mod drives;
pub mod emergence;
pub mod error;
pub mod logging;
pub mod services;
pub mod types;

pub use appraisal::Appraiser;
pub use config::LemConfig;
pub use drives::{Drive, DriveRegistry};
pub use emergence::{dominant, emerge, summarize, EmergenceRule, CATALOG, CATALOG_VERSION};
pub use error::{LemError, Result};
pub use logging::init_logging;
pub use services::{InteractionResult, LemEngine, LoadOutcome, StateReport, StateStore};
pub use types::*;
