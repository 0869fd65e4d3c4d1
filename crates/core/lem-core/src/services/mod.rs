//! Services that own mutable engine state
//!
//! - [`LemEngine`]: appraisal, drive updates, emergence and persistence
//! - [`StateStore`]: durable storage of drive state

pub mod engine;
pub mod store;

pub use engine::{EngineState, InteractionResult, LemEngine, StateReport};
pub use store::{LoadOutcome, StateStore};
