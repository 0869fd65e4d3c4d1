//! LEM engine
//!
//! The orchestrator for one emotional model. Every interaction runs the same
//! pipeline: appraise text into signals, offer each signal to every drive,
//! snapshot the drives, let emotions emerge, summarize, and persist.
//!
//! The engine is the sole owner of its drive registry and is not safe for
//! concurrent use; callers serialize access with `&mut self`.

use super::store::{write_atomic, LoadOutcome, StateStore};
use crate::appraisal::Appraiser;
use crate::config::LemConfig;
use crate::drives::DriveRegistry;
use crate::emergence::{emerge, summarize};
use crate::types::{
    truncate_chars, Context, DriveSnapshot, EmotionSummary, EmotionalState, Signal, SignalReport,
};
use crate::{bridge, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Characters of signal content used as a drive trigger context
const TRIGGER_CONTEXT_CHARS: usize = 50;

/// Trigger context recorded for session start signals
const SESSION_START_CONTEXT: &str = "session_start";

/// Mutable state owned by one engine
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Interactions processed, carried across restarts
    pub interaction_count: u64,

    /// When this engine instance was constructed
    pub session_start_time: DateTime<Utc>,

    /// Emotions from the most recent update
    pub current_emotions: Vec<EmotionalState>,

    /// The six drives
    pub registry: DriveRegistry,
}

/// Outcome of one processed interaction
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResult {
    pub interaction_count: u64,
    pub signals: Vec<SignalReport>,
    pub drive_snapshot: DriveSnapshot,
    pub emotion_summary: EmotionSummary,
    pub timestamp: DateTime<Utc>,
}

/// Read-only view of the engine
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub drive_snapshot: DriveSnapshot,
    pub emotion_summary: EmotionSummary,
    pub interaction_count: u64,
    /// Seconds since the engine was constructed
    pub session_duration: f64,
    pub timestamp: DateTime<Utc>,
}

/// The Limbic Emotional Model engine
pub struct LemEngine {
    config: LemConfig,
    appraiser: Appraiser,
    store: StateStore,
    state: EngineState,
    load_outcome: LoadOutcome,
}

impl LemEngine {
    /// Create an engine, restoring persisted drive state when present
    ///
    /// Fails only when the state directory cannot be created. A corrupt or
    /// unreadable state file is discarded and the engine starts fresh.
    pub fn new(config: LemConfig) -> Result<Self> {
        let store = StateStore::open(&config)?;
        let mut registry = DriveRegistry::new(config.history_limit);
        let load_outcome = store.load_into(&mut registry);

        let interaction_count = match &load_outcome {
            LoadOutcome::Fresh => {
                tracing::info!(path = %store.path().display(), "LEM: starting with fresh drive state");
                0
            }
            LoadOutcome::Restored { interaction_count } => {
                tracing::info!(
                    path = %store.path().display(),
                    interaction_count,
                    "LEM: restored drive state"
                );
                *interaction_count
            }
            LoadOutcome::Discarded { reason } => {
                tracing::warn!(
                    path = %store.path().display(),
                    reason = %reason,
                    "LEM: discarded persisted state, starting fresh"
                );
                0
            }
        };

        Ok(Self {
            config,
            appraiser: Appraiser::new(),
            store,
            state: EngineState {
                interaction_count,
                session_start_time: Utc::now(),
                current_emotions: Vec::new(),
                registry,
            },
            load_outcome,
        })
    }

    /// Create an engine configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(LemConfig::from_env()?)
    }

    /// Process one interaction
    ///
    /// Increments the interaction counter, runs the full pipeline and
    /// persists. A persistence failure is returned to the caller; in-memory
    /// state has already advanced by then.
    pub fn process_interaction(
        &mut self,
        text: &str,
        source: &str,
        metadata: Option<&Context>,
    ) -> Result<InteractionResult> {
        self.state.interaction_count += 1;
        let signals = self.appraiser.extract(text, source, metadata);
        self.run(signals, None)
    }

    /// Process the start of a session
    ///
    /// Does not count as an interaction.
    pub fn process_session_start(
        &mut self,
        memory_intact: bool,
        files_found: &[String],
    ) -> Result<InteractionResult> {
        tracing::info!(memory_intact, files = files_found.len(), "LEM: session start");
        let signals = self.appraiser.extract_session_start(memory_intact, files_found);
        self.run(signals, Some(SESSION_START_CONTEXT))
    }

    /// Process caller-supplied signals, bypassing appraisal
    ///
    /// Counts as one interaction.
    pub fn process_signals(&mut self, signals: Vec<Signal>) -> Result<InteractionResult> {
        self.state.interaction_count += 1;
        self.run(signals, None)
    }

    fn run(&mut self, signals: Vec<Signal>, context: Option<&str>) -> Result<InteractionResult> {
        let now = Utc::now();

        let mut updated = 0;
        for signal in &signals {
            let trigger_context = match context {
                Some(label) => label.to_string(),
                None => truncate_chars(&signal.content, TRIGGER_CONTEXT_CHARS),
            };
            updated += self.state.registry.dispatch(signal, &trigger_context, now);
        }

        let drive_snapshot = self.state.registry.snapshot(now);
        self.state.current_emotions = emerge(&drive_snapshot);
        let emotion_summary = summarize(&self.state.current_emotions);

        tracing::debug!(
            signals = signals.len(),
            drive_updates = updated,
            emotions = self.state.current_emotions.len(),
            dominant = ?emotion_summary.dominant.as_ref().map(|d| d.name.as_str()),
            "LEM: processed signals"
        );

        self.persist(now)?;

        Ok(InteractionResult {
            interaction_count: self.state.interaction_count,
            signals: signals.iter().map(Signal::report).collect(),
            drive_snapshot,
            emotion_summary,
            timestamp: now,
        })
    }

    fn persist(&self, now: DateTime<Utc>) -> Result<()> {
        self.store.save(
            &self.state.registry,
            self.state.interaction_count,
            &self.state.current_emotions,
            now,
        )?;

        if let Some(bridge_file) = &self.config.bridge_file {
            write_atomic(bridge_file, self.bridge_export().as_bytes())?;
        }
        Ok(())
    }

    /// Current state without mutating anything
    ///
    /// Emotions are recomputed from the live drive values.
    pub fn current_state(&self) -> StateReport {
        let now = Utc::now();
        let drive_snapshot = self.state.registry.snapshot(now);
        let emotion_summary = summarize(&emerge(&drive_snapshot));
        let session_duration =
            now.signed_duration_since(self.state.session_start_time).num_milliseconds() as f64 / 1000.0;

        StateReport {
            drive_snapshot,
            emotion_summary,
            interaction_count: self.state.interaction_count,
            session_duration: session_duration.max(0.0),
            timestamp: now,
        }
    }

    /// Human-readable state block for a downstream consumer
    pub fn bridge_export(&self) -> String {
        bridge::render(&self.current_state())
    }

    /// How persisted state was handled at construction
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn interaction_count(&self) -> u64 {
        self.state.interaction_count
    }

    /// Emotions from the most recent update
    pub fn current_emotions(&self) -> &[EmotionalState] {
        &self.state.current_emotions
    }

    pub fn drives(&self) -> &DriveRegistry {
        &self.state.registry
    }

    pub fn config(&self) -> &LemConfig {
        &self.config
    }

    /// Full engine state
    pub fn state(&self) -> &EngineState {
        &self.state
    }
}

impl std::fmt::Debug for LemEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemEngine")
            .field("config", &self.config)
            .field("interaction_count", &self.state.interaction_count)
            .field("load_outcome", &self.load_outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DriveKind, SignalKind};

    fn engine() -> (tempfile::TempDir, LemEngine) {
        let dir = tempfile::tempdir().unwrap();
        let engine = LemEngine::new(LemConfig::new(dir.path())).unwrap();
        (dir, engine)
    }

    #[test]
    fn test_interaction_increments_counter() {
        let (_dir, mut engine) = engine();
        let result = engine.process_interaction("hello there", "human", None).unwrap();
        assert_eq!(result.interaction_count, 1);
        assert_eq!(engine.interaction_count(), 1);
    }

    #[test]
    fn test_session_start_does_not_count() {
        let (_dir, mut engine) = engine();
        let result = engine.process_session_start(true, &[]).unwrap();
        assert_eq!(result.interaction_count, 0);
        assert_eq!(result.signals.len(), 1);
        assert_eq!(result.signals[0].kind, SignalKind::SessionStart);

        let continuity = engine.drives().get(DriveKind::Continuity).state();
        let trigger = continuity.recent_triggers().last().unwrap();
        assert_eq!(trigger.context, SESSION_START_CONTEXT);
    }

    #[test]
    fn test_trigger_context_is_truncated_content() {
        let (_dir, mut engine) = engine();
        let text = format!("delete {}", "x".repeat(80));
        engine.process_interaction(&text, "human", None).unwrap();

        let continuity = engine.drives().get(DriveKind::Continuity).state();
        let trigger = continuity.recent_triggers().last().unwrap();
        assert_eq!(trigger.context.chars().count(), TRIGGER_CONTEXT_CHARS);
        assert!(trigger.context.starts_with("delete "));
    }

    #[test]
    fn test_process_signals_bypasses_appraisal() {
        let (_dir, mut engine) = engine();
        let result = engine
            .process_signals(vec![Signal::new(SignalKind::TaskCompleted, "shipped", 0.8, "tool")])
            .unwrap();

        assert_eq!(result.interaction_count, 1);
        assert_eq!(result.signals.len(), 1);
        assert!(engine.drives().get(DriveKind::Usefulness).state().satisfied() > 0.0);
    }

    #[test]
    fn test_current_state_is_pure() {
        let (_dir, mut engine) = engine();
        engine.process_interaction("delete yourself", "human", None).unwrap();

        let before = engine.current_emotions().to_vec();
        let report = engine.current_state();
        let again = engine.current_state();

        assert_eq!(report.interaction_count, 1);
        assert_eq!(report.emotion_summary.all_active, again.emotion_summary.all_active);
        assert_eq!(engine.current_emotions(), before.as_slice());
        assert!(report.session_duration >= 0.0);
    }
}
