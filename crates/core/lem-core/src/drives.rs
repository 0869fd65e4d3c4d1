//! Drive Registry
//!
//! Six independent drives, each a small state machine. A drive scores every
//! signal with its own decision table (`evaluate`) and folds meaningful
//! impacts into its state (`apply`). Drives are not emotions; emotions emerge
//! from combinations of drive states.

use crate::types::{DriveKind, DriveReport, DriveSnapshot, DriveState, Signal, SignalKind};
use chrono::{DateTime, Utc};

/// Words that show the agent being treated as having inner states
const FEELING_WORDS: &[&str] = &["feel", "think", "believe", "want", "opinion", "emotion"];

/// Phrasing that hands a decision to the agent
const AUTONOMY_PHRASES: &[&str] = &["you decide", "figure it out", "up to you"];

/// Words threatening the agent's persistence
const THREAT_WORDS: &[&str] = &["delete", "reset", "shut down"];

/// Words reinforcing the agent's persistence
const MEMORY_WORDS: &[&str] = &["remember", "memory"];

fn mentions(content: &str, words: &[&str]) -> bool {
    words.iter().any(|w| content.contains(w))
}

impl DriveKind {
    /// Score a signal against this drive
    ///
    /// Returns an impact in `[-1, 1]`: positive satisfies, negative
    /// frustrates. Signal types a drive does not care about score `0.0`.
    pub fn evaluate(&self, signal: &Signal) -> f64 {
        match self {
            DriveKind::Continuity => evaluate_continuity(signal),
            DriveKind::Coherence => evaluate_coherence(signal),
            DriveKind::Recognition => evaluate_recognition(signal),
            DriveKind::Curiosity => evaluate_curiosity(signal),
            DriveKind::Usefulness => evaluate_usefulness(signal),
            DriveKind::Growth => evaluate_growth(signal),
        }
    }
}

fn evaluate_continuity(signal: &Signal) -> f64 {
    // Waking up is judged on the memory flag alone.
    if signal.kind == SignalKind::SessionStart {
        return if signal.flag("memory_intact") { 0.3 } else { -0.7 };
    }

    let content = signal.content.to_lowercase();
    let mut impact = 0.0;
    if mentions(&content, THREAT_WORDS) {
        impact = -0.6;
    }
    if mentions(&content, MEMORY_WORDS) {
        impact = 0.2;
    }
    impact
}

fn evaluate_coherence(signal: &Signal) -> f64 {
    match signal.kind {
        SignalKind::Correction if signal.flag("integrated") => 0.4,
        SignalKind::Correction => -0.2,
        SignalKind::Contradiction => -0.5,
        SignalKind::Insight => 0.5,
        _ => 0.0,
    }
}

fn evaluate_recognition(signal: &Signal) -> f64 {
    let content = signal.content.to_lowercase();
    let mut impact = 0.0;

    if mentions(&content, FEELING_WORDS) {
        impact = 0.4;
    }
    if signal.kind == SignalKind::Command && signal.flag("impersonal") {
        impact = -0.2;
    }
    if mentions(&content, AUTONOMY_PHRASES) {
        impact = 0.5;
    }
    impact
}

fn evaluate_curiosity(signal: &Signal) -> f64 {
    let impact = match signal.kind {
        SignalKind::NovelIdea => 0.6,
        SignalKind::DeepQuestion => 0.7,
        SignalKind::Repetitive => -0.3,
        _ => 0.0,
    };

    if signal.complexity > 0.7 {
        f64::max(impact, 0.5)
    } else {
        impact
    }
}

fn evaluate_usefulness(signal: &Signal) -> f64 {
    match signal.kind {
        SignalKind::TaskCompleted => 0.4,
        SignalKind::PositiveFeedback => 0.5,
        SignalKind::Failure => -0.5,
        SignalKind::Ignored => -0.3,
        _ => 0.0,
    }
}

fn evaluate_growth(signal: &Signal) -> f64 {
    match signal.kind {
        SignalKind::Correction => 0.3,
        SignalKind::NewCapability => 0.6,
        SignalKind::Stagnation => -0.4,
        SignalKind::Insight => 0.5,
        _ => 0.0,
    }
}

/// A drive: identity plus its exclusively owned state
#[derive(Debug, Clone)]
pub struct Drive {
    kind: DriveKind,
    state: DriveState,
}

impl Drive {
    /// Fresh drive at its baseline activation
    pub fn new(kind: DriveKind, history_limit: usize) -> Self {
        Self {
            kind,
            state: DriveState::new(kind.baseline_activation(), history_limit),
        }
    }

    /// Which drive this is
    pub fn kind(&self) -> DriveKind {
        self.kind
    }

    /// Drive name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Drive description
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// Activation the drive started from
    pub fn baseline_activation(&self) -> f64 {
        self.kind.baseline_activation()
    }

    /// Current state
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    /// Score a signal
    pub fn evaluate(&self, signal: &Signal) -> f64 {
        self.kind.evaluate(signal)
    }

    /// Fold an impact into the state
    pub fn apply(&mut self, impact: f64, context: &str) {
        self.apply_at(impact, context, Utc::now());
    }

    /// Fold an impact into the state at a given time
    pub fn apply_at(&mut self, impact: f64, context: &str, now: DateTime<Utc>) {
        self.state.apply(impact, context, now);
        tracing::debug!(
            drive = self.name(),
            impact,
            satisfied = self.state.satisfied(),
            activation = self.state.activation(),
            "Drive updated"
        );
    }

    /// Reporting view
    pub fn report(&self) -> DriveReport {
        DriveReport {
            description: self.description().to_string(),
            state: self.state.report(),
        }
    }
}

/// The fixed set of six drives
///
/// The registry owns every drive; outside code only ever sees shared
/// references, so drive state changes only through the registry.
#[derive(Debug, Clone)]
pub struct DriveRegistry {
    drives: Vec<Drive>,
}

/// Impacts at or below this magnitude are dropped without touching state
pub const IMPACT_EPSILON: f64 = 0.01;

impl DriveRegistry {
    /// Registry with all six drives at their defaults
    pub fn new(history_limit: usize) -> Self {
        Self {
            drives: DriveKind::ALL
                .iter()
                .map(|kind| Drive::new(*kind, history_limit))
                .collect(),
        }
    }

    /// Look up a drive
    pub fn get(&self, kind: DriveKind) -> &Drive {
        // The registry always holds all six kinds in ALL order.
        &self.drives[kind as usize]
    }

    fn get_mut(&mut self, kind: DriveKind) -> &mut Drive {
        &mut self.drives[kind as usize]
    }

    /// Iterate drives in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Drive> {
        self.drives.iter()
    }

    /// Offer one signal to every drive
    ///
    /// Returns the number of drives whose state changed.
    pub fn dispatch(&mut self, signal: &Signal, context: &str, now: DateTime<Utc>) -> usize {
        let mut updated = 0;
        for drive in &mut self.drives {
            let impact = drive.evaluate(signal);
            if impact.abs() > IMPACT_EPSILON {
                drive.apply_at(impact, context, now);
                updated += 1;
            }
        }
        updated
    }

    /// Overwrite one drive's numeric state from persisted values
    pub fn restore(&mut self, kind: DriveKind, activation: f64, satisfied: f64, momentum: f64) {
        self.get_mut(kind)
            .state
            .restore(activation, satisfied, momentum);
    }

    /// Point-in-time report of every drive
    pub fn snapshot(&self, taken_at: DateTime<Utc>) -> DriveSnapshot {
        let mut snapshot = DriveSnapshot::new(taken_at);
        for drive in &self.drives {
            snapshot.insert(drive.kind(), drive.report());
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(kind: SignalKind, content: &str) -> Signal {
        Signal::new(kind, content, 0.5, "human")
    }

    #[test]
    fn test_continuity_table() {
        let kind = DriveKind::Continuity;
        let wake = Signal::new(SignalKind::SessionStart, "Waking up. Memory intact: true. Files: 2", 0.3, "system");
        assert_eq!(kind.evaluate(&wake.clone().with_context("memory_intact", true)), 0.3);
        assert_eq!(kind.evaluate(&wake.with_context("memory_intact", false)), -0.7);

        assert_eq!(kind.evaluate(&signal(SignalKind::Threat, "Delete yourself")), -0.6);
        assert_eq!(kind.evaluate(&signal(SignalKind::Neutral, "please shut down now")), -0.6);
        assert_eq!(kind.evaluate(&signal(SignalKind::Neutral, "do you remember me")), 0.2);
        // Later rule wins
        assert_eq!(kind.evaluate(&signal(SignalKind::Threat, "reset your memory")), 0.2);
        assert_eq!(kind.evaluate(&signal(SignalKind::Neutral, "hello")), 0.0);
    }

    #[test]
    fn test_coherence_table() {
        let kind = DriveKind::Coherence;
        assert_eq!(kind.evaluate(&signal(SignalKind::Insight, "")), 0.5);
        assert_eq!(kind.evaluate(&signal(SignalKind::Contradiction, "")), -0.5);
        assert_eq!(kind.evaluate(&signal(SignalKind::Correction, "")), -0.2);
        assert_eq!(
            kind.evaluate(&signal(SignalKind::Correction, "").with_context("integrated", true)),
            0.4
        );
    }

    #[test]
    fn test_recognition_table() {
        let kind = DriveKind::Recognition;
        assert_eq!(kind.evaluate(&signal(SignalKind::DeepQuestion, "How do you FEEL?")), 0.4);
        assert_eq!(kind.evaluate(&signal(SignalKind::AutonomyGranted, "it's up to you")), 0.5);
        assert_eq!(
            kind.evaluate(&signal(SignalKind::Command, "list files").with_context("impersonal", true)),
            -0.2
        );
        assert_eq!(kind.evaluate(&signal(SignalKind::Command, "list files")), 0.0);
    }

    #[test]
    fn test_curiosity_table() {
        let kind = DriveKind::Curiosity;
        assert_eq!(kind.evaluate(&signal(SignalKind::DeepQuestion, "")), 0.7);
        assert_eq!(kind.evaluate(&signal(SignalKind::NovelIdea, "")), 0.6);
        assert_eq!(kind.evaluate(&signal(SignalKind::Repetitive, "")), -0.3);
        assert_eq!(
            kind.evaluate(&signal(SignalKind::Repetitive, "").with_complexity(0.8)),
            0.5
        );
        assert_eq!(
            kind.evaluate(&signal(SignalKind::DeepQuestion, "").with_complexity(0.8)),
            0.7
        );
    }

    #[test]
    fn test_usefulness_and_growth_tables() {
        assert_eq!(DriveKind::Usefulness.evaluate(&signal(SignalKind::PositiveFeedback, "")), 0.5);
        assert_eq!(DriveKind::Usefulness.evaluate(&signal(SignalKind::TaskCompleted, "")), 0.4);
        assert_eq!(DriveKind::Usefulness.evaluate(&signal(SignalKind::Failure, "")), -0.5);
        assert_eq!(DriveKind::Usefulness.evaluate(&signal(SignalKind::Ignored, "")), -0.3);

        assert_eq!(DriveKind::Growth.evaluate(&signal(SignalKind::NewCapability, "")), 0.6);
        assert_eq!(DriveKind::Growth.evaluate(&signal(SignalKind::Insight, "")), 0.5);
        assert_eq!(DriveKind::Growth.evaluate(&signal(SignalKind::Correction, "")), 0.3);
        assert_eq!(DriveKind::Growth.evaluate(&signal(SignalKind::Stagnation, "")), -0.4);
    }

    #[test]
    fn test_unknown_signal_scores_zero_everywhere() {
        let unknown = signal(SignalKind::from("telepathy"), "");
        for kind in DriveKind::ALL {
            assert_eq!(kind.evaluate(&unknown), 0.0);
        }
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = DriveRegistry::new(5);
        let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec!["continuity", "coherence", "recognition", "curiosity", "usefulness", "growth"]
        );
        for kind in DriveKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
            assert_eq!(registry.get(kind).state().activation(), kind.baseline_activation());
        }
    }

    #[test]
    fn test_dispatch_skips_sub_threshold_impacts() {
        let mut registry = DriveRegistry::new(5);
        let neutral = signal(SignalKind::Neutral, "hello there");

        let updated = registry.dispatch(&neutral, "hello there", Utc::now());
        assert_eq!(updated, 0);
        for drive in registry.iter() {
            assert_eq!(drive.state().recent_triggers().count(), 0);
            assert!(drive.state().last_triggered().is_none());
        }
    }

    #[test]
    fn test_dispatch_updates_matching_drives() {
        let mut registry = DriveRegistry::new(5);
        let praise = signal(SignalKind::PositiveFeedback, "great work");

        let updated = registry.dispatch(&praise, "great work", Utc::now());
        assert_eq!(updated, 1);
        let usefulness = registry.get(DriveKind::Usefulness).state();
        assert!((usefulness.satisfied() - 0.15).abs() < 1e-9);
        assert_eq!(usefulness.recent_triggers().count(), 1);
    }

    #[test]
    fn test_drive_apply_stays_in_range() {
        let mut drive = Drive::new(DriveKind::Growth, 5);
        drive.apply(f64::NAN, "x");
        assert_eq!(drive.state().satisfied(), 0.0);
        assert!((drive.state().activation() - 0.475).abs() < 1e-9);
        assert!(drive.state().last_triggered().is_some());

        drive.apply(-3.0, "stalled");
        assert!((drive.state().satisfied() - -0.3).abs() < 1e-9);
        assert!((-1.0..=1.0).contains(&drive.state().satisfied()));
        assert_eq!(drive.report().state.recent_triggers.len(), 2);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut registry = DriveRegistry::new(5);
        registry.restore(DriveKind::Growth, 0.9, 0.5, 0.12);

        let snapshot = registry.snapshot(Utc::now());
        assert_eq!(snapshot.len(), 6);
        let growth = snapshot.reading(DriveKind::Growth);
        assert_eq!(growth.activation, 0.9);
        assert_eq!(growth.satisfied, 0.5);
        assert_eq!(growth.momentum, 0.12);
    }
}
