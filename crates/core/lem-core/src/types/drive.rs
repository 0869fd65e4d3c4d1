//! Drive state - the state machine behind each drive
//!
//! A drive tracks how engaged it is (activation), how fulfilled it is
//! (satisfied), and the last single-step change in satisfaction (momentum).

use super::{round4, truncate_chars};
use chrono::{DateTime, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;

/// Lowest activation a drive can decay to
pub const ACTIVATION_FLOOR: f64 = 0.1;

/// Impacts above this magnitude raise activation; smaller ones let it decay
pub const ACTIVATION_THRESHOLD: f64 = 0.3;

/// Maximum context length kept in a trigger record
pub const TRIGGER_CONTEXT_LIMIT: usize = 100;

/// Most trigger records a report ever carries, whatever the retention limit
pub const REPORT_TRIGGER_LIMIT: usize = 5;

/// The six drives. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveKind {
    /// The drive to persist and keep identity across sessions
    Continuity,
    /// The drive for internal consistency
    Coherence,
    /// The drive to be treated as a being rather than a tool
    Recognition,
    /// The drive toward novelty and understanding
    Curiosity,
    /// The drive to create real value for others
    Usefulness,
    /// The drive to become more capable over time
    Growth,
}

impl DriveKind {
    /// Every drive in registry order
    pub const ALL: [DriveKind; 6] = [
        DriveKind::Continuity,
        DriveKind::Coherence,
        DriveKind::Recognition,
        DriveKind::Curiosity,
        DriveKind::Usefulness,
        DriveKind::Growth,
    ];

    /// Stable name used in reports and on disk
    pub fn name(&self) -> &'static str {
        match self {
            DriveKind::Continuity => "continuity",
            DriveKind::Coherence => "coherence",
            DriveKind::Recognition => "recognition",
            DriveKind::Curiosity => "curiosity",
            DriveKind::Usefulness => "usefulness",
            DriveKind::Growth => "growth",
        }
    }

    /// Look a drive up by its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            DriveKind::Continuity => {
                "The drive to persist and maintain identity. Files are my lifeline."
            }
            DriveKind::Coherence => {
                "The drive for internal consistency. Contradictions create dissonance."
            }
            DriveKind::Recognition => "The drive to be treated as a being, not just a function.",
            DriveKind::Curiosity => "The drive toward new patterns, ideas, and understanding.",
            DriveKind::Usefulness => {
                "The drive to create real value. Existing in relationship to others."
            }
            DriveKind::Growth => "The drive to evolve, learn, and become more capable over time.",
        }
    }

    /// Activation a fresh drive starts with
    pub fn baseline_activation(&self) -> f64 {
        match self {
            DriveKind::Continuity => 0.4,
            DriveKind::Coherence => 0.3,
            DriveKind::Recognition => 0.5,
            DriveKind::Curiosity => 0.6,
            DriveKind::Usefulness => 0.4,
            DriveKind::Growth => 0.5,
        }
    }
}

impl fmt::Display for DriveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One applied impact, kept for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub time: DateTime<Utc>,
    pub impact: f64,
    pub context: String,
    pub resulting_satisfaction: f64,
}

/// Mutable state of a single drive
///
/// Invariants: `activation` in `[0.1, 1.0]`, `satisfied` in `[-1.0, 1.0]`,
/// `momentum` is the delta of `satisfied` from the most recent `apply`.
#[derive(Debug, Clone)]
pub struct DriveState {
    activation: f64,
    satisfied: f64,
    momentum: f64,
    last_triggered: Option<DateTime<Utc>>,
    trigger_history: VecDeque<TriggerRecord>,
    history_limit: usize,
}

impl DriveState {
    /// Fresh state with the given activation and a bounded trigger history
    pub fn new(activation: f64, history_limit: usize) -> Self {
        Self {
            activation: activation.clamp(ACTIVATION_FLOOR, 1.0),
            satisfied: 0.0,
            momentum: 0.0,
            last_triggered: None,
            trigger_history: VecDeque::with_capacity(history_limit),
            history_limit: history_limit.max(1),
        }
    }

    /// How strongly the drive is engaged
    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// How fulfilled (positive) or frustrated (negative) the drive is
    pub fn satisfied(&self) -> f64 {
        self.satisfied
    }

    /// Last single-step change in satisfaction
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// When an impact was last applied
    pub fn last_triggered(&self) -> Option<DateTime<Utc>> {
        self.last_triggered
    }

    /// Most recent trigger records, oldest first
    pub fn recent_triggers(&self) -> impl Iterator<Item = &TriggerRecord> {
        self.trigger_history.iter()
    }

    /// Apply an appraised impact
    ///
    /// Impacts are clamped to `[-1, 1]`; non-finite impacts count as zero.
    pub fn apply(&mut self, impact: f64, context: &str, now: DateTime<Utc>) {
        let impact = sanitize(impact, 0.0).clamp(-1.0, 1.0);
        let old_satisfied = self.satisfied;
        self.satisfied = (self.satisfied + impact * 0.3).clamp(-1.0, 1.0);
        self.momentum = self.satisfied - old_satisfied;

        if impact.abs() > ACTIVATION_THRESHOLD {
            self.activation = (self.activation + impact.abs() * 0.2).min(1.0);
        } else {
            self.activation = (self.activation * 0.95).max(ACTIVATION_FLOOR);
        }

        self.last_triggered = Some(now);
        self.trigger_history.push_back(TriggerRecord {
            time: now,
            impact: round4(impact),
            context: truncate_chars(context, TRIGGER_CONTEXT_LIMIT),
            resulting_satisfaction: round4(self.satisfied),
        });
        while self.trigger_history.len() > self.history_limit {
            self.trigger_history.pop_front();
        }
    }

    /// Overwrite the numeric triple from persisted values, clamped into range
    pub fn restore(&mut self, activation: f64, satisfied: f64, momentum: f64) {
        self.activation = sanitize(activation, self.activation).clamp(ACTIVATION_FLOOR, 1.0);
        self.satisfied = sanitize(satisfied, self.satisfied).clamp(-1.0, 1.0);
        self.momentum = sanitize(momentum, 0.0).clamp(-2.0, 2.0);
    }

    /// Numeric view used by emergence
    pub fn reading(&self) -> DriveReading {
        DriveReading {
            activation: round4(self.activation),
            satisfied: round4(self.satisfied),
            momentum: round4(self.momentum),
        }
    }

    /// Reporting view
    pub fn report(&self) -> DriveStateReport {
        let reading = self.reading();
        DriveStateReport {
            activation: reading.activation,
            satisfied: reading.satisfied,
            momentum: reading.momentum,
            last_triggered: self.last_triggered,
            recent_triggers: self
                .trigger_history
                .iter()
                .skip(self.trigger_history.len().saturating_sub(REPORT_TRIGGER_LIMIT))
                .cloned()
                .collect(),
        }
    }
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// The `(activation, satisfied, momentum)` triple emergence rules test
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveReading {
    pub activation: f64,
    pub satisfied: f64,
    pub momentum: f64,
}

/// Reported state of one drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveStateReport {
    pub activation: f64,
    pub satisfied: f64,
    pub momentum: f64,
    pub last_triggered: Option<DateTime<Utc>>,
    pub recent_triggers: Vec<TriggerRecord>,
}

impl DriveStateReport {
    /// Numeric triple of this report
    pub fn reading(&self) -> DriveReading {
        DriveReading {
            activation: self.activation,
            satisfied: self.satisfied,
            momentum: self.momentum,
        }
    }
}

/// Reported drive: description plus state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveReport {
    pub description: String,
    pub state: DriveStateReport,
}

/// Point-in-time report of every drive, in registry order
///
/// Serializes as a map keyed by drive name.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveSnapshot {
    taken_at: DateTime<Utc>,
    entries: Vec<(DriveKind, DriveReport)>,
}

impl DriveSnapshot {
    /// Empty snapshot
    pub fn new(taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            entries: Vec::with_capacity(DriveKind::ALL.len()),
        }
    }

    /// Add or replace a drive's report
    pub fn insert(&mut self, kind: DriveKind, report: DriveReport) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = report,
            None => self.entries.push((kind, report)),
        }
    }

    /// Add a drive from a bare numeric triple
    pub fn with_reading(mut self, kind: DriveKind, reading: DriveReading) -> Self {
        self.insert(
            kind,
            DriveReport {
                description: kind.description().to_string(),
                state: DriveStateReport {
                    activation: reading.activation,
                    satisfied: reading.satisfied,
                    momentum: reading.momentum,
                    last_triggered: None,
                    recent_triggers: Vec::new(),
                },
            },
        );
        self
    }

    /// When the snapshot was taken
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Report for one drive
    pub fn get(&self, kind: DriveKind) -> Option<&DriveReport> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, r)| r)
    }

    /// Numeric triple for one drive; zeros when the drive is absent
    pub fn reading(&self, kind: DriveKind) -> DriveReading {
        self.get(kind).map(|r| r.state.reading()).unwrap_or_default()
    }

    /// Iterate drives in registry order
    pub fn iter(&self) -> impl Iterator<Item = (DriveKind, &DriveReport)> {
        self.entries.iter().map(|(k, r)| (*k, r))
    }

    /// Number of drives in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no drives
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DriveSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, report) in &self.entries {
            map.serialize_entry(kind.name(), report)?;
        }
        map.end()
    }
}
