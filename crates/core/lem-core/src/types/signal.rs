//! Signals - the evidence drives react to

use super::{round4, truncate_chars};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Free-form signal context (category, caller metadata, session flags)
pub type Context = HashMap<String, serde_json::Value>;

/// Maximum content length carried in a signal report
pub const REPORT_CONTENT_LIMIT: usize = 200;

/// Kind of an emotionally relevant signal
///
/// The lexical extractor produces a subset of these; the rest are outcome
/// signals supplied directly by the caller. Anything unrecognized is kept as
/// `Other` and every drive scores it at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SignalKind {
    DeepQuestion,
    AutonomyGranted,
    Threat,
    NovelIdea,
    PositiveFeedback,
    Correction,
    NegativeFeedback,
    Neutral,
    SessionStart,
    Contradiction,
    Insight,
    Command,
    Repetitive,
    TaskCompleted,
    Failure,
    Ignored,
    NewCapability,
    Stagnation,
    Other(String),
}

impl SignalKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            SignalKind::DeepQuestion => "deep_question",
            SignalKind::AutonomyGranted => "autonomy_granted",
            SignalKind::Threat => "threat",
            SignalKind::NovelIdea => "novel_idea",
            SignalKind::PositiveFeedback => "positive_feedback",
            SignalKind::Correction => "correction",
            SignalKind::NegativeFeedback => "negative_feedback",
            SignalKind::Neutral => "neutral",
            SignalKind::SessionStart => "session_start",
            SignalKind::Contradiction => "contradiction",
            SignalKind::Insight => "insight",
            SignalKind::Command => "command",
            SignalKind::Repetitive => "repetitive",
            SignalKind::TaskCompleted => "task_completed",
            SignalKind::Failure => "failure",
            SignalKind::Ignored => "ignored",
            SignalKind::NewCapability => "new_capability",
            SignalKind::Stagnation => "stagnation",
            SignalKind::Other(name) => name,
        }
    }
}

impl From<&str> for SignalKind {
    fn from(name: &str) -> Self {
        match name {
            "deep_question" => SignalKind::DeepQuestion,
            "autonomy_granted" => SignalKind::AutonomyGranted,
            "threat" => SignalKind::Threat,
            "novel_idea" => SignalKind::NovelIdea,
            "positive_feedback" => SignalKind::PositiveFeedback,
            "correction" => SignalKind::Correction,
            "negative_feedback" => SignalKind::NegativeFeedback,
            "neutral" => SignalKind::Neutral,
            "session_start" => SignalKind::SessionStart,
            "contradiction" => SignalKind::Contradiction,
            "insight" => SignalKind::Insight,
            "command" => SignalKind::Command,
            "repetitive" => SignalKind::Repetitive,
            "task_completed" => SignalKind::TaskCompleted,
            "failure" => SignalKind::Failure,
            "ignored" => SignalKind::Ignored,
            "new_capability" => SignalKind::NewCapability,
            "stagnation" => SignalKind::Stagnation,
            other => SignalKind::Other(other.to_string()),
        }
    }
}

impl From<String> for SignalKind {
    fn from(name: String) -> Self {
        SignalKind::from(name.as_str())
    }
}

impl From<SignalKind> for String {
    fn from(kind: SignalKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emotionally relevant signal extracted from an interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal type
    #[serde(rename = "type")]
    pub kind: SignalKind,

    /// Raw content that triggered the signal
    pub content: String,

    /// Strength of the signal (0.0 to 1.0)
    pub intensity: f64,

    /// Who or what produced the interaction
    pub source: String,

    /// Additional context
    #[serde(default)]
    pub context: Context,

    /// How complex or novel the interaction is (0.0 to 1.0)
    #[serde(default)]
    pub complexity: f64,
}

impl Signal {
    /// Create a new signal with empty context and zero complexity
    pub fn new(
        kind: impl Into<SignalKind>,
        content: impl Into<String>,
        intensity: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
            intensity: intensity.clamp(0.0, 1.0),
            source: source.into(),
            context: Context::new(),
            complexity: 0.0,
        }
    }

    /// Add a context entry
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Set the complexity score
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = complexity.clamp(0.0, 1.0);
        self
    }

    /// The `category` context entry, if any
    pub fn category(&self) -> Option<&str> {
        self.context.get("category").and_then(|v| v.as_str())
    }

    /// Whether a context entry is present and truthy
    ///
    /// `null`, `false`, zero, and empty strings/arrays/objects are falsy.
    pub fn flag(&self, key: &str) -> bool {
        match self.context.get(key) {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Array(a)) => !a.is_empty(),
            Some(serde_json::Value::Object(o)) => !o.is_empty(),
        }
    }

    /// Reporting view with bounded content and rounded scores
    pub fn report(&self) -> SignalReport {
        SignalReport {
            kind: self.kind.clone(),
            content: truncate_chars(&self.content, REPORT_CONTENT_LIMIT),
            intensity: round4(unit_score(self.intensity)),
            source: self.source.clone(),
            complexity: round4(unit_score(self.complexity)),
        }
    }
}

/// Clamp into `[0, 1]`, mapping non-finite values to zero
fn unit_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Signal as it appears in interaction results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub content: String,
    pub intensity: f64,
    pub source: String,
    pub complexity: f64,
}
