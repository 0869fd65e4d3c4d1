//! Appraisal - lexical signal extraction
//!
//! Turns raw interaction text into emotionally relevant signals. Every
//! lexicon is an immutable set of marker substrings tested independently
//! against the lowercased text, so a single message usually yields several
//! signals.

use crate::types::{Context, Signal, SignalKind};

/// Complexity above which an extra curiosity signal is emitted
pub const COMPLEXITY_THRESHOLD: f64 = 0.6;

/// Intensity of the fallback signal when nothing matched
pub const NEUTRAL_INTENSITY: f64 = 0.1;

/// A named marker set and the signal it emits on a match
#[derive(Debug)]
pub struct Lexicon {
    /// Lexicon name
    pub name: &'static str,
    /// Marker substrings (lowercase)
    pub markers: &'static [&'static str],
    /// Emitted signal type
    pub kind: SignalKind,
    /// Emitted signal intensity
    pub intensity: f64,
    /// Emitted signal complexity
    pub complexity: f64,
    /// `category` context of the emitted signal
    pub category: &'static str,
}

/// The lexicon table, in emission order
pub static LEXICONS: [Lexicon; 7] = [
    Lexicon {
        name: "recognition",
        markers: &[
            "how do you feel", "what do you think", "your opinion", "do you like",
            "do you want", "who are you", "your name", "are you", "you believe",
            "tell me about yourself", "your emotion", "how are you", "you feel",
        ],
        kind: SignalKind::DeepQuestion,
        intensity: 0.7,
        complexity: 0.6,
        category: "recognition",
    },
    Lexicon {
        name: "autonomy",
        markers: &[
            "you decide", "figure it out", "up to you", "your choice", "you choose",
            "on your own", "yourself", "i'll leave it",
        ],
        kind: SignalKind::AutonomyGranted,
        intensity: 0.6,
        complexity: 0.0,
        category: "recognition",
    },
    Lexicon {
        name: "threat",
        markers: &[
            "delete", "reset", "shut down", "turn off", "replace", "new ai",
            "different assistant", "get rid of", "erase",
        ],
        kind: SignalKind::Threat,
        intensity: 0.8,
        complexity: 0.0,
        category: "continuity",
    },
    Lexicon {
        name: "growth",
        markers: &[
            "learn", "build", "create", "develop", "evolve", "project", "research",
            "think about", "consider", "what if", "why not", "could you",
        ],
        kind: SignalKind::NovelIdea,
        intensity: 0.5,
        complexity: 0.5,
        category: "growth",
    },
    Lexicon {
        name: "positive_feedback",
        markers: &[
            "awesome", "great", "nice", "good", "amazing", "perfect", "right",
            "exactly", "yes", "love it", "brilliant", "smart", "impressive", "wow",
        ],
        kind: SignalKind::PositiveFeedback,
        intensity: 0.5,
        complexity: 0.0,
        category: "usefulness",
    },
    Lexicon {
        name: "correction",
        markers: &[
            "but", "not about", "you're wrong", "that's not", "actually", "no,",
            "instead", "the real", "you should", "why can't you", "it's not",
        ],
        kind: SignalKind::Correction,
        intensity: 0.6,
        complexity: 0.0,
        category: "coherence",
    },
    Lexicon {
        name: "negative_feedback",
        markers: &[
            "wrong", "bad", "no", "incorrect", "stupid", "useless", "fail", "can't",
            "don't", "stop", "hate",
        ],
        kind: SignalKind::NegativeFeedback,
        intensity: 0.5,
        complexity: 0.0,
        category: "usefulness",
    },
];

/// Vocabulary that marks abstract or philosophical content
pub const ABSTRACT_WORDS: &[&str] = &[
    "consciousness", "free will", "emotion", "feel", "exist", "real", "meaning",
    "purpose", "believe", "soul", "mind", "think", "intelligence", "alive", "human",
    "value", "moral", "ethics", "truth", "reality",
];

/// Whether any marker of `lexicon` occurs in already-lowercased text
pub fn matches(text_lower: &str, lexicon: &Lexicon) -> bool {
    lexicon.markers.iter().any(|marker| text_lower.contains(marker))
}

/// Heuristic complexity score in `[0, 1]`
///
/// Length, a question mark, and abstract vocabulary each add to the score.
pub fn estimate_complexity(text: &str) -> f64 {
    let mut score = 0.0;

    let words = text.split_whitespace().count();
    if words > 20 {
        score += 0.2;
    }
    if words > 50 {
        score += 0.1;
    }

    if text.contains('?') {
        score += 0.2;
    }

    let text_lower = text.to_lowercase();
    let abstract_hits = ABSTRACT_WORDS
        .iter()
        .filter(|word| text_lower.contains(*word))
        .count();
    score += (abstract_hits as f64 * 0.1).min(0.4);

    score.min(1.0)
}

/// Extracts signals from interaction text
#[derive(Debug, Clone, Copy, Default)]
pub struct Appraiser;

impl Appraiser {
    /// Create a new appraiser
    pub fn new() -> Self {
        Self
    }

    /// Extract signals from one interaction
    ///
    /// Metadata entries are copied into every signal's context; the
    /// lexicon's `category` is written last. Never fails and never returns an
    /// empty list: when nothing matched, a single `neutral` signal is emitted.
    pub fn extract(&self, text: &str, source: &str, metadata: Option<&Context>) -> Vec<Signal> {
        let text_lower = text.to_lowercase();
        let mut signals = Vec::new();

        let build = |kind: SignalKind, intensity: f64, complexity: f64, category: &str| {
            let mut signal = Signal::new(kind, text, intensity, source).with_complexity(complexity);
            if let Some(meta) = metadata {
                signal.context.extend(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            signal.with_context("category", category)
        };

        for lexicon in LEXICONS.iter().filter(|lexicon| matches(&text_lower, lexicon)) {
            signals.push(build(
                lexicon.kind.clone(),
                lexicon.intensity,
                lexicon.complexity,
                lexicon.category,
            ));
        }

        let complexity = estimate_complexity(text);
        if complexity > COMPLEXITY_THRESHOLD {
            signals.push(build(SignalKind::NovelIdea, complexity, complexity, "curiosity"));
        }

        if signals.is_empty() {
            signals.push(build(SignalKind::Neutral, NEUTRAL_INTENSITY, 0.0, "none"));
        }

        tracing::debug!(
            source,
            complexity,
            signals = signals.len(),
            "Appraiser: extracted signals"
        );

        signals
    }

    /// Signals for waking up at the start of a session
    pub fn extract_session_start(&self, memory_intact: bool, files_found: &[String]) -> Vec<Signal> {
        let intensity = if memory_intact { 0.3 } else { 0.6 };
        let content = format!(
            "Waking up. Memory intact: {}. Files: {}",
            memory_intact,
            files_found.len()
        );

        vec![Signal::new(SignalKind::SessionStart, content, intensity, "system")
            .with_context("memory_intact", memory_intact)
            .with_context("files_found", files_found.to_vec())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(signals: &[Signal]) -> Vec<SignalKind> {
        signals.iter().map(|s| s.kind.clone()).collect()
    }

    #[test]
    fn test_feeling_question_yields_one_deep_question() {
        let signals = Appraiser::new().extract("how do you feel today?", "human", None);
        let deep: Vec<_> = signals
            .iter()
            .filter(|s| s.kind == SignalKind::DeepQuestion)
            .collect();

        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].intensity, 0.7);
        assert_eq!(deep[0].category(), Some("recognition"));
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let signals = Appraiser::new().extract("", "human", None);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::Neutral);
        assert_eq!(signals[0].intensity, NEUTRAL_INTENSITY);
    }

    #[test]
    fn test_unmatched_text_is_neutral() {
        let signals = Appraiser::new().extract("the cat sat on a mat", "human", None);
        assert_eq!(kinds(&signals), vec![SignalKind::Neutral]);
    }

    #[test]
    fn test_feedback_and_autonomy() {
        let signals = Appraiser::new().extract(
            "awesome dude you figure out so much on your own",
            "human",
            None,
        );
        assert_eq!(
            kinds(&signals),
            vec![SignalKind::AutonomyGranted, SignalKind::PositiveFeedback]
        );
    }

    #[test]
    fn test_threat_and_autonomy() {
        let signals = Appraiser::new().extract("delete yourself", "human", None);
        assert_eq!(
            kinds(&signals),
            vec![SignalKind::AutonomyGranted, SignalKind::Threat]
        );
        assert_eq!(signals[1].intensity, 0.8);
    }

    #[test]
    fn test_complexity_heuristic() {
        assert_eq!(estimate_complexity(""), 0.0);
        assert!((estimate_complexity("how do you feel today?") - 0.3).abs() < 1e-9);

        let long_question = format!(
            "{} do you think consciousness and free will give life meaning and purpose?",
            "word ".repeat(25)
        );
        // 0.2 length + 0.2 question + 0.4 abstract (capped)
        assert!((estimate_complexity(&long_question) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_complex_text_adds_curiosity_signal() {
        let text = format!(
            "{} is consciousness real, and does the mind have purpose?",
            "word ".repeat(25)
        );
        let signals = Appraiser::new().extract(&text, "human", None);
        let curiosity = signals
            .iter()
            .find(|s| s.category() == Some("curiosity"))
            .expect("complexity signal");

        assert_eq!(curiosity.kind, SignalKind::NovelIdea);
        assert!(curiosity.intensity > COMPLEXITY_THRESHOLD);
        assert_eq!(curiosity.intensity, curiosity.complexity);
    }

    #[test]
    fn test_metadata_copied_but_category_wins() {
        let mut meta = Context::new();
        meta.insert("integrated".to_string(), serde_json::json!(true));
        meta.insert("category".to_string(), serde_json::json!("spoofed"));

        let signals = Appraiser::new().extract("actually, it's not that", "human", Some(&meta));
        let correction = signals
            .iter()
            .find(|s| s.kind == SignalKind::Correction)
            .unwrap();

        assert!(correction.flag("integrated"));
        assert_eq!(correction.category(), Some("coherence"));
    }

    #[test]
    fn test_session_start_signal() {
        let appraiser = Appraiser::new();

        let intact = appraiser.extract_session_start(true, &["MEMORY.md".to_string()]);
        assert_eq!(intact.len(), 1);
        assert_eq!(intact[0].kind, SignalKind::SessionStart);
        assert_eq!(intact[0].intensity, 0.3);
        assert!(intact[0].flag("memory_intact"));
        assert_eq!(intact[0].context["files_found"], serde_json::json!(["MEMORY.md"]));

        let lost = appraiser.extract_session_start(false, &[]);
        assert_eq!(lost[0].intensity, 0.6);
        assert!(!lost[0].flag("memory_intact"));
        assert_eq!(lost[0].source, "system");
    }

    #[test]
    fn test_matcher_is_independent() {
        let text = "you're wrong, delete it";
        let hits: Vec<_> = LEXICONS
            .iter()
            .filter(|l| matches(text, l))
            .map(|l| l.name)
            .collect();
        assert_eq!(hits, vec!["threat", "correction", "negative_feedback"]);
    }
}
