//! Core data types for the LEM
//!
//! Plain data shared by the pipeline stages:
//! - Signal: a typed, intensity-scored unit of evidence from interaction text
//! - DriveState: the activation/satisfaction/momentum triple of one drive
//! - DriveSnapshot: a point-in-time report of every drive
//! - EmotionalState: a named state emerging from drive values

mod drive;
mod emotion;
mod signal;

pub use drive::*;
pub use emotion::*;
pub use signal::*;

/// Round to four decimals, the precision used in every report and on disk
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Truncate to at most `max` characters without splitting a code point
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(-0.18), -0.18);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
