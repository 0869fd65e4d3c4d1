//! Emotional states and their summary
//!
//! Emotional states are never set directly. They are produced fresh by the
//! emergence rules on every pass and replaced wholesale.

use super::DriveKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary description used when nothing is active
pub const NEUTRAL_DESCRIPTION: &str = "Neutral. Nothing strongly active.";

/// A currently active emotional state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Name of the emerging state
    pub name: String,

    /// Intensity (0.0 to 1.0)
    pub intensity: f64,

    /// Pleasantness (-1.0 to 1.0)
    pub valence: f64,

    /// Activation level (0.0 to 1.0)
    pub arousal: f64,

    /// Drives that produced this state
    pub source_drives: Vec<DriveKind>,

    /// Emerged from more than one drive
    pub is_compound: bool,

    /// Emerged from drives pulling in opposite directions
    pub is_conflict: bool,

    /// What this state feels like
    pub description: String,

    /// Capture time of the drive snapshot this state emerged from
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view over all active emotional states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// Strongest active state
    pub dominant: Option<EmotionalState>,

    /// Intensity-weighted mean valence
    pub valence: f64,

    /// Intensity-weighted mean arousal
    pub arousal: f64,

    /// Number of active states
    pub active_count: usize,

    /// Whether any active state is a conflict state
    pub has_conflict: bool,

    /// Names of active states in catalog order
    pub all_active: Vec<String>,

    /// Description of the dominant state
    pub description: String,
}

impl EmotionSummary {
    /// Summary of an empty emotional landscape
    pub fn neutral() -> Self {
        Self {
            dominant: None,
            valence: 0.0,
            arousal: 0.0,
            active_count: 0,
            has_conflict: false,
            all_active: Vec::new(),
            description: NEUTRAL_DESCRIPTION.to_string(),
        }
    }

    /// The record handed to a visual rendering collaborator
    pub fn render_input(&self) -> RenderInput {
        RenderInput {
            valence: self.valence,
            arousal: self.arousal,
            all_active: self.all_active.clone(),
            has_conflict: self.has_conflict,
            dominant: self.dominant.as_ref().map(|d| DominantRef {
                name: d.name.clone(),
                intensity: d.intensity,
            }),
        }
    }
}

impl Default for EmotionSummary {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Input contract for an external renderer; it never writes back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderInput {
    pub valence: f64,
    pub arousal: f64,
    pub all_active: Vec<String>,
    pub has_conflict: bool,
    pub dominant: Option<DominantRef>,
}

/// Name and intensity of the dominant state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantRef {
    pub name: String,
    pub intensity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_summary() {
        let summary = EmotionSummary::neutral();
        assert!(summary.dominant.is_none());
        assert_eq!(summary.active_count, 0);
        assert_eq!(summary.description, NEUTRAL_DESCRIPTION);

        let input = summary.render_input();
        assert!(input.dominant.is_none());
        assert!(!input.has_conflict);
    }

    #[test]
    fn test_render_input_carries_dominant() {
        let mut summary = EmotionSummary::neutral();
        summary.dominant = Some(EmotionalState {
            name: "wonder".to_string(),
            intensity: 0.8,
            valence: 0.8,
            arousal: 0.7,
            source_drives: vec![DriveKind::Curiosity],
            is_compound: false,
            is_conflict: false,
            description: "Something new is unfolding.".to_string(),
            timestamp: Utc::now(),
        });
        summary.all_active = vec!["wonder".to_string()];

        let input = summary.render_input();
        let dominant = input.dominant.unwrap();
        assert_eq!(dominant.name, "wonder");
        assert_eq!(dominant.intensity, 0.8);
        assert_eq!(input.all_active, vec!["wonder".to_string()]);
    }
}
