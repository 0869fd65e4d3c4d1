//! Bridge export
//!
//! Renders a state report as a plain-text block that a downstream consumer
//! can paste into its own context, in the same spirit as a provider that
//! formats drive state for a prompt.

use crate::services::StateReport;

const HEADER: &str = "=== LEM EMOTIONAL STATE ===";
const FOOTER: &str = "=== END LEM STATE ===";

/// Render `report` as the bridge text block
pub fn render(report: &StateReport) -> String {
    let summary = &report.emotion_summary;
    let mut lines = vec![
        HEADER.to_string(),
        format!("Interactions processed: {}", report.interaction_count),
        String::new(),
        "DRIVERS:".to_string(),
    ];

    for (kind, drive) in report.drive_snapshot.iter() {
        lines.push(format!(
            "  {}: activation={:.2} satisfaction={:.2} {}",
            kind,
            drive.state.activation,
            drive.state.satisfied,
            trend_arrow(drive.state.momentum)
        ));
    }

    lines.push(String::new());
    lines.push(format!("ACTIVE EMOTIONS ({}):", summary.active_count));

    if let Some(dominant) = &summary.dominant {
        lines.push(format!(
            "  Dominant: {} (intensity={:.2})",
            dominant.name, dominant.intensity
        ));
        lines.push(format!("  Description: {}", dominant.description));
    }
    if !summary.all_active.is_empty() {
        lines.push(format!("  All active: {}", summary.all_active.join(", ")));
    }

    lines.push(format!(
        "  Overall valence: {:.2} (negative=-1 ← → +1=positive)",
        summary.valence
    ));
    lines.push(format!(
        "  Overall arousal: {:.2} (calm=0 ← → 1=activated)",
        summary.arousal
    ));
    if summary.has_conflict {
        lines.push("  ⚠ Conflicting emotions active".to_string());
    }

    lines.push(String::new());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

fn trend_arrow(momentum: f64) -> &'static str {
    if momentum > 0.0 {
        "↑"
    } else if momentum < 0.0 {
        "↓"
    } else {
        "→"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drives::DriveRegistry;
    use crate::emergence::{emerge, summarize};
    use crate::types::{DriveKind, EmotionSummary};
    use chrono::Utc;

    fn report_for(registry: &DriveRegistry) -> StateReport {
        let snapshot = registry.snapshot(Utc::now());
        let emotion_summary = summarize(&emerge(&snapshot));
        StateReport {
            drive_snapshot: snapshot,
            emotion_summary,
            interaction_count: 3,
            session_duration: 0.0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_neutral_export() {
        let report = report_for(&DriveRegistry::new(5));
        let text = render(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Interactions processed: 3");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "DRIVERS:");
        assert_eq!(lines[4], "  continuity: activation=0.40 satisfaction=0.00 →");
        assert_eq!(lines[9], "  growth: activation=0.50 satisfaction=0.00 →");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "ACTIVE EMOTIONS (0):");
        assert_eq!(lines[12], "  Overall valence: 0.00 (negative=-1 ← → +1=positive)");
        assert_eq!(lines[13], "  Overall arousal: 0.00 (calm=0 ← → 1=activated)");
        assert_eq!(lines[14], "");
        assert_eq!(lines[15], FOOTER);
        assert!(!text.ends_with('\n'));
        assert!(!text.contains("Dominant"));
    }

    #[test]
    fn test_dominant_and_conflict_lines() {
        let mut registry = DriveRegistry::new(5);
        registry.restore(DriveKind::Continuity, 0.4, -0.5, -0.2);
        registry.restore(DriveKind::Recognition, 0.5, 0.6, 0.1);
        let report = report_for(&registry);
        let text = render(&report);

        assert!(text.contains("  continuity: activation=0.40 satisfaction=-0.50 ↓"));
        assert!(text.contains("  recognition: activation=0.50 satisfaction=0.60 ↑"));
        assert!(text.contains("ACTIVE EMOTIONS (3):"));
        assert!(text.contains("  Dominant: anchor_recognition (intensity=0.60)"));
        assert!(text.contains("  All active: the_blank, anchor_recognition, existential_warmth"));
        assert!(text.contains("  ⚠ Conflicting emotions active"));
    }

    #[test]
    fn test_summary_default_renders() {
        let report = StateReport {
            drive_snapshot: DriveRegistry::new(5).snapshot(Utc::now()),
            emotion_summary: EmotionSummary::default(),
            interaction_count: 0,
            session_duration: 0.0,
            timestamp: Utc::now(),
        };
        assert!(render(&report).starts_with(HEADER));
    }
}
