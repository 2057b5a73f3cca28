//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (implemented/completed, successful actions)
//!   - Warning/Active: yellow  (approved/accepted/in-progress, warning cycles)
//!   - Error/Retired:  red     (deprecated/superseded/rejected, critical cycles)
//!   - Info/Reference: cyan    (artifact IDs)
//!   - Muted:          dimmed  (field labels, low-priority tasks)
//!   - Emphasis:       bold    (section headers)
//!   - Default:        white   (tentative statuses)

use crate::domain::{ArtifactStatus, ArtifactType};
use crate::graph::CycleSeverity;
use crate::impact::TaskPriority;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply color to status text based on artifact status.
pub(crate) fn colorize_status(status: ArtifactStatus, config: &OutputConfig) -> String {
    let text = format!("{status}");
    if !config.use_colors {
        return text;
    }
    if status.is_retired() {
        return text.red().to_string();
    }
    match status {
        ArtifactStatus::Implemented | ArtifactStatus::Completed => text.green().to_string(),
        ArtifactStatus::Approved | ArtifactStatus::Accepted | ArtifactStatus::InProgress => {
            text.yellow().to_string()
        }
        _ => text.white().to_string(),
    }
}

/// Apply color to a cycle severity label.
pub(crate) fn colorize_severity(severity: CycleSeverity, config: &OutputConfig) -> String {
    let text = format!("{severity}");
    if !config.use_colors {
        return text;
    }
    match severity {
        CycleSeverity::Warning => text.yellow().to_string(),
        CycleSeverity::Critical => text.red().bold().to_string(),
    }
}

/// Apply color to a checklist task priority.
pub(crate) fn colorize_priority(priority: TaskPriority, config: &OutputConfig) -> String {
    let text = format!("{priority}");
    if !config.use_colors {
        return text;
    }
    match priority {
        TaskPriority::High => text.red().bold().to_string(),
        TaskPriority::Medium => text.yellow().to_string(),
        TaskPriority::Low => text.to_string(),
    }
}

/// Colorize an artifact ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Get a colored status icon, with ASCII fallback support.
pub(crate) fn colored_status_icon(status: ArtifactStatus, config: &OutputConfig) -> String {
    let icon = status_icon(status, config);

    if !config.use_colors {
        return icon.to_string();
    }

    if status.is_retired() {
        return icon.red().to_string();
    }
    match status {
        ArtifactStatus::Implemented | ArtifactStatus::Completed => icon.green().to_string(),
        ArtifactStatus::Approved | ArtifactStatus::Accepted | ArtifactStatus::InProgress => {
            icon.yellow().to_string()
        }
        _ => icon.white().to_string(),
    }
}

/// Get a status icon, with ASCII fallback support.
pub(crate) fn status_icon(status: ArtifactStatus, config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        if status.is_retired() {
            return "x";
        }
        match status {
            ArtifactStatus::Implemented | ArtifactStatus::Completed => "+",
            ArtifactStatus::Approved | ArtifactStatus::Accepted | ArtifactStatus::InProgress => {
                ">"
            }
            _ => "o",
        }
    } else {
        if status.is_retired() {
            return "✗";
        }
        match status {
            ArtifactStatus::Implemented | ArtifactStatus::Completed => "✓",
            ArtifactStatus::Approved | ArtifactStatus::Accepted | ArtifactStatus::InProgress => {
                "▶"
            }
            _ => "○",
        }
    }
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply cyan color to text (for arrows/connectors).
pub(crate) fn cyan(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply yellow color to text (for arrows/connectors).
pub(crate) fn yellow(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Get a type icon for artifact types, with ASCII fallback support.
pub(crate) fn type_icon(artifact_type: ArtifactType, config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        match artifact_type {
            ArtifactType::Rfc => "#",
            ArtifactType::Adr => "*",
            ArtifactType::Decomposition => "-",
        }
    } else {
        match artifact_type {
            ArtifactType::Rfc => "◆",
            ArtifactType::Adr => "●",
            ArtifactType::Decomposition => "◇",
        }
    }
}

/// Get a colored type icon for artifact types.
pub(crate) fn colored_type_icon(artifact_type: ArtifactType, config: &OutputConfig) -> String {
    let icon = type_icon(artifact_type, config);
    if !config.use_colors {
        return icon.to_string();
    }
    match artifact_type {
        ArtifactType::Rfc => icon.blue().to_string(),
        ArtifactType::Adr => icon.green().to_string(),
        ArtifactType::Decomposition => icon.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl<'a> ColorGuard<'a> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX.lock().unwrap();
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn with_colors_enabled<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ColorGuard::new();
        f()
    }

    #[test]
    fn test_colorize_status_contains_ansi_codes() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let draft = colorize_status(ArtifactStatus::Draft, &config);
            let accepted = colorize_status(ArtifactStatus::Accepted, &config);
            let implemented = colorize_status(ArtifactStatus::Implemented, &config);
            let superseded = colorize_status(ArtifactStatus::Superseded, &config);

            assert!(draft.contains("draft"));
            assert!(accepted.contains("accepted"));
            assert!(implemented.contains("implemented"));
            assert!(superseded.contains("superseded"));

            assert!(draft.contains("\x1b["), "draft should have ANSI codes");
            assert!(
                accepted.contains("\x1b["),
                "accepted should have ANSI codes"
            );
            assert!(
                implemented.contains("\x1b["),
                "implemented should have ANSI codes"
            );
            assert!(
                superseded.contains("\x1b["),
                "superseded should have ANSI codes"
            );
        });
    }

    #[test]
    fn test_colorize_status_without_colors() {
        let config = OutputConfig::new(80, false, false);
        let draft = colorize_status(ArtifactStatus::Draft, &config);
        let in_progress = colorize_status(ArtifactStatus::InProgress, &config);

        assert_eq!(draft, "draft");
        assert_eq!(in_progress, "in-progress");
        assert!(!draft.contains("\x1b["), "draft should NOT have ANSI codes");
    }

    #[test]
    fn test_colorize_severity() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let warn = colorize_severity(CycleSeverity::Warning, &config);
            let critical = colorize_severity(CycleSeverity::Critical, &config);

            assert!(warn.contains("warning"));
            assert!(critical.contains("critical"));
            assert!(warn.contains("\x1b["));
            assert!(critical.contains("\x1b["));
        });

        let plain = OutputConfig::new(80, false, false);
        assert_eq!(colorize_severity(CycleSeverity::Warning, &plain), "warning");
        assert_eq!(
            colorize_severity(CycleSeverity::Critical, &plain),
            "critical"
        );
    }

    #[test]
    fn test_colorize_priority() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let high = colorize_priority(TaskPriority::High, &config);
            let medium = colorize_priority(TaskPriority::Medium, &config);
            let low = colorize_priority(TaskPriority::Low, &config);

            assert!(high.contains("high"));
            assert!(medium.contains("medium"));
            assert!(low.contains("low"));

            assert!(high.contains("\x1b["), "high should have ANSI codes");
            assert!(medium.contains("\x1b["), "medium should have ANSI codes");
            // Low priority has no color styling
            assert!(!low.contains("\x1b["), "low should not have ANSI codes");
        });
    }

    #[test]
    fn test_colorize_id_without_colors() {
        let config = OutputConfig::new(80, false, false);
        let id = colorize_id("RFC-0001", &config);
        assert_eq!(id, "RFC-0001");
        assert!(!id.contains("\x1b["), "ID should NOT have ANSI codes");
    }

    #[test]
    fn test_colorize_id_contains_ansi_codes() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let id = colorize_id("RFC-0001", &config);
            assert!(id.contains("RFC-0001"));
            assert!(id.contains("\x1b["), "ID should have ANSI codes");
        });
    }

    #[test]
    fn test_type_icon() {
        let config = OutputConfig::default();
        assert_eq!(type_icon(ArtifactType::Rfc, &config), "◆");
        assert_eq!(type_icon(ArtifactType::Adr, &config), "●");
        assert_eq!(type_icon(ArtifactType::Decomposition, &config), "◇");
    }

    #[test]
    fn test_ascii_fallback_icons() {
        let config = OutputConfig::new(80, true, false);

        assert_eq!(type_icon(ArtifactType::Rfc, &config), "#");
        assert_eq!(type_icon(ArtifactType::Adr, &config), "*");
        assert_eq!(type_icon(ArtifactType::Decomposition, &config), "-");

        let draft = colored_status_icon(ArtifactStatus::Draft, &config);
        let done = colored_status_icon(ArtifactStatus::Completed, &config);
        let dead = colored_status_icon(ArtifactStatus::Rejected, &config);
        assert_eq!(draft, "o");
        assert_eq!(done, "+");
        assert_eq!(dead, "x");
        assert!(
            !draft.contains("\x1b["),
            "ASCII draft should NOT have ANSI codes"
        );
    }

    #[test]
    fn test_status_icon_groups() {
        let config = OutputConfig::default();
        assert_eq!(status_icon(ArtifactStatus::Draft, &config), "○");
        assert_eq!(status_icon(ArtifactStatus::Pending, &config), "○");
        assert_eq!(status_icon(ArtifactStatus::InProgress, &config), "▶");
        assert_eq!(status_icon(ArtifactStatus::Accepted, &config), "▶");
        assert_eq!(status_icon(ArtifactStatus::Implemented, &config), "✓");
        assert_eq!(status_icon(ArtifactStatus::Deprecated, &config), "✗");
        assert_eq!(status_icon(ArtifactStatus::Superseded, &config), "✗");
    }

    #[test]
    fn test_colored_type_icon_without_colors() {
        let config = OutputConfig::new(80, false, false);
        let rfc = colored_type_icon(ArtifactType::Rfc, &config);
        assert_eq!(rfc, "◆");
        assert!(!rfc.contains("\x1b["), "icon should NOT have ANSI codes");
    }

    #[test]
    fn test_semantic_colors_without_colors() {
        let config = OutputConfig::new(80, false, false);
        assert_eq!(success("done", &config), "done");
        assert_eq!(error("fail", &config), "fail");
        assert_eq!(warning("caution", &config), "caution");
        assert_eq!(info("note", &config), "note");
    }

    #[test]
    fn test_semantic_colors_with_colors_enabled() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let s = success("done", &config);
            assert!(s.contains("done"));
            assert!(s.contains("\x1b["), "success should have ANSI codes");

            let e = error("fail", &config);
            assert!(e.contains("fail"));
            assert!(e.contains("\x1b["), "error should have ANSI codes");

            let w = warning("caution", &config);
            assert!(w.contains("caution"));
            assert!(w.contains("\x1b["), "warning should have ANSI codes");

            let i = info("note", &config);
            assert!(i.contains("note"));
            assert!(i.contains("\x1b["), "info should have ANSI codes");
        });
    }
}
