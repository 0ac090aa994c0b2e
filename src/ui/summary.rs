//! Rendering a [`RunSummary`] for the terminal.

use crate::orchestrator::{BootstrapOutcome, RunSummary, StepStatus, SubmoduleOutcome};
use crate::ui::{OutputMode, SyncTheme};
use std::time::Duration;

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Render `summary` as lines of text.
///
/// Quiet mode keeps only failures and the final status line.
pub fn render_summary(summary: &RunSummary, theme: &SyncTheme, mode: OutputMode) -> Vec<String> {
    let mut lines = Vec::new();
    let quiet = !mode.shows_status();

    if !quiet {
        lines.push(theme.format_header("Steps"));
    }
    for step in &summary.steps {
        let detail = step.detail.as_deref().unwrap_or_default();
        let line = match step.status {
            StepStatus::Completed if quiet => continue,
            StepStatus::Skipped if quiet => continue,
            StepStatus::Completed => theme.format_success(&format!(
                "{} {}",
                step.name,
                theme.duration.apply_to(format!("({})", format_duration(step.duration)))
            )),
            StepStatus::Skipped => theme.format_skipped(&format!("{} - {}", step.name, detail)),
            StepStatus::Failed => theme.format_error(&format!("{} - {}", step.name, detail)),
        };
        lines.push(format!("  {}", line));
    }

    if mode.shows_detail() {
        if let Some(outcome) = &summary.submodule {
            let text = match outcome {
                SubmoduleOutcome::AlreadyPresent => "already present",
                SubmoduleOutcome::Cloned => "cloned",
            };
            lines.push(theme.format_key_value("Submodule", text));
        }
        if let Some(outcome) = &summary.bootstrap {
            let text = match outcome {
                BootstrapOutcome::Installed(packages) => format!("{} packages", packages.len()),
                BootstrapOutcome::NothingToInstall => "nothing to install".to_string(),
            };
            lines.push(theme.format_key_value("Bootstrap", &text));
        }
        push_list(&mut lines, theme, "Already satisfied", &summary.satisfied);
        let finished = summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        lines.push(theme.format_key_value("Finished", &finished));
    }

    if !quiet {
        push_list(&mut lines, theme, "Installed", &summary.installed);
    }
    push_list(&mut lines, theme, "Failed", &summary.failed);
    if !quiet {
        push_list(&mut lines, theme, "Kept unpinned", &summary.fallbacks);
        push_list(&mut lines, theme, "Manifest", &summary.manifest);
    }

    let elapsed = format_duration(summary.elapsed);
    let status = if summary.has_failures() {
        theme.format_warning(&format!(
            "Sync completed with {} failed package(s) and {} failed step(s) in {}",
            summary.failed.len(),
            summary.failed_steps().len(),
            elapsed
        ))
    } else {
        theme.format_success(&format!("Sync completed in {}", elapsed))
    };
    lines.push(status);

    lines
}

fn push_list(lines: &mut Vec<String>, theme: &SyncTheme, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(theme.format_key_value(title, &items.len().to_string()));
    for item in items {
        lines.push(format!("  {}", theme.dim.apply_to(item)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::StepRecord;
    use chrono::{TimeZone, Utc};

    fn summary() -> RunSummary {
        RunSummary {
            satisfied: vec!["requests==2.0.0".into()],
            installed: vec!["numpy".into()],
            failed: vec!["beta==0.1".into()],
            fallbacks: vec!["beta==0.1".into()],
            manifest: vec!["requests==2.31.0".into(), "numpy==1.26.4".into(), "beta==0.1".into()],
            steps: vec![
                StepRecord {
                    name: "Prepare manifest".into(),
                    status: StepStatus::Completed,
                    duration: Duration::from_millis(3),
                    detail: None,
                },
                StepRecord {
                    name: "Clone submodule".into(),
                    status: StepStatus::Failed,
                    duration: Duration::ZERO,
                    detail: Some("exit 128".into()),
                },
            ],
            bootstrap: Some(BootstrapOutcome::NothingToInstall),
            submodule: None,
            elapsed: Duration::from_millis(1500),
            finished_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn normal_mode_lists_packages_and_manifest() {
        let text = render_summary(&summary(), &SyncTheme::plain(), OutputMode::Normal).join("\n");
        assert!(text.contains("✓ Prepare manifest (3ms)"));
        assert!(text.contains("✗ Clone submodule - exit 128"));
        assert!(text.contains("Installed: 1"));
        assert!(text.contains("Manifest: 3"));
        assert!(!text.contains("Already satisfied"));
        assert!(!text.contains("Finished"));
        assert!(text.ends_with("1 failed package(s) and 1 failed step(s) in 1.5s"));
    }

    #[test]
    fn verbose_mode_adds_detail() {
        let text = render_summary(&summary(), &SyncTheme::plain(), OutputMode::Verbose).join("\n");
        assert!(text.contains("Already satisfied: 1"));
        assert!(text.contains("Bootstrap: nothing to install"));
        assert!(text.contains("Finished: 2024-05-01 12:30:00 UTC"));
    }

    #[test]
    fn quiet_mode_keeps_failures_only() {
        let lines = render_summary(&summary(), &SyncTheme::plain(), OutputMode::Quiet);
        let text = lines.join("\n");
        assert!(!text.contains("Prepare manifest"));
        assert!(text.contains("Clone submodule"));
        assert!(text.contains("Failed: 1"));
        assert!(!text.contains("Manifest:"));
    }
}
