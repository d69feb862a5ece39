//! Progress reporting for indexing, answering and consensus

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rag_application::ports::progress::ProgressNotifier;
use rag_domain::Phase;
use std::sync::Mutex;

/// Reports progress with indicatif progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.phase_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut bar) = self.phase_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
            let _ = self
                .multi
                .println(format!("{} {}", phase.display_name(), "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle_without_terminal() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::Consensus, 4);
        reporter.on_task_complete(&Phase::Consensus, "original", true);
        reporter.on_task_complete(&Phase::Consensus, "explain", false);
        assert_eq!(
            reporter
                .phase_bar
                .lock()
                .unwrap()
                .as_ref()
                .map(ProgressBar::position),
            Some(2)
        );

        reporter.on_phase_complete(&Phase::Consensus);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let reporter = ProgressReporter::default();
        reporter.on_task_complete(&Phase::Indexing, "batch", true);
        reporter.on_phase_complete(&Phase::Indexing);
    }
}
