//! Progress reporting for writing runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use scribe_application::RoundProgressNotifier;
use scribe_domain::{LoopPhase, WorkItem, WorkerResult};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per phase
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

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap()
    }

    fn prefix(round: u64, phase: LoopPhase) -> String {
        format!("Round {} {}", round, phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, round: u64, phase: LoopPhase, total_tasks: usize) {
        let pb = if phase == LoopPhase::Dispatched {
            let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
            pb.set_style(Self::dispatch_style());
            pb
        } else {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb
        };
        pb.set_prefix(Self::prefix(round, phase));
        pb.set_message("working...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_plan(&self, _round: u64, items: &[WorkItem]) {
        for item in items {
            let _ = self.multi.println(format!(
                "  {} [{}] {}",
                "+".cyan(),
                item.priority(),
                item.label()
            ));
        }
    }

    fn on_worker_complete(&self, result: &WorkerResult) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if result.is_error() {
                format!("{} {}", "x".red(), result.source_name())
            } else {
                format!("{} {}", "v".green(), result.source_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _round: u64, _phase: LoopPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, round: u64, phase: LoopPhase, total_tasks: usize) {
        let prefix = ProgressReporter::prefix(round, phase);
        if total_tasks > 0 {
            println!("{} {} ({} tasks)", "->".cyan(), prefix.bold(), total_tasks);
        } else {
            println!("{} {}", "->".cyan(), prefix.bold());
        }
    }

    fn on_plan(&self, _round: u64, items: &[WorkItem]) {
        for item in items {
            println!("  [{}] {}", item.priority(), item.label());
        }
    }

    fn on_worker_complete(&self, result: &WorkerResult) {
        match result.error() {
            None => println!("  {} {}", "v".green(), result.source_name()),
            Some(error) => println!("  {} {} ({})", "x".red(), result.source_name(), error),
        }
    }

    fn on_phase_complete(&self, _round: u64, _phase: LoopPhase) {}
}
