//! Progress reporting for council fan-outs

use colored::Colorize;
use council_application::ProgressNotifier;
use council_domain::ProviderId;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with an indicatif bar, one tick per provider
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
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
    fn on_dispatch_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Consulting the council");
        pb.set_message("Waiting for providers...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_provider_complete(&self, provider: &ProviderId, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), provider)
            } else {
                format!("{} {}", "x".red(), provider)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_dispatch_complete(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
        }
    }

    fn on_cache_hit(&self) {
        eprintln!("{} {}", "->".cyan(), "Answer served from cache".dimmed());
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, total: usize) {
        eprintln!("{} {} ({} providers)", "->".cyan(), "Consulting the council".bold(), total);
    }

    fn on_provider_complete(&self, provider: &ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }

    fn on_dispatch_complete(&self) {
        eprintln!();
    }

    fn on_cache_hit(&self) {
        eprintln!("{} {}", "->".cyan(), "Answer served from cache".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_dispatch_start(2);
        reporter.on_provider_complete(&ProviderId::Claude, true);
        reporter.on_provider_complete(&ProviderId::Gpt4, false);

        let position = reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position());
        assert_eq!(position, Some(2));

        reporter.on_dispatch_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_completion_without_start_is_ignored() {
        let reporter = ProgressReporter::default();
        reporter.on_provider_complete(&ProviderId::Claude, true);
        reporter.on_dispatch_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
