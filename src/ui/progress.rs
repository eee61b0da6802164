use crate::extractor::ExtractionProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress bars draw to stderr and only when it is a terminal.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && console::Term::stderr().is_term(),
        }
    }

    pub fn create_case_progress(&self, total_cases: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(total_cases), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} cases {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Reading test pairs...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_case_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_position(progress.cases_read as u64);

    if let Some(ref current) = progress.current_case {
        pb.set_message(truncate_name(current, 40));
    }
}

pub fn finish_progress(pb: &ProgressBar) {
    pb.finish_and_clear();
}

fn truncate_name(name: &str, max_len: usize) -> String {
    let count = name.chars().count();
    if count <= max_len {
        name.to_string()
    } else {
        let tail: String = name.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_returns_hidden_bars() {
        let manager = ProgressManager::new(false);

        let pb = manager.create_case_progress(10);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_update_case_progress() {
        let pb = ProgressBar::hidden();
        pb.set_length(3);

        let mut progress = ExtractionProgress::new(3);
        progress.update_case("tests/1".to_string(), 4);
        update_case_progress(&pb, &progress);

        assert_eq!(pb.position(), 1);
        finish_progress(&pb);
        assert!(pb.is_finished());
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("tests/1", 40), "tests/1");

        let long = "a".repeat(50);
        let truncated = truncate_name(&long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.starts_with("..."));
    }
}
