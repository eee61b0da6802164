use crate::error::{CasePackError, UserFriendlyError};
use crate::extractor::ExtractionStats;
use crate::testcase::Discovery;
use console::{style, Emoji, Term};
use std::time::Duration;

/// Standard output carries the JSON result, so every message here goes to stderr.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static PACKAGE: Emoji = Emoji("📦 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            OutputMode::Plain => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Plain => eprintln!("SUCCESS: {}", message),
            }
        }
    }

    /// Errors are shown even in quiet mode.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Plain => eprintln!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!("  {}", style(message).dim()),
                OutputMode::Human => eprintln!("  DEBUG: {}", message),
                OutputMode::Plain => eprintln!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human if self.use_colors => {
                    eprintln!("{}{}", PACKAGE, style(operation).bold())
                }
                OutputMode::Human => eprintln!("> {}", operation),
                OutputMode::Plain => eprintln!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &CasePackError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!(
                    "{}{}",
                    INFO,
                    style(format!("Suggestion: {}", suggestion)).cyan()
                ),
                OutputMode::Human => eprintln!("Suggestion: {}", suggestion),
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_extraction_summary(&self, stats: &ExtractionStats) {
        if !self.should_show_message(1) {
            return;
        }

        for line in summary_lines(stats) {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!("  {}", style(line).cyan()),
                OutputMode::Human => eprintln!("  {}", line),
                OutputMode::Plain => eprintln!("{}", line),
            }
        }
    }

    /// Dry-run listing; shown regardless of verbosity unless quiet.
    pub fn print_discovery(&self, description: &str, discovery: &Discovery) {
        if self.quiet {
            return;
        }

        self.print_header(&format!("Test pairs in {}", description));

        for pair in &discovery.pairs {
            eprintln!("  {} -> {}", pair.input.display(), pair.answer.display());
        }

        for skipped in &discovery.skipped {
            match self.mode {
                OutputMode::Human if self.use_colors => {
                    eprintln!("  {} {}", style(skipped).dim(), style("(no answer, skipped)").dim())
                }
                _ => eprintln!("  {} (no answer, skipped)", skipped),
            }
        }

        self.print_separator();
        eprintln!(
            "{} pairs, {} skipped",
            discovery.pairs.len(),
            discovery.skipped.len()
        );
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => eprintln!("{}", style(title).bold().cyan()),
            _ => eprintln!("=== {} ===", title),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            eprintln!("{}", style("─".repeat(60)).dim());
        } else {
            eprintln!("{}", "-".repeat(60));
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };
            eprintln!("{} {}", prefix, message);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn summary_lines(stats: &ExtractionStats) -> Vec<String> {
    let mut lines = vec![
        format!("Source:     {}", stats.source),
        format!("Test cases: {}", stats.cases),
        format!("Bytes read: {}", format_bytes(stats.bytes_read)),
        format!("Time taken: {}", format_duration(stats.duration)),
    ];

    if !stats.skipped.is_empty() {
        lines.push(format!("Skipped:    {} (no answer)", stats.skipped.len()));
    }

    lines
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
