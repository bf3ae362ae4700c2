//! Progress feedback for repository scans.
//!
//! Progress bars go to stderr and are hidden in quiet mode (`--quiet` or the
//! `DOCSYNTH_QUIET` env var) and whenever stderr is not a terminal, so piped
//! and CI output stays clean.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;

// Progress bar templates
pub const TEMPLATE_FILE_SCAN: &str =
    "📁 {msg} {pos}/{len} files ({percent}%) [{wide_bar}] {eta}";
pub const TEMPLATE_SPINNER: &str = "{spinner} {msg}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("DOCSYNTH_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    /// Determine if progress bars should be displayed
    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

/// Coordinates the progress bars of one command invocation
#[derive(Clone)]
pub struct ProgressManager {
    multi: Arc<MultiProgress>,
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            config,
        }
    }

    /// A manager whose bars are always hidden.
    pub fn hidden() -> Self {
        Self::new(ProgressConfig { quiet_mode: true })
    }

    /// Create a progress bar with the given length and template
    ///
    /// Returns a hidden progress bar if progress should not be shown
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|e| {
                log::debug!("Invalid progress template {:?}: {}", template, e);
                ProgressStyle::default_bar()
            })
            .progress_chars("█▓▒░  ");
        let pb = self.multi.add(ProgressBar::new(len));
        pb.set_style(style);
        pb
    }

    /// Create a spinner progress bar with the given message
    pub fn create_spinner(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_spinner()
            .template(TEMPLATE_SPINNER)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Clear all progress bars before printing final output.
    pub fn clear(&self) -> std::io::Result<()> {
        self.multi.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode_disables_progress() {
        std::env::set_var("DOCSYNTH_QUIET", "1");
        let config = ProgressConfig::from_env(false);
        assert!(!config.should_show_progress());
        std::env::remove_var("DOCSYNTH_QUIET");
    }

    #[test]
    fn test_explicit_quiet_flag() {
        let config = ProgressConfig::from_env(true);
        assert!(!config.should_show_progress());
    }

    #[test]
    fn test_hidden_manager_creates_hidden_bars() {
        let manager = ProgressManager::hidden();

        let pb = manager.create_bar(100, TEMPLATE_FILE_SCAN);
        assert!(pb.is_hidden());

        let spinner = manager.create_spinner("Scanning");
        assert!(spinner.is_hidden());
    }
}
