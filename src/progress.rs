//! Progress feedback for the CLI layer.
//!
//! The engine itself only sees an injected callback; this module owns the
//! indicatif bar that callback drives. Bars are suppressed in quiet mode
//! (flag or `FRACLUS_QUIET`) and when stderr is not a TTY.

use indicatif::{ProgressBar, ProgressStyle};

pub const TEMPLATE_AGGLOMERATION: &str = "{spinner} {msg} {pos}/{len} rounds ({percent}%) - {eta}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("FRACLUS_QUIET").is_ok();
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

    /// Create a progress bar with the given length and template
    ///
    /// Returns a hidden progress bar if progress should not be shown
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.should_show_progress() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style);
        }
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_suppresses_progress() {
        let config = ProgressConfig { quiet_mode: true };
        assert!(!config.should_show_progress());
    }

    #[test]
    fn quiet_bar_is_hidden() {
        let config = ProgressConfig { quiet_mode: true };
        let bar = config.create_bar(10, TEMPLATE_AGGLOMERATION);
        assert!(bar.is_hidden());
    }
}
