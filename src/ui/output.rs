//! Output mode and writer.

use crate::ui::theme::SyncTheme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Summary plus per-step detail and already satisfied requirements.
    Verbose,
    /// The run summary.
    #[default]
    Normal,
    /// Failures and the final status line only.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the `--verbose` / `--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Check if this mode shows per-step detail.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Output writer that respects output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: SyncTheme,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode, theme: SyncTheme) -> Self {
        Self { mode, theme }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Get the theme used for formatting.
    pub fn theme(&self) -> &SyncTheme {
        &self.theme
    }

    /// Print a success line if the mode allows status messages.
    pub fn success(&self, msg: &str) {
        self.println(&self.theme.format_success(msg));
    }

    /// Print an error to stderr regardless of mode.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    /// Write a line if the mode allows status messages.
    pub fn println(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Write a line regardless of mode.
    pub fn always(&self, msg: &str) {
        println!("{}", msg);
    }
}
