//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show status messages and connection details.
    Verbose,
    /// Show status messages.
    #[default]
    Normal,
    /// Show command output and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows status messages and spinners.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows detail messages.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
