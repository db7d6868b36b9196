//! Interactive vs. automated runs.

/// How the workflow obtains missing input and confirmations.
///
/// Passed explicitly to the workflow so both modes can run in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Ask the user for missing values and confirmations.
    #[default]
    Interactive,
    /// CI mode: never prompt, abort instead.
    NonInteractive,
}

impl RunMode {
    /// Maps the `--ci` flag to a run mode.
    #[must_use]
    pub fn from_ci(ci: bool) -> Self {
        if ci {
            Self::NonInteractive
        } else {
            Self::Interactive
        }
    }

    /// Returns true if the user may be prompted.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        self == Self::Interactive
    }
}
