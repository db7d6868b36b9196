//! User input seam.

use crate::CoreResult;

/// Source of answers in interactive mode.
pub trait Prompter {
    /// Asks a yes/no question; an empty answer yields `default`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Prompt`] if input cannot be read.
    fn confirm(&mut self, question: &str, default: bool) -> CoreResult<bool>;

    /// Asks for a free-form value, returned trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Prompt`] if input cannot be read.
    fn ask(&mut self, question: &str) -> CoreResult<String>;
}
