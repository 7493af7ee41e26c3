//! Prompter Port
//!
//! Asks the operator for one value. Validation and retries live in the
//! application layer, so implementations only collect raw answers.

use std::io;

/// Trait for collecting setup parameters.
///
/// Implementations:
/// - `DialoguerPrompter`: terminal prompts
/// - `DefaultsPrompter`: answers every question with its default (`--yes`)
pub trait Prompter {
    /// Ask `prompt`; an empty answer means "use the default".
    ///
    /// `secret` answers must not be echoed.
    fn ask(&self, prompt: &str, default: Option<&str>, secret: bool) -> io::Result<String>;
}
