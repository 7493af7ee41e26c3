//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process` - Child processes with a deadline and drained pipes
//! - `remote/` - ssh command runner and scp file transfer
//! - `prompt` - Terminal and non-interactive prompters

pub mod process;
pub mod prompt;
pub mod remote;

// Re-export for convenience
pub use prompt::{DefaultsPrompter, DialoguerPrompter};
pub use remote::{ScpTransfer, SshRunner};
