//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod file_transfer;
pub mod prompter;

pub use command_runner::{CommandOutput, CommandRunner};
pub use file_transfer::FileTransfer;
pub use prompter::Prompter;
