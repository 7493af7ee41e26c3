//! File Transfer Port
//!
//! Copies a local file to a path on a remote host.

use std::path::Path;

use crate::error::DeployResult;

/// Trait for uploading files to a host.
///
/// Implementations:
/// - `ScpTransfer`: `scp <local> <host>:<remote>`
///
/// Any I/O or connection fault must surface as `DeployError::Transfer`.
/// The remote parent directory is expected to exist.
pub trait FileTransfer {
    fn upload(&self, host: &str, local: &Path, remote: &str) -> DeployResult<()>;
}
