//! Remote execution over OpenSSH
//!
//! Both adapters shell out to the system `ssh`/`scp` binaries so that the
//! operator's `~/.ssh/config`, agent and known_hosts apply unchanged.

mod scp;
mod ssh;

pub use scp::ScpTransfer;
pub use ssh::SshRunner;

/// `-o <option>` pairs for ssh and scp
fn option_args(options: &[String]) -> Vec<String> {
    options
        .iter()
        .flat_map(|opt| ["-o".to_string(), opt.clone()])
        .collect()
}
