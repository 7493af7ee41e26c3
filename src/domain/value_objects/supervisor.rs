//! Process supervisor kind

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The service manager that keeps the application running on the host.
///
/// - `Runit`: a service directory with `run` and `log/run` scripts,
///   controlled with `sv`
/// - `Systemd`: a unit file, controlled with `systemctl`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupervisorKind {
    #[default]
    Runit,
    Systemd,
}

impl SupervisorKind {
    pub const VALID_VALUES: &'static [&'static str] = &["runit", "systemd"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupervisorKind::Runit => "runit",
            SupervisorKind::Systemd => "systemd",
        }
    }
}

impl fmt::Display for SupervisorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupervisorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "runit" | "sv" => Ok(SupervisorKind::Runit),
            "systemd" | "systemctl" => Ok(SupervisorKind::Systemd),
            other => Err(format!("unknown supervisor '{}'", other)),
        }
    }
}
