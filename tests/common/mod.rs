//! Common test utilities for sitedeploy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated site checkout with `deploy.toml` and templates
//! - Fixtures: reusable configuration and template content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
