//! Domain Layer
//!
//! Pure deployment logic without I/O: what to run, in which directory, and
//! how templates turn into file contents.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (TargetEnvironment, Command, Step)
//! - `services/` - Stateless domain services (CommandSet, Template rendering)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the network
//! 2. **Pure Functions** - The command set is derived from the target alone
//! 3. **Ports & Adapters** - Execution, transfer and prompting go through traits

pub mod ports;
pub mod services;
pub mod value_objects;

pub use services::{CommandSet, Template, TemplateContext};
pub use value_objects::{
    remote_join, shell_quote, Command, ExecutionMode, ParameterSpec, Step, SupervisorKind,
    TargetEnvironment, Upload,
};
