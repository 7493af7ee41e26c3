//! Domain Services
//!
//! Stateless logic: deriving commands from the target and rendering templates.

mod command_set;
mod template;

pub use command_set::CommandSet;
pub use template::{Template, TemplateContext};
