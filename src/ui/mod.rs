//! Terminal output

pub mod output;
