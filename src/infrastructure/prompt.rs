//! Prompters
//!
//! `DialoguerPrompter` asks on the terminal; `DefaultsPrompter` answers
//! every question with its default and never touches stdin.

use std::io;

use dialoguer::{Input, Password};

use crate::domain::ports::Prompter;

/// Terminal prompts via dialoguer
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, prompt: &str, default: Option<&str>, secret: bool) -> io::Result<String> {
        if secret {
            let prompt = match default {
                Some(_) => format!("{} (leave empty for default)", prompt),
                None => prompt.to_string(),
            };
            return Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
                .map_err(|e| io::Error::other(e.to_string()));
        }

        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        input
            .interact_text()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// Accepts every default without prompting (`--yes`)
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&self, _prompt: &str, default: Option<&str>, _secret: bool) -> io::Result<String> {
        Ok(default.unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompter_returns_default_or_empty() {
        let prompter = DefaultsPrompter;
        assert_eq!(prompter.ask("Mode", Some("live"), false).unwrap(), "live");
        assert_eq!(prompter.ask("Password", None, true).unwrap(), "");
    }
}
