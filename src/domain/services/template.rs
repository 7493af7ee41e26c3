//! Template rendering
//!
//! Placeholders are `{name}` where `name` is an identifier
//! (`[A-Za-z_][A-Za-z0-9_]*`). `{{` and `}}` render as literal braces.
//! Any other brace, such as a Ruby hash literal, passes through untouched,
//! so configuration files written in other languages need no escaping.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{DeployError, DeployResult};

/// Placeholder values for one rendering pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert only if `name` has no value yet
    pub fn insert_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = TemplateContext::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}

/// A named template source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Read a template from disk; an unreadable file is a template error
    pub fn load(path: &Path) -> DeployResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| DeployError::Template {
            template: path.display().to_string(),
            message: format!("cannot read template: {}", e),
        })?;
        Ok(Self::new(path.display().to_string(), source))
    }

    /// Every placeholder name the template references
    pub fn placeholders(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        scan(&self.source, |token| {
            if let Token::Placeholder(name) = token {
                names.insert(name);
            }
        });
        names
    }

    /// Substitute every placeholder.
    ///
    /// Fails without producing output if any referenced placeholder is
    /// missing from `ctx`; the error lists all of them.
    pub fn render(&self, ctx: &TemplateContext) -> DeployResult<String> {
        let missing: Vec<&str> = self
            .placeholders()
            .into_iter()
            .filter(|name| !ctx.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(DeployError::Template {
                template: self.name.clone(),
                message: format!("missing value for {{{}}}", missing.join("}, {")),
            });
        }

        let mut out = String::with_capacity(self.source.len());
        scan(&self.source, |token| match token {
            Token::Text(text) => out.push_str(text),
            Token::Placeholder(name) => out.push_str(ctx.get(name).unwrap_or_default()),
        });
        Ok(out)
    }
}

enum Token<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn scan<'a>(source: &'a str, mut emit: impl FnMut(Token<'a>)) {
    let mut rest = source;
    while let Some(pos) = rest.find(['{', '}']) {
        emit(Token::Text(&rest[..pos]));
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            emit(Token::Text("{"));
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            emit(Token::Text("}"));
            rest = &tail[2..];
        } else if let Some(name) = placeholder_at(tail) {
            emit(Token::Placeholder(name));
            rest = &tail[name.len() + 2..];
        } else {
            emit(Token::Text(&tail[..1]));
            rest = &tail[1..];
        }
    }
    emit(Token::Text(rest));
}

/// `tail` starts with a brace; return the identifier if it opens `{name}`
fn placeholder_at(tail: &str) -> Option<&str> {
    let body = tail.strip_prefix('{')?;
    let end = body.find('}')?;
    let name = &body[..end];
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}
