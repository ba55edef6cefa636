//! Message templates: parsing and rendering
//!
//! A template is literal text with `{name}` or `{name:spec}` placeholders.
//! Placeholders bind positionally: the first placeholder takes the first
//! argument, and so on. There is no escaping; any text that matches the
//! placeholder grammar is a placeholder, and anything else is literal.
//!
//! # Grammar
//!
//! ```text
//! placeholder := "{" name [":" spec] "}"
//! name        := any run of characters except "{", "}", ":"
//! spec        := one or more characters up to the LAST "}" on the same line
//! ```
//!
//! A format spec is greedy: on a line such as `{a:N2} and {b}` the spec of `a`
//! is `N2} and {b`, so only one placeholder is found. Names carry no such
//! quirk and may even span lines.

use crate::culture::Culture;
use crate::result::{FormatResult, Property};
use crate::value::Value;
use pocketlog_core_types::schema::OVERFLOW_ARG_PREFIX;
use std::ops::Range;

/// One placeholder occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    name: String,
    format_spec: Option<String>,
    match_text: String,
    span: Range<usize>,
}

impl Token {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format_spec(&self) -> Option<&str> {
        self.format_spec.as_deref()
    }

    /// The exact text matched in the template, e.g. `{count:N0}`
    pub fn match_text(&self) -> &str {
        &self.match_text
    }

    /// Byte range of this occurrence in the template text
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Render a value for this placeholder.
    pub fn render(&self, value: &Value, culture: &Culture) -> String {
        value.render(self.format_spec(), culture)
    }
}

/// A compiled template
///
/// Immutable after parsing, so one instance can be shared by any number of
/// threads rendering concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    tokens: Vec<Token>,
}

impl Template {
    /// Compile `raw`. Never fails: unmatched syntax stays literal.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: scan(raw),
        }
    }

    /// One plain placeholder per name, joined by `, `.
    ///
    /// Names are taken verbatim rather than parsed, so they may contain `{`,
    /// `}` or `:`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut raw = String::new();
        let mut tokens = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                raw.push_str(", ");
            }
            let start = raw.len();
            raw.push('{');
            raw.push_str(name.as_ref());
            raw.push('}');
            tokens.push(Token {
                name: name.as_ref().to_string(),
                format_spec: None,
                match_text: raw[start..].to_string(),
                span: start..raw.len(),
            });
        }
        Self { raw, tokens }
    }

    /// The template text as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Placeholders in order of appearance
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::name)
    }

    /// Render with the current thread's culture.
    pub fn render(&self, args: &[Value], named: &[Property]) -> FormatResult {
        self.render_in(&Culture::current(), args, named)
    }

    /// Render with an explicit culture.
    ///
    /// Arguments bind to placeholders in order; each binding replaces exactly
    /// its own placeholder occurrence and records `(name, value)`. Arguments
    /// beyond the placeholder count, and all named properties, are appended
    /// as ` +[ ... ]`. Overflow arguments are recorded as `arg{index}`; named
    /// properties are rendered as `(name, value)` but not recorded.
    /// Placeholders without an argument stay in the text unchanged.
    pub fn render_in(&self, culture: &Culture, args: &[Value], named: &[Property]) -> FormatResult {
        let bound = self.tokens.len().min(args.len());
        let mut text = String::with_capacity(self.raw.len() + 16);
        let mut properties = Vec::with_capacity(args.len());

        let mut cursor = 0;
        for (token, value) in self.tokens.iter().zip(args) {
            text.push_str(&self.raw[cursor..token.span.start]);
            text.push_str(&token.render(value, culture));
            cursor = token.span.end;
            properties.push(Property {
                name: token.name.clone(),
                value: value.clone(),
            });
        }
        text.push_str(&self.raw[cursor..]);

        let overflow = &args[bound..];
        if !overflow.is_empty() || !named.is_empty() {
            text.push_str(" +[ ");
            let mut first = true;

            for (offset, value) in overflow.iter().enumerate() {
                if !first {
                    text.push_str(", ");
                }
                first = false;
                text.push_str(&value.to_log_string());
                properties.push(Property {
                    name: format!("{}{}", OVERFLOW_ARG_PREFIX, bound + offset),
                    value: value.clone(),
                });
            }

            for property in named {
                if !first {
                    text.push_str(", ");
                }
                first = false;
                text.push_str(&property.to_log_string());
            }

            text.push_str(" ]");
        }

        FormatResult::new(text, properties)
    }
}

/// Find all placeholders, left to right, without overlap.
fn scan(raw: &str) -> Vec<Token> {
    let bytes = raw.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        match match_at(raw, i) {
            Some(token) => {
                i = token.span.end;
                tokens.push(token);
            }
            None => i += 1,
        }
    }

    tokens
}

/// Try to match a placeholder starting at the `{` at byte `start`.
fn match_at(raw: &str, start: usize) -> Option<Token> {
    let bytes = raw.as_bytes();
    let name_start = start + 1;
    let name_end = bytes[name_start..]
        .iter()
        .position(|b| matches!(b, b'{' | b'}' | b':'))
        .map(|offset| name_start + offset)?;

    let (spec, end) = match bytes[name_end] {
        b'}' => (None, name_end + 1),
        b':' => {
            let spec_start = name_end + 1;
            let line_end = bytes[spec_start..]
                .iter()
                .position(|b| *b == b'\n')
                .map_or(bytes.len(), |offset| spec_start + offset);
            // The format spec needs at least one character before its closing brace.
            let close = bytes[spec_start..line_end]
                .iter()
                .rposition(|b| *b == b'}')
                .map(|offset| spec_start + offset)
                .filter(|close| *close > spec_start)?;
            (Some(raw[spec_start..close].to_string()), close + 1)
        }
        _ => return None,
    };

    Some(Token {
        name: raw[name_start..name_end].to_string(),
        format_spec: spec,
        match_text: raw[start..end].to_string(),
        span: start..end,
    })
}
