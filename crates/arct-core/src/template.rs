//! `{name}` substitution in sources and destinations.
//!
//! Values come from an explicit [`Vars`] map (config `[vars]` plus CLI
//! overrides). `{{` and `}}` produce literal braces.

use std::collections::BTreeMap;

/// Named values available to `{name}` placeholders.
pub type Vars = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown variable {{{name}}} in {text:?}")]
    UnknownVariable { name: String, text: String },
    #[error("invalid placeholder {{{name}}} in {text:?}")]
    InvalidName { name: String, text: String },
    #[error("unterminated placeholder in {text:?}")]
    Unterminated { text: String },
    #[error("unmatched '}}' in {text:?}")]
    UnmatchedBrace { text: String },
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Replaces every `{name}` in `text` with its value from `vars`.
pub fn expand(text: &str, vars: &Vars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(TemplateError::Unterminated {
                        text: text.to_string(),
                    });
                }
                if name.is_empty() || !name.chars().all(is_name_char) {
                    return Err(TemplateError::InvalidName {
                        name,
                        text: text.to_string(),
                    });
                }
                match vars.get(&name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UnknownVariable {
                            name,
                            text: text.to_string(),
                        })
                    }
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(TemplateError::UnmatchedBrace {
                    text: text.to_string(),
                })
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Parses a `KEY=VALUE` pair (CLI `--var`).
pub fn parse_var(pair: &str) -> Result<(String, String), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", pair))?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(is_name_char) {
        return Err(format!("invalid variable name {:?}", key));
    }
    Ok((key.to_string(), value.to_string()))
}
