//! `{placeholder}` response templates
//!
//! `{{` and `}}` render literal braces. Every placeholder must have a value;
//! a missing one is an error so the caller can fall back to a fixed reply.

use hotel_concierge_core::{Error, Result};
use std::collections::BTreeMap;

/// Placeholder values for one reply
pub type TemplateValues = BTreeMap<&'static str, String>;

/// Fill every `{name}` in `template` from `values`
pub fn render(template: &str, values: &TemplateValues) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(Error::Template(format!(
                                "unclosed placeholder '{{{}'",
                                name
                            )))
                        }
                    }
                }
                let value = values
                    .get(name.trim())
                    .ok_or_else(|| Error::Template(format!("missing value for '{}'", name)))?;
                out.push_str(value);
            }
            '}' => return Err(Error::Template("unmatched '}'".to_string())),
            c => out.push(c),
        }
    }

    Ok(out)
}
