//! Placeholder substitution for prompt templates
//!
//! Templates use `{name}` placeholders. `{{` and `}}` render literal braces.
//! Substitution is strict: a placeholder without a value is an error, so a
//! raw token can never leak into a prompt. Values are inserted verbatim and
//! never scanned for placeholders themselves.

use outreach_common::OutreachError;
use std::collections::HashMap;

/// Template rendering failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A placeholder was referenced but no value was supplied
    #[error("undefined placeholder '{name}' at position {position}")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` without a matching `}`
    #[error("unmatched '{{' at position {position}")]
    UnmatchedBrace { position: usize },

    /// An empty placeholder (`{}`)
    #[error("empty placeholder at position {position}")]
    EmptyVariableName { position: usize },
}

impl From<TemplateError> for OutreachError {
    fn from(err: TemplateError) -> Self {
        OutreachError::template(err.to_string())
    }
}

/// Named prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Template name (for logs)
    pub name: &'static str,

    /// Body with `{placeholder}` tokens
    pub body: String,
}

impl PromptTemplate {
    pub fn new(name: &'static str, body: impl Into<String>) -> Self {
        Self {
            name,
            body: body.into(),
        }
    }

    /// Placeholder names in order of first appearance, without duplicates
    pub fn placeholders(&self) -> Result<Vec<String>, TemplateError> {
        let mut names: Vec<String> = Vec::new();
        for token in tokenize(&self.body)? {
            if let Token::Placeholder { name, .. } = token {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Render this template with the given values
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        render(&self.body, values)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Brace(char),
    Placeholder { name: &'a str, position: usize },
}

fn tokenize(template: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' | '}' => {
                if text_start < pos {
                    tokens.push(Token::Text(&template[text_start..pos]));
                }

                if ch == '{' && chars.peek().map(|(_, c)| *c) != Some('{') {
                    // A name runs to the next `}`; another `{` first means this one is unclosed
                    let close = template[pos + 1..]
                        .find(|c| c == '{' || c == '}')
                        .map(|offset| pos + 1 + offset)
                        .filter(|&end| template.as_bytes()[end] == b'}')
                        .ok_or(TemplateError::UnmatchedBrace { position: pos })?;

                    let name = template[pos + 1..close].trim();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyVariableName { position: pos });
                    }
                    tokens.push(Token::Placeholder { name, position: pos });

                    while let Some((i, _)) = chars.peek() {
                        if *i > close {
                            break;
                        }
                        chars.next();
                    }
                    text_start = close + 1;
                } else {
                    // `{{`, `}}` and a lone `}` all render a single brace
                    if chars.peek().map(|(_, c)| *c) == Some(ch) {
                        chars.next();
                        text_start = pos + 2;
                    } else {
                        text_start = pos + 1;
                    }
                    tokens.push(Token::Brace(ch));
                }
            }
            _ => {}
        }
    }

    if text_start < template.len() {
        tokens.push(Token::Text(&template[text_start..]));
    }

    Ok(tokens)
}

/// Render a template string by substituting `{name}` placeholders
///
/// ```
/// use std::collections::HashMap;
/// use outreach_llm::render;
///
/// let mut values = HashMap::new();
/// values.insert("name".to_string(), "Jane".to_string());
/// assert_eq!(render("Hi {name}!", &values).unwrap(), "Hi Jane!");
/// ```
pub fn render(template: &str, values: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());

    for token in tokenize(template)? {
        match token {
            Token::Text(text) => result.push_str(text),
            Token::Brace(ch) => result.push(ch),
            Token::Placeholder { name, position } => match values.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    })
                }
            },
        }
    }

    Ok(result)
}

/// Build a values map from key-value pairs
pub fn values<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
