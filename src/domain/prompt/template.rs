//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required template variable: {name}")]
    MissingVariable { name: String },
}

/// A variable parsed out of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    pub name: String,
    pub default: Option<String>,
}

impl TemplateVariable {
    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
///
/// Rendering is pure string substitution: no I/O, no clock, no state.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<TemplateVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract its variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables: Vec<TemplateVariable> = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap.get(1).unwrap().as_str().to_string();

            if variables.iter().any(|v| v.name == name) {
                continue;
            }

            variables.push(TemplateVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    /// Get the original template content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get all parsed variables
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Render the template with the provided values
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut result = self.content.clone();

        for var in &self.variables {
            let value = values.get(&var.name).or(var.default.as_ref());

            match value {
                Some(v) => {
                    let pattern = if let Some(ref default) = var.default {
                        format!("${{var:{}:{}}}", var.name, default)
                    } else {
                        format!("${{var:{}}}", var.name)
                    };
                    result = result.replace(&pattern, v);
                }
                None => {
                    return Err(TemplateError::MissingVariable {
                        name: var.name.clone(),
                    });
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Answer briefly.");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_parse_required_variable() {
        let template = PromptTemplate::parse("Context:\n${var:context}");
        assert_eq!(template.variables().len(), 1);

        let var = &template.variables()[0];
        assert_eq!(var.name, "context");
        assert!(var.required());
    }

    #[test]
    fn test_parse_variable_with_default() {
        let template = PromptTemplate::parse("Tone: ${var:tone:clinical}");
        let var = &template.variables()[0];
        assert!(!var.required());
        assert_eq!(var.default, Some("clinical".to_string()));
    }

    #[test]
    fn test_parse_duplicate_variables() {
        let template = PromptTemplate::parse("${var:context} then ${var:context} again");
        assert_eq!(template.variables().len(), 1);
    }

    #[test]
    fn test_render_required_variable() {
        let template = PromptTemplate::parse("Context:\n${var:context}");

        let mut values = HashMap::new();
        values.insert(
            "context".to_string(),
            "Hypertension is high blood pressure.".to_string(),
        );

        let result = template.render(&values).unwrap();
        assert_eq!(result, "Context:\nHypertension is high blood pressure.");
    }

    #[test]
    fn test_render_missing_required_variable() {
        let template = PromptTemplate::parse("Context:\n${var:context}");
        let result = template.render(&HashMap::new());

        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "context".to_string()
            })
        );
    }

    #[test]
    fn test_render_uses_default() {
        let template = PromptTemplate::parse("Tone: ${var:tone:clinical}");
        let result = template.render(&HashMap::new()).unwrap();
        assert_eq!(result, "Tone: clinical");
    }

    #[test]
    fn test_render_override_default() {
        let template = PromptTemplate::parse("Tone: ${var:tone:clinical}");

        let mut values = HashMap::new();
        values.insert("tone".to_string(), "plain".to_string());

        assert_eq!(template.render(&values).unwrap(), "Tone: plain");
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = PromptTemplate::parse("Q: ${var:query}\nContext:\n${var:context}");

        let mut values = HashMap::new();
        values.insert("query".to_string(), "What is hypertension?".to_string());
        values.insert("context".to_string(), "Some passage.".to_string());

        let first = template.render(&values).unwrap();
        let second = template.render(&values).unwrap();
        assert_eq!(first, second);
    }
}
