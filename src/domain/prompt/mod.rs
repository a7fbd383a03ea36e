//! Prompt assembly
//!
//! Merges the fixed system instruction, the retrieved context and the user
//! query into the structured prompt handed to the generator.

mod template;

pub use template::{PromptTemplate, TemplateError, TemplateVariable};

use std::collections::HashMap;

/// Default system instruction for grounded medical Q&A.
///
/// The "say I don't know" clause is a content-safety requirement for this
/// domain, not a style preference: the model must state non-knowledge
/// instead of fabricating when the context has no answer.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "\
You are a helpful medical assistant.
Use the retrieved context to answer clearly and safely.
If the answer is not found in the context, say \"I don't know\".
Answer in short medically-correct sentences.

Context:
${var:context}";

/// The assembled prompt: a system instruction carrying the retrieved
/// context, and the user query as the human turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub system: String,
    pub user: String,
}

/// Builds prompts from a fixed instruction template
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    template: PromptTemplate,
}

impl PromptAssembler {
    /// Create an assembler over the given instruction template.
    ///
    /// The template must reference `${var:context}`; `${var:query}` is also
    /// available for templates that want the query inside the instruction.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: PromptTemplate::parse(template),
        }
    }

    /// Assembler over the default grounded-QA template
    pub fn with_default_template() -> Self {
        Self::new(DEFAULT_SYSTEM_TEMPLATE)
    }

    /// Build the prompt for one query. Pure: same inputs, same output.
    pub fn build_prompt(
        &self,
        context: &str,
        query: &str,
    ) -> Result<AssembledPrompt, TemplateError> {
        let mut values = HashMap::new();
        values.insert("context".to_string(), context.to_string());
        values.insert("query".to_string(), query.to_string());

        Ok(AssembledPrompt {
            system: self.template.render(&values)?,
            user: query.to_string(),
        })
    }
}
