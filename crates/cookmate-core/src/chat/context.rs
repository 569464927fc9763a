//! Recipe/step context attached to questions asked mid-cooking.

use serde::{Deserialize, Serialize};

/// Snapshot of where the cook is when asking the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingContext {
    pub recipe_title: String,
    /// 0-based index of the current step.
    pub step_index: usize,
    pub step_count: usize,
    pub step_text: Option<String>,
}

impl CookingContext {
    /// Builds the wire payload: structured context first, then the question.
    pub fn wrap(&self, query: &str) -> String {
        let mut payload = String::from("[Cooking context]\n");
        payload.push_str(&format!("Recipe: {}\n", self.recipe_title));
        if self.step_count > 0 {
            payload.push_str(&format!(
                "Current step: {} of {}\n",
                self.step_index + 1,
                self.step_count
            ));
        }
        if let Some(text) = &self.step_text {
            payload.push_str(&format!("Step instructions: {text}\n"));
        }
        payload.push_str(&format!("\nQuestion: {query}"));
        payload
    }
}

/// Payload for a question, with or without cooking context.
pub fn compose_query(context: Option<&CookingContext>, query: &str) -> String {
    match context {
        Some(context) => context.wrap(query),
        None => query.to_string(),
    }
}
