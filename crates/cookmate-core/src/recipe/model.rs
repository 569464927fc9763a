//! Recipe domain model.
//!
//! Recipes are read-only from the client's point of view: they arrive from
//! `GET /recipes/{id}` and are never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Backend identifier of a recipe.
pub type RecipeId = i64;

/// One instruction unit of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position as assigned by the backend. Not guaranteed dense.
    pub step_number: u32,
    /// Instruction text shown to the cook.
    pub instruction_text: String,
    /// Optional timer hint in minutes.
    #[serde(default, alias = "timer", skip_serializing_if = "Option::is_none")]
    pub timer_minutes: Option<u32>,
}

impl Step {
    pub fn new(step_number: u32, instruction_text: impl Into<String>) -> Self {
        Self {
            step_number,
            instruction_text: instruction_text.into(),
            timer_minutes: None,
        }
    }
}

/// A full recipe as returned by the recipe endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_time: Option<u32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
}

impl Recipe {
    /// Total time in minutes (preparation + cooking). Missing parts count as
    /// zero and the sum saturates at `u32::MAX`.
    pub fn total_minutes(&self) -> u32 {
        self.preparation_time
            .unwrap_or(0)
            .saturating_add(self.cooking_time.unwrap_or(0))
    }

    /// Steps sorted ascending by `step_number`.
    ///
    /// The sort is stable; duplicated or missing numbers are left as they are.
    pub fn sorted_steps(&self) -> Vec<Step> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|step| step.step_number);
        steps
    }
}

/// Summary of a recipe embedded in chat responses (`cooking_recipe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
}
