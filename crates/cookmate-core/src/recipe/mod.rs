//! Recipe domain module.
//!
//! - `model`: recipe and step types as delivered by the recipe endpoint
//! - `highlight`: keyword emphasis and duration hints for step text

mod highlight;
mod model;

pub use highlight::{COOKING_KEYWORDS, TextSegment, highlight_keywords, suggest_timer_minutes};
pub use model::{Recipe, RecipeCard, RecipeId, Step};
