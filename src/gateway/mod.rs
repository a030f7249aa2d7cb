mod mealdb;

pub use mealdb::MealDbGateway;

use crate::model::{Candidate, RecipeDetail};
use async_trait::async_trait;

/// Read access to a recipe database.
///
/// Implementations are fail-soft: transport errors, bad status codes and
/// malformed bodies all come back as an empty vec or `None`.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Recipes that use the given ingredient
    async fn search_by_ingredient(&self, ingredient: &str) -> Vec<Candidate>;

    /// Full record for one recipe id
    async fn fetch_details(&self, id: &str) -> Option<RecipeDetail>;
}
