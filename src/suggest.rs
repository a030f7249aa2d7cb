use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};

use crate::config::MealDbConfig;
use crate::extract::extract_ingredients;
use crate::gateway::{MealDbGateway, RecipeGateway};
use crate::model::{RecipeResponse, SuggestOutcome};
use crate::scoring::select_best;

pub const MISSING_CONTEXT: &str = "Please provide 'context' containing ingredients (string).";
pub const UNPARSEABLE_CONTEXT: &str = "Couldn't parse ingredients. Example: 'I have chicken, rice.'";
pub const DETAILS_UNAVAILABLE: &str = "Couldn't fetch meal details.";

/// Default number of search candidates scored per request
pub const DEFAULT_MAX_CANDIDATES: usize = 25;

/// Turns an ingredient description into a single recipe suggestion
#[derive(Clone)]
pub struct MealSuggester {
    gateway: Arc<dyn RecipeGateway>,
    max_candidates: usize,
}

impl MealSuggester {
    /// Creates a new builder for a suggester
    ///
    /// # Example
    /// ```
    /// use meal_mcp::MealSuggester;
    ///
    /// let builder = MealSuggester::builder().max_candidates(10);
    /// ```
    pub fn builder() -> MealSuggesterBuilder {
        MealSuggesterBuilder::default()
    }

    /// Suggester backed by TheMealDB with the given settings
    pub fn from_config(config: &MealDbConfig) -> Result<Self, reqwest::Error> {
        Ok(MealSuggester {
            gateway: Arc::new(MealDbGateway::new(config)?),
            max_candidates: config.max_candidates,
        })
    }

    /// Suggest a meal for the given free-text context.
    ///
    /// Never fails: bad input, empty searches and unreachable details all
    /// come back as an `Error` or `Message` outcome.
    pub async fn suggest(&self, context: &str) -> SuggestOutcome {
        if context.is_empty() {
            return SuggestOutcome::error(MISSING_CONTEXT);
        }

        let ingredients = extract_ingredients(context);
        debug!("Parsed ingredients: {:?}", ingredients);
        let Some(primary) = ingredients.first() else {
            return SuggestOutcome::error(UNPARSEABLE_CONTEXT);
        };

        let candidates = self.gateway.search_by_ingredient(primary).await;
        if candidates.is_empty() {
            info!("No meals found for '{}'", primary);
            return SuggestOutcome::message(format!("No meals found from '{primary}'."));
        }

        let requested: BTreeSet<String> = ingredients.iter().cloned().collect();
        let Some(best) = select_best(
            &*self.gateway,
            &candidates,
            &requested,
            self.max_candidates,
        )
        .await
        else {
            return SuggestOutcome::error(DETAILS_UNAVAILABLE);
        };

        info!(
            "Suggesting '{}' ({}/{} ingredients matched)",
            best.detail.name,
            best.score,
            requested.len()
        );

        let found: BTreeSet<&str> = best.ingredient_names.iter().map(String::as_str).collect();
        let matched = requested
            .iter()
            .filter(|token| found.contains(token.as_str()))
            .cloned()
            .collect();

        let detail = best.detail;
        SuggestOutcome::Recipe(RecipeResponse {
            recipe: detail.name,
            category: detail.category,
            area: detail.area,
            instructions: detail.instructions,
            youtube: detail.youtube,
            source: detail.source,
            matched_requested_ingredients: matched,
        })
    }
}

/// Builder for [`MealSuggester`]
#[derive(Default)]
pub struct MealSuggesterBuilder {
    gateway: Option<Arc<dyn RecipeGateway>>,
    max_candidates: Option<usize>,
}

impl MealSuggesterBuilder {
    /// Use a custom recipe gateway instead of TheMealDB
    pub fn gateway(mut self, gateway: impl RecipeGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Limit how many search candidates get their details fetched
    pub fn max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    /// Build the suggester.
    ///
    /// Without an explicit gateway a [`MealDbGateway`] is created from
    /// `MealDbConfig::default()`, which fails only if the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<MealSuggester, reqwest::Error> {
        let gateway: Arc<dyn RecipeGateway> = match self.gateway {
            Some(gateway) => gateway,
            None => Arc::new(MealDbGateway::new(&MealDbConfig::default())?),
        };

        Ok(MealSuggester {
            gateway,
            max_candidates: self.max_candidates.unwrap_or(DEFAULT_MAX_CANDIDATES),
        })
    }
}
