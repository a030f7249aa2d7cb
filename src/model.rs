use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// TheMealDB stores ingredients in numbered columns `strIngredient1..20`
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// A search hit from `filter.php`, before its details are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: String,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientMeasure {
    pub ingredient: String,
    pub measure: String,
}

/// Full recipe record from `lookup.php`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<IngredientMeasure>,
}

impl RecipeDetail {
    /// Build a detail record from one raw `meals[]` entry.
    ///
    /// Ingredient slots with a null, empty or blank name are skipped, the
    /// remaining names and measures are trimmed and a missing measure
    /// becomes an empty string.
    pub fn from_meal_object(meal: &Map<String, Value>) -> Self {
        let text = |key: &str| meal.get(key).and_then(Value::as_str).map(str::to_string);

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = meal
                    .get(&format!("strIngredient{slot}"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())?;
                let measure = meal
                    .get(&format!("strMeasure{slot}"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim();
                Some(IngredientMeasure {
                    ingredient: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect();

        RecipeDetail {
            id: text("idMeal").unwrap_or_default(),
            name: text("strMeal").unwrap_or_default(),
            category: text("strCategory"),
            area: text("strArea"),
            instructions: text("strInstructions"),
            youtube: text("strYoutube"),
            source: text("strSource"),
            ingredients,
        }
    }

    /// Lower-cased ingredient names, in recipe order
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|item| item.ingredient.to_lowercase())
            .collect()
    }
}

/// The winning candidate of a scoring pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub detail: RecipeDetail,
    pub ingredient_names: Vec<String>,
    pub score: usize,
}

/// Successful `suggest_meal` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub matched_requested_ingredients: Vec<String>,
}

/// Everything `suggest_meal` can answer with.
///
/// Serialized untagged so the wire shape is either the recipe object, an
/// object with an `error` field, or an object with a `message` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestOutcome {
    Recipe(RecipeResponse),
    Error { error: String },
    Message { message: String },
}

impl SuggestOutcome {
    pub fn error(error: impl Into<String>) -> Self {
        SuggestOutcome::Error {
            error: error.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        SuggestOutcome::Message {
            message: message.into(),
        }
    }

    pub fn recipe(&self) -> Option<&RecipeResponse> {
        match self {
            SuggestOutcome::Recipe(recipe) => Some(recipe),
            _ => None,
        }
    }
}
