use crate::config::MealDbConfig;
use crate::gateway::RecipeGateway;
use crate::model::{Candidate, RecipeDetail};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// `filter.php` and `lookup.php` both wrap their rows in a nullable `meals`
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// Gateway backed by the public TheMealDB JSON API
pub struct MealDbGateway {
    client: Client,
    base_url: String,
}

impl MealDbGateway {
    /// Create a gateway from configuration
    pub fn new(config: &MealDbConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(config.base_url.clone(), config.timeout())
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meal-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MealDbGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base}/{endpoint}?i={value}` and decode the envelope.
    ///
    /// `None` means "no data" for any reason.
    async fn get_meals<T: DeserializeOwned>(&self, endpoint: &str, value: &str) -> Option<Vec<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = match self.client.get(&url).query(&[("i", value)]).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("{} answered {} for '{}'", endpoint, response.status(), value);
            return None;
        }

        match response.json::<MealsEnvelope<T>>().await {
            Ok(envelope) => envelope.meals,
            Err(e) => {
                warn!("Malformed body from {}: {}", endpoint, e);
                None
            }
        }
    }
}

#[async_trait]
impl RecipeGateway for MealDbGateway {
    async fn search_by_ingredient(&self, ingredient: &str) -> Vec<Candidate> {
        let candidates = self
            .get_meals::<Candidate>("filter.php", ingredient)
            .await
            .unwrap_or_default();
        debug!("{} candidates for '{}'", candidates.len(), ingredient);
        candidates
    }

    async fn fetch_details(&self, id: &str) -> Option<RecipeDetail> {
        let meals = self.get_meals::<Map<String, Value>>("lookup.php", id).await?;
        meals.first().map(RecipeDetail::from_meal_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn gateway(url: String) -> MealDbGateway {
        MealDbGateway::with_base_url(url, Duration::from_secs(6)).unwrap()
    }

    #[tokio::test]
    async fn test_search_by_ingredient() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken breast".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals": [
                    {"strMeal": "Brown Stew Chicken", "strMealThumb": "x.jpg", "idMeal": "52940"},
                    {"strMeal": "Chicken Handi", "strMealThumb": "y.jpg", "idMeal": "52795"}
                ]}"#,
            )
            .create_async()
            .await;

        let candidates = gateway(server.url())
            .search_by_ingredient("chicken breast")
            .await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "52940");
        assert_eq!(candidates[1].name, "Chicken Handi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_null_meals() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        assert!(gateway(server.url())
            .search_by_ingredient("unobtainium")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_meals_key() {
        let mut server = Server::new_async().await;
        let _search = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let _lookup = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let gateway = gateway(server.url());
        assert!(gateway.search_by_ingredient("beef").await.is_empty());
        assert!(gateway.fetch_details("52772").await.is_none());
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        assert!(gateway(server.url())
            .search_by_ingredient("beef")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        assert!(gateway(server.url())
            .search_by_ingredient("beef")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_fetch_details() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals": [{
                    "idMeal": "52772",
                    "strMeal": "Teriyaki Chicken Casserole",
                    "strCategory": "Chicken",
                    "strArea": "Japanese",
                    "strInstructions": "Preheat oven.",
                    "strYoutube": "",
                    "strIngredient1": "soy sauce",
                    "strMeasure1": "3/4 cup",
                    "strIngredient2": "water",
                    "strMeasure2": "1/2 cup",
                    "strIngredient3": null
                }]}"#,
            )
            .create_async()
            .await;

        let detail = gateway(format!("{}/", server.url()))
            .fetch_details("52772")
            .await
            .unwrap();

        assert_eq!(detail.name, "Teriyaki Chicken Casserole");
        assert_eq!(detail.category.as_deref(), Some("Chicken"));
        assert_eq!(detail.ingredient_names(), vec!["soy sauce", "water"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_details_absent() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;
        let _err = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "2".into()))
            .with_status(500)
            .create_async()
            .await;

        let gateway = gateway(server.url());
        assert!(gateway.fetch_details("1").await.is_none());
        assert!(gateway.fetch_details("2").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_no_data() {
        // Port 9 (discard) is not expected to run an HTTP server
        let gateway = MealDbGateway::with_base_url(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();

        assert!(gateway.search_by_ingredient("beef").await.is_empty());
        assert!(gateway.fetch_details("1").await.is_none());
    }
}
