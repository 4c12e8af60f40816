//! Blocking FoodData Central HTTP client

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::mapping::FdcFoodDetails;
use super::{FdcError, FdcResult};

pub const FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc";

/// Results requested per search
const SEARCH_PAGE_SIZE: &str = "5";

/// One search hit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcSearchHit {
    pub fdc_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FdcSearchResponse {
    #[serde(default)]
    foods: Vec<FdcSearchHit>,
}

/// Preference rank of an FDC data type; lower is better
fn data_type_rank(data_type: Option<&str>) -> u8 {
    match data_type {
        Some("Foundation") => 0,
        Some("SR Legacy") => 1,
        Some("Survey (FNDDS)") => 2,
        Some("Branded") => 3,
        _ => 4,
    }
}

/// Pick the hit with the most stable per-100 g composition
///
/// Foundation beats SR Legacy, then Survey (FNDDS), then Branded. Ties keep
/// the search order.
pub fn best_hit(hits: Vec<FdcSearchHit>) -> Option<FdcSearchHit> {
    hits.into_iter()
        .enumerate()
        .min_by_key(|(i, hit)| (data_type_rank(hit.data_type.as_deref()), *i))
        .map(|(_, hit)| hit)
}

pub struct FdcClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FdcClient {
    pub fn new(api_key: impl Into<String>) -> FdcResult<Self> {
        Self::with_base_url(api_key, FDC_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> FdcResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FdcError::MissingApiKey);
        }
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    // The api key rides in the query string, so request URLs never reach errors
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> FdcResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FdcError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.json().map_err(reqwest::Error::without_url)?)
    }

    /// Best match for a food name, if any
    pub fn search(&self, query: &str) -> FdcResult<Option<FdcSearchHit>> {
        let response: FdcSearchResponse = self.get_json(
            "/v1/foods/search",
            &[("query", query), ("pageSize", SEARCH_PAGE_SIZE)],
        )?;
        Ok(best_hit(response.foods))
    }

    pub fn food_details(&self, fdc_id: i64) -> FdcResult<FdcFoodDetails> {
        self.get_json(&format!("/v1/food/{}", fdc_id), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: i64, data_type: Option<&str>) -> FdcSearchHit {
        FdcSearchHit {
            fdc_id: id,
            description: String::new(),
            data_type: data_type.map(str::to_string),
        }
    }

    #[test]
    fn test_best_hit_prefers_foundation() {
        let hits = vec![
            hit(1, Some("Branded")),
            hit(2, Some("SR Legacy")),
            hit(3, Some("Foundation")),
        ];
        assert_eq!(best_hit(hits).unwrap().fdc_id, 3);
        assert!(best_hit(Vec::new()).is_none());
    }

    #[test]
    fn test_best_hit_ranks_branded_last() {
        let hits = vec![
            hit(1, Some("Branded")),
            hit(2, None),
            hit(3, Some("Survey (FNDDS)")),
            hit(4, Some("SR Legacy")),
        ];
        assert_eq!(best_hit(hits).unwrap().fdc_id, 4);

        let hits = vec![hit(1, Some("Experimental")), hit(2, Some("Branded")), hit(3, Some("Branded"))];
        assert_eq!(best_hit(hits).unwrap().fdc_id, 2);
    }

    #[test]
    fn test_transport_error_hides_api_key() {
        let client = FdcClient::with_base_url("SECRETKEY123", "http://127.0.0.1:9").unwrap();
        let err = client.search("milk").unwrap_err();
        assert!(matches!(err, FdcError::Http(_)));
        let message = err.to_string();
        assert!(!message.contains("SECRETKEY123"), "api key leaked: {}", message);
        assert!(!message.contains("api_key"), "query string leaked: {}", message);
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(FdcClient::new("  "), Err(FdcError::MissingApiKey)));
    }

    #[test]
    fn test_search_response_shape() {
        let response: FdcSearchResponse = serde_json::from_str(
            r#"{"totalHits": 1, "foods": [{"fdcId": 171077, "description": "Chicken", "dataType": "SR Legacy"}]}"#,
        )
        .unwrap();
        assert_eq!(response.foods[0].fdc_id, 171077);
        assert_eq!(response.foods[0].data_type.as_deref(), Some("SR Legacy"));
    }
}
