//! Google Places provider.
//!
//! A text search finds candidate places, then a details request per place
//! (up to the configured limit) fills in website and phone number.

use std::time::Duration;

use async_trait::async_trait;
use leadhunter_core::BusinessLead;
use leadhunter_core::config::{SearchConfig, credential_is_plausible};
use serde::Deserialize;
use serde_json::Value;

use super::{ProviderQuery, SearchProvider, http_client, network_error};
use crate::errors::LeadSearchError;

const PROVIDER_NAME: &str = "Google Places";
const DETAIL_FIELDS: &str = "name,website,formatted_phone_number,international_phone_number";

/// Google Places provider using the text search and details endpoints.
#[derive(Debug)]
pub struct PlacesProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    detail_limit: usize,
    detail_delay: Duration,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Value>,
}

/// Place returned by text search.
#[derive(Debug, Clone, Deserialize)]
struct PlaceSummary {
    name: String,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    international_phone_number: Option<String>,
}

impl PlacesProvider {
    /// Create a provider from search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            client: http_client(config.request_timeout),
            base_url: config.places_endpoint.trim_end_matches('/').to_string(),
            api_key: config.places_api_key.trim().to_string(),
            detail_limit: config.places_detail_limit,
            detail_delay: config.places_detail_delay,
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<String, LeadSearchError> {
        let url = format!("{}/{path}/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| network_error(PROVIDER_NAME, e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LeadSearchError::QuotaExceeded {
                provider: PROVIDER_NAME,
                reason: format!("HTTP {status}"),
            });
        }
        if !status.is_success() {
            return Err(LeadSearchError::HttpStatus {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                reason: String::new(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| network_error(PROVIDER_NAME, e))
    }

    async fn fetch_details(&self, place_id: &str) -> Result<PlaceDetails, LeadSearchError> {
        let body = self
            .get_json("details", &[("place_id", place_id), ("fields", DETAIL_FIELDS)])
            .await?;
        parse_details(&body)
    }
}

#[async_trait]
impl SearchProvider for PlacesProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn has_credentials(&self) -> bool {
        credential_is_plausible(&self.api_key)
    }

    async fn search(&self, query: &ProviderQuery<'_>) -> Result<Vec<BusinessLead>, LeadSearchError> {
        tracing::debug!("Places text search: {}", query.text);

        let body = self
            .get_json("textsearch", &[("query", query.text.as_str())])
            .await?;
        let places = parse_text_search(&body)?;

        let mut leads = Vec::new();
        let mut details_sent = false;
        for place in places.into_iter().take(self.detail_limit) {
            let details = match place.place_id.as_deref() {
                Some(place_id) => {
                    if details_sent {
                        tokio::time::sleep(self.detail_delay).await;
                    }
                    details_sent = true;
                    self.fetch_details(place_id).await
                }
                None => Err(LeadSearchError::ProviderError {
                    reason: "place has no place_id".to_string(),
                }),
            };

            let details = details.unwrap_or_else(|e| {
                tracing::warn!("Error fetching details for place {}: {e}", place.name);
                PlaceDetails::default()
            });
            match lead_from_details(&place, details, query.region, query.business_type) {
                Some(lead) => leads.push(lead),
                None => tracing::debug!("Skipping place with a blank name"),
            }
        }

        Ok(leads)
    }
}

/// Maps a Places status string to an error.
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), LeadSearchError> {
    let reason = || error_message.unwrap_or(status).to_string();
    match status {
        "" | "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => Err(LeadSearchError::QuotaExceeded {
            provider: PROVIDER_NAME,
            reason: reason(),
        }),
        _ => Err(LeadSearchError::ProviderError { reason: reason() }),
    }
}

fn parse_text_search(body: &str) -> Result<Vec<PlaceSummary>, LeadSearchError> {
    let response: TextSearchResponse =
        serde_json::from_str(body).map_err(|e| LeadSearchError::ParseError {
            reason: format!("Places text search JSON parsing failed: {e}"),
        })?;
    check_status(&response.status, response.error_message.as_deref())?;

    Ok(response
        .results
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value::<PlaceSummary>(value)
                .inspect_err(|e| tracing::debug!("Skipping place: {e}"))
                .ok()
        })
        .collect())
}

fn parse_details(body: &str) -> Result<PlaceDetails, LeadSearchError> {
    let response: DetailsResponse =
        serde_json::from_str(body).map_err(|e| LeadSearchError::ParseError {
            reason: format!("Places details JSON parsing failed: {e}"),
        })?;
    check_status(&response.status, response.error_message.as_deref())?;
    Ok(response.result.unwrap_or_default())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builds a lead, or `None` when neither the details nor the summary carry a name.
fn lead_from_details(
    place: &PlaceSummary,
    details: PlaceDetails,
    region: &str,
    business_type: &str,
) -> Option<BusinessLead> {
    let name = non_empty(details.name).or_else(|| non_empty(Some(place.name.clone())))?;
    let phone = non_empty(details.formatted_phone_number)
        .or_else(|| non_empty(details.international_phone_number))
        .unwrap_or_default();

    Some(
        BusinessLead::new(name, region, business_type)
            .with_website(details.website.unwrap_or_default())
            .with_phone(phone),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Instant;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::providers::StubServer;
    use crate::service::LeadSearchAdapter;
    use crate::synthetic;

    const KEY: &str = "abcdefghijklmnopqrstuvwxyz";

    fn provider_for(stub: &StubServer, detail_limit: usize, detail_delay: Duration) -> PlacesProvider {
        PlacesProvider::from_config(&SearchConfig {
            places_api_key: KEY.to_string(),
            places_endpoint: stub.base_url.clone(),
            places_detail_limit: detail_limit,
            places_detail_delay: detail_delay,
            ..SearchConfig::default()
        })
    }

    fn text_search_body(places: &[(&str, Option<&str>)]) -> String {
        let results: Vec<Value> = places
            .iter()
            .map(|(name, place_id)| match place_id {
                Some(id) => json!({"name": name, "place_id": id}),
                None => json!({"name": name}),
            })
            .collect();
        json!({"status": "OK", "results": results}).to_string()
    }

    fn is_text_search(path: &str) -> bool {
        path.ends_with("/textsearch/json")
    }

    fn place_id(query: &HashMap<String, String>) -> Option<&str> {
        query.get("place_id").map(String::as_str)
    }

    fn place(name: &str) -> PlaceSummary {
        PlaceSummary {
            name: name.to_string(),
            place_id: Some("abc".to_string()),
        }
    }

    #[test]
    fn test_text_search_results() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"name": "Catering Sol", "place_id": "p1"},
                {"place_id": "p2"},
                {"name": "Banquetes Norte"}
            ]
        }"#;

        let places = parse_text_search(body).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].place_id.as_deref(), Some("p1"));
        assert_eq!(places[1].place_id, None);
    }

    #[test]
    fn test_status_mapping() {
        assert!(parse_text_search(r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .unwrap()
            .is_empty());

        let quota = parse_text_search(r#"{"status": "OVER_QUERY_LIMIT"}"#).unwrap_err();
        assert!(quota.is_quota_exceeded());

        let denied = parse_text_search(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        )
        .unwrap_err();
        match denied {
            LeadSearchError::ProviderError { reason } => {
                assert_eq!(reason, "The provided API key is invalid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            parse_text_search(r#"{"status": "INVALID_REQUEST"}"#).unwrap_err(),
            LeadSearchError::ProviderError { .. }
        ));
    }

    #[test]
    fn test_details_fill_website_and_phone() {
        let details = parse_details(
            r#"{"status": "OK", "result": {
                "name": "Catering Sol S.L.",
                "website": "https://cateringsol.es",
                "formatted_phone_number": "910 00 00 00",
                "international_phone_number": "+34 910 00 00 00"
            }}"#,
        )
        .unwrap();

        let lead = lead_from_details(&place("Catering Sol"), details, "Madrid", "Catering companies").unwrap();
        assert_eq!(lead.name, "Catering Sol S.L.");
        assert_eq!(lead.website, "https://cateringsol.es");
        assert_eq!(lead.phone, "910 00 00 00");
        assert_eq!(lead.region, "Madrid");
    }

    #[test]
    fn test_details_fallbacks() {
        let details = PlaceDetails {
            name: Some(String::new()),
            formatted_phone_number: Some(String::new()),
            international_phone_number: Some("+34 910 00 00 00".to_string()),
            ..PlaceDetails::default()
        };

        let lead = lead_from_details(&place("Catering Sol"), details, "Madrid", "Franchises").unwrap();
        assert_eq!(lead.name, "Catering Sol");
        assert_eq!(lead.website, "");
        assert_eq!(lead.phone, "+34 910 00 00 00");
    }

    #[test]
    fn test_failed_details_keep_place_name() {
        let lead = lead_from_details(&place("Catering Sol"), PlaceDetails::default(), "Murcia", "Franchises").unwrap();
        assert_eq!(lead.name, "Catering Sol");
        assert!(lead.website.is_empty() && lead.phone.is_empty());
    }

    #[test]
    fn test_place_without_any_name_is_skipped() {
        let blank = PlaceDetails {
            name: Some("  ".to_string()),
            ..PlaceDetails::default()
        };
        assert!(lead_from_details(&place(" "), blank, "Murcia", "Franchises").is_none());

        let named = PlaceDetails {
            name: Some("Catering Sol S.L.".to_string()),
            ..PlaceDetails::default()
        };
        let lead = lead_from_details(&place(""), named, "Murcia", "Franchises").unwrap();
        assert_eq!(lead.name, "Catering Sol S.L.");
    }

    #[tokio::test]
    async fn test_details_follow_text_search() {
        let stub = StubServer::start(|path, query| {
            if is_text_search(path) {
                let body = text_search_body(&[
                    ("Catering Sol", Some("p1")),
                    ("Banquetes Norte", None),
                    ("Cocina Central", Some("p3")),
                ]);
                return (StatusCode::OK, body);
            }
            match place_id(query) {
                Some("p1") => (
                    StatusCode::OK,
                    json!({"status": "OK", "result": {
                        "name": "Catering Sol S.L.",
                        "website": "https://cateringsol.es",
                        "formatted_phone_number": "910 00 00 00"
                    }})
                    .to_string(),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            }
        })
        .await
        .unwrap();

        let query = ProviderQuery::new("Madrid", "Catering companies");
        let leads = provider_for(&stub, 10, Duration::ZERO).search(&query).await.unwrap();

        let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Catering Sol S.L.", "Banquetes Norte", "Cocina Central"]);
        assert_eq!(leads[0].website, "https://cateringsol.es");
        assert_eq!(leads[0].phone, "910 00 00 00");
        assert!(leads[1].website.is_empty() && leads[1].phone.is_empty());
        assert!(leads[2].website.is_empty() && leads[2].phone.is_empty());

        let text_searches = stub.requests_to("/textsearch/json");
        assert_eq!(text_searches.len(), 1);
        assert_eq!(
            text_searches[0].query.get("query").map(String::as_str),
            Some("catering company in madrid spain")
        );
        assert_eq!(text_searches[0].query.get("key").map(String::as_str), Some(KEY));

        let details = stub.requests_to("/details/json");
        let ids: Vec<Option<&str>> = details.iter().map(|r| place_id(&r.query)).collect();
        assert_eq!(ids, vec![Some("p1"), Some("p3")]);
        assert!(details.iter().all(|r| r.query.get("fields").map(String::as_str) == Some(DETAIL_FIELDS)));
    }

    #[tokio::test]
    async fn test_details_requests_are_capped() {
        let stub = StubServer::start(|path, _| {
            if is_text_search(path) {
                let ids: Vec<String> = (0..12).map(|i| format!("p{i}")).collect();
                let places: Vec<(&str, Option<&str>)> =
                    ids.iter().map(|id| ("Catering Sol", Some(id.as_str()))).collect();
                return (StatusCode::OK, text_search_body(&places));
            }
            (StatusCode::OK, json!({"status": "OK", "result": {}}).to_string())
        })
        .await
        .unwrap();

        let query = ProviderQuery::new("Murcia", "Franchises");
        let leads = provider_for(&stub, 10, Duration::ZERO).search(&query).await.unwrap();

        assert_eq!(leads.len(), 10);
        assert_eq!(stub.requests_to("/details/json").len(), 10);
    }

    #[tokio::test]
    async fn test_delay_separates_details_requests() {
        let stub = StubServer::start(|path, _| {
            if is_text_search(path) {
                let body = text_search_body(&[
                    ("Catering Sol", Some("p1")),
                    ("Banquetes Norte", Some("p2")),
                    ("Cocina Central", Some("p3")),
                    ("Eventos Sur", None),
                ]);
                return (StatusCode::OK, body);
            }
            (StatusCode::OK, json!({"status": "OK", "result": {}}).to_string())
        })
        .await
        .unwrap();

        let delay = Duration::from_millis(40);
        let query = ProviderQuery::new("Murcia", "Franchises");
        let started = Instant::now();
        let leads = provider_for(&stub, 10, delay).search(&query).await.unwrap();

        assert_eq!(leads.len(), 4);
        assert_eq!(stub.requests_to("/details/json").len(), 3);
        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_over_query_limit_is_quota_exceeded() {
        let stub = StubServer::fixed(StatusCode::OK, r#"{"status": "OVER_QUERY_LIMIT"}"#)
            .await
            .unwrap();
        let query = ProviderQuery::new("Murcia", "Franchises");

        let err = provider_for(&stub, 10, Duration::ZERO).search(&query).await.unwrap_err();
        assert!(err.is_quota_exceeded(), "{err:?}");
        assert!(stub.requests_to("/details/json").is_empty());
    }

    #[tokio::test]
    async fn test_only_blank_names_fall_back_to_generated_leads() {
        let stub = StubServer::start(|path, _| {
            if is_text_search(path) {
                return (StatusCode::OK, text_search_body(&[("", Some("p1")), ("  ", None)]));
            }
            (StatusCode::OK, json!({"status": "OK", "result": {"name": " "}}).to_string())
        })
        .await
        .unwrap();

        let provider = provider_for(&stub, 10, Duration::ZERO);
        let query = ProviderQuery::new("Murcia", "Franchises");
        assert!(provider.search(&query).await.unwrap().is_empty());

        let adapter = LeadSearchAdapter::new(Arc::new(provider));
        let leads = adapter.search_businesses("Murcia", "Franchises").await;
        assert_eq!(leads.len(), synthetic::lead_count("Murcia", "Franchises"));
        assert!(leads.iter().all(|l| !l.name.trim().is_empty()));
    }
}
