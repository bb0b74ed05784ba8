//! SerpApi Google search provider.
//!
//! Local-pack places come first, then organic results that pass the
//! exclusion rules. Quota exhaustion is reported either through HTTP 429 or
//! through the `error` field of an otherwise successful response.

use async_trait::async_trait;
use leadhunter_core::config::{SearchConfig, SearchLocale, credential_is_plausible};
use leadhunter_core::BusinessLead;
use serde::Deserialize;
use serde_json::Value;

use super::{ProviderQuery, SearchProvider, http_client, network_error};
use crate::errors::LeadSearchError;

const PROVIDER_NAME: &str = "SerpApi";

/// Organic result links containing any of these are never turned into leads.
const EXCLUDED_LINK_MARKERS: [&str; 3] = ["wikipedia.org", "google.com", "news."];

/// SerpApi provider for Google results localised to Spain.
#[derive(Debug)]
pub struct SerpApiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    locale: SearchLocale,
    result_limit: u32,
}

/// Top-level SerpApi response. Only the fields used for leads are decoded.
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    local_results: Option<LocalResults>,
    #[serde(default)]
    organic_results: Option<Value>,
}

/// `local_results` arrives either as an object with a `places` list or as a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalResults {
    Places { places: Vec<Value> },
    List(Vec<Value>),
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
struct LocalPlace {
    title: String,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug)]
enum SerpApiResult {
    Local(LocalPlace),
    Organic(OrganicResult),
}

impl SerpApiProvider {
    /// Create a provider with default settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&SearchConfig {
            serpapi_key: api_key.into(),
            ..SearchConfig::default()
        })
    }

    /// Create a provider from search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            client: http_client(config.request_timeout),
            endpoint: config.serpapi_endpoint.clone(),
            api_key: config.serpapi_key.trim().to_string(),
            locale: config.locale.clone(),
            result_limit: config.result_limit,
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn has_credentials(&self) -> bool {
        credential_is_plausible(&self.api_key)
    }

    async fn search(&self, query: &ProviderQuery<'_>) -> Result<Vec<BusinessLead>, LeadSearchError> {
        let limit = self.result_limit.to_string();
        let params = [
            ("api_key", self.api_key.as_str()),
            ("engine", "google"),
            ("q", query.text.as_str()),
            ("google_domain", self.locale.google_domain),
            ("gl", self.locale.country),
            ("hl", self.locale.language),
            ("location", self.locale.location),
            ("num", limit.as_str()),
        ];

        tracing::debug!("SerpApi query: {}", query.text);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| network_error(PROVIDER_NAME, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| network_error(PROVIDER_NAME, e))?;

        if !status.is_success() {
            return Err(classify_http_failure(status.as_u16(), &body));
        }

        parse_response(&body, query.region, query.business_type)
    }
}

fn is_quota_message(message: &str) -> bool {
    message.contains("run out of searches") || message.contains("limit")
}

fn error_message(error: Option<&Value>) -> Option<&str> {
    error.and_then(Value::as_str)
}

/// Maps a non-success response to an error.
///
/// 429 and bodies mentioning exhausted searches are quota errors.
fn classify_http_failure(status: u16, body: &str) -> LeadSearchError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default();

    if status == 429 || body.contains("run out of searches") {
        return LeadSearchError::QuotaExceeded {
            provider: PROVIDER_NAME,
            reason: if message.is_empty() {
                format!("HTTP {status}")
            } else {
                message
            },
        };
    }

    LeadSearchError::HttpStatus {
        provider: PROVIDER_NAME,
        status,
        reason: message,
    }
}

/// Decodes a successful SerpApi body into leads for the pair.
///
/// # Errors
/// - `LeadSearchError::ParseError` - Body is not a JSON object
/// - `LeadSearchError::QuotaExceeded` - Body reports exhausted searches or a limit
fn parse_response(
    body: &str,
    region: &str,
    business_type: &str,
) -> Result<Vec<BusinessLead>, LeadSearchError> {
    let response: SerpApiResponse =
        serde_json::from_str(body).map_err(|e| LeadSearchError::ParseError {
            reason: format!("SerpApi JSON parsing failed: {e}"),
        })?;

    if let Some(message) = error_message(response.error.as_ref()) {
        if is_quota_message(message) {
            return Err(LeadSearchError::QuotaExceeded {
                provider: PROVIDER_NAME,
                reason: message.to_string(),
            });
        }
        tracing::debug!("SerpApi reported: {message}");
    }

    Ok(collect_leads(decode_results(response), region, business_type))
}

fn decode_results(response: SerpApiResponse) -> Vec<SerpApiResult> {
    let places = match response.local_results {
        Some(LocalResults::Places { places }) | Some(LocalResults::List(places)) => places,
        Some(LocalResults::Unrecognized(_)) | None => Vec::new(),
    };

    let organic = match response.organic_results {
        Some(Value::Array(results)) => results,
        Some(other) => {
            tracing::debug!("Ignoring organic_results that is not a list: {other}");
            Vec::new()
        }
        None => Vec::new(),
    };

    let local = places.into_iter().filter_map(|value| {
        serde_json::from_value::<LocalPlace>(value)
            .inspect_err(|e| tracing::debug!("Skipping local result: {e}"))
            .ok()
            .filter(|place| has_title(&place.title, "local"))
            .map(SerpApiResult::Local)
    });

    let organic = organic.into_iter().filter_map(|value| {
        serde_json::from_value::<OrganicResult>(value)
            .inspect_err(|e| tracing::debug!("Skipping organic result: {e}"))
            .ok()
            .filter(|organic| has_title(&organic.title, "organic"))
            .map(SerpApiResult::Organic)
    });

    local.chain(organic).collect()
}

fn has_title(title: &str, kind: &str) -> bool {
    let present = !title.trim().is_empty();
    if !present {
        tracing::debug!("Skipping {kind} result with a blank title");
    }
    present
}

fn collect_leads(
    results: Vec<SerpApiResult>,
    region: &str,
    business_type: &str,
) -> Vec<BusinessLead> {
    let mut leads: Vec<BusinessLead> = Vec::new();

    for result in results {
        match result {
            SerpApiResult::Local(place) => {
                leads.push(
                    BusinessLead::new(place.title, region, business_type)
                        .with_website(place.website.unwrap_or_default())
                        .with_phone(place.phone.unwrap_or_default()),
                );
            }
            SerpApiResult::Organic(organic) => {
                let link = organic.link.unwrap_or_default();
                let duplicate = leads.iter().any(|lead| lead.name == organic.title);
                let excluded = EXCLUDED_LINK_MARKERS
                    .iter()
                    .any(|marker| link.contains(marker));

                if duplicate || excluded {
                    continue;
                }

                leads.push(
                    BusinessLead::new(organic.title, region, business_type)
                        .with_website(link)
                        .with_phone(organic.phone.unwrap_or_default()),
                );
            }
        }
    }

    leads
}
