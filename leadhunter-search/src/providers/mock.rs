//! Mock provider and stub HTTP server for testing.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::Router;
#[cfg(test)]
use axum::extract::Query;
#[cfg(test)]
use axum::http::{StatusCode, Uri};
#[cfg(test)]
use leadhunter_core::BusinessLead;
#[cfg(test)]
use parking_lot::Mutex;

#[cfg(test)]
use super::{ProviderQuery, SearchProvider};
#[cfg(test)]
use crate::errors::LeadSearchError;

/// What the mock answers with.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// One lead per listed name, tagged with the query's pair.
    Leads(Vec<&'static str>),
    Empty,
    Fail(LeadSearchError),
}

/// Mock provider for testing.
#[cfg(test)]
#[derive(Debug)]
pub struct MockProvider {
    credentials: bool,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    /// Creates a mock provider that holds a usable credential.
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            credentials: true,
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a mock provider without a usable credential.
    pub fn without_credentials() -> Self {
        Self {
            credentials: false,
            ..Self::new(MockBehavior::Empty)
        }
    }

    /// Number of times `search` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl SearchProvider for MockProvider {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }

    async fn search(&self, query: &ProviderQuery<'_>) -> Result<Vec<BusinessLead>, LeadSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Leads(names) => Ok(names
                .iter()
                .map(|name| {
                    BusinessLead::new(*name, query.region, query.business_type)
                        .with_website("https://www.mock.es")
                        .with_phone("+34 91 0000000")
                })
                .collect()),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Fail(error) => Err(error.clone()),
        }
    }
}

/// A request received by [`StubServer`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

/// Local HTTP server answering every request through a closure and
/// recording what it was asked.
#[cfg(test)]
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[cfg(test)]
impl StubServer {
    pub async fn start<F>(respond: F) -> std::io::Result<Self>
    where
        F: Fn(&str, &HashMap<String, String>) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let respond = Arc::new(respond);

        let app = Router::new().fallback(move |uri: Uri, Query(query): Query<HashMap<String, String>>| {
            let recorded = recorded.clone();
            let respond = respond.clone();
            async move {
                let path = uri.path().to_string();
                let reply = (*respond)(&path, &query);
                recorded.lock().push(RecordedRequest { path, query });
                reply
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::warn!("Stub server stopped: {e}");
            }
        });

        Ok(Self {
            base_url: format!("http://{address}"),
            requests,
        })
    }

    /// Answers every request with the same status and body.
    pub async fn fixed(status: StatusCode, body: &'static str) -> std::io::Result<Self> {
        Self::start(move |_, _| (status, body.to_string())).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Requests whose path ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path.ends_with(suffix))
            .collect()
    }
}
