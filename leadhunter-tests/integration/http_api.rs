//! HTTP contract of the search, listing and catalog endpoints.

use std::sync::Arc;

use axum::body::Body;
use hyper::{Request, StatusCode};
use leadhunter_core::InMemoryLeadStore;
use leadhunter_search::synthetic::lead_count;
use serde_json::{Value, json};

use super::common::{get, json, memory_app, offline_app, post_json, send};

fn search_body(regions: &[&str], business_types: &[&str]) -> String {
    json!({ "regions": regions, "businessTypes": business_types }).to_string()
}

#[tokio::test]
async fn test_search_without_credentials_returns_generated_leads() {
    let (status, _, body) = post_json(
        memory_app(),
        "/api/search",
        search_body(&["Madrid"], &["Catering companies"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let leads = json(&body);
    let leads = leads.as_array().unwrap();
    assert_eq!(leads.len(), lead_count("Madrid", "Catering companies"));
    for lead in leads {
        assert_eq!(lead["region"], "Madrid");
        assert_eq!(lead["type"], "Catering companies");
        assert!(!lead["name"].as_str().unwrap().is_empty());
        assert!(lead.get("website").is_some() && lead.get("phone").is_some());
    }
}

#[tokio::test]
async fn test_search_orders_regions_outer_types_inner() {
    let (status, _, body) = post_json(
        memory_app(),
        "/api/search",
        search_body(&["Murcia", "Madrid"], &["Franchises", "Catering companies"]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let leads = json(&body);
    let pairs: Vec<(String, String)> = leads
        .as_array()
        .unwrap()
        .iter()
        .map(|l| (l["region"].as_str().unwrap().to_string(), l["type"].as_str().unwrap().to_string()))
        .collect();

    let mut expected = Vec::new();
    for region in ["Murcia", "Madrid"] {
        for business_type in ["Franchises", "Catering companies"] {
            for _ in 0..lead_count(region, business_type) {
                expected.push((region.to_string(), business_type.to_string()));
            }
        }
    }
    assert_eq!(pairs, expected);
}

#[tokio::test]
async fn test_search_rejects_empty_regions() {
    let (status, _, body) = post_json(memory_app(), "/api/search", search_body(&[], &["X"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["message"], "Invalid search parameters");

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"regions"));
    assert!(fields.contains(&"businessTypes"));
}

#[tokio::test]
async fn test_search_rejects_unknown_labels() {
    let (status, _, body) = post_json(
        memory_app(),
        "/api/search",
        search_body(&["Atlantis"], &["Franchises"]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body)["errors"],
        json!([{"field": "regions", "message": "Unknown region: Atlantis"}])
    );
}

#[tokio::test]
async fn test_search_rejects_malformed_bodies() {
    for body in ["{not json", r#"{"regions": ["Madrid"]}"#, r#"{"regions": "Madrid", "businessTypes": []}"#] {
        let (status, _, response) = post_json(memory_app(), "/api/search", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

        let response = json(&response);
        assert_eq!(response["message"], "Invalid search parameters");
        assert_eq!(response["errors"][0]["field"], "body");
    }
}

#[tokio::test]
async fn test_searched_leads_are_listed_with_filters() {
    let store = Arc::new(InMemoryLeadStore::new());
    let app = offline_app(store.clone(), None);

    let (status, _, _) = post_json(
        app.clone(),
        "/api/search",
        search_body(&["Madrid", "Valencia"], &["Franchises"]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let total = lead_count("Madrid", "Franchises") + lead_count("Valencia", "Franchises");
    assert_eq!(store.len(), total);

    let (status, all) = get(app.clone(), "/api/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), total);
    assert_eq!(all[0]["id"], 1);

    let (_, valencia) = get(app.clone(), "/api/leads?region=Valencia&type=Franchises").await;
    let valencia = valencia.as_array().unwrap();
    assert_eq!(valencia.len(), lead_count("Valencia", "Franchises"));
    assert!(valencia.iter().all(|l| l["region"] == "Valencia"));

    let (_, unfiltered) = get(app.clone(), "/api/leads?region=&type=").await;
    assert_eq!(unfiltered.as_array().unwrap().len(), total);

    let (_, none) = get(app, "/api/leads?type=Catering%20companies").await;
    assert_eq!(none, Value::Array(vec![]));
}

#[tokio::test]
async fn test_catalog_and_health() {
    let (status, catalog) = get(memory_app(), "/api/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog["regions"].as_array().unwrap().len(), 5);
    assert_eq!(catalog["businessTypes"].as_array().unwrap().len(), 7);
    assert_eq!(catalog["regions"][0], "Andalusia");

    let (status, health) = get(memory_app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_cors_allows_other_origins() {
    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(memory_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_static_directory_is_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>LeadHunter</h1>").unwrap();

    let app = offline_app(Arc::new(InMemoryLeadStore::new()), Some(dir.path()));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, _, body) = send(app.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>LeadHunter</h1>");

    let (status, _) = get(app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
}
