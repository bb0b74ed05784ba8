//! Search pipeline against a file-backed SQLite store.

use std::sync::Arc;

use leadhunter_core::config::{SearchConfig, StorageConfig};
use leadhunter_core::storage::open_store;
use leadhunter_core::{LeadFilter, LeadStore, SearchParams, SqliteLeadStore};
use leadhunter_search::synthetic::lead_count;
use leadhunter_search::{LeadSearchAdapter, SearchOrchestrator};
use regex::Regex;

fn database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}", dir.path().join("leads.db").display())
}

#[tokio::test]
async fn test_search_results_survive_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = database_url(&dir);

    {
        let store = open_store(&StorageConfig {
            database_url: Some(url.clone()),
        })
        .await
        .unwrap();
        let orchestrator = SearchOrchestrator::new(
            Arc::new(LeadSearchAdapter::from_config(&SearchConfig::default())),
            store,
        );

        let outcome = orchestrator
            .search(SearchParams::new(
                &["Andalusia", "Murcia"],
                &["Kitchen or hospitality project planners"],
            ))
            .await
            .unwrap();

        let expected = lead_count("Andalusia", "Kitchen or hospitality project planners")
            + lead_count("Murcia", "Kitchen or hospitality project planners");
        assert_eq!(outcome.leads.len(), expected);
        assert_eq!(outcome.persisted, Some(expected));
        assert_eq!(outcome.failed_pairs, 0);
    }

    let store = SqliteLeadStore::connect(&url).await.unwrap();
    let murcia = store
        .get_leads(&LeadFilter::new("Murcia", ""))
        .await
        .unwrap();

    assert_eq!(
        murcia.len(),
        lead_count("Murcia", "Kitchen or hospitality project planners")
    );
    assert!(murcia.windows(2).all(|pair| pair[0].id < pair[1].id));

    let phone = Regex::new(r"^\+34 9[13456] \d{7}$").unwrap();
    assert!(murcia.iter().all(|stored| phone.is_match(&stored.lead.phone)));
    assert_eq!(murcia[0].lead.name, "Proyectos Kitchen Murcia");
}

#[tokio::test]
async fn test_duplicate_labels_are_searched_once() {
    let store = Arc::new(SqliteLeadStore::in_memory().await.unwrap());
    let orchestrator = SearchOrchestrator::new(
        Arc::new(LeadSearchAdapter::from_config(&SearchConfig::default())),
        store.clone(),
    );

    let outcome = orchestrator
        .search(SearchParams::new(&["Madrid", "Madrid"], &["Franchises"]))
        .await
        .unwrap();

    assert_eq!(outcome.leads.len(), lead_count("Madrid", "Franchises"));
    let stored = store.get_leads(&LeadFilter::default()).await.unwrap();
    assert_eq!(stored.len(), outcome.leads.len());
}
