//! In-memory lead store for development runs without a database.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{LeadFilter, LeadStore, StorageError};
use crate::lead::{BusinessLead, StoredLead};

#[derive(Debug, Default)]
struct Inner {
    leads: Vec<StoredLead>,
    next_id: i64,
}

/// Lead store that keeps everything in process memory.
///
/// Ids start at 1 and increase monotonically, mirroring an autoincrement
/// column. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    inner: RwLock<Inner>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn save_leads(&self, leads: &[BusinessLead]) -> Result<Vec<StoredLead>, StorageError> {
        if leads.is_empty() {
            return Ok(Vec::new());
        }

        let mut inner = self.inner.write();
        let saved: Vec<StoredLead> = leads
            .iter()
            .map(|lead| {
                inner.next_id += 1;
                StoredLead {
                    id: inner.next_id,
                    lead: lead.clone(),
                }
            })
            .collect();
        inner.leads.extend(saved.iter().cloned());

        Ok(saved)
    }

    async fn get_leads(&self, filter: &LeadFilter) -> Result<Vec<StoredLead>, StorageError> {
        let inner = self.inner.read();
        Ok(inner
            .leads
            .iter()
            .filter(|stored| filter.matches(&stored.lead))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_batch_leaves_store_untouched() {
        let store = InMemoryLeadStore::new();
        assert!(store.save_leads(&[]).await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_ids_increase_across_batches() {
        let store = InMemoryLeadStore::new();
        let first = store
            .save_leads(&[BusinessLead::new("A", "Madrid", "Franchises")])
            .await
            .unwrap();
        let second = store
            .save_leads(&[
                BusinessLead::new("B", "Murcia", "Franchises"),
                BusinessLead::new("C", "Murcia", "Catering companies"),
            ])
            .await
            .unwrap();

        assert_eq!(first[0].id, 1);
        assert_eq!(second.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(store.len(), 3);

        let murcia = store.get_leads(&LeadFilter::new("Murcia", "")).await.unwrap();
        assert_eq!(murcia.len(), 2);
    }
}
