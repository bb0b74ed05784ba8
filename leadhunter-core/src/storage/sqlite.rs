//! SQLite-backed lead store.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, QueryBuilder, Row, Sqlite};

use super::{LeadFilter, LeadStore, StorageError};
use crate::lead::{BusinessLead, StoredLead};

/// Lead store over a SQLite connection pool.
///
/// The schema is applied from embedded migrations when connecting.
#[derive(Debug, Clone)]
pub struct SqliteLeadStore {
    pool: Pool<Sqlite>,
}

impl SqliteLeadStore {
    /// Connects to `url` (for example `sqlite://leads.db` or
    /// `sqlite::memory:`) and applies pending migrations.
    ///
    /// In-memory databases use a single long-lived connection, since every
    /// new connection would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// - `StorageError::Open` - If the URL is invalid or the database cannot be opened
    /// - `StorageError::Migration` - If the schema could not be applied
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Open {
                reason: format!("invalid connection string: {e}"),
            })?
            .create_if_missing(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Open {
                reason: e.to_string(),
            })?;

        let store = Self { pool };
        store.run_migrations().await?;

        tracing::info!("Lead database ready at {url}");
        Ok(store)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// - `StorageError::Open` - If SQLite could not be initialized
    /// - `StorageError::Migration` - If the schema could not be applied
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::connect("sqlite::memory:").await
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// - `StorageError::Migration` - If a migration failed to execute
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Migration {
                reason: e.to_string(),
            })
    }

    /// Closes every pooled connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn lead_from_row(row: &SqliteRow) -> Result<StoredLead, sqlx::Error> {
    Ok(StoredLead {
        id: row.try_get("id")?,
        lead: BusinessLead {
            name: row.try_get("name")?,
            website: row
                .try_get::<Option<String>, _>("website")?
                .unwrap_or_default(),
            phone: row.try_get::<Option<String>, _>("phone")?.unwrap_or_default(),
            region: row.try_get("region")?,
            business_type: row.try_get("type")?,
        },
    })
}

#[async_trait]
impl LeadStore for SqliteLeadStore {
    async fn save_leads(&self, leads: &[BusinessLead]) -> Result<Vec<StoredLead>, StorageError> {
        if leads.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(leads.len());

        // One statement per row keeps RETURNING ids aligned with input order.
        for lead in leads {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO business_leads (name, website, phone, region, type)
                 VALUES (?, ?, ?, ?, ?)
                 RETURNING id",
            )
            .bind(&lead.name)
            .bind(&lead.website)
            .bind(&lead.phone)
            .bind(&lead.region)
            .bind(&lead.business_type)
            .fetch_one(&mut *tx)
            .await?;

            saved.push(StoredLead {
                id,
                lead: lead.clone(),
            });
        }

        tx.commit().await?;

        tracing::debug!("Saved {} leads", saved.len());
        Ok(saved)
    }

    async fn get_leads(&self, filter: &LeadFilter) -> Result<Vec<StoredLead>, StorageError> {
        let filter = filter.clone().normalized();
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, website, phone, region, type FROM business_leads",
        );

        let mut separator = " WHERE ";
        if let Some(region) = filter.region {
            query.push(separator).push("region = ").push_bind(region);
            separator = " AND ";
        }
        if let Some(business_type) = filter.business_type {
            query.push(separator).push("type = ").push_bind(business_type);
        }

        let rows = query.build().fetch_all(&self.pool).await?;
        let leads = rows
            .iter()
            .map(lead_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_leads() -> Vec<BusinessLead> {
        vec![
            BusinessLead::new("Catering Catering Madrid", "Madrid", "Catering companies")
                .with_website("https://www.catering-catering-madrid.es")
                .with_phone("+34 91 1234567"),
            BusinessLead::new("Grupo Franchises Madrid", "Madrid", "Franchises"),
            BusinessLead::new("Eventos Catering Murcia", "Murcia", "Catering companies"),
        ]
    }

    #[tokio::test]
    async fn test_save_empty_batch_is_noop() {
        let store = SqliteLeadStore::in_memory().await.unwrap();

        let saved = store.save_leads(&[]).await.unwrap();
        assert!(saved.is_empty());

        let all = store.get_leads(&LeadFilter::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_save_returns_ids_in_input_order() {
        let store = SqliteLeadStore::in_memory().await.unwrap();
        let leads = sample_leads();

        let saved = store.save_leads(&leads).await.unwrap();

        assert_eq!(saved.len(), 3);
        for (stored, lead) in saved.iter().zip(&leads) {
            assert_eq!(&stored.lead, lead);
        }
        assert!(saved.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_get_leads_applies_filters() {
        let store = SqliteLeadStore::in_memory().await.unwrap();
        store.save_leads(&sample_leads()).await.unwrap();

        let all = store.get_leads(&LeadFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let madrid = store.get_leads(&LeadFilter::new("Madrid", "")).await.unwrap();
        assert_eq!(madrid.len(), 2);

        let catering = store
            .get_leads(&LeadFilter::new("", "Catering companies"))
            .await
            .unwrap();
        assert_eq!(catering.len(), 2);

        let both = store
            .get_leads(&LeadFilter::new("Madrid", "Catering companies"))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].lead.phone, "+34 91 1234567");
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("leads.db").display());

        let store = SqliteLeadStore::connect(&url).await.unwrap();
        store.save_leads(&sample_leads()).await.unwrap();
        store.close().await;

        let reopened = SqliteLeadStore::connect(&url).await.unwrap();
        let all = reopened.get_leads(&LeadFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_url_is_open_error() {
        let result = SqliteLeadStore::connect("postgres://nowhere").await;
        assert!(matches!(result, Err(StorageError::Open { .. })));
    }
}
