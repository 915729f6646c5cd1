use crate::{
    embedding::Embedder,
    errors::StoreError,
    knowledge::{Category, Provision},
    providers::db::storage::KnowledgeStore,
    types::{RetrievedProvision, StoredProvision},
};
use async_trait::async_trait;
use std::{
    fmt::{self, Debug},
    path::Path,
};
use tracing::{debug, info};
use turso::{Database, Row, Value as TursoValue};

pub mod sql;

/// A knowledge store backed by a local Turso (SQLite) database file using
/// `vector_distance_cos` for nearest-neighbour search.
///
/// When cloned, it shares the same underlying database.
#[derive(Clone)]
pub struct SqliteKnowledgeStore {
    /// The Turso database instance. It's cloneable and thread-safe.
    db: Database,
    embedder: Box<dyn Embedder>,
}

impl SqliteKnowledgeStore {
    /// Opens (or creates) the store at `db_path` and ensures the schema exists.
    ///
    /// Use ":memory:" for an isolated in-memory store. For file paths the
    /// parent directory is created if missing.
    pub async fn new(db_path: &str, embedder: Box<dyn Embedder>) -> Result<Self, StoreError> {
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::Connection(e.to_string()))?;
                }
            }
        }

        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        // PRAGMA returns a row, so it goes through `query`.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { db, embedder };
        store.initialize_schema().await?;
        info!(db_path = %db_path, embedder = %store.embedder.model_name(), "Opened knowledge store.");
        Ok(store)
    }

    /// Ensures the provisions table exists. Idempotent.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.db.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }
}

impl Debug for SqliteKnowledgeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteKnowledgeStore")
            .field("embedder", &self.embedder.model_name())
            .finish_non_exhaustive()
    }
}

/// Encodes a vector as the little-endian f32 blob Turso's vector functions read.
fn vector_to_blob(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Renders a vector as a `vector32('[...]')` SQL literal.
fn vector_literal(vector: &[f32]) -> String {
    format!(
        "vector32('[{}]')",
        vector
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn text_at(row: &Row, index: usize) -> Result<String, StoreError> {
    match row.get_value(index)? {
        TursoValue::Text(s) => Ok(s),
        other => Err(StoreError::RowDecode(format!(
            "expected text in column {index}, found {other:?}"
        ))),
    }
}

fn stored_provision_from_row(row: &Row) -> Result<StoredProvision, StoreError> {
    let category: Category = text_at(row, 3)?.parse()?;
    Ok(StoredProvision {
        id: text_at(row, 0)?,
        provision: Provision {
            provision: text_at(row, 1)?,
            content: text_at(row, 2)?,
            category,
        },
    })
}

#[async_trait]
impl KnowledgeStore for SqliteKnowledgeStore {
    async fn add(&self, provisions: &[Provision], ids: &[String]) -> Result<usize, StoreError> {
        if provisions.len() != ids.len() {
            return Err(StoreError::LengthMismatch {
                ids: ids.len(),
                provisions: provisions.len(),
            });
        }

        let conn = self.db.connect()?;
        let model_name = self.embedder.model_name().to_string();
        for (provision, id) in provisions.iter().zip(ids) {
            // Only the body text is embedded; the title rides along as metadata.
            let vector = self.embedder.embed(&provision.content).await?;
            let params: Vec<TursoValue> = vec![
                id.clone().into(),
                provision.provision.clone().into(),
                provision.content.clone().into(),
                provision.category.as_str().to_string().into(),
                model_name.clone().into(),
                TursoValue::Blob(vector_to_blob(&vector)),
            ];
            conn.execute(sql::INSERT_PROVISION, params).await?;
            debug!(id = %id, provision = %provision.provision, "Inserted provision.");
        }
        Ok(provisions.len())
    }

    async fn query(
        &self,
        text: &str,
        n_results: u32,
    ) -> Result<Vec<RetrievedProvision>, StoreError> {
        let query_vector = self.embedder.embed(text).await?;
        // A zero vector has no cosine distance to anything.
        let magnitude = query_vector.iter().map(|c| c * c).sum::<f32>().sqrt();
        if magnitude == 0.0 || magnitude.is_nan() {
            return Err(StoreError::UnsearchableQuery);
        }
        let sql = sql::nearest_provisions(&vector_literal(&query_vector), n_results);
        debug!(n_results, "Executing nearest-neighbour provision query.");

        let conn = self.db.connect()?;
        let mut rows = conn
            .query(&sql, vec![TursoValue::from(self.embedder.model_name().to_string())])
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            let stored = stored_provision_from_row(&row)?;
            let distance = match row.get_value(4)? {
                TursoValue::Real(f) => f,
                TursoValue::Integer(i) => i as f64,
                _ => f64::NAN,
            };
            results.push(RetrievedProvision {
                provision: stored.provision.provision,
                content: stored.provision.content,
                category: stored.provision.category,
                distance,
            });
        }
        Ok(results)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(
                sql::COUNT_PROVISIONS,
                vec![TursoValue::from(self.embedder.model_name().to_string())],
            )
            .await?;
        match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                TursoValue::Integer(n) => Ok(n.max(0) as u64),
                other => Err(StoreError::RowDecode(format!(
                    "expected integer count, found {other:?}"
                ))),
            },
            None => Ok(0),
        }
    }

    async fn list(&self, category: Option<Category>) -> Result<Vec<StoredProvision>, StoreError> {
        let conn = self.db.connect()?;
        let mut params = vec![TursoValue::from(self.embedder.model_name().to_string())];
        if let Some(category) = category {
            params.push(category.as_str().to_string().into());
        }
        let mut rows = conn
            .query(&sql::list_provisions(category.is_some()), params)
            .await?;

        let mut provisions = Vec::new();
        while let Some(row) = rows.next().await? {
            provisions.push(stored_provision_from_row(&row)?);
        }
        Ok(provisions)
    }
}
