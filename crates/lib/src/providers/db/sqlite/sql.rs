//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the knowledge store.

/// Creates the table holding every provision and its embedding.
///
/// Rows are scoped by `embedding_model` so that vectors from different
/// embedders never meet in one distance computation.
pub const CREATE_PROVISIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS provisions (
        id TEXT PRIMARY KEY,
        provision TEXT NOT NULL,
        content TEXT NOT NULL,
        category TEXT NOT NULL,
        embedding_model TEXT NOT NULL,
        embedding BLOB NOT NULL
    )";

pub const ALL_TABLE_CREATION_SQL: &[&str] = &[CREATE_PROVISIONS_TABLE];

pub const INSERT_PROVISION: &str = "INSERT INTO provisions (id, provision, content, category, embedding_model, embedding) VALUES (?, ?, ?, ?, ?, ?)";

pub const COUNT_PROVISIONS: &str = "SELECT COUNT(*) FROM provisions WHERE embedding_model = ?";

/// Returns the nearest-neighbour query for a vector literal.
///
/// Turso's vector functions expect the query vector inline, e.g. `vector32('[0.1, 0.2]')`.
/// One parameter is bound: the embedding model name.
pub fn nearest_provisions(vector_literal: &str, limit: u32) -> String {
    format!(
        "SELECT id, provision, content, category, vector_distance_cos(embedding, {vector_literal}) AS distance
         FROM provisions
         WHERE embedding_model = ?
         ORDER BY distance ASC
         LIMIT {limit}"
    )
}

/// Returns the listing query, optionally restricted to one category.
pub fn list_provisions(by_category: bool) -> String {
    let category_filter = if by_category { " AND category = ?" } else { "" };
    format!(
        "SELECT id, provision, content, category
         FROM provisions
         WHERE embedding_model = ?{category_filter}
         ORDER BY provision ASC"
    )
}
