/*
 * Responsibility
 * - DocumentStore on Postgres: one `documents` table, JSONB body per row
 * - PgPool is the long-lived handle shared by all requests (connect once, close on shutdown)
 * - sqlx errors go through RepoError::from_sqlx so unique violations surface as Conflict
 */
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::{
    Document, DocumentStore, Fields, Filter, Upserted, strip_id, upsert_body,
};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.body.0)
    }
}

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Apply `./migrations` (embedded at compile time).
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, body: Fields) -> RepoResult<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Json(strip_id(body)))
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Document>> {
        // LIMIT NULL is "no limit" in Postgres.
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY created_at ASC, id ASC
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Json(filter.as_fields()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, collection: &str, id: Uuid) -> RepoResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Document::from))
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Fields) -> RepoResult<bool> {
        // jsonb `||` replaces top-level keys, like a field-set merge.
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(strip_id(patch)))
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert(
        &self,
        collection: &str,
        filter: &Filter,
        body: Fields,
    ) -> RepoResult<Upserted> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from_sqlx)?;

        let existing = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(collection)
        .bind(Json(filter.as_fields()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        let outcome = match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE documents
                    SET body = body || $2, updated_at = now()
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(Json(strip_id(body)))
                .execute(&mut *tx)
                .await
                .map_err(RepoError::from_sqlx)?;

                Upserted {
                    id,
                    inserted: false,
                }
            }
            None => {
                let id = Uuid::new_v4();
                // A concurrent insert of the same unique key fails here with 23505 -> Conflict.
                sqlx::query(
                    r#"
                    INSERT INTO documents (id, collection, body)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(id)
                .bind(collection)
                .bind(Json(upsert_body(filter, body)))
                .execute(&mut *tx)
                .await
                .map_err(RepoError::from_sqlx)?;

                Upserted { id, inserted: true }
            }
        };

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(outcome)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
