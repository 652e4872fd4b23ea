use anyhow::{Context, Result};

use super::schema::Database;
use super::types::FavoriteRow;
use crate::content::ContentItem;

impl Database {
    // ========================================================================
    // Favorites Operations
    // ========================================================================

    /// Replace the stored favorites with `items`.
    ///
    /// The table is rewritten in a single transaction so a crash never leaves
    /// a half-saved list. Position is taken from slice order.
    pub async fn save_favorites(&self, items: &[ContentItem]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM favorites")
            .execute(&mut *tx)
            .await?;

        for (position, item) in items.iter().enumerate() {
            let payload = serde_json::to_string(&item.payload)
                .with_context(|| format!("Failed to encode favorite {}", item.id))?;
            sqlx::query(
                r#"
                INSERT INTO favorites (position, id, kind, payload, saved_at)
                VALUES (?, ?, ?, ?, datetime('now'))
            "#,
            )
            .bind(position as i64)
            .bind(&item.id)
            .bind(item.kind().to_string())
            .bind(payload)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(count = items.len(), "Saved favorites");
        Ok(())
    }

    /// Load favorites in stored order.
    ///
    /// Rows whose payload no longer decodes are skipped with a warning.
    pub async fn load_favorites(&self) -> Result<Vec<ContentItem>> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            "SELECT position, id, kind, payload FROM favorites ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_str(&row.payload) {
                Ok(payload) => items.push(ContentItem {
                    id: row.id,
                    payload,
                    order: items.len(),
                }),
                Err(e) => {
                    tracing::warn!(
                        id = %row.id,
                        kind = %row.kind,
                        position = row.position,
                        error = %e,
                        "Skipping unreadable favorite"
                    );
                }
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{CatalogProvider, ContentItem, ContentKind, ContentProvider};
    use crate::storage::Database;
    use crate::store::aggregate;
    use pretty_assertions::assert_eq;

    async fn sample_items() -> Vec<ContentItem> {
        let catalog = CatalogProvider::new();
        let categories = vec!["technology".to_string()];
        let news = catalog.fetch_news(&categories).await.unwrap();
        let movies = catalog.fetch_movies(&categories).await.unwrap();
        let social = catalog.fetch_social_posts(&categories).await.unwrap();
        aggregate(news, movies, social)
    }

    #[tokio::test]
    async fn test_load_empty() {
        let db = Database::open(":memory:").await.unwrap();
        assert!(db.load_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_preserves_order() {
        let db = Database::open(":memory:").await.unwrap();
        let mut items = sample_items().await;
        items.reverse();

        db.save_favorites(&items).await.unwrap();
        let loaded = db.load_favorites().await.unwrap();

        let ids: Vec<&str> = loaded.iter().map(|i| i.id.as_str()).collect();
        let expected: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert!(loaded.iter().enumerate().all(|(i, item)| item.order == i));
        assert_eq!(loaded[0].payload, items[0].payload);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let db = Database::open(":memory:").await.unwrap();
        let items = sample_items().await;

        db.save_favorites(&items).await.unwrap();
        db.save_favorites(&items[..1]).await.unwrap();

        let loaded = db.load_favorites().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, items[0].id);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_skipped() {
        let db = Database::open(":memory:").await.unwrap();
        let items = sample_items().await;
        db.save_favorites(&items[..2]).await.unwrap();

        sqlx::query("UPDATE favorites SET payload = '{not json' WHERE position = 0")
            .execute(&db.pool)
            .await
            .unwrap();

        let loaded = db.load_favorites().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, items[1].id);
        assert_eq!(loaded[0].order, 0);
    }

    #[tokio::test]
    async fn test_kind_column_matches_payload() {
        let db = Database::open(":memory:").await.unwrap();
        let items = sample_items().await;
        db.save_favorites(&items).await.unwrap();

        let kinds: Vec<(String,)> = sqlx::query_as("SELECT kind FROM favorites ORDER BY position")
            .fetch_all(&db.pool)
            .await
            .unwrap();
        assert_eq!(kinds[0].0, ContentKind::News.to_string());
    }
}
