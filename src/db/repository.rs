//! Database repository for review and dealership operations.
//!
//! Collection replacement runs in a transaction; review ids are assigned by the
//! insert statement itself.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Dealership, NewReview, Review};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== REVIEW OPERATIONS ====================

    /// List all reviews in insertion order.
    pub async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, dealership, review, purchase, purchase_date, car_make, car_model, car_year FROM reviews ORDER BY seq"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    /// List the reviews of one dealership.
    pub async fn list_reviews_by_dealer(&self, dealer_id: i64) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, dealership, review, purchase, purchase_date, car_make, car_model, car_year FROM reviews WHERE dealership = ? ORDER BY seq"
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    /// Insert a review under the next free id (highest id + 1, or 1).
    pub async fn insert_review(&self, request: NewReview) -> Result<Review, AppError> {
        // A single statement: SQLite holds the write lock across the MAX and the insert.
        let row = sqlx::query(
            r#"INSERT INTO reviews (id, name, dealership, review, purchase, purchase_date, car_make, car_model, car_year)
               SELECT COALESCE(MAX(id), 0) + 1, ?, ?, ?, ?, ?, ?, ?, ? FROM reviews
               RETURNING id"#,
        )
        .bind(&request.name)
        .bind(request.dealership)
        .bind(&request.review)
        .bind(request.purchase as i32)
        .bind(&request.purchase_date)
        .bind(&request.car_make)
        .bind(&request.car_model)
        .bind(request.car_year)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");
        tracing::debug!(id, dealership = request.dealership, "Inserted review");

        Ok(request.into_review(id))
    }

    /// Replace every review with `reviews`, keeping their ids as given.
    pub async fn replace_reviews(&self, reviews: &[Review]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews").execute(&mut *tx).await?;

        for review in reviews {
            sqlx::query(
                "INSERT INTO reviews (id, name, dealership, review, purchase, purchase_date, car_make, car_model, car_year) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(review.id)
            .bind(&review.name)
            .bind(review.dealership)
            .bind(&review.review)
            .bind(review.purchase as i32)
            .bind(&review.purchase_date)
            .bind(&review.car_make)
            .bind(&review.car_model)
            .bind(review.car_year)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(reviews.len())
    }

    // ==================== DEALERSHIP OPERATIONS ====================

    /// List all dealerships in insertion order.
    pub async fn list_dealerships(&self) -> Result<Vec<Dealership>, AppError> {
        let rows = sqlx::query("SELECT document FROM dealerships ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(dealership_from_row).collect()
    }

    /// List dealerships whose state is exactly `state`.
    pub async fn list_dealerships_by_state(
        &self,
        state: &str,
    ) -> Result<Vec<Dealership>, AppError> {
        // TEXT comparison uses the BINARY collation: case-sensitive, no trimming.
        let rows = sqlx::query("SELECT document FROM dealerships WHERE state = ? ORDER BY seq")
            .bind(state)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(dealership_from_row).collect()
    }

    /// Get a dealership by ID.
    pub async fn get_dealership(&self, id: i64) -> Result<Option<Dealership>, AppError> {
        let row = sqlx::query("SELECT document FROM dealerships WHERE id = ? ORDER BY seq LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(dealership_from_row).transpose()
    }

    /// Replace every dealership with `dealerships`.
    pub async fn replace_dealerships(&self, dealerships: &[Dealership]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM dealerships")
            .execute(&mut *tx)
            .await?;

        for dealership in dealerships {
            let document = serde_json::to_string(dealership).map_err(|e| {
                AppError::Database(format!(
                    "Failed to encode dealership {}: {}",
                    dealership.id, e
                ))
            })?;

            sqlx::query("INSERT INTO dealerships (id, state, document) VALUES (?, ?, ?)")
                .bind(dealership.id)
                .bind(&dealership.state)
                .bind(&document)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(dealerships.len())
    }
}

// Helper functions for row conversion

fn review_from_row(row: &sqlx::sqlite::SqliteRow) -> Review {
    let purchase: i32 = row.get("purchase");
    Review {
        id: row.get("id"),
        name: row.get("name"),
        dealership: row.get("dealership"),
        review: row.get("review"),
        purchase: purchase != 0,
        purchase_date: row.get("purchase_date"),
        car_make: row.get("car_make"),
        car_model: row.get("car_model"),
        car_year: row.get("car_year"),
    }
}

fn dealership_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Dealership, AppError> {
    let document: String = row.get("document");
    serde_json::from_str(&document)
        .map_err(|e| AppError::Database(format!("Corrupt dealership document: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::json;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("repo.sqlite"))
            .await
            .unwrap();
        (Repository::new(pool), temp_dir)
    }

    fn review(id: i64, dealership: i64) -> Review {
        Review {
            id,
            name: format!("Reviewer {}", id),
            dealership,
            review: "Great service".to_string(),
            purchase: true,
            purchase_date: "07/11/2020".to_string(),
            car_make: "Audi".to_string(),
            car_model: "A6".to_string(),
            car_year: 2010,
        }
    }

    fn new_review(dealership: i64) -> NewReview {
        NewReview {
            name: "New Reviewer".to_string(),
            dealership,
            review: "Fast paperwork".to_string(),
            purchase: false,
            purchase_date: "01/02/2023".to_string(),
            car_make: "Toyota".to_string(),
            car_model: "Corolla".to_string(),
            car_year: 2021,
        }
    }

    #[tokio::test]
    async fn test_insert_review_into_empty_collection_gets_id_one() {
        let (repo, _dir) = test_repo().await;

        let saved = repo.insert_review(new_review(3)).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.dealership, 3);
        assert!(!saved.purchase);

        let all = repo.list_reviews().await.unwrap();
        assert_eq!(all, vec![saved]);
    }

    #[tokio::test]
    async fn test_insert_review_uses_max_id_not_count() {
        let (repo, _dir) = test_repo().await;
        repo.replace_reviews(&[review(7, 1), review(3, 1)])
            .await
            .unwrap();

        let saved = repo.insert_review(new_review(1)).await.unwrap();
        assert_eq!(saved.id, 8);
    }

    #[tokio::test]
    async fn test_replace_reviews_discards_previous_contents() {
        let (repo, _dir) = test_repo().await;
        repo.replace_reviews(&[review(1, 1), review(2, 2)])
            .await
            .unwrap();
        repo.replace_reviews(&[review(5, 9)]).await.unwrap();

        let all = repo.list_reviews().await.unwrap();
        assert_eq!(all, vec![review(5, 9)]);
    }

    #[tokio::test]
    async fn test_list_reviews_by_dealer() {
        let (repo, _dir) = test_repo().await;
        repo.replace_reviews(&[review(1, 15), review(2, 4), review(3, 15)])
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_reviews_by_dealer(15)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(repo.list_reviews_by_dealer(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dealership_documents_are_kept_verbatim() {
        let (repo, _dir) = test_repo().await;
        let seeded: Dealership = serde_json::from_value(json!({
            "id": 1,
            "city": "El Paso",
            "state": "Texas",
            "address": "3 Nova Court",
            "zip": "88563",
            "lat": 31.6948,
            "long": -106.3,
            "short_name": "Holdlamis",
            "full_name": "Holdlamis Car Dealership"
        }))
        .unwrap();
        repo.replace_dealerships(std::slice::from_ref(&seeded))
            .await
            .unwrap();

        let fetched = repo.get_dealership(1).await.unwrap().unwrap();
        assert_eq!(fetched, seeded);
        assert_eq!(fetched.details["city"], "El Paso");
        assert!(repo.get_dealership(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_state_lookup_is_exact() {
        let (repo, _dir) = test_repo().await;
        let dealers: Vec<Dealership> = serde_json::from_value(json!([
            { "id": 1, "state": "Texas" },
            { "id": 2, "state": "texas" },
            { "id": 3, "state": "Texas " }
        ]))
        .unwrap();
        repo.replace_dealerships(&dealers).await.unwrap();

        let found = repo.list_dealerships_by_state("Texas").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert!(repo.list_dealerships_by_state("TX").await.unwrap().is_empty());
    }
}
