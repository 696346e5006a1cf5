//! Startup seeding of the reviews and dealerships collections.
//!
//! Each collection is replaced wholesale from its seed file. A failure is logged
//! and leaves that collection as it was; it never stops the server.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{DealershipSeedFile, ReviewSeedFile};

/// Outcome of one seeding run, per collection.
#[derive(Debug)]
pub struct SeedReport {
    pub reviews: Result<usize, AppError>,
    pub dealerships: Result<usize, AppError>,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.reviews.is_ok() && self.dealerships.is_ok()
    }
}

/// Seed both collections from their files.
pub async fn seed_all(
    repo: &Repository,
    reviews_path: &Path,
    dealerships_path: &Path,
) -> SeedReport {
    let reviews = seed_reviews(repo, reviews_path).await;
    match &reviews {
        Ok(count) => tracing::info!("Seeded {} reviews from {:?}", count, reviews_path),
        Err(e) => tracing::error!("Error seeding reviews from {:?}: {}", reviews_path, e),
    }

    let dealerships = seed_dealerships(repo, dealerships_path).await;
    match &dealerships {
        Ok(count) => tracing::info!("Seeded {} dealerships from {:?}", count, dealerships_path),
        Err(e) => tracing::error!(
            "Error seeding dealerships from {:?}: {}",
            dealerships_path,
            e
        ),
    }

    SeedReport {
        reviews,
        dealerships,
    }
}

async fn seed_reviews(repo: &Repository, path: &Path) -> Result<usize, AppError> {
    let file: ReviewSeedFile = read_seed_file(path).await?;
    repo.replace_reviews(&file.reviews).await
}

async fn seed_dealerships(repo: &Repository, path: &Path) -> Result<usize, AppError> {
    let file: DealershipSeedFile = read_seed_file(path).await?;
    repo.replace_dealerships(&file.dealerships).await
}

/// Read and parse a seed file.
pub async fn read_seed_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Seed(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Seed(format!("Failed to parse {}: {}", path.display(), e)))
}
