//! Dealership model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A car dealership.
///
/// Only `id` and `state` are queried on; every other field from the seed file is
/// kept in `details` and served back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealership {
    pub id: i64,
    pub state: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Layout of the dealerships seed file.
#[derive(Debug, Deserialize)]
pub struct DealershipSeedFile {
    pub dealerships: Vec<Dealership>,
}
