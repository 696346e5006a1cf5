//! Data models for the dealerships backend.
//!
//! Field names match the seed files and the JSON served to the frontend.

mod dealership;
mod review;

pub use dealership::*;
pub use review::*;
