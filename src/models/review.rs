//! Review model and the insert request body.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// A customer review of a dealership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub name: String,
    /// Id of the reviewed dealership
    pub dealership: i64,
    pub review: String,
    pub purchase: bool,
    pub purchase_date: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: i64,
}

/// Request body for inserting a review. The id is assigned by the store.
///
/// Form-driven clients send every value as a string, so the numeric and boolean
/// fields also accept their string spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub name: String,
    #[serde(deserialize_with = "int_or_string")]
    pub dealership: i64,
    pub review: String,
    #[serde(deserialize_with = "bool_or_string")]
    pub purchase: bool,
    pub purchase_date: String,
    pub car_make: String,
    pub car_model: String,
    #[serde(deserialize_with = "int_or_string")]
    pub car_year: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Str(raw) => raw
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&raw), &"an integer")),
    }
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::Str(raw) => match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(de::Error::invalid_value(
                Unexpected::Str(&raw),
                &"true or false",
            )),
        },
    }
}

impl NewReview {
    pub fn into_review(self, id: i64) -> Review {
        Review {
            id,
            name: self.name,
            dealership: self.dealership,
            review: self.review,
            purchase: self.purchase,
            purchase_date: self.purchase_date,
            car_make: self.car_make,
            car_model: self.car_model,
            car_year: self.car_year,
        }
    }
}

/// Layout of the reviews seed file.
#[derive(Debug, Deserialize)]
pub struct ReviewSeedFile {
    pub reviews: Vec<Review>,
}
