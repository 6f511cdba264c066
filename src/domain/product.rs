use serde::{Serialize, Serializer};

pub const NOT_FOUND: &str = "Not Found";

/// Fields scraped from a single product page. `None` means the element was
/// missing from the markup; it is written out as [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProductRecord {
    #[serde(serialize_with = "or_not_found")]
    pub product_name: Option<String>,
    #[serde(serialize_with = "or_not_found")]
    pub price: Option<String>,
    #[serde(serialize_with = "or_not_found")]
    pub rating: Option<String>,
    #[serde(rename = "number_of_reviews", serialize_with = "or_not_found")]
    pub review_count: Option<String>,
}

fn or_not_found<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(NOT_FOUND))
}
