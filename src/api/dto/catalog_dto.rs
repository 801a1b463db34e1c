//! Catalog query DTO.

use serde::Deserialize;

/// `GET /?searchString=&species=` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive name substring.
    #[serde(rename = "searchString", default)]
    pub search_string: Option<String>,
    /// Exact species.
    #[serde(default)]
    pub species: Option<String>,
}
