use serde::Serialize;

/// One parsed list page: document title plus its entries in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDocument {
    pub title: String,
    pub items: Vec<MediaRecord>,
}

/// One ranked entry of a list page.
///
/// `directors`, `stars` and `image` are `None` when the page carries no
/// credits block / no resolvable poster at all; that is a different thing
/// from an empty value and is kept distinct on the wire by skipping the
/// fields entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRecord {
    pub rank: usize,
    pub title: String,
    pub year: String,
    pub certificate: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub metascore: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
