pub mod fields;
pub mod layout;
pub mod normalize;

use rayon::prelude::*;
use scraper::Html;

use crate::model::ListDocument;
use fields::RawFields;
use layout::LayoutProfile;

/// Two-pass pipeline: markup → raw fields per item → normalized records.
///
/// DOM traversal is single-threaded (the parsed tree is not `Send`);
/// normalization of the owned raw fields fans out over rayon. The indexed
/// parallel iterator collects back in document order, so ranks and item
/// order always match the page.
pub fn parse_list(html: &str) -> ListDocument {
    let doc = Html::parse_document(html);
    let profile = LayoutProfile::detect(&doc);

    let title = doc
        .select(&layout::PAGE_TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let raw: Vec<RawFields> = doc
        .select(&layout::ITEM)
        .map(|item| fields::extract_fields(item, profile))
        .collect();

    let items = raw
        .into_par_iter()
        .enumerate()
        .map(|(i, r)| normalize::normalize(r, i + 1))
        .collect();

    ListDocument { title, items }
}

// ── Tests ──
