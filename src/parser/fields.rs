use scraper::{ElementRef, Selector};

use super::layout::{self, LayoutProfile};

/// Untyped field values read from one item fragment. Text is kept exactly as
/// it appears in the markup (no trimming); the normalizer decides what to do
/// with it. A missing node always degrades to an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub title: String,
    pub year: String,
    pub certificate: String,
    pub runtime: String,
    pub genre_text: String,
    pub rating_text: String,
    pub metascore_text: String,
    pub credits_text: String,
    pub description_text: String,
    pub image_ref: String,
}

pub fn extract_fields(item: ElementRef, profile: LayoutProfile) -> RawFields {
    RawFields {
        title: text_of(item, &layout::TITLE_LINK),
        year: text_of(item, &layout::YEAR),
        certificate: text_of(item, &layout::CERTIFICATE),
        runtime: text_of(item, &layout::RUNTIME),
        genre_text: text_of(item, &layout::GENRE),
        rating_text: text_of(item, &layout::RATING),
        metascore_text: text_of(item, &layout::METASCORE),
        // Credits sit two element siblings after the rating anchor, the
        // description one sibling after. Both probe the profile's anchors in
        // fixed order; the first non-empty text wins, never a merge.
        credits_text: anchor_sibling_text(item, profile, 2),
        description_text: anchor_sibling_text(item, profile, 1),
        image_ref: image_ref(item),
    }
}

/// Concatenated text of the first node matching `sel` within `scope`.
fn text_of(scope: ElementRef, sel: &Selector) -> String {
    scope
        .select(sel)
        .next()
        .map(|el| el.text().collect())
        .unwrap_or_default()
}

/// Text of the node `hops` element siblings after the item's rating anchor.
fn anchor_sibling_text(item: ElementRef, profile: LayoutProfile, hops: usize) -> String {
    for anchor_sel in profile.anchors() {
        let text = item
            .select(anchor_sel)
            .next()
            .and_then(|anchor| nth_element_sibling(anchor, hops))
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

fn nth_element_sibling(el: ElementRef, n: usize) -> Option<ElementRef> {
    el.next_siblings().filter_map(ElementRef::wrap).nth(n - 1)
}

/// The poster is lazy-loaded: `src` holds a placeholder, the real URL lives
/// in the `loadlate` attribute.
fn image_ref(item: ElementRef) -> String {
    item.select(&layout::IMAGE)
        .next()
        .and_then(|img| img.value().attr("loadlate"))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_item(html: &str) -> (Html, LayoutProfile) {
        let doc = Html::parse_document(html);
        let profile = LayoutProfile::detect(&doc);
        (doc, profile)
    }

    const BARE_ITEM: &str = r#"
        <div class="lister"><div class="lister-list">
        <div class="lister-item"><div class="lister-item-content"></div></div>
        </div></div>"#;

    #[test]
    fn missing_nodes_degrade_to_empty_strings() {
        let (doc, profile) = first_item(BARE_ITEM);
        let item = doc.select(&layout::ITEM).next().unwrap();
        let raw = extract_fields(item, profile);
        assert_eq!(raw, RawFields::default());
    }

    #[test]
    fn reads_loadlate_not_placeholder_src() {
        let html = r#"
            <div class="lister"><div class="lister-list">
            <div class="lister-item">
              <div class="lister-item-image">
                <img src="spinner.gif" loadlate="https://img.example/real.jpg">
              </div>
            </div>
            </div></div>"#;
        let (doc, profile) = first_item(html);
        let item = doc.select(&layout::ITEM).next().unwrap();
        let raw = extract_fields(item, profile);
        assert_eq!(raw.image_ref, "https://img.example/real.jpg");
    }

    #[test]
    fn variant_b_text_wins_when_variant_a_sibling_is_empty() {
        // Both anchors present, but the metascore anchor's siblings are
        // empty: the ratings-bar probe must supply the text, no merging.
        let html = r#"
            <div class="lister"><div class="lister-list">
            <div class="lister-item"><div class="lister-item-content">
              <div class="ratings-metascore"></div>
              <p></p>
              <p></p>
              <div class="ratings-bar"></div>
              <p>From variant B.</p>
              <p>Director: Jane Doe | Stars: A, B</p>
            </div></div>
            </div></div>"#;
        let (doc, profile) = first_item(html);
        assert_eq!(profile, LayoutProfile::Metascore);
        let item = doc.select(&layout::ITEM).next().unwrap();
        let raw = extract_fields(item, profile);
        assert_eq!(raw.description_text, "From variant B.");
        assert_eq!(raw.credits_text, "Director: Jane Doe | Stars: A, B");
    }
}
