use std::sync::LazyLock;

use scraper::{Html, Selector};

// Selectors for the list page markup, compiled once.
pub static PAGE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#pagecontent h1.header.list-name").unwrap());
pub static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister > .lister-list .lister-item").unwrap());
pub static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-header a").unwrap());
pub static YEAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-header > .lister-item-year").unwrap());
pub static CERTIFICATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .certificate").unwrap());
pub static RUNTIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .runtime").unwrap());
pub static GENRE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .genre").unwrap());
pub static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content span.ipl-rating-star__rating").unwrap());
pub static METASCORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .metascore.favorable").unwrap());
pub static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-image img").unwrap());

// The two anchor classes the source pages are known to use for the
// rating/description bar. Credits and description text are located
// relative to whichever anchor the page version carries.
static ANCHOR_METASCORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .ratings-metascore").unwrap());
static ANCHOR_RATINGS_BAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lister-item-content .ratings-bar").unwrap());

/// Which anchor layout the document uses, resolved once per document.
///
/// Probe order is fixed: the `ratings-metascore` variant first, falling back
/// to `ratings-bar` when it yields empty text. A page that carries no
/// `ratings-metascore` node anywhere can only ever yield empty text for that
/// probe, so such pages skip straight to `ratings-bar`; the per-item result
/// is identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutProfile {
    Metascore,
    RatingsBar,
}

impl LayoutProfile {
    pub fn detect(doc: &Html) -> Self {
        if doc.select(&ANCHOR_METASCORE).next().is_some() {
            Self::Metascore
        } else {
            Self::RatingsBar
        }
    }

    /// Anchor selectors to probe, in fixed order. First non-empty probe wins.
    pub fn anchors(self) -> &'static [&'static Selector] {
        static BOTH: LazyLock<[&'static Selector; 2]> =
            LazyLock::new(|| [&*ANCHOR_METASCORE, &*ANCHOR_RATINGS_BAR]);
        static BAR_ONLY: LazyLock<[&'static Selector; 1]> =
            LazyLock::new(|| [&*ANCHOR_RATINGS_BAR]);
        match self {
            Self::Metascore => &*BOTH,
            Self::RatingsBar => &*BAR_ONLY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metascore_anchor_wins_when_present() {
        let doc = Html::parse_document(
            r#"<div class="lister-item-content"><div class="ratings-metascore"></div></div>"#,
        );
        assert_eq!(LayoutProfile::detect(&doc), LayoutProfile::Metascore);
        assert_eq!(LayoutProfile::Metascore.anchors().len(), 2);
    }

    #[test]
    fn falls_back_to_ratings_bar() {
        let doc = Html::parse_document(
            r#"<div class="lister-item-content"><div class="ratings-bar"></div></div>"#,
        );
        assert_eq!(LayoutProfile::detect(&doc), LayoutProfile::RatingsBar);
        assert_eq!(LayoutProfile::RatingsBar.anchors().len(), 1);
    }
}
