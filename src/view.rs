use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::ListDocument;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

const DEFAULT_SLUG: &str = "imdb-list-export";

/// View of the document keeping only items whose 1-based rank lies in the
/// inclusive `from..=to` range. The input is untouched.
pub fn filter_by_rank(doc: &ListDocument, from: usize, to: usize) -> ListDocument {
    ListDocument {
        title: doc.title.clone(),
        items: doc
            .items
            .iter()
            .filter(|item| item.rank >= from && item.rank <= to)
            .cloned()
            .collect(),
    }
}

/// File-name slug for an export, derived from the document title.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Write the document as pretty JSON to `<dir>/<slug>.json`.
pub fn write_json(doc: &ListDocument, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export dir {}", dir.display()))?;
    let path = dir.join(format!("{}.json", slugify(&doc.title)));
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(&path, json)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaRecord;

    fn record(rank: usize, title: &str) -> MediaRecord {
        MediaRecord {
            rank,
            title: title.to_string(),
            year: String::new(),
            certificate: String::new(),
            runtime: String::new(),
            genres: Vec::new(),
            rating: 8.0,
            metascore: String::new(),
            description: String::new(),
            directors: None,
            stars: None,
            image: None,
        }
    }

    fn doc() -> ListDocument {
        ListDocument {
            title: "Top Picks".into(),
            items: (1..=5).map(|i| record(i, &format!("Movie {i}"))).collect(),
        }
    }

    #[test]
    fn filter_keeps_inclusive_range() {
        let filtered = filter_by_rank(&doc(), 2, 4);
        let ranks: Vec<usize> = filtered.items.iter().map(|i| i.rank).collect();
        assert_eq!(ranks, vec![2, 3, 4]);
        assert_eq!(filtered.title, "Top Picks");
    }

    #[test]
    fn filter_is_pure() {
        let original = doc();
        let _ = filter_by_rank(&original, 1, 1);
        assert_eq!(original.items.len(), 5);
    }

    #[test]
    fn filter_out_of_range_is_empty() {
        assert!(filter_by_rank(&doc(), 6, 10).items.is_empty());
        assert!(filter_by_rank(&doc(), 3, 2).items.is_empty());
    }

    #[test]
    fn slug_from_title() {
        assert_eq!(slugify("Top 250 Movies"), "top-250-movies");
        assert_eq!(slugify("  IMDb: Sci-Fi & Fantasy!  "), "imdb-sci-fi-fantasy");
        assert_eq!(slugify(""), "imdb-list-export");
        assert_eq!(slugify("???"), "imdb-list-export");
    }
}
