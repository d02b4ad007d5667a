use crate::model::MediaRecord;

use super::fields::RawFields;

/// Convert one item's raw field values into the canonical record schema.
/// Never fails: malformed input degrades to empty strings, omitted optional
/// fields, or a NaN rating.
pub fn normalize(raw: RawFields, rank: usize) -> MediaRecord {
    let (directors, stars) = split_credits(&raw.credits_text);
    let image = raw.image_ref.trim();

    MediaRecord {
        rank,
        title: raw.title,
        year: raw.year,
        certificate: raw.certificate.trim().to_string(),
        runtime: raw.runtime,
        genres: split_genres(&raw.genre_text),
        rating: parse_rating(&raw.rating_text),
        metascore: raw.metascore_text.trim().to_string(),
        description: raw.description_text.trim().to_string(),
        directors,
        stars,
        image: (!image.is_empty()).then(|| image.to_string()),
    }
}

fn split_genres(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the rating text and bring it onto the canonical 0-10 scale.
///
/// Some page versions display ratings on a 0-100 scale; anything above 10 is
/// assumed to be one of those and divided by 10. A true 10 passes through
/// unchanged while 10.1 becomes 1.01 -- a known ambiguity in the source
/// format, reproduced as-is.
fn parse_rating(text: &str) -> f64 {
    let value: f64 = text.trim().parse().unwrap_or(f64::NAN);
    if value > 10.0 {
        value / 10.0
    } else {
        value
    }
}

/// Split the combined credits block ("Director: X | Stars: A, B") into
/// director and star name lists. A segment that is missing, has no label
/// colon, or holds no non-empty names yields `None`, never an empty list.
fn split_credits(text: &str) -> (Option<Vec<String>>, Option<Vec<String>>) {
    let mut segments = text.splitn(2, '|');
    let directors = segments.next().and_then(split_names);
    let stars = segments.next().and_then(split_names);
    (directors, stars)
}

fn split_names(segment: &str) -> Option<Vec<String>> {
    let (_label, rest) = segment.split_once(':')?;
    let names: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
