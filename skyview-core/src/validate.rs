//! City-input cleanup and validation.
//!
//! Validation runs before any request is issued, so obviously bad input
//! never costs a network round trip.

/// Minimum cleaned length before a lookup is worth issuing.
const MIN_LEN: usize = 2;

/// Trim and collapse internal whitespace runs to single spaces.
pub fn clean_city(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strict pattern for a full city search: letters (including extended Latin
/// diacritics), spaces, periods, hyphens, apostrophes; at least two chars.
pub fn is_valid_city(s: &str) -> bool {
    s.chars().count() >= MIN_LEN && s.chars().all(|c| is_city_char(c, false))
}

/// Permissive variant used while typing: additionally allows commas, since
/// users often type "City, Country" into the search box.
pub fn is_valid_query(s: &str) -> bool {
    s.chars().count() >= MIN_LEN && s.chars().all(|c| is_city_char(c, true))
}

fn is_city_char(c: char, allow_comma: bool) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{C0}'..='\u{17E}').contains(&c)
        || c == ' '
        || c == '.'
        || c == '-'
        || c == '\''
        || (allow_comma && c == ',')
}
