//! Title/year normalization and the two name-equivalence rules.
//!
//! Two independent rules operate on movie names:
//!
//! - **Concept key**: lowercased, whitespace-collapsed `"<title> (<year>)"`,
//!   used only for id-conflict detection. `"The  Matrix (1999)"` and
//!   `"the matrix  (1999)"` share a concept.
//! - **Display equivalence**: identical character count and equal ignoring
//!   case. Stricter than concept equivalence; used only to merge
//!   case-variant duplicate rows into one canonical record.

/// Extract `(title, year)` from a display name of the shape
/// `<title><space(s)>(<4-digit year>)`. Whitespace around the parentheses
/// is tolerated; anything else is a malformed title.
pub fn parse_title_year(name: &str) -> Option<(&str, u16)> {
    let s = name.trim_end();
    let rest = s.strip_suffix(')')?;
    let open = rest.rfind('(')?;

    let year_str = rest[open + 1..].trim();
    if year_str.len() != 4 || !year_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // parse cannot fail after the digit check
    let year: u16 = year_str.parse().ok()?;

    // the year must be a separate trailing token, not glued to the title
    let before_paren = &rest[..open];
    let title = before_paren.trim_end();
    if title.is_empty() || title.len() == before_paren.len() {
        return None;
    }

    Some((title, year))
}

/// Conceptual key for a parsed (title, year): lowercase the title, collapse
/// internal whitespace runs to single spaces, re-attach the year.
pub fn concept_key(title: &str, year: u16) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} ({year})", collapsed.to_lowercase())
}

/// Display equivalence: same character count and equal ignoring case.
pub fn display_equivalent(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.to_lowercase() == b.to_lowercase()
}

/// Index key realizing [`display_equivalent`] as a map lookup: two names
/// are display-equivalent iff their keys are equal.
pub fn equivalence_key(name: &str) -> String {
    format!("{}:{}", name.chars().count(), name.to_lowercase())
}

/// Lowercased, trimmed genre key.
pub fn genre_key(genre: &str) -> String {
    genre.trim().to_lowercase()
}
