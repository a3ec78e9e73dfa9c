//! Record parsing for the pipe-delimited catalog files.
//!
//! - Movies file rows:  `genre|movieId|movieName`
//! - Ratings file rows: `movieName|rating|userId`
//!
//! A row must split into exactly three fields, none empty after trimming,
//! with numeric fields converting cleanly. The first violation aborts the
//! whole file as [`LoadError::MalformedRow`] with the offending line
//! number; there is no row-level recovery at this stage.

use crate::error::{LoadError, Result};

const FIELD_DELIMITER: char = '|';
const FIELD_COUNT: usize = 3;

/// A parsed movies-file row, not yet validated against the catalog rules.
/// The id stays signed here so the catalog builder can reject negatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub line: usize,
    pub genre: String,
    pub id: i64,
    pub name: String,
}

/// A parsed ratings-file row. As with [`MovieRow`], the user id stays
/// signed for the ratings builder to validate.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub line: usize,
    pub movie_name: String,
    pub value: f64,
    pub user_id: i64,
}

fn split_fields(text: &str, line: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = text.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(LoadError::MalformedRow {
            line,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    }
    if let Some(position) = fields.iter().position(|f| f.is_empty()) {
        return Err(LoadError::MalformedRow {
            line,
            reason: format!("field {} is empty", position + 1),
        });
    }
    Ok(fields)
}

/// Parse one movies-file line: `genre|movieId|movieName`.
pub fn parse_movie_row(text: &str, line: usize) -> Result<MovieRow> {
    let fields = split_fields(text, line)?;

    let id: i64 = fields[1].parse().map_err(|_| LoadError::MalformedRow {
        line,
        reason: format!("movie id is not an integer: {:?}", fields[1]),
    })?;

    Ok(MovieRow {
        line,
        genre: fields[0].to_string(),
        id,
        name: fields[2].to_string(),
    })
}

/// Parse one ratings-file line: `movieName|rating|userId`.
///
/// The rating must be a finite real number; `NaN` and the infinities are
/// malformed rows, not out-of-range values. The user id must be an
/// integer, so `"3.5"` is malformed rather than truncated.
pub fn parse_rating_row(text: &str, line: usize) -> Result<RatingRow> {
    let fields = split_fields(text, line)?;

    let value: f64 = fields[1].parse().map_err(|_| LoadError::MalformedRow {
        line,
        reason: format!("rating is not numeric: {:?}", fields[1]),
    })?;
    if !value.is_finite() {
        return Err(LoadError::MalformedRow {
            line,
            reason: format!("rating is not finite: {:?}", fields[1]),
        });
    }

    let user_id: i64 = fields[2].parse().map_err(|_| LoadError::MalformedRow {
        line,
        reason: format!("user id is not an integer: {:?}", fields[2]),
    })?;

    Ok(RatingRow {
        line,
        movie_name: fields[0].to_string(),
        value,
        user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_row() {
        let row = parse_movie_row("Drama|42|Up (2009)", 7).unwrap();
        assert_eq!(row.genre, "Drama");
        assert_eq!(row.id, 42);
        assert_eq!(row.name, "Up (2009)");
        assert_eq!(row.line, 7);
    }

    #[test]
    fn test_movie_row_trims_fields() {
        let row = parse_movie_row("  Drama | 42 |  Up (2009)  ", 1).unwrap();
        assert_eq!(row.genre, "Drama");
        assert_eq!(row.name, "Up (2009)");
    }

    #[test]
    fn test_movie_row_field_count() {
        let err = parse_movie_row("Drama|42", 3).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 3, .. }));

        let err = parse_movie_row("Drama|42|Up (2009)|extra", 3).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_movie_row_empty_field() {
        let err = parse_movie_row("Drama||Up (2009)", 2).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 2, .. }));

        let err = parse_movie_row("   |42|Up (2009)", 2).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_movie_row_non_integer_id() {
        let err = parse_movie_row("Drama|4.2|Up (2009)", 5).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 5, .. }));
    }

    #[test]
    fn test_movie_row_negative_id_parses() {
        // sign validation belongs to the catalog builder, not the parser
        let row = parse_movie_row("Drama|-7|Up (2009)", 1).unwrap();
        assert_eq!(row.id, -7);
    }

    #[test]
    fn test_parse_rating_row() {
        let row = parse_rating_row("Up (2009)|4.5|19", 11).unwrap();
        assert_eq!(row.movie_name, "Up (2009)");
        assert_eq!(row.value, 4.5);
        assert_eq!(row.user_id, 19);
    }

    #[test]
    fn test_rating_row_rejects_non_numeric_rating() {
        let err = parse_rating_row("Up (2009)|great|19", 4).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 4, .. }));
    }

    #[test]
    fn test_rating_row_rejects_non_finite_rating() {
        for bad in ["NaN", "inf", "-inf", "infinity"] {
            let err = parse_rating_row(&format!("Up (2009)|{bad}|19"), 6).unwrap_err();
            assert!(
                matches!(err, LoadError::MalformedRow { line: 6, .. }),
                "{bad} should be malformed, not out-of-range"
            );
        }
    }

    #[test]
    fn test_rating_row_rejects_fractional_user_id() {
        let err = parse_rating_row("Up (2009)|4.0|3.5", 9).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { line: 9, .. }));
    }

    #[test]
    fn test_rating_row_out_of_range_value_still_parses() {
        // range policy is the ratings builder's, not the parser's
        let row = parse_rating_row("Up (2009)|7.5|1", 1).unwrap();
        assert_eq!(row.value, 7.5);
    }
}
