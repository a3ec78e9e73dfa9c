//! Ratings building against a previously-built catalog.
//!
//! File-level and row-level rules are deliberately split: a negative user
//! id aborts the whole file, while out-of-range values, names that resolve
//! to no catalog entry, and repeat (user, movie) pairs are skipped and
//! counted. First occurrence wins for duplicates.

use crate::error::{LoadError, Result};
use crate::parser::{self, RatingRow};
use crate::reader;
use crate::types::{Catalog, RatingRecord, RatingsModel, UserId};
use std::collections::HashSet;
use std::path::Path;

const RATING_MIN: f64 = 0.0;
const RATING_MAX: f64 = 5.0;

/// Load and validate a ratings file into a fresh [`RatingsModel`].
///
/// This is the ratings-side pipeline entry point. The catalog is only
/// read, never modified; on error the partial model is dropped.
pub fn load_ratings(path: &Path, catalog: &Catalog) -> Result<RatingsModel> {
    let lines = reader::read_lines(path)?;

    let mut builder = RatingsBuilder::new(catalog);
    for line in &lines {
        let row = parser::parse_rating_row(&line.text, line.number)?;
        builder.add_row(row)?;
    }

    let model = builder.finish();
    let skips = model.skips();
    if skips.total() > 0 {
        tracing::warn!(
            out_of_range = skips.out_of_range,
            unknown_movie = skips.unknown_movie,
            duplicate = skips.duplicate,
            "skipped rating rows"
        );
    }
    tracing::debug!(
        path = %path.display(),
        ratings = model.len(),
        users = model.users().len(),
        "ratings model built"
    );
    Ok(model)
}

/// Incremental ratings builder; one instance per load attempt.
pub struct RatingsBuilder<'a> {
    catalog: &'a Catalog,
    model: RatingsModel,
    seen: HashSet<(UserId, String)>,
}

impl<'a> RatingsBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            model: RatingsModel::default(),
            seen: HashSet::new(),
        }
    }

    /// Apply one parsed rating row, in file order.
    pub fn add_row(&mut self, row: RatingRow) -> Result<()> {
        if row.user_id < 0 {
            return Err(LoadError::NegativeUserId {
                line: row.line,
                id: row.user_id,
            });
        }
        let user_id = row.user_id as UserId;

        if !(RATING_MIN..=RATING_MAX).contains(&row.value) {
            tracing::debug!(line = row.line, value = row.value, "rating out of range, skipped");
            self.model.skips.out_of_range += 1;
            return Ok(());
        }

        let Some(record) = self.catalog.resolve(&row.movie_name) else {
            tracing::debug!(line = row.line, movie = %row.movie_name, "unknown movie, skipped");
            self.model.skips.unknown_movie += 1;
            return Ok(());
        };
        let canonical = record.display_name.clone();

        if !self.seen.insert((user_id, canonical.clone())) {
            tracing::debug!(line = row.line, user = user_id, movie = %canonical, "duplicate rating, skipped");
            self.model.skips.duplicate += 1;
            return Ok(());
        }

        self.model
            .by_movie
            .entry(canonical.clone())
            .or_default()
            .push(RatingRecord {
                user_id,
                value: row.value,
            });
        self.model
            .by_user
            .entry(user_id)
            .or_default()
            .insert(canonical, row.value);

        Ok(())
    }

    pub fn finish(mut self) -> RatingsModel {
        let mut users: Vec<UserId> = self.model.by_user.keys().copied().collect();
        users.sort_unstable();
        self.model.users = users;
        self.model
    }
}
