//! The session model: one catalog + ratings + derived statistics bundle.
//!
//! The model object replaces ambient globals so several models can
//! coexist (tests build their own). Loads are atomic from the caller's
//! viewpoint: builders return entirely fresh values and the model assigns
//! them only on success, so a failed load leaves the previous state
//! untouched. `clear` gives callers an explicit teardown for reloads.

use crate::compute::{self, DerivedStats, GenreStats, MovieStats, UserTopGenre};
use crate::ranking;
use crate::recommend;
use data_loader::{Catalog, LoadError, RatingsModel, UserId};
use std::path::Path;
use thiserror::Error;

/// Errors from session-level operations.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Ratings were loaded (or queried) before any catalog
    #[error("no movie catalog has been loaded")]
    CatalogMissing,

    /// A file-level load abort, forwarded from the loader
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Owns the state of one load session.
#[derive(Debug, Default)]
pub struct SessionModel {
    catalog: Option<Catalog>,
    ratings: Option<RatingsModel>,
    derived: Option<DerivedStats>,
}

impl SessionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state, loaded and derived.
    pub fn clear(&mut self) {
        self.catalog = None;
        self.ratings = None;
        self.derived = None;
    }

    /// Load a movies file, replacing the catalog on success. Any existing
    /// ratings and derived statistics are dropped with the old catalog
    /// since they refer to its canonical names.
    pub fn load_movies(&mut self, path: &Path) -> Result<(), ModelError> {
        let catalog = data_loader::load_movies(path)?;
        self.catalog = Some(catalog);
        self.ratings = None;
        self.derived = None;
        Ok(())
    }

    /// Load a ratings file against the current catalog, replacing the
    /// ratings model and recomputing all derived statistics on success.
    pub fn load_ratings(&mut self, path: &Path) -> Result<(), ModelError> {
        let catalog = self.catalog.as_ref().ok_or(ModelError::CatalogMissing)?;
        let ratings = data_loader::load_ratings(path, catalog)?;
        self.derived = Some(compute::compute_stats(catalog, &ratings));
        self.ratings = Some(ratings);
        Ok(())
    }

    /// Whether both files are loaded and statistics are available.
    pub fn is_ready(&self) -> bool {
        self.catalog.is_some() && self.ratings.is_some() && self.derived.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn ratings(&self) -> Option<&RatingsModel> {
        self.ratings.as_ref()
    }

    pub fn stats(&self) -> Option<&DerivedStats> {
        self.derived.as_ref()
    }

    // Query surface. All of these are read-only over the loaded state and
    // return empty/None until the model is ready.

    /// All movies, best first.
    pub fn ranked_movies(&self) -> Vec<String> {
        match (&self.catalog, &self.derived) {
            (Some(catalog), Some(stats)) => ranking::rank_movies(catalog, stats),
            _ => Vec::new(),
        }
    }

    /// One genre's movies, best first.
    pub fn ranked_movies_in_genre(&self, genre_key: &str) -> Vec<String> {
        match (&self.catalog, &self.derived) {
            (Some(catalog), Some(stats)) => ranking::rank_movies_in_genre(catalog, stats, genre_key),
            _ => Vec::new(),
        }
    }

    /// Rated genres, best first.
    pub fn ranked_genres(&self) -> Vec<String> {
        match (&self.catalog, &self.derived) {
            (Some(catalog), Some(stats)) => ranking::rank_genres(catalog, stats),
            _ => Vec::new(),
        }
    }

    pub fn movie_stats(&self, canonical_name: &str) -> Option<&MovieStats> {
        self.derived.as_ref()?.movies.get(canonical_name)
    }

    pub fn genre_stats(&self, genre_key: &str) -> Option<&GenreStats> {
        self.derived.as_ref()?.genres.get(genre_key)
    }

    pub fn user_top_genre(&self, user: UserId) -> Option<&UserTopGenre> {
        self.derived.as_ref()?.user_top.get(&user)
    }

    /// Up to [`recommend::RECOMMEND_LIMIT`] unseen movies from the user's
    /// top genre.
    pub fn recommend(&self, user: UserId) -> Vec<String> {
        match (&self.catalog, &self.ratings, &self.derived) {
            (Some(catalog), Some(ratings), Some(stats)) => {
                recommend::recommend_unseen(catalog, ratings, stats, user, recommend::RECOMMEND_LIMIT)
            }
            _ => Vec::new(),
        }
    }
}
