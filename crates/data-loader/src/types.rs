//! Core domain types for the catalog pipeline.
//!
//! `Catalog` and `RatingsModel` are the two owning models produced by the
//! builders. Both expose borrowing accessors only; they are immutable for
//! the rest of the session once built.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user ids with movie ids.
// Both are parsed as signed integers so the builders can reject negative
// values explicitly, then stored unsigned.

/// Unique identifier for a movie concept (one per (title, year) pair)
pub type MovieId = u64;

/// Unique identifier for a rating user
pub type UserId = u64;

// =============================================================================
// Movie-related Types
// =============================================================================

/// One canonical movie entry.
///
/// `display_name` is the exact first-seen spelling; rows that differ from it
/// only by case (at identical length) merge into this record rather than
/// creating a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    /// Canonical display form, first spelling seen wins
    pub display_name: String,
    /// Original casing of this movie's genre as first seen
    pub genre_display: String,
    /// Lowercased, trimmed genre key
    pub genre_key: String,
}

/// A genre as registered in the catalog: first-seen display casing plus the
/// set of canonical movie names filed under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreEntry {
    pub display: String,
    pub movies: BTreeSet<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The validated movie catalog.
///
/// Built in one pass by [`crate::catalog::CatalogBuilder`]; a build either
/// completes fully or returns a [`crate::LoadError`] and nothing is kept.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Canonical display name -> record
    pub(crate) movies: HashMap<String, MovieRecord>,
    /// id -> canonical display name
    pub(crate) by_id: HashMap<MovieId, String>,
    /// id -> concept key; an id may never rebind to another concept
    pub(crate) id_concepts: HashMap<MovieId, String>,
    /// concept key -> id; a concept may never rebind to another id
    pub(crate) concept_ids: HashMap<String, MovieId>,
    /// equivalence key (char count + lowercase) -> canonical display name
    pub(crate) display_index: HashMap<String, String>,
    /// genre key -> entry
    pub(crate) genres: HashMap<String, GenreEntry>,
}

impl Catalog {
    /// Look up a canonical record by its exact canonical name
    pub fn movie(&self, canonical_name: &str) -> Option<&MovieRecord> {
        self.movies.get(canonical_name)
    }

    /// Look up a record by id
    pub fn movie_by_id(&self, id: MovieId) -> Option<&MovieRecord> {
        self.by_id.get(&id).and_then(|name| self.movies.get(name))
    }

    /// Resolve an arbitrary spelling to its canonical record, using the
    /// same-length case-insensitive equivalence rule. Returns `None` when
    /// no catalog entry matches.
    pub fn resolve(&self, name: &str) -> Option<&MovieRecord> {
        let key = crate::normalize::equivalence_key(name);
        self.display_index
            .get(&key)
            .and_then(|canonical| self.movies.get(canonical))
    }

    /// All canonical movie names, in arbitrary order
    pub fn movie_names(&self) -> impl Iterator<Item = &str> {
        self.movies.keys().map(String::as_str)
    }

    /// A genre entry by its lowercase key
    pub fn genre(&self, genre_key: &str) -> Option<&GenreEntry> {
        self.genres.get(genre_key)
    }

    /// All (genre key, entry) pairs, in arbitrary order
    pub fn genres(&self) -> impl Iterator<Item = (&str, &GenreEntry)> {
        self.genres.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First-seen display casing for a genre key, falling back to the key
    pub fn genre_display<'a>(&'a self, genre_key: &'a str) -> &'a str {
        self.genres
            .get(genre_key)
            .map(|g| g.display.as_str())
            .unwrap_or(genre_key)
    }

    /// (movies, genres) counts for logging and sanity checks
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.genres.len())
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

// =============================================================================
// Rating Types
// =============================================================================

/// One retained rating: a user's value for a canonical movie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    /// Rating value, finite and within [0, 5]
    pub value: f64,
}

/// Rows dropped by the row-level skip rules, by reason. These never abort a
/// load; the counts are the diagnostic surface for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    pub out_of_range: u64,
    pub unknown_movie: u64,
    pub duplicate: u64,
}

impl SkipCounts {
    pub fn total(&self) -> u64 {
        self.out_of_range + self.unknown_movie + self.duplicate
    }
}

/// The validated ratings model, built against a specific [`Catalog`].
#[derive(Debug, Default)]
pub struct RatingsModel {
    /// Canonical movie name -> retained ratings in file order
    pub(crate) by_movie: HashMap<String, Vec<RatingRecord>>,
    /// user id -> canonical movie name -> retained value
    pub(crate) by_user: HashMap<UserId, HashMap<String, f64>>,
    /// Distinct user ids, ascending
    pub(crate) users: Vec<UserId>,
    pub(crate) skips: SkipCounts,
}

impl RatingsModel {
    /// Retained ratings for a movie; empty slice if it has none
    pub fn movie_ratings(&self, canonical_name: &str) -> &[RatingRecord] {
        self.by_movie
            .get(canonical_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All (canonical name, ratings) pairs, in arbitrary order
    pub fn ratings_by_movie(&self) -> impl Iterator<Item = (&str, &[RatingRecord])> {
        self.by_movie.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// A user's retained ratings as (canonical name -> value)
    pub fn user_ratings(&self, user_id: UserId) -> Option<&HashMap<String, f64>> {
        self.by_user.get(&user_id)
    }

    /// Whether this user has rated this canonical movie
    pub fn has_rated(&self, user_id: UserId, canonical_name: &str) -> bool {
        self.by_user
            .get(&user_id)
            .is_some_and(|m| m.contains_key(canonical_name))
    }

    /// The session's user roster: distinct user ids, ascending
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.by_user.contains_key(&user_id)
    }

    /// Rows dropped by the skip rules during the build
    pub fn skips(&self) -> SkipCounts {
        self.skips
    }

    /// Total retained ratings
    pub fn len(&self) -> usize {
        self.by_movie.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_movie.is_empty()
    }
}
