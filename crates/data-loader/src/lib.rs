//! # Data Loader Crate
//!
//! Loading, validation and canonicalization for the two pipe-delimited
//! catalog files: movies (`genre|movieId|movieName`) and ratings
//! (`movieName|rating|userId`).
//!
//! ## Main Components
//!
//! - **reader**: non-blank lines with physical 1-based numbers
//! - **parser**: field splitting and numeric conversion
//! - **normalize**: title/year extraction and the two equivalence rules
//! - **catalog**: canonical movie records, conflict detection, genre index
//! - **ratings**: per-movie / per-user rating indexes with skip rules
//! - **error**: the [`LoadError`] abort kinds
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{load_movies, load_ratings};
//! use std::path::Path;
//!
//! let catalog = load_movies(Path::new("movies.txt"))?;
//! let ratings = load_ratings(Path::new("ratings.txt"), &catalog)?;
//!
//! println!("{} movies, {} ratings", catalog.counts().0, ratings.len());
//! ```
//!
//! Loads are all-or-nothing: each entry point returns a fully built model
//! or a [`LoadError`] naming the exact rule and line, never a partial one.

// Public modules
pub mod catalog;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod ratings;
pub mod reader;
pub mod types;

// Re-export commonly used items for convenience
pub use catalog::{load_movies, CatalogBuilder};
pub use error::{LoadError, Result};
pub use ratings::{load_ratings, RatingsBuilder};
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Catalog,
    GenreEntry,
    MovieRecord,
    RatingRecord,
    RatingsModel,
    SkipCounts,
};
