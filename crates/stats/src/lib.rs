//! Statistics, ranking and recommendation over a loaded catalog.
//!
//! This crate consumes the models built by `data-loader` and derives:
//! - per-movie averages and counts
//! - per-genre averages-of-averages and rating volumes
//! - each user's top genre
//! - ranked movie/genre lists and unseen-movie recommendations
//!
//! ## Example Usage
//! ```ignore
//! use stats::SessionModel;
//! use std::path::Path;
//!
//! let mut model = SessionModel::new();
//! model.load_movies(Path::new("movies.txt"))?;
//! model.load_ratings(Path::new("ratings.txt"))?;
//!
//! for name in model.ranked_movies() {
//!     println!("{name}");
//! }
//! ```
//!
//! Derived state is always recomputed from scratch when the inputs
//! change; nothing is patched incrementally.

pub mod compute;
pub mod model;
pub mod ranking;
pub mod recommend;

// Re-export main types
pub use compute::{compute_stats, DerivedStats, GenreStats, MovieStats, UserTopGenre};
pub use model::{ModelError, SessionModel};
pub use recommend::{recommend_unseen, RECOMMEND_LIMIT};
