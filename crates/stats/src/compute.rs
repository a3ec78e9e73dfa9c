//! Statistics derivation from a built catalog and ratings model.
//!
//! Everything here is a full recompute over the inputs; derived maps are
//! replaced wholesale, never patched. Movies and genres without any
//! retained rating simply have no entry.

use data_loader::{Catalog, RatingsModel, UserId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-movie aggregate over retained ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub average: f64,
    pub count: u32,
}

/// Per-genre aggregate: the unweighted mean of the averages of its rated
/// movies (each movie counts once regardless of how many ratings it has),
/// plus the sum of those movies' rating counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenreStats {
    pub avg_of_movie_averages: f64,
    pub total_ratings: u32,
}

/// The single best genre for one user, with that user's own average and
/// rating count inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTopGenre {
    pub genre_key: String,
    pub average: f64,
    pub count: u32,
}

/// All derived statistics for one (catalog, ratings) pair.
#[derive(Debug, Default)]
pub struct DerivedStats {
    pub movies: HashMap<String, MovieStats>,
    pub genres: HashMap<String, GenreStats>,
    pub user_top: HashMap<UserId, UserTopGenre>,
}

/// Derive the full statistics bundle. The stats entry point of the
/// pipeline; read-only over both inputs.
pub fn compute_stats(catalog: &Catalog, ratings: &RatingsModel) -> DerivedStats {
    let movies = movie_stats(ratings);
    let genres = genre_stats(catalog, &movies);
    let user_top = user_top_genres(catalog, ratings);
    tracing::debug!(
        rated_movies = movies.len(),
        rated_genres = genres.len(),
        users = user_top.len(),
        "derived statistics recomputed"
    );
    DerivedStats {
        movies,
        genres,
        user_top,
    }
}

/// Mean and count of retained ratings, per movie.
pub fn movie_stats(ratings: &RatingsModel) -> HashMap<String, MovieStats> {
    ratings
        .ratings_by_movie()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(name, list)| {
            let count = list.len() as u32;
            let total: f64 = list.iter().map(|r| r.value).sum();
            (
                name.to_string(),
                MovieStats {
                    average: total / count as f64,
                    count,
                },
            )
        })
        .collect()
}

/// Equal-weight mean of movie averages per genre. A movie rated a hundred
/// times moves the genre no more than one rated once; only `total_ratings`
/// reflects volume.
pub fn genre_stats(
    catalog: &Catalog,
    movie_stats: &HashMap<String, MovieStats>,
) -> HashMap<String, GenreStats> {
    catalog
        .genres()
        .filter_map(|(key, entry)| {
            let mut sum_of_averages = 0.0;
            let mut rated_movies = 0u32;
            let mut total_ratings = 0u32;
            for name in &entry.movies {
                if let Some(stats) = movie_stats.get(name) {
                    sum_of_averages += stats.average;
                    rated_movies += 1;
                    total_ratings += stats.count;
                }
            }
            if rated_movies == 0 {
                return None;
            }
            Some((
                key.to_string(),
                GenreStats {
                    avg_of_movie_averages: sum_of_averages / rated_movies as f64,
                    total_ratings,
                },
            ))
        })
        .collect()
}

/// Each user's best genre over their own ratings: highest per-genre
/// average, then higher count, then genre display name A-Z
/// case-insensitively. Aggregation uses each movie's own genre.
pub fn user_top_genres(
    catalog: &Catalog,
    ratings: &RatingsModel,
) -> HashMap<UserId, UserTopGenre> {
    let mut result = HashMap::new();

    for &user in ratings.users() {
        let Some(rated) = ratings.user_ratings(user) else {
            continue;
        };

        let mut per_genre: HashMap<&str, (f64, u32)> = HashMap::new();
        for (name, &value) in rated {
            let Some(record) = catalog.movie(name) else {
                continue;
            };
            let entry = per_genre.entry(record.genre_key.as_str()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }

        let best = per_genre
            .into_iter()
            .filter(|&(_, (_, count))| count >= 1)
            .map(|(genre_key, (sum, count))| UserTopGenre {
                genre_key: genre_key.to_string(),
                average: sum / count as f64,
                count,
            })
            .min_by(|a, b| crate::ranking::user_genre_order(catalog, a, b));

        if let Some(top) = best {
            result.insert(user, top);
        }
    }

    result
}
