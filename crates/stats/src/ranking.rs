//! Ordering chains for movies, genres and user genre preference.
//!
//! Each comparator sorts best-first. Unrated movies rank with an average
//! of 0.0 and a count of 0, so they sink below every rated movie and fall
//! back to the alphabetical/id legs of the chain.
//!
//! All stored rating values are finite, so `f64::total_cmp` agrees with
//! numeric order here.

use crate::compute::{DerivedStats, UserTopGenre};
use data_loader::Catalog;
use std::cmp::Ordering;

/// Movie ranking: average desc, count desc, display name A-Z
/// case-insensitively, then numeric id asc.
pub fn movie_order(catalog: &Catalog, stats: &DerivedStats, a: &str, b: &str) -> Ordering {
    let (avg_a, count_a) = movie_key(stats, a);
    let (avg_b, count_b) = movie_key(stats, b);
    avg_b
        .total_cmp(&avg_a)
        .then_with(|| count_b.cmp(&count_a))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| movie_id(catalog, a).cmp(&movie_id(catalog, b)))
        .then_with(|| a.cmp(b))
}

/// Genre ranking: average-of-movie-averages desc, total ratings desc,
/// display name A-Z case-insensitively.
pub fn genre_order(catalog: &Catalog, stats: &DerivedStats, a: &str, b: &str) -> Ordering {
    let (avg_a, total_a) = genre_key(stats, a);
    let (avg_b, total_b) = genre_key(stats, b);
    avg_b
        .total_cmp(&avg_a)
        .then_with(|| total_b.cmp(&total_a))
        .then_with(|| {
            catalog
                .genre_display(a)
                .to_lowercase()
                .cmp(&catalog.genre_display(b).to_lowercase())
        })
}

/// User genre preference: the user's own average desc, their count in the
/// genre desc, genre display name A-Z case-insensitively.
pub fn user_genre_order(catalog: &Catalog, a: &UserTopGenre, b: &UserTopGenre) -> Ordering {
    b.average
        .total_cmp(&a.average)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| {
            catalog
                .genre_display(&a.genre_key)
                .to_lowercase()
                .cmp(&catalog.genre_display(&b.genre_key).to_lowercase())
        })
}

/// All canonical movie names in ranking order.
pub fn rank_movies(catalog: &Catalog, stats: &DerivedStats) -> Vec<String> {
    let mut names: Vec<String> = catalog.movie_names().map(str::to_string).collect();
    names.sort_by(|a, b| movie_order(catalog, stats, a, b));
    names
}

/// The canonical movie names of one genre in ranking order; empty when the
/// genre key is unknown.
pub fn rank_movies_in_genre(catalog: &Catalog, stats: &DerivedStats, genre_key: &str) -> Vec<String> {
    let mut names: Vec<String> = catalog
        .genre(genre_key)
        .map(|entry| entry.movies.iter().cloned().collect())
        .unwrap_or_default();
    names.sort_by(|a, b| movie_order(catalog, stats, a, b));
    names
}

/// Genre keys with at least one rated movie, in ranking order.
pub fn rank_genres(catalog: &Catalog, stats: &DerivedStats) -> Vec<String> {
    let mut keys: Vec<String> = stats.genres.keys().cloned().collect();
    keys.sort_by(|a, b| genre_order(catalog, stats, a, b));
    keys
}

fn movie_key(stats: &DerivedStats, name: &str) -> (f64, u32) {
    stats
        .movies
        .get(name)
        .map(|s| (s.average, s.count))
        .unwrap_or((0.0, 0))
}

fn genre_key(stats: &DerivedStats, key: &str) -> (f64, u32) {
    stats
        .genres
        .get(key)
        .map(|s| (s.avg_of_movie_averages, s.total_ratings))
        .unwrap_or((0.0, 0))
}

fn movie_id(catalog: &Catalog, name: &str) -> u64 {
    catalog.movie(name).map(|m| m.id).unwrap_or(u64::MAX)
}
