//! Unseen-movie recommendations from a user's top genre.

use crate::compute::DerivedStats;
use crate::ranking;
use data_loader::{Catalog, RatingsModel, UserId};

/// How many recommendations a query returns at most.
pub const RECOMMEND_LIMIT: usize = 3;

/// Recommend up to `limit` movies the user has not rated, drawn from their
/// top genre in movie-ranking order. Empty when the user has no ratings
/// (and therefore no top genre) or has already rated the whole genre.
pub fn recommend_unseen(
    catalog: &Catalog,
    ratings: &RatingsModel,
    stats: &DerivedStats,
    user: UserId,
    limit: usize,
) -> Vec<String> {
    let Some(top) = stats.user_top.get(&user) else {
        return Vec::new();
    };

    let mut movies = ranking::rank_movies_in_genre(catalog, stats, &top.genre_key);
    movies.retain(|name| !ratings.has_rated(user, name));
    movies.truncate(limit);
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::compute_stats;
    use data_loader::{CatalogBuilder, RatingsBuilder};
    use data_loader::parser::{MovieRow, RatingRow};

    fn build_world(
        movies: &[(&str, i64, &str)],
        ratings: &[(&str, f64, i64)],
    ) -> (Catalog, RatingsModel, DerivedStats) {
        let mut builder = CatalogBuilder::new();
        for (line, &(genre, id, name)) in movies.iter().enumerate() {
            builder
                .add_row(MovieRow {
                    line: line + 1,
                    genre: genre.to_string(),
                    id,
                    name: name.to_string(),
                })
                .unwrap();
        }
        let catalog = builder.finish();

        let mut builder = RatingsBuilder::new(&catalog);
        for (line, &(movie, value, user)) in ratings.iter().enumerate() {
            builder
                .add_row(RatingRow {
                    line: line + 1,
                    movie_name: movie.to_string(),
                    value,
                    user_id: user,
                })
                .unwrap();
        }
        let model = builder.finish();
        let stats = compute_stats(&catalog, &model);
        (catalog, model, stats)
    }

    #[test]
    fn test_recommends_unseen_in_ranking_order() {
        // user 7's top genre is drama; X is already rated, Y outranks Z
        // by count at equal average
        let (catalog, ratings, stats) = build_world(
            &[
                ("Drama", 1, "X (2000)"),
                ("Drama", 2, "Y (2001)"),
                ("Drama", 3, "Z (2002)"),
            ],
            &[
                ("X (2000)", 5.0, 7),
                ("Y (2001)", 4.9, 1),
                ("Y (2001)", 4.9, 2),
                ("Z (2002)", 4.0, 1),
            ],
        );

        let recs = recommend_unseen(&catalog, &ratings, &stats, 7, RECOMMEND_LIMIT);
        assert_eq!(recs, ["Y (2001)", "Z (2002)"]);
    }

    #[test]
    fn test_limit_caps_recommendations() {
        let (catalog, ratings, stats) = build_world(
            &[
                ("Drama", 1, "A (2000)"),
                ("Drama", 2, "B (2001)"),
                ("Drama", 3, "C (2002)"),
                ("Drama", 4, "D (2003)"),
                ("Drama", 5, "E (2004)"),
            ],
            &[("A (2000)", 5.0, 7)],
        );

        let recs = recommend_unseen(&catalog, &ratings, &stats, 7, RECOMMEND_LIMIT);
        assert_eq!(recs.len(), 3);
        assert!(!recs.contains(&"A (2000)".to_string()));
    }

    #[test]
    fn test_unrated_genre_movies_are_still_candidates() {
        // unseen movies with no ratings at all rank below rated ones but
        // are recommendable
        let (catalog, ratings, stats) = build_world(
            &[("Drama", 1, "A (2000)"), ("Drama", 2, "B (2001)")],
            &[("A (2000)", 3.0, 7)],
        );

        let recs = recommend_unseen(&catalog, &ratings, &stats, 7, RECOMMEND_LIMIT);
        assert_eq!(recs, ["B (2001)"]);
    }

    #[test]
    fn test_everything_seen_yields_empty() {
        let (catalog, ratings, stats) = build_world(
            &[("Drama", 1, "A (2000)")],
            &[("A (2000)", 4.0, 7)],
        );

        assert!(recommend_unseen(&catalog, &ratings, &stats, 7, RECOMMEND_LIMIT).is_empty());
    }

    #[test]
    fn test_unknown_user_yields_empty() {
        let (catalog, ratings, stats) = build_world(
            &[("Drama", 1, "A (2000)")],
            &[("A (2000)", 4.0, 7)],
        );

        assert!(recommend_unseen(&catalog, &ratings, &stats, 99, RECOMMEND_LIMIT).is_empty());
    }
}
