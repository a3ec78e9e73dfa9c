//! Integration tests for the whole pipeline: files on disk through
//! loading, canonicalization, statistics, ranking and recommendation.

use stats::{ModelError, SessionModel, RECOMMEND_LIMIT};
use data_loader::LoadError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn loaded_session(movies: &str, ratings: &str) -> SessionModel {
    let movies = write_file(movies);
    let ratings = write_file(ratings);
    let mut model = SessionModel::new();
    model.load_movies(movies.path()).unwrap();
    model.load_ratings(ratings.path()).unwrap();
    model
}

#[test]
fn test_end_to_end_session() {
    let model = loaded_session(
        "Comedy|1|Airplane! (1980)\n\
         Comedy|2|Up (2009)\n\
         Drama|3|Heat (1995)\n\
         Drama|4|Se7en (1995)\n",
        "Airplane! (1980)|5.0|1\n\
         Up (2009)|4.0|1\n\
         Heat (1995)|5.0|1\n\
         Airplane! (1980)|4.0|2\n\
         Se7en (1995)|2.0|2\n",
    );

    // movie stats
    let airplane = model.movie_stats("Airplane! (1980)").unwrap();
    assert_eq!(airplane.count, 2);
    assert!((airplane.average - 4.5).abs() < 1e-9);

    // genre stats: comedy movies average (4.5 + 4.0) / 2
    let comedy = model.genre_stats("comedy").unwrap();
    assert!((comedy.avg_of_movie_averages - 4.25).abs() < 1e-9);
    assert_eq!(comedy.total_ratings, 3);

    // user 1: comedy avg 4.5 over drama avg 5.0? no - drama wins on average
    assert_eq!(model.user_top_genre(1).unwrap().genre_key, "drama");
    // user 2: comedy 4.0 beats drama 2.0
    assert_eq!(model.user_top_genre(2).unwrap().genre_key, "comedy");

    // global ranking: Heat 5.0#1, Airplane 4.5#2, Up 4.0#1, Se7en 2.0#1
    assert_eq!(
        model.ranked_movies(),
        ["Heat (1995)", "Airplane! (1980)", "Up (2009)", "Se7en (1995)"]
    );
}

#[test]
fn test_case_variant_merge_and_first_display_form() {
    let model = loaded_session(
        "Comedy|1|Up (2009)\nComedy|1|UP (2009)\n",
        "up (2009)|4.0|1\n",
    );

    // one canonical record under the first-seen spelling, and the rating
    // resolved to it through a third spelling
    let ranked = model.ranked_movies();
    assert_eq!(ranked, ["Up (2009)"]);
    assert_eq!(model.movie_stats("Up (2009)").unwrap().count, 1);
}

#[test]
fn test_recommendation_property() {
    // user 7's top genre is drama; X already rated; Y ties X's average
    // with fewer ratings than X but more than Z
    let model = loaded_session(
        "Drama|1|X (2000)\nDrama|2|Y (2001)\nDrama|3|Z (2002)\nComedy|4|C (2003)\n",
        "X (2000)|4.9|1\n\
         X (2000)|4.9|2\n\
         X (2000)|4.9|7\n\
         Y (2001)|4.9|1\n\
         Y (2001)|4.9|2\n\
         Z (2002)|4.0|1\n",
    );

    assert_eq!(model.user_top_genre(7).unwrap().genre_key, "drama");
    let recs = model.recommend(7);
    assert_eq!(recs, ["Y (2001)", "Z (2002)"]);
    assert!(recs.len() <= RECOMMEND_LIMIT);
}

#[test]
fn test_abort_line_numbers_cross_stage() {
    let movies = write_file("Comedy|1|Up (2009)\n\n\nDrama|2|NoYear\n");
    let mut model = SessionModel::new();

    let err = model.load_movies(movies.path()).unwrap_err();
    let ModelError::Load(load_err) = err else {
        panic!("expected a load error");
    };
    assert!(matches!(load_err, LoadError::InvalidTitleFormat { line: 4, .. }));
    assert!(model.catalog().is_none());
}

#[test]
fn test_skip_rules_leave_file_loadable() {
    let model = loaded_session(
        "Comedy|1|Up (2009)\n",
        "Up (2009)|7.5|1\n\
         Up (2009)|4.0|1\n\
         Ghost (1990)|3.0|1\n\
         Up (2009)|1.0|1\n",
    );

    let skips = model.ratings().unwrap().skips();
    assert_eq!(skips.out_of_range, 1);
    assert_eq!(skips.unknown_movie, 1);
    assert_eq!(skips.duplicate, 1);
    assert_eq!(model.movie_stats("Up (2009)").unwrap().average, 4.0);
}

#[test]
fn test_reload_is_atomic() {
    let mut model = SessionModel::new();
    let movies = write_file("Comedy|1|Up (2009)\n");
    let ratings = write_file("Up (2009)|4.0|1\n");
    model.load_movies(movies.path()).unwrap();
    model.load_ratings(ratings.path()).unwrap();

    // a reload that fails half-way must not leave a mixed model: clear
    // first (the caller's reload semantics), then observe the failure
    model.clear();
    let bad_movies = write_file("Comedy|-1|Up (2009)\n");
    let err = model.load_movies(bad_movies.path()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::Load(LoadError::NegativeMovieId { line: 1, id: -1 })
    ));
    assert!(model.catalog().is_none());
    assert!(model.ratings().is_none());
    assert!(model.stats().is_none());
}
