//! Catalog building: canonicalization, conflict detection, genre indexing.
//!
//! Rows are processed in file order. Case-variant spellings of one name
//! (same length, equal ignoring case) merge into the first-seen canonical
//! record; the same (title, year) concept may never carry two ids and an
//! id may never carry two concepts. Any violation aborts the whole file
//! with the offending line number — there is no partial acceptance.

use crate::error::{LoadError, Result};
use crate::normalize;
use crate::parser::{self, MovieRow};
use crate::reader;
use crate::types::{Catalog, GenreEntry, MovieId, MovieRecord};
use std::path::Path;

/// Load and validate a movies file into a fresh [`Catalog`].
///
/// This is the movies-side pipeline entry point: read, parse, build. On
/// any error the partially built catalog is dropped with the builder.
pub fn load_movies(path: &Path) -> Result<Catalog> {
    let lines = reader::read_lines(path)?;

    let mut builder = CatalogBuilder::new();
    for line in &lines {
        let row = parser::parse_movie_row(&line.text, line.number)?;
        builder.add_row(row)?;
    }

    let catalog = builder.finish();
    let (movies, genres) = catalog.counts();
    tracing::debug!(path = %path.display(), movies, genres, "catalog built");
    Ok(catalog)
}

/// Incremental catalog builder; one instance per load attempt.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one parsed movie row, in file order.
    pub fn add_row(&mut self, row: MovieRow) -> Result<()> {
        if row.id < 0 {
            return Err(LoadError::NegativeMovieId {
                line: row.line,
                id: row.id,
            });
        }
        let id = row.id as MovieId;

        let (title, year) =
            normalize::parse_title_year(&row.name).ok_or_else(|| LoadError::InvalidTitleFormat {
                line: row.line,
                name: row.name.clone(),
            })?;
        let concept = normalize::concept_key(title, year);

        if let Some(&existing_id) = self.catalog.concept_ids.get(&concept) {
            if existing_id != id {
                return Err(LoadError::ConceptIdConflict {
                    line: row.line,
                    concept,
                    existing_id,
                });
            }
        }
        if let Some(existing_concept) = self.catalog.id_concepts.get(&id) {
            if *existing_concept != concept {
                return Err(LoadError::IdReuseConflict {
                    line: row.line,
                    id,
                    existing_concept: existing_concept.clone(),
                });
            }
        }

        let equivalence = normalize::equivalence_key(&row.name);
        let canonical = match self.catalog.display_index.get(&equivalence) {
            Some(existing) => {
                let record = &self.catalog.movies[existing];
                if record.id != id {
                    return Err(LoadError::DisplayNameIdConflict {
                        line: row.line,
                        name: row.name,
                        canonical: existing.clone(),
                        existing_id: record.id,
                    });
                }
                // kept-first duplicate: the row contributes nothing beyond
                // its genre registration below
                existing.clone()
            }
            None => {
                let genre_key = normalize::genre_key(&row.genre);
                self.catalog.movies.insert(
                    row.name.clone(),
                    MovieRecord {
                        id,
                        display_name: row.name.clone(),
                        genre_display: row.genre.clone(),
                        genre_key,
                    },
                );
                self.catalog.display_index.insert(equivalence, row.name.clone());
                self.catalog.by_id.entry(id).or_insert_with(|| row.name.clone());
                self.catalog.concept_ids.insert(concept.clone(), id);
                self.catalog.id_concepts.insert(id, concept);
                row.name
            }
        };

        // genre registration happens for every accepted row, duplicates
        // included, so a re-listing under another genre still lands
        let genre_key = normalize::genre_key(&row.genre);
        self.catalog
            .genres
            .entry(genre_key)
            .or_insert_with(|| GenreEntry {
                display: row.genre.clone(),
                movies: Default::default(),
            })
            .movies
            .insert(canonical);

        Ok(())
    }

    pub fn finish(self) -> Catalog {
        self.catalog
    }
}
