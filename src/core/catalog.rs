use crate::core::film_list::{FilmHandle, FilmList};
use crate::core::free_index::FreeFilmIndex;
use crate::domain::film::Film;
use crate::domain::model::{Genre, RecordKind};
use crate::utils::error::{CatalogError, Result};

/// Film catalog: the owning film list plus the index of free films.
///
/// All mutation goes through this type so both collections change in the same
/// call. After every public method returns, `free_count()` equals the number
/// of free films in the list and every indexed handle resolves.
#[derive(Debug, Default)]
pub struct Catalog {
    films: FilmList,
    free: FreeFilmIndex,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_film(&mut self, film: Film) -> Result<FilmHandle> {
        if self.films.find(&film.name).is_some() {
            return Err(CatalogError::duplicate(RecordKind::Film, film.name));
        }

        let name = film.name.clone();
        let is_free = film.is_free;
        let handle = self.films.add(film)?;

        if is_free {
            if let Err(e) = self.free.add(&self.films, handle) {
                tracing::warn!("Rolling back film '{}': index registration failed: {}", name, e);
                self.films.take(handle);
                return Err(e);
            }
        }

        tracing::debug!("Added film '{}' (free: {})", name, is_free);
        Ok(handle)
    }

    /// Removes the named film, unindexing it first when it is free.
    pub fn remove_film(&mut self, name: &str) -> Result<Film> {
        let handle = self
            .films
            .find_handle(name)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, name))?;

        // Nothing below allocates, so once the film is found both steps complete.
        self.free.remove(handle);
        let film = self
            .films
            .take(handle)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, name))?;

        tracing::debug!("Removed film '{}'", name);
        Ok(film)
    }

    pub fn count(&self) -> usize {
        self.films.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Film> {
        self.films.find(name)
    }

    pub fn find_free(&self, name: &str) -> Option<&Film> {
        self.free.find(&self.films, name)
    }

    pub fn get(&self, handle: FilmHandle) -> Option<&Film> {
        self.films.get(handle)
    }

    /// Free films in the order they were added.
    pub fn list_free(&self) -> impl Iterator<Item = &Film> + '_ {
        self.free.iter(&self.films)
    }

    /// All films in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Film> + '_ {
        self.films.iter()
    }

    pub fn films_by_genre(&self, genre: Genre) -> impl Iterator<Item = &Film> + '_ {
        self.films.iter().filter(move |film| film.genre == genre)
    }

    /// Clears the index, then the films it points into. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.free.clear();
        self.films.clear();
    }

    /// Checks the relationship between the two collections.
    pub fn verify(&self) -> bool {
        let free_in_list = self.films.iter().filter(|film| film.is_free).count();
        let all_resolve = self.free.iter(&self.films).count() == self.free.len();
        let indexed_iff_free = self.films.handles().all(|handle| {
            self.films
                .get(handle)
                .is_some_and(|film| film.is_free == self.free.contains(handle))
        });
        free_in_list == self.free.len() && all_resolve && indexed_iff_free
    }
}
