//! Free-film index: ordered handles to the free films of a [`FilmList`].
//!
//! The index owns only its handles. Every lookup resolves through the list
//! that owns the films, so the caller always passes that list in.

use crate::core::film_list::{FilmHandle, FilmList};
use crate::domain::film::Film;
use crate::domain::model::RecordKind;
use crate::utils::error::{CatalogError, Result};

#[derive(Debug, Default)]
pub struct FreeFilmIndex {
    entries: Vec<FilmHandle>,
    #[cfg(test)]
    inject_failure: bool,
}

impl FreeFilmIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers `handle`. The handle must resolve in `films`, and no film of the
    /// same name may already be indexed.
    pub(crate) fn add(&mut self, films: &FilmList, handle: FilmHandle) -> Result<()> {
        let film = films
            .get(handle)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, "<stale handle>"))?;
        debug_assert!(film.is_free, "only free films are indexed");

        if self.find(films, &film.name).is_some() {
            return Err(CatalogError::duplicate(RecordKind::Film, film.name.clone()));
        }

        self.reserve_slot()?;
        self.entries.push(handle);
        Ok(())
    }

    pub fn find<'a>(&self, films: &'a FilmList, name: &str) -> Option<&'a Film> {
        self.position(films, name)
            .and_then(|pos| films.get(self.entries[pos]))
    }

    fn position(&self, films: &FilmList, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|handle| films.get(*handle).is_some_and(|film| film.name == name))
    }

    /// Drops the index entry for `handle`, if any. The film itself stays in
    /// its list. Never allocates.
    pub(crate) fn remove(&mut self, handle: FilmHandle) -> bool {
        match self.entries.iter().position(|h| *h == handle) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Indexed films in insertion order.
    pub fn iter<'a>(&'a self, films: &'a FilmList) -> impl Iterator<Item = &'a Film> + 'a {
        self.entries.iter().filter_map(move |handle| films.get(*handle))
    }

    pub fn contains(&self, handle: FilmHandle) -> bool {
        self.entries.contains(&handle)
    }

    #[cfg(not(test))]
    fn reserve_slot(&mut self) -> Result<()> {
        self.entries.try_reserve(1)?;
        Ok(())
    }

    /// Test builds can force the next reservation to fail.
    #[cfg(test)]
    fn reserve_slot(&mut self) -> Result<()> {
        if std::mem::take(&mut self.inject_failure) {
            let mut oversized: Vec<u64> = Vec::new();
            return Err(oversized.try_reserve(usize::MAX).unwrap_err().into());
        }
        self.entries.try_reserve(1)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn fail_next_add(&mut self) {
        self.inject_failure = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Genre, Runtime};
    use chrono::NaiveDate;

    fn free_film(name: &str) -> Film {
        Film::new(
            name,
            Runtime::new(1, 30).unwrap(),
            Genre::Animation,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            7.5,
            true,
        )
        .unwrap()
    }

    fn setup(names: &[&str]) -> (FilmList, FreeFilmIndex) {
        let mut films = FilmList::new();
        let mut index = FreeFilmIndex::new();
        for name in names {
            let handle = films.add(free_film(name)).unwrap();
            index.add(&films, handle).unwrap();
        }
        (films, index)
    }

    #[test]
    fn test_add_and_find() {
        let (films, index) = setup(&["Alpha", "Beta"]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.find(&films, "Beta").unwrap().name, "Beta");
        assert!(index.find(&films, "Gamma").is_none());
    }

    #[test]
    fn test_add_same_film_twice_is_duplicate() {
        let (films, mut index) = setup(&["Alpha"]);
        let handle = films.find_handle("Alpha").unwrap();

        let err = index.add(&films, handle).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { .. }));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_keeps_film_in_primary_list() {
        let (films, mut index) = setup(&["Alpha", "Beta", "Gamma"]);
        let beta = films.find_handle("Beta").unwrap();

        assert!(index.remove(beta));

        assert_eq!(index.len(), 2);
        assert!(!index.contains(beta));
        assert!(index.find(&films, "Beta").is_none());
        assert!(films.find("Beta").is_some());
        let names: Vec<_> = index.iter(&films).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_remove_unindexed_handle_is_a_no_op() {
        let (mut films, mut index) = setup(&["Alpha"]);
        let paid = films
            .add(Film {
                is_free: false,
                ..free_film("Beta")
            })
            .unwrap();

        assert!(!index.remove(paid));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_clear_releases_only_handles() {
        let (films, mut index) = setup(&["Alpha", "Beta"]);
        index.clear();
        index.clear();

        assert!(index.is_empty());
        assert_eq!(films.len(), 2);
    }
}
