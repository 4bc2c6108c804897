//! Primary catalog list: the owning, insertion-ordered store of every film.
//!
//! Films live in a slot arena. Each insertion hands back a [`FilmHandle`]
//! (slot index plus generation) that stays valid until that film is removed.
//! Removal bumps the slot's generation, so a handle held past removal resolves
//! to `None` instead of to whatever film later reuses the slot.

use crate::domain::film::Film;
use crate::domain::model::RecordKind;
use crate::utils::error::{CatalogError, Result};

/// Stable, non-owning reference to a film stored in a [`FilmList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilmHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    film: Option<Film>,
}

#[derive(Debug, Default)]
pub struct FilmList {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    /// Live handles in insertion order.
    order: Vec<FilmHandle>,
}

impl FilmList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Appends `film` at the tail. Fails with `DuplicateKey` if the name is taken.
    pub fn add(&mut self, film: Film) -> Result<FilmHandle> {
        if self.find(&film.name).is_some() {
            return Err(CatalogError::duplicate(RecordKind::Film, film.name));
        }

        // Reserve everything up front so a failed allocation leaves the list untouched.
        self.order.try_reserve(1)?;
        let index = match self.vacant.pop() {
            Some(index) => index,
            None => {
                self.slots.try_reserve(1)?;
                // Room for every slot in `vacant`, so removal never allocates.
                self.vacant.try_reserve(self.slots.len() + 1 - self.vacant.len())?;
                let index = u32::try_from(self.slots.len()).map_err(|_| {
                    CatalogError::invalid_format("film", film.name.clone(), "catalog slot limit reached")
                })?;
                self.slots.push(Slot::default());
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.film = Some(film);
        let handle = FilmHandle {
            index,
            generation: slot.generation,
        };
        self.order.push(handle);
        Ok(handle)
    }

    pub fn get(&self, handle: FilmHandle) -> Option<&Film> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.film.as_ref())
    }

    pub fn find(&self, name: &str) -> Option<&Film> {
        self.find_handle(name).and_then(|handle| self.get(handle))
    }

    pub fn find_handle(&self, name: &str) -> Option<FilmHandle> {
        self.position(name).map(|pos| self.order[pos])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|handle| self.get(*handle).is_some_and(|film| film.name == name))
    }

    /// Unlinks the named film and hands it back to the caller.
    pub fn remove(&mut self, name: &str) -> Result<Film> {
        let handle = self
            .find_handle(name)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, name))?;
        self.take(handle)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, name))
    }

    /// Unlinks the film behind `handle`. Does not allocate, so once a handle
    /// resolves its removal cannot fail.
    pub fn take(&mut self, handle: FilmHandle) -> Option<Film> {
        let pos = self.order.iter().position(|h| *h == handle)?;
        self.order.remove(pos);
        let film = self.release(handle.index);
        self.vacant.push(handle.index);
        film
    }

    fn release(&mut self, index: u32) -> Option<Film> {
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.film.take()
    }

    /// Drops every film. Calling it on an empty list is a no-op.
    pub fn clear(&mut self) {
        let handles = std::mem::take(&mut self.order);
        for handle in handles {
            self.release(handle.index);
        }
        // Generations survive so handles from before the clear stay dead.
        self.vacant = (0..self.slots.len() as u32).rev().collect();
    }

    /// Films in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Film> + '_ {
        self.order.iter().filter_map(|handle| self.get(*handle))
    }

    pub fn handles(&self) -> impl Iterator<Item = FilmHandle> + '_ {
        self.order.iter().copied()
    }
}
