use crate::domain::model::RecordKind;
use crate::domain::person::Person;
use crate::domain::ports::PersonDirectory;
use crate::utils::error::{CatalogError, Result};

/// Registered people, keyed by document.
#[derive(Debug, Default)]
pub struct People {
    elems: Vec<Person>,
}

impl People {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, person: Person) -> Result<()> {
        if self.find(&person.document).is_some() {
            return Err(CatalogError::duplicate(RecordKind::Person, person.document));
        }
        self.elems.try_reserve(1)?;
        tracing::debug!("Added person '{}'", person.document);
        self.elems.push(person);
        Ok(())
    }

    /// Position of the person with `document`, if registered.
    pub fn find(&self, document: &str) -> Option<usize> {
        self.elems.iter().position(|p| p.document == document)
    }

    pub fn get(&self, document: &str) -> Option<&Person> {
        self.find(document).map(|pos| &self.elems[pos])
    }

    pub fn remove(&mut self, document: &str) -> Result<Person> {
        let pos = self
            .find(document)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Person, document))?;
        Ok(self.elems.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.elems.iter()
    }

    pub fn clear(&mut self) {
        self.elems.clear();
    }
}

impl PersonDirectory for People {
    fn exists(&self, document: &str) -> bool {
        self.find(document).is_some()
    }
}
