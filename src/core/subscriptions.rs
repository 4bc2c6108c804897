use crate::domain::model::RecordKind;
use crate::domain::ports::PersonDirectory;
use crate::domain::subscription::Subscription;
use crate::utils::error::{CatalogError, Result};

/// Registered subscriptions, keyed by id. Every subscription belongs to a known person.
#[derive(Debug, Default)]
pub struct Subscriptions {
    elems: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a repeated id first, then an unknown owner.
    pub fn add<D: PersonDirectory + ?Sized>(&mut self, people: &D, subscription: Subscription) -> Result<()> {
        if self.find(subscription.id).is_some() {
            return Err(CatalogError::duplicate(
                RecordKind::Subscription,
                subscription.id.to_string(),
            ));
        }
        if !people.exists(&subscription.document) {
            return Err(CatalogError::not_found(RecordKind::Person, subscription.document));
        }

        self.elems.try_reserve(1)?;
        tracing::debug!(
            "Added subscription {} for '{}'",
            subscription.id,
            subscription.document
        );
        self.elems.push(subscription);
        Ok(())
    }

    pub fn find(&self, id: u32) -> Option<usize> {
        self.elems.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: u32) -> Option<&Subscription> {
        self.find(id).map(|pos| &self.elems[pos])
    }

    pub fn remove(&mut self, id: u32) -> Result<Subscription> {
        let pos = self
            .find(id)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Subscription, id.to_string()))?;
        Ok(self.elems.remove(pos))
    }

    pub fn by_document<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a Subscription> + 'a {
        self.elems.iter().filter(move |s| s.document == document)
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> + '_ {
        self.elems.iter()
    }

    pub fn clear(&mut self) {
        self.elems.clear();
    }
}
