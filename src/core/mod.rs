pub mod catalog;
pub mod engine;
pub mod export;
pub mod film_list;
pub mod free_index;
pub mod people;
pub mod store;
pub mod subscriptions;

pub use crate::domain::ports::{ConfigProvider, PersonDirectory, Storage};
pub use crate::utils::error::Result;
pub use catalog::Catalog;
pub use film_list::{FilmHandle, FilmList};
pub use free_index::FreeFilmIndex;
pub use store::{DataStore, LoadSummary};
