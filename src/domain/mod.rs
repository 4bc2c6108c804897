// Domain layer: record types and ports (interfaces).

pub mod film;
pub mod model;
pub mod person;
pub mod ports;
pub mod subscription;

pub use film::Film;
pub use model::{Genre, RecordKind, Runtime};
pub use person::Person;
pub use subscription::Subscription;
