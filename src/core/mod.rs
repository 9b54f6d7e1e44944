pub mod errors;
pub mod models;
pub mod time;

pub use errors::WaniKaniError;
pub use models::{ Assignment, Collection, LevelProgression, Resource, SubjectType, User };
