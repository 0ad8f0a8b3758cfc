#![forbid(unsafe_code)]

pub mod access;
pub mod accessibility;
pub mod catalog;
pub mod model;
pub mod player;
pub mod time;

pub use access::{AccessError, AccessGuard, AccessPolicy, has_access};
pub use catalog::{AccessFilter, Catalog, CatalogError, CourseFilter};
pub use player::{LessonPlayer, PlaybackState, Progress};
pub use time::Clock;
