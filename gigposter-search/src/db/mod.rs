//! Database models and query executors

pub mod models;
pub mod store;

pub use models::*;
pub use store::{PgPosterStore, PosterStore};
