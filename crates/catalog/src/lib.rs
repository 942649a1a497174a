//! Catalog domain: actors and movies managed by the casting agency.
//!
//! Business rules only (validation, identity assignment); no HTTP and no
//! authorization.

pub mod actor;
pub mod movie;
pub mod store;

pub use actor::{Actor, NewActor};
pub use movie::{Movie, MoviePatch, NewMovie};
pub use store::InMemoryCatalog;
