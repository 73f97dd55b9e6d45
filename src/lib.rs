//! tankcycle - track the nitrogen cycle of a new aquarium
//!
//! Water readings and setup tasks are kept in a [`store::TankStore`] that
//! writes through to a key/value backend ([`db::SqliteStore`] on disk,
//! [`kv::MemoryStore`] in memory). [`phase`] works out where the cycle stands
//! against the fixed [`timeline`], and [`views`] builds the filtered and
//! sorted lists a front end shows.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod kv;
pub mod models;
pub mod phase;
pub mod store;
pub mod timeline;
pub mod views;

pub use error::{StorageError, StoreError};
pub use models::{Category, NewTask, Phase, Priority, Task, WaterReading};
pub use store::TankStore;
