//! The `Item` resource shared by both HTTP bindings.
//!
//! Handlers only ever see `dyn ItemRepository`; the store behind it is owned by
//! the router state rather than living in a global.

pub mod domain;
pub mod repository;
pub mod memory;

pub use domain::{Item, ItemChanges, NewItem};
pub use memory::InMemoryItemStore;
pub use repository::ItemRepository;
