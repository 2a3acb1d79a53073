//! Service layer.
//! - `items`: the in-memory item resource served by both HTTP bindings.
//! - `seed`: one-shot bootstrap of the blog schema.
//! - Errors are shared via `errors::ServiceError`.

pub mod errors;
pub mod items;
pub mod seed;
