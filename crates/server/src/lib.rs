pub mod binding;
pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

pub use binding::Binding;
pub use startup::{launch, run};
