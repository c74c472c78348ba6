pub mod link;
pub mod models;
pub mod schema;
pub mod store;
pub mod utils;

// Re-export the main codec entry points for easier access
pub use link::{detect_scheme, generate_link, resolve_link, LinkError};
pub use models::{NodeType, NodeValues};
pub use schema::{default_values, schema_for, validate, ValidationError};
