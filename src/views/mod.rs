// src/views/mod.rs
// DOCUMENTATION: Page-level helpers shared by handlers
// PURPOSE: URL filter mapping and list loading state

pub mod list_state;
pub mod query;

pub use list_state::InFlight;
pub use query::{profiles, to_api_query, ListParams};
