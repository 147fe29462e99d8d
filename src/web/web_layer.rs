// Web layer - the inbound webhook adapter.

#[path = "routes.rs"]
pub mod routes;

pub use routes::{create_router, AppState};
