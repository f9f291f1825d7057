//! In-memory user-account service.
//!
//! Serves the same REST shape the favorites client talks to, so the client can
//! run against a local store during development and in tests.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
