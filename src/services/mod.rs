pub mod auth;
pub mod catalog;
pub mod user_store;

pub use auth::AuthService;
pub use catalog::{CatalogProvider, TmdbProvider};
pub use user_store::{HttpUserStore, UserStore};
