pub mod auth;
pub mod book_ids;
pub mod config;
pub mod external;

pub use auth::EnvAuthToken;
pub use book_ids::JsonFileBookIdRepo;
