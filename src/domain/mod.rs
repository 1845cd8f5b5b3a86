pub mod book;
pub mod library;

pub use book::{Book, NO_AUTHOR_PLACEHOLDER, SavedBook, UserProfile};
pub use library::{BookIdRepository, is_saved};
