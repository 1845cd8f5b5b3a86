pub mod google_books;
pub mod graphql;

pub use google_books::GoogleBooksClient;
pub use graphql::GraphqlClient;
