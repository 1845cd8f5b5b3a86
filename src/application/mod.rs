pub mod search_session;
pub mod service_container;
pub mod traits;

pub use search_session::{
    RemoveOutcome, SaveOutcome, SearchOutcome, SearchSession, UserFeedback,
};
pub use service_container::{AppConfig, ServiceContainer};
