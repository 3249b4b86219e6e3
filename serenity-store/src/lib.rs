pub mod api_client;
pub mod app_config;
pub mod session_file;

pub use api_client::ApiClient;
pub use app_config::{CatalogSource, Config};
pub use session_file::FileSessionPersistence;
