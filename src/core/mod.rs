//! Core types shared across the pipeline and server.

mod state;
mod url;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use url::UrlPath;
