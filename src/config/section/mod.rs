//! Configuration section definitions.

mod content;
mod serve;
mod site;

pub use content::ContentConfig;
pub use serve::ServeConfig;
pub use site::SiteSection;
