pub mod config;
pub mod datasource;
pub mod logging;
pub mod schema;
pub mod version;
