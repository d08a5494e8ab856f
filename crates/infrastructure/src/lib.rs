//! Infrastructure layer - External integrations

pub mod config;
pub mod connectivity;
pub mod database;
pub mod remote;

pub use config::AppConfig;
pub use connectivity::TcpProbe;
pub use database::SqliteTagStore;
pub use remote::HttpTagStore;
