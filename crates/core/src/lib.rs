pub mod config;
pub mod connection;
pub mod error;

pub use config::{ApiConfig, MonitorConfig, StitchConfig};
pub use connection::{Connection, ConnectionRegistry, EnvConnectionRegistry};
pub use error::CoreError;
