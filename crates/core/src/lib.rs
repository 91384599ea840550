// QuerySpec Core - Specifications, Compounds & Ports
// NO database dependencies: adapters implement the ports in `port`

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
