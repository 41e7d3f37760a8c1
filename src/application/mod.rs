// Application layer - use cases and orchestration over the storage layer.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
