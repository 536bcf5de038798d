pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod service;
pub mod session;

pub use error::VitrineError;
pub use router::{VitrineState, vitrine_router};
pub use service::AdminCredentials;
