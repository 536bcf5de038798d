pub mod credentials;
pub mod upload;

pub use credentials::AdminCredentials;
