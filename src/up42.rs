mod credentials;
mod provider;
pub use credentials::Credentials;
pub use provider::Provider;
