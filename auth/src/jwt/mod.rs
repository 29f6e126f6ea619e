pub mod claims;
pub mod errors;
pub mod handler;
pub mod key;
pub mod service;

pub use claims::AccessClaims;
pub use claims::AccessKind;
pub use claims::RefreshClaims;
pub use claims::RefreshKind;
pub use claims::ISSUER;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use key::SigningKey;
pub use service::TokenPair;
pub use service::TokenService;
