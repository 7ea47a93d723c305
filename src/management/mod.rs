mod auth;

pub use auth::AuthError;
pub use auth::CredentialProvider;
pub use auth::StaticToken;
pub use auth::TokenManager;
pub use auth::is_expired;
