pub mod cookie_jar;
pub mod error;
pub mod identity;

pub use cookie_jar::CookieJar;
pub use error::AuthError;
pub use identity::AuthIdentity;
