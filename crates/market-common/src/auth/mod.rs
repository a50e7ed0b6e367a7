//! Authentication primitives: signing key, token codec, password hashing

mod jwt;
mod password;
mod signing_key;

pub use jwt::{Claims, IssuedToken, TokenCodec, TokenPair, TokenSubject, TokenType};
pub use password::PasswordService;
pub use signing_key::SigningKey;
