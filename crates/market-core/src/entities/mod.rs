//! Domain entities - core business objects

mod principal;

pub use principal::{NewPrincipal, Principal, RefreshTokenRecord};
