//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod principal_id;
mod role;

pub use capabilities::Capabilities;
pub use principal_id::{PrincipalId, PrincipalIdParseError};
pub use role::{Role, RoleParseError};
