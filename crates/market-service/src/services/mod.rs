//! Business logic services

pub mod context;
pub mod error;
pub mod principals;
pub mod session;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use principals::PrincipalDirectory;
pub use session::SessionManager;
