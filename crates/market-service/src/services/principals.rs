//! Principal directory
//!
//! Administrative lookups by principal id.

use market_core::PrincipalId;
use tracing::instrument;

use crate::dto::PrincipalResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Principal directory
pub struct PrincipalDirectory<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PrincipalDirectory<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Look up a principal by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: PrincipalId) -> ServiceResult<PrincipalResponse> {
        self.ctx
            .credential_store()
            .find_by_id(id)
            .await?
            .map(|principal| PrincipalResponse::from(&principal))
            .ok_or_else(|| ServiceError::not_found("Principal", id.to_string()))
    }
}
