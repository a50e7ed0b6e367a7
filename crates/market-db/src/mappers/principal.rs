//! Principal entity <-> model mapper

use market_core::entities::Principal;
use market_core::error::DomainError;
use market_core::value_objects::{PrincipalId, Role};

use crate::models::PrincipalModel;

/// Convert a row into a Principal; an unknown role string is a data error
impl TryFrom<PrincipalModel> for Principal {
    type Error = DomainError;

    fn try_from(model: PrincipalModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|_| DomainError::InvalidRole(model.role.clone()))?;

        Ok(Principal {
            id: PrincipalId::new(model.id),
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role,
            refresh_token: model.refresh_token,
            refresh_token_expires_at: model.refresh_token_expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Map an optional row, propagating role decoding failures
pub fn principal_from_row(row: Option<PrincipalModel>) -> Result<Option<Principal>, DomainError> {
    row.map(Principal::try_from).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(role: &str) -> PrincipalModel {
        PrincipalModel {
            id: 9,
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: role.to_string(),
            refresh_token: Some("t1".to_string()),
            refresh_token_expires_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_maps_row() {
        let principal = Principal::try_from(model("ROLE_ADMIN")).unwrap();
        assert_eq!(principal.id, PrincipalId::new(9));
        assert_eq!(principal.role, Role::Admin);
        assert!(principal.holds_refresh_token("t1"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = Principal::try_from(model("ROLE_SELLER")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRole(r) if r == "ROLE_SELLER"));
    }

    #[test]
    fn test_optional_row() {
        assert!(principal_from_row(None).unwrap().is_none());
        assert!(principal_from_row(Some(model("ROLE_USER"))).unwrap().is_some());
    }
}
