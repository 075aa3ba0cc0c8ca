use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// `:id` path segment parsed as a hyphenated UUID, or a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        parse_id(&raw).map(PathId)
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    // uuid also accepts simple/braced/urn forms; only the canonical one is an id here
    if raw.len() != 36 {
        return Err(AppError::validation("id must be a valid UUID"));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::validation("id must be a valid UUID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_non_canonical_and_garbage() {
        let id = Uuid::new_v4();
        for raw in [
            "123".to_string(),
            "list".to_string(),
            id.simple().to_string(),
            format!("{{{id}}}"),
            format!("{id}x"),
        ] {
            assert!(
                matches!(parse_id(&raw), Err(AppError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }
}
