//! In-process token repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use serde_json::json;

use crate::domain::entities::OwnerId;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

/// Token repository backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<Vec<ApiToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn tokens(&self) -> MutexGuard<'_, Vec<ApiToken>> {
        self.tokens.lock()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens()
            .iter()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens();
        if let Some(token) = tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        owner_id: OwnerId,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens();

        if tokens
            .iter()
            .any(|t| t.name == name || t.token_hash == token_hash)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "api_tokens" }),
            ));
        }

        let token = ApiToken {
            id: tokens.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            name: name.to_string(),
            owner_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let mut tokens = self.tokens().clone();
        tokens.reverse();
        Ok(tokens)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tokens().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tokens().iter().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens();
        let token = tokens
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("Token not found", json!({ "id": id })))?;

        token.revoked_at.get_or_insert_with(Utc::now);
        Ok(())
    }
}
