//! Refresh-token sessions.
//!
//! Only the SHA-256 of a refresh token is stored. A session is live while it
//! is neither revoked nor past `expires_at`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::sessions;

/// Input for opening a session at login or registration.
#[derive(Debug, Clone, Copy)]
pub struct NewSession<'a> {
    /// Session owner.
    pub user_id: Uuid,
    /// Company the tokens were issued for.
    pub company_id: Uuid,
    /// Raw refresh token; hashed before it is stored.
    pub refresh_token: &'a str,
    /// Refresh token expiry.
    pub expires_at: DateTime<Utc>,
    /// Client `User-Agent`, if sent.
    pub user_agent: Option<&'a str>,
    /// Client address, if known.
    pub ip_address: Option<&'a str>,
}

/// Session repository.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lowercase hex SHA-256 of a refresh token.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }

    /// Opens a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, new: NewSession<'_>) -> Result<sessions::Model, DbErr> {
        let now = Utc::now().into();

        let session = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new.user_id),
            company_id: Set(new.company_id),
            refresh_token_hash: Set(Self::hash_token(new.refresh_token)),
            user_agent: Set(new.user_agent.map(String::from)),
            ip_address: Set(new.ip_address.map(String::from)),
            expires_at: Set(new.expires_at.into()),
            revoked_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(session_id = %session.id, user_id = %new.user_id, "session opened");
        Ok(session)
    }

    /// Finds the live session owning a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<sessions::Model>, DbErr> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::RefreshTokenHash.eq(Self::hash_token(refresh_token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .one(&self.db)
            .await?;

        // Expiry is compared here; SQLite stores timestamps as text.
        let now = Utc::now();
        Ok(session.filter(|s| s.expires_at > now))
    }

    /// Revokes the live session owning a refresh token.
    ///
    /// Returns `false` when no live session matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_by_token(&self, refresh_token: &str) -> Result<bool, DbErr> {
        let Some(session) = self.find_by_token(refresh_token).await? else {
            return Ok(false);
        };

        let now = Utc::now().into();
        let mut active = session.into_active_model();
        active.revoked_at = Set(Some(now));
        active.updated_at = Set(now);
        let revoked = active.update(&self.db).await?;

        tracing::debug!(session_id = %revoked.id, "session revoked");
        Ok(true)
    }
}
