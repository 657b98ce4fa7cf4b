//! Identity and token service.
//!
//! Registration stores a bcrypt hash per user; login verifies against
//! that hash and exchanges the credentials for a signed HS256 JWT.
//! Verification fails closed: malformed, tampered, and expired tokens all
//! come back as the same authentication error, never as partially
//! trusted claims.

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{CatalogStore, CreateUser, StoreError, UserRecord};
use crate::error::CatalogError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id (subject).
    pub sub: Uuid,
    pub username: String,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

/// Caller identity resolved from a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret, process-wide, supplied at startup.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub token_lifetime: i64,
    /// Bcrypt cost factor.
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "libris-dev-secret".to_string(),
            token_lifetime: 3600,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

pub struct AuthService {
    store: Arc<dyn CatalogStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn CatalogStore>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Create a user. Duplicate usernames surface as a persistence error
    /// carrying the offending name.
    pub async fn register(
        &self,
        username: &str,
        favorite_genre: &str,
        password: &str,
    ) -> Result<UserRecord, CatalogError> {
        let password_hash = hash(password, self.config.bcrypt_cost)
            .map_err(|e| CatalogError::Internal(format!("password hashing failed: {e}")))?;

        match self
            .store
            .insert_user(CreateUser {
                username: username.to_string(),
                favorite_genre: favorite_genre.to_string(),
                password_hash,
            })
            .await
        {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, "user registered");
                Ok(user)
            }
            Err(e @ StoreError::UniqueViolation { .. }) => Err(CatalogError::Persistence {
                what: "creating the user",
                input: username.to_string(),
                source: e,
            }),
            Err(other) => Err(other.into()),
        }
    }

    /// Exchange credentials for a bearer token. Unknown username and bad
    /// password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, CatalogError> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            warn!(username, "login failed: unknown user");
            return Err(CatalogError::Authentication("wrong credentials".to_string()));
        };

        let password_ok = verify(password, &user.password_hash)
            .map_err(|e| CatalogError::Internal(format!("password verification failed: {e}")))?;
        if !password_ok {
            warn!(username, "login failed: bad password");
            return Err(CatalogError::Authentication("wrong credentials".to_string()));
        }

        info!(user_id = %user.id, username = %user.username, "user logged in");
        self.issue_token(&user)
    }

    pub fn issue_token(&self, user: &UserRecord) -> Result<String, CatalogError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.token_lifetime)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| CatalogError::Internal(format!("token signing failed: {e}")))
    }

    /// Resolve a bearer token to a caller identity. Fails closed.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, CatalogError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| CatalogError::Authentication(format!("invalid token: {e}")))?;

        Ok(AuthUser {
            user_id: data.claims.sub,
            username: data.claims.username,
        })
    }

    /// The stored record behind a verified caller, if it still exists.
    pub async fn current_user(&self, caller: &AuthUser) -> Result<Option<UserRecord>, CatalogError> {
        Ok(self.store.get_user(caller.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::db::MemoryStore;

    fn service() -> AuthService {
        service_with_lifetime(3600)
    }

    fn service_with_lifetime(token_lifetime: i64) -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_lifetime,
                // Minimum cost keeps the tests fast.
                bcrypt_cost: 4,
            },
        )
    }

    #[tokio::test]
    async fn login_returns_a_verifiable_token() {
        let auth = service();
        let user = auth.register("reader", "refactoring", "hunter22").await.unwrap();

        let token = auth.login("reader", "hunter22").await.unwrap();
        let caller = auth.verify_token(&token).unwrap();
        assert_eq!(caller.user_id, user.id);
        assert_eq!(caller.username, "reader");
    }

    #[tokio::test]
    async fn wrong_password_is_an_authentication_error() {
        let auth = service();
        auth.register("reader", "refactoring", "hunter22").await.unwrap();

        let err = auth.login("reader", "not-the-password").await.unwrap_err();
        assert_matches!(err, CatalogError::Authentication(_));
    }

    #[tokio::test]
    async fn unknown_user_is_an_authentication_error() {
        let auth = service();
        let err = auth.login("nobody", "hunter22").await.unwrap_err();
        assert_matches!(err, CatalogError::Authentication(_));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_persistence_error() {
        let auth = service();
        auth.register("reader", "refactoring", "hunter22").await.unwrap();

        let err = auth.register("reader", "crime", "other").await.unwrap_err();
        assert_matches!(err, CatalogError::Persistence { input, .. } if input == "reader");
    }

    #[tokio::test]
    async fn tampered_token_fails_closed() {
        let auth = service();
        let user = auth.register("reader", "refactoring", "hunter22").await.unwrap();
        let token = auth.issue_token(&user).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert_matches!(
            auth.verify_token(&tampered),
            Err(CatalogError::Authentication(_))
        );
        assert_matches!(
            auth.verify_token("not-a-token"),
            Err(CatalogError::Authentication(_))
        );
    }

    #[tokio::test]
    async fn expired_token_fails_closed() {
        let auth = service_with_lifetime(-120);
        let user = auth.register("reader", "refactoring", "hunter22").await.unwrap();
        let token = auth.issue_token(&user).unwrap();

        assert_matches!(
            auth.verify_token(&token),
            Err(CatalogError::Authentication(_))
        );
    }
}
