//! Authentication mutations: user registration and login.
//!
//! Neither operation requires an existing authenticated caller.

use tracing::warn;

use super::prelude::*;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Register a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
        password: String,
    ) -> Result<User> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        match auth.register(&username, &favorite_genre, &password).await {
            Ok(user) => Ok(User::from(user)),
            Err(e) => {
                warn!(username = %username, error = %e, "user registration failed");
                Err(e.extend())
            }
        }
    }

    /// Exchange credentials for a bearer token
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Token> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        let value = auth
            .login(&username, &password)
            .await
            .map_err(|e| e.extend())?;
        Ok(Token { value })
    }
}
