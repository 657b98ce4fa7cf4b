use crate::services::AuthService;

use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The current authenticated user, or null
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(caller) = ctx.try_auth_user() else {
            return Ok(None);
        };
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        let record = auth.current_user(caller).await.map_err(|e| e.extend())?;
        Ok(record.map(User::from))
    }
}
