use actix_session::Session;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::{self, User};

const USER_ID_KEY: &str = "user_id";
const EMAIL_KEY: &str = "email";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID_KEY).unwrap_or(None)
}

/// Store the authenticated user, rotating the session id first.
pub fn sign_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID_KEY, user.id)
        .and_then(|_| session.insert(EMAIL_KEY, &user.email))
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn sign_out(session: &Session) {
    session.purge();
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// Resolve the session's user against the database.
/// A session that points at a deleted user is purged and treated as anonymous.
pub async fn current_user(session: &Session, pool: &PgPool) -> Result<Option<User>, AppError> {
    let Some(user_id) = get_user_id(session) else {
        return Ok(None);
    };
    let found = user::find_by_id(pool, user_id).await?;
    if found.is_none() {
        log::warn!("Session refers to missing user {user_id}, signing out");
        sign_out(session);
    }
    Ok(found)
}
