// Template context structures for Askama templates, organized by domain.
// All types are re-exported: `use clinicdesk::templates_structs::*`

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::take_flash;
use crate::models::user::User;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, user: &User, app_name: &str) -> Self {
        let username = user.name().to_string();
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            username,
            avatar_initial,
            flash: take_flash(session),
            app_name: app_name.to_string(),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}

mod booking;
mod common;

pub use booking::*;
pub use common::*;
