//! Business rules on top of the repositories: existence checks, password hashing, login.

mod auth;
mod post;
mod theme;
mod user;
mod validation;

pub use auth::AuthService;
pub use post::PostService;
pub use theme::ThemeService;
pub use user::UserService;
pub use validation::{
    FieldKind, RequestValidator, ValidationRule, LOGIN_RULES, POST_RULES, THEME_RULES, USER_RULES,
};

use crate::error::AppError;

/// `id` of an update body; updates without one are rejected.
fn require_id(id: Option<i64>) -> Result<i64, AppError> {
    id.ok_or_else(|| AppError::BadRequest("id is required".into()))
}
