//! Records returned by the API and the write shapes accepted by the services.

pub mod post;
pub mod theme;
pub mod user;

pub use post::{DeleteResult, Post, PostInput, PostWrite, Relations};
pub use theme::{Theme, ThemeInput};
pub use user::{LoginInput, LoginResponse, User, UserInput, UserWrite};

use serde::{Deserialize, Serialize};

/// Reference to another row by id, as sent in request bodies (`"tema": { "id": 1 }`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}
