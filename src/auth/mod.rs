//! Credential hashing and token issuing.

mod bcrypt;
mod token;

pub use self::bcrypt::Bcrypt;
pub use self::token::{Claims, TokenIssuer};
