use crate::error::AppError;
use tokio::task;

/// bcrypt with a fixed work factor. Every digest carries its own random salt.
///
/// Hashing and verification run on the blocking thread pool.
#[derive(Clone, Copy, Debug)]
pub struct Bcrypt {
    cost: u32,
}

impl Bcrypt {
    pub fn new(cost: u32) -> Self {
        Bcrypt { cost }
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        Ok(task::spawn_blocking(move || ::bcrypt::hash(plaintext, cost)).await??)
    }

    /// False on mismatch and on digests that are not valid bcrypt strings.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, AppError> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        let checked = task::spawn_blocking(move || ::bcrypt::verify(plaintext, &digest)).await?;
        match checked {
            Ok(ok) => Ok(ok),
            Err(e) => {
                tracing::debug!(error = %e, "unusable password digest");
                Ok(false)
            }
        }
    }
}
