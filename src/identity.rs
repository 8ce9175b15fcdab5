use crate::error::IdentityError;
use std::path::{Path, PathBuf};

/// File-backed store for the per-installation user id.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stored id, generating and persisting one on first use.
    pub fn load_or_create(&self) -> Result<String, IdentityError> {
        if let Some(existing) = self.load()? {
            return Ok(existing);
        }

        let id = generate_user_id();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, &id).map_err(|e| self.io_error(e))?;
        tracing::info!(user_id = %id, path = %self.path.display(), "Created new user id");
        Ok(id)
    }

    /// Stored id, if one exists. A blank file counts as missing.
    pub fn load(&self) -> Result<Option<String>, IdentityError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                Ok(if id.is_empty() { None } else { Some(id.to_string()) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> IdentityError {
        IdentityError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// `user_<unix millis>_<9 base-36 chars>`
pub fn generate_user_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        suffix.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    format!("user_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}
