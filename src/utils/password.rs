use crate::error::AppResult;
use bcrypt::verify;

/// Check a login password against a stored bcrypt hash. Hashes are written
/// by the managed auth service, never by this dashboard.
pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    Ok(verify(password, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::{DEFAULT_COST, hash};

    #[test]
    fn test_verify_password_against_a_bcrypt_hash() {
        let hashed = hash("Password123", DEFAULT_COST).unwrap();

        assert!(verify_password("Password123", &hashed).unwrap());
        assert!(!verify_password("WrongPassword", &hashed).unwrap());
    }
}
