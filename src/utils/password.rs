use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// The policy the portal enforces: at least 6 characters with at least one
/// lowercase letter and one digit.
pub fn check_policy(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hashed = hash("log123").unwrap();
        assert!(verify("log123", &hashed).unwrap());
        assert!(!verify("log124", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash("abc123").unwrap(), hash("abc123").unwrap());
    }

    #[test]
    fn policy_accepts_the_documented_minimum() {
        assert!(check_policy("log123").is_ok());
        assert!(check_policy("abc123").is_ok());
    }

    #[test]
    fn policy_rejects_short_or_classless_passwords() {
        assert!(check_policy("ab1").is_err());
        assert!(check_policy("abcdef").is_err());
        assert!(check_policy("123456").is_err());
        assert!(check_policy("ABCDEF1").is_err());
    }
}
