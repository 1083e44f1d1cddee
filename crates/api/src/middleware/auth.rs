//! # Authentication Module
//!
//! Password hashing for registered users. Passwords are stored as Argon2
//! PHC strings (algorithm, parameters, salt and hash in one value).

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use eyre::Result;

/// Hashes a password with a fresh random salt and default Argon2 parameters.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}
