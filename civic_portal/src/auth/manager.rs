//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{AccessTokenClaims, LoginRequest, RegisterRequest},
};
use crate::store::{NewUser, Storage, StoreError, User, UserId, UserSettingsPatch};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

/// Authentication manager
///
/// Owns credential validation, Argon2id password hashing with a
/// server-side pepper, and JWT session token issuance.
#[derive(Clone)]
pub struct AuthManager {
    store: Arc<dyn Storage>,
    pepper: String,
    jwt_secret: String,
    token_duration: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `store` - Storage backend
    /// * `pepper` - Server-side pepper for password hashing
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(store: Arc<dyn Storage>, pepper: String, jwt_secret: String) -> Self {
        Self {
            store,
            pepper,
            jwt_secret,
            token_duration: Duration::hours(24),
        }
    }

    /// Override the session token lifetime (used by tests to exercise
    /// expiry without waiting).
    pub fn with_token_duration(mut self, token_duration: Duration) -> Self {
        self.token_duration = token_duration;
        self
    }

    /// Register a new user and issue a session token
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidNationalNumber` - National number format invalid
    /// * `AuthError::WeakPassword` - Password too short
    /// * `AuthError::NationalNumberTaken` - National number already registered
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<(User, String)> {
        self.validate_national_number(&request.national_number)?;
        self.validate_password(&request.password)?;

        // Early check so a taken number fails before the slow hash; the
        // store's own conflict check is what actually guarantees
        // uniqueness when registrations race.
        let existing = self
            .store
            .user_by_national_number(&request.national_number)
            .await?;
        if existing.is_some() {
            return Err(AuthError::NationalNumberTaken);
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = self
            .store
            .create_user(NewUser {
                national_number: request.national_number,
                password_hash,
                full_name: request.full_name,
                phone_number: request.phone_number,
                email: request.email,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AuthError::NationalNumberTaken,
                other => AuthError::Store(other),
            })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Login a user and issue a session token
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown national number or
    ///   wrong password; the two cases are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<(User, String)> {
        let user = self
            .store
            .user_by_national_number(&request.national_number)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.verify_password(&request.password, &user.password_hash)?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Fetch a user by id
    pub async fn get_user(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.store.user_by_id(id).await?)
    }

    /// Apply a settings patch to a user
    pub async fn update_settings(
        &self,
        id: UserId,
        patch: UserSettingsPatch,
    ) -> AuthResult<Option<User>> {
        Ok(self.store.update_user(id, patch).await?)
    }

    /// Verify a session token
    ///
    /// Expiry is checked with zero leeway: a token is invalid the second
    /// its `exp` claim passes.
    ///
    /// # Returns
    ///
    /// * `AuthResult<AccessTokenClaims>` - Decoded claims or error
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    /// Generate a JWT session token for a user
    pub fn issue_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user.id,
            national_number: user.national_number.clone(),
            iat: now.timestamp(),
            exp: (now + self.token_duration).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Hash password with Argon2id + pepper
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Validate national number format: two letters followed by ten digits
    fn validate_national_number(&self, national_number: &str) -> AuthResult<()> {
        let bytes = national_number.as_bytes();
        let valid = bytes.len() == 12
            && bytes[..2].iter().all(u8::is_ascii_alphabetic)
            && bytes[2..].iter().all(u8::is_ascii_digit);

        if !valid {
            return Err(AuthError::InvalidNationalNumber(
                "National number must be 2 letters followed by 10 digits".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate password strength
    fn validate_password(&self, password: &str) -> AuthResult<()> {
        if password.len() < 6 {
            return Err(AuthError::WeakPassword(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        Ok(())
    }
}
