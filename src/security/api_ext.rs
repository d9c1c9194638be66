use crate::{
    api::Api,
    security::{Credentials, jwt::Claims},
    users::{User, UserSignupError},
};
use anyhow::{Context, anyhow, bail};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::{Duration, OffsetDateTime};
use tracing::debug;

/// How long an issued access token stays valid.
const ACCESS_TOKEN_LIFETIME: Duration = Duration::hours(24);
/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Security controller: account registration and request authentication.
pub struct SecurityApiExt<'a> {
    api: &'a Api,
}

impl<'a> SecurityApiExt<'a> {
    /// Instantiates security API extension.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Registers a user with the specified email and password and returns
    /// the new user together with a fresh access token. Fails with
    /// `UserSignupError::EmailAlreadyRegistered` if the email is taken.
    pub async fn signup(&self, email: &str, password: &str) -> anyhow::Result<(User, String)> {
        Self::validate_email(email)?;
        Self::validate_password(password)?;

        if self
            .api
            .db
            .get_user_by_email(email)
            .await
            .with_context(|| "Failed to check if user already exists.")?
            .is_some()
        {
            return Err(UserSignupError::EmailAlreadyRegistered.into());
        }

        let password_hash = hash_password(password)?;
        let user = self
            .api
            .db
            .insert_user(email, &password_hash)
            .await
            .with_context(|| "Cannot signup user, failed to insert a new user.")?;
        let access_token = self.issue_access_token(&user)?;

        Ok((user, access_token))
    }

    /// Authenticates a user with an email/password pair. Returns `None`
    /// both for an unknown email and for a wrong password, so callers
    /// cannot tell the two apart.
    pub async fn signin(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<(User, String)>> {
        let Some(user) = self.api.db.get_user_by_email(email).await? else {
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash) {
            return Ok(None);
        }

        let access_token = self.issue_access_token(&user)?;
        Ok(Some((user, access_token)))
    }

    /// Authenticates a request with the specified credentials. An invalid
    /// or expired token yields `None`, not an error.
    pub async fn authenticate(&self, credentials: &Credentials) -> anyhow::Result<Option<User>> {
        let token_data = match decode::<Claims>(
            credentials.token(),
            &DecodingKey::from_secret(self.jwt_secret()?),
            &Validation::default(),
        ) {
            Ok(token_data) => token_data,
            Err(err) => {
                debug!("Failed to validate access token: {err:?}");
                return Ok(None);
            }
        };

        self.api.db.get_user(token_data.claims.sub.into()).await
    }

    /// Issues a signed access token for the user.
    pub fn issue_access_token(&self, user: &User) -> anyhow::Result<String> {
        let claims = Claims {
            sub: *user.id,
            exp: OffsetDateTime::now_utc() + ACCESS_TOKEN_LIFETIME,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret()?),
        )
        .with_context(|| "Failed to sign access token.")
    }

    fn jwt_secret(&self) -> anyhow::Result<&[u8]> {
        Ok(self
            .api
            .config
            .security
            .jwt_secret
            .as_deref()
            .with_context(|| "JWT secret is not configured.")?
            .as_bytes())
    }

    fn validate_email(email: &str) -> anyhow::Result<()> {
        if email.is_empty() || !email.contains('@') {
            bail!("Email is not valid.");
        }
        Ok(())
    }

    fn validate_password(password: &str) -> anyhow::Result<()> {
        if password.len() < MIN_PASSWORD_LENGTH {
            bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters.");
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("Failed to hash password: {err}"))?
        .to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

impl Api {
    /// Returns an API to handle authentication.
    pub fn security(&self) -> SecurityApiExt<'_> {
        SecurityApiExt::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};
    use crate::{
        security::{Credentials, jwt::Claims},
        tests::{TEST_JWT_SECRET, mock_api},
        users::UserSignupError,
    };
    use jsonwebtoken::{EncodingKey, Header, encode};
    use sqlx::PgPool;
    use time::{Duration, OffsetDateTime};

    #[test]
    fn password_hashing_round_trip() -> anyhow::Result<()> {
        let hash = hash_password("p@$$w0rd-12")?;
        assert_ne!(hash, "p@$$w0rd-12");
        assert!(verify_password("p@$$w0rd-12", &hash));
        assert!(!verify_password("p@$$w0rd-13", &hash));
        assert!(!verify_password("p@$$w0rd-12", "not-a-phc-string"));

        Ok(())
    }

    #[sqlx::test]
    async fn signup_issues_a_usable_token(pool: PgPool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security = api.security();

        let (user, access_token) = security.signup("dev@lockbox.dev", "p@$$w0rd-12").await?;
        assert_eq!(user.email, "dev@lockbox.dev");
        assert_ne!(user.password_hash, "p@$$w0rd-12");

        let authenticated = security
            .authenticate(&Credentials::Jwt(access_token))
            .await?
            .unwrap();
        assert_eq!(authenticated, user);

        Ok(())
    }

    #[sqlx::test]
    async fn signup_rejects_duplicate_email(pool: PgPool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security = api.security();

        security.signup("dev@lockbox.dev", "p@$$w0rd-12").await?;
        let err = security
            .signup("dev@lockbox.dev", "0th3r-p@$$w0rd")
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast::<UserSignupError>()?,
            UserSignupError::EmailAlreadyRegistered
        );

        Ok(())
    }

    #[sqlx::test]
    async fn signup_validates_input(pool: PgPool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security = api.security();

        let err = security.signup("not-an-email", "p@$$w0rd-12").await.unwrap_err();
        assert!(err.to_string().contains("Email is not valid"));

        let err = security.signup("dev@lockbox.dev", "short").await.unwrap_err();
        assert!(err.to_string().contains("Password must be at least"));

        Ok(())
    }

    #[sqlx::test]
    async fn signin_returns_none_for_bad_credentials(pool: PgPool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security = api.security();

        assert!(
            security
                .signin("dev@lockbox.dev", "p@$$w0rd-12")
                .await?
                .is_none()
        );

        security.signup("dev@lockbox.dev", "p@$$w0rd-12").await?;
        assert!(
            security
                .signin("dev@lockbox.dev", "wrong-p@$$w0rd")
                .await?
                .is_none()
        );

        let (user, _) = security
            .signin("dev@lockbox.dev", "p@$$w0rd-12")
            .await?
            .unwrap();
        assert_eq!(user.email, "dev@lockbox.dev");

        Ok(())
    }

    #[sqlx::test]
    async fn authenticate_rejects_garbage_and_expired_tokens(pool: PgPool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let security = api.security();

        let (user, _) = security.signup("dev@lockbox.dev", "p@$$w0rd-12").await?;

        assert!(
            security
                .authenticate(&Credentials::Jwt("garbage".to_string()))
                .await?
                .is_none()
        );

        let expired = encode(
            &Header::default(),
            &Claims {
                sub: *user.id,
                exp: OffsetDateTime::now_utc() - Duration::hours(1),
            },
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )?;
        assert!(
            security
                .authenticate(&Credentials::Jwt(expired))
                .await?
                .is_none()
        );

        Ok(())
    }
}
