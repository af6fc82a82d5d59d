use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{AuthUserDto, LoginDto, RegisterDto, RegisterResponseDto, TokenDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::CreateUserParam,
        util::{
            jwt::JwtKeys,
            password::{hash_password, verify_password},
        },
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys) -> Self {
        Self { db, jwt }
    }

    /// Creates an account and signs the new user in.
    ///
    /// # Returns
    /// - `Ok(RegisterResponseDto)` - Access token plus the new user's id, email and name
    /// - `Err(AppError::BadRequest)` - Empty email, password or name
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, dto: RegisterDto) -> Result<RegisterResponseDto, AppError> {
        let email = dto.email.trim().to_string();
        if email.is_empty() || dto.password.is_empty() || dto.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "email, password and name are required".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let user = user_repo
            .create(CreateUserParam {
                email,
                name: dto.name,
                password_hash: hash_password(&dto.password)?,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);

        Ok(RegisterResponseDto {
            access_token: self.jwt.issue(user.id, &user.email)?,
            user: AuthUserDto {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        })
    }

    /// Exchanges email and password for an access token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn login(&self, dto: LoginDto) -> Result<TokenDto, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(dto.email.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&dto.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(TokenDto {
            access_token: self.jwt.issue(user.id, &user.email)?,
        })
    }
}
