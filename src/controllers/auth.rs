//! Controllers for authorization

use axum::extract::State;
use axum::{Form, Json};
use common::{DbPool, Error, LoginError, TokenError};
use user::User;

use crate::schemas::auth::{LoginForm, RefreshRequest, TokenResponse};
use crate::schemas::user::UserResponse;
use crate::{Session, TokenService, TokenType};

#[instrument(skip_all)]
pub(crate) async fn login(
	State(pool): State<DbPool>,
	State(tokens): State<TokenService>,
	Form(login_data): Form<LoginForm>,
) -> Result<Json<TokenResponse>, Error> {
	let conn = pool.get().await?;

	let Some(user) = User::get_by_identifier(login_data.username, &conn).await?
	else {
		return Err(LoginError::InvalidCredentials.into());
	};

	user.verify_password(&login_data.password)?;

	if !user.is_active {
		return Err(LoginError::InactiveUser.into());
	}

	let access_token = tokens.issue(user.id, TokenType::Access)?;
	let refresh_token = tokens.issue(user.id, TokenType::Refresh)?;

	info!("logged in user {}", user.id);

	Ok(Json(TokenResponse::bearer(access_token, Some(refresh_token))))
}

#[instrument(skip_all)]
pub(crate) async fn refresh(
	State(pool): State<DbPool>,
	State(tokens): State<TokenService>,
	Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, Error> {
	let user_id = tokens.verify(&request.refresh_token, TokenType::Refresh)?;

	let conn = pool.get().await?;

	let user = User::get(user_id, &conn)
		.await?
		.filter(|u| u.is_active)
		.ok_or(TokenError::UnknownUser)?;

	let access_token = tokens.issue(user.id, TokenType::Access)?;

	info!("refreshed access token for user {}", user.id);

	Ok(Json(TokenResponse::bearer(access_token, None)))
}

#[instrument(skip_all)]
pub(crate) async fn get_current_user(session: Session) -> Json<UserResponse> {
	Json(session.user.into())
}
