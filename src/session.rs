//! Extractors for the user behind an authorized request

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use common::{Error, InternalServerError, LoginError, TokenError};
use user::User;

use crate::{AppState, UserId};

/// The active user making an authorized request
///
/// Only available on routes behind an [`AuthLayer`](crate::middleware::AuthLayer)
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.user.username);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub user: User,
}

/// An active superuser making an authorized request
#[derive(Clone, Debug)]
pub struct AdminSession {
	pub user: User,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(&user_id) = parts.extensions.get::<UserId>() else {
			return Err(InternalServerError::UserWithoutAuthError.into());
		};

		let conn = state.database_pool.get().await?;

		let Some(user) = User::get(*user_id, &conn).await? else {
			warn!("valid token for unknown user {user_id}");

			return Err(TokenError::UnknownUser.into());
		};

		if !user.is_active {
			return Err(LoginError::InactiveUser.into());
		}

		Ok(Self { user })
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		if !session.user.is_superuser {
			debug!("user {} is not a superuser", session.user.id);

			return Err(Error::forbidden(
				"The user doesn't have enough privileges",
			));
		}

		Ok(Self { user: session.user })
	}
}
