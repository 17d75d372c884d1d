use axum::Json;
use axum::extract::State;
use common::{DbPool, Error};
use user::NewUser;
use validator::Validate;

use crate::schemas::user::{SignupRequest, UserResponse};

#[instrument(skip_all)]
pub(crate) async fn signup(
	State(pool): State<DbPool>,
	Json(request): Json<SignupRequest>,
) -> Result<Json<UserResponse>, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let user = NewUser::from(request).insert(&conn).await?;

	Ok(Json(user.into()))
}
