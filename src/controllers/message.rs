use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use common::{DbPool, Error};
use message::{Message, NewMessage};
use permissions::scope_for;
use validator::Validate;

use crate::Session;
use crate::schemas::message::CreateMessageRequest;
use crate::schemas::pagination::PaginationOptions;

#[instrument(skip(pool))]
pub(crate) async fn create_message(
	State(pool): State<DbPool>,
	Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let message = NewMessage::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(message)))
}

#[instrument(skip(pool, session))]
pub(crate) async fn get_messages(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<Json<Vec<Message>>, Error> {
	let conn = pool.get().await?;

	let messages =
		Message::list(scope_for(&session.user), p_opts.into(), &conn).await?;

	Ok(Json(messages))
}
