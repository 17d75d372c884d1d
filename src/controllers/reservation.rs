use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{DbPool, Error};
use permissions::{check_branch_key_access, scope_for};
use reservation::{NewReservation, Reservation};
use validator::Validate;

use crate::Session;
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::reservation::{
	CreateReservationRequest,
	UpdateReservationStatusRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn create_reservation(
	State(pool): State<DbPool>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let reservation = NewReservation::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(reservation)))
}

#[instrument(skip(pool, session))]
pub(crate) async fn get_reservations(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<Json<Vec<Reservation>>, Error> {
	let conn = pool.get().await?;

	let reservations =
		Reservation::list(scope_for(&session.user), p_opts.into(), &conn)
			.await?;

	Ok(Json(reservations))
}

#[instrument(skip(pool, session))]
pub(crate) async fn update_reservation_status(
	State(pool): State<DbPool>,
	session: Session,
	Path(r_id): Path<i32>,
	Json(request): Json<UpdateReservationStatusRequest>,
) -> Result<Json<Reservation>, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::get(r_id, &conn).await?;

	check_branch_key_access(&session.user, &reservation.branch_key, &conn)
		.await?;

	let reservation =
		Reservation::set_status(reservation.id, request.status, &conn).await?;

	Ok(Json(reservation))
}
