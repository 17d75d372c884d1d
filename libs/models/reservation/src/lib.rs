#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{ReservationStatus, branch, reservation};
use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use models_common::{BranchScope, PaginationConfig};
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct Reservation {
	pub id:               i32,
	pub name:             String,
	pub email:            String,
	pub phone:            String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub guest_count:      i32,
	pub branch_key:       String,
	pub status:           ReservationStatus,
	pub message:          Option<String>,
	pub consent:          bool,
	pub received_at:      NaiveDateTime,
}

impl Reservation {
	/// Get a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn get(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Reservation not found"))?;

		Ok(reservation)
	}

	/// List the reservations visible in the given scope, newest first
	#[instrument(skip(conn))]
	pub async fn list(
		scope: BranchScope,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		if scope.is_empty() {
			return Ok(vec![]);
		}

		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				let mut query =
					reservation.select(Self::as_select()).into_boxed();

				if let Some(b_id) = scope.branch_id() {
					let slugs = branch::table
						.filter(branch::id.eq(b_id))
						.select(branch::slug);

					query = query.filter(branch_key.eq_any(slugs));
				}

				query
					.order((received_at.desc(), id.desc()))
					.offset(p_cfg.offset)
					.limit(p_cfg.limit)
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Set the status of the [`Reservation`] with the given id
	///
	/// Any status may follow any other.
	#[instrument(skip(conn))]
	pub async fn set_status(
		r_id: i32,
		new_status: ReservationStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set(status.eq(new_status))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"reservation {} is now {:?}",
			reservation.id, reservation.status
		);

		Ok(reservation)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub name:             String,
	pub email:            String,
	pub phone:            String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub guest_count:      i32,
	pub branch_key:       String,
	pub message:          Option<String>,
	pub consent:          bool,
}

impl NewReservation {
	/// Insert this [`NewReservation`] as a pending reservation
	///
	/// # Errors
	/// Fails with [`Error::InvalidBranchKey`] if no branch has the given
	/// branch key as its slug, nothing is inserted in that case
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let reservation = conn
			.interact(|conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let known_branch = diesel::select(exists(
						branch::table.filter(branch::slug.eq(&self.branch_key)),
					))
					.get_result::<bool>(conn)?;

					if !known_branch {
						return Err(Error::InvalidBranchKey);
					}

					let reservation = diesel::insert_into(reservation::table)
						.values(self)
						.returning(Reservation::as_returning())
						.get_result(conn)?;

					Ok(reservation)
				})
			})
			.await??;

		info!(
			"received reservation {} for branch {}",
			reservation.id, reservation.branch_key
		);

		Ok(reservation)
	}
}
