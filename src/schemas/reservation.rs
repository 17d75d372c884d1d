use chrono::{NaiveDate, NaiveTime};
use db::ReservationStatus;
use reservation::NewReservation;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct CreateReservationRequest {
	#[validate(length(min = 1, max = 128, code = "name-length"))]
	pub name:             String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:            String,
	#[validate(length(min = 1, max = 32, code = "phone-length"))]
	pub phone:            String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	#[validate(range(
		min = 1,
		message = "guest count must be at least 1",
		code = "guest-count-range"
	))]
	pub guest_count:      i32,
	#[validate(length(min = 1, code = "branch-key-length"))]
	pub branch_key:       String,
	pub message:          Option<String>,
	#[serde(default)]
	pub consent:          bool,
}

impl From<CreateReservationRequest> for NewReservation {
	fn from(value: CreateReservationRequest) -> Self {
		Self {
			name:             value.name,
			email:            value.email,
			phone:            value.phone,
			reservation_date: value.reservation_date,
			reservation_time: value.reservation_time,
			guest_count:      value.guest_count,
			branch_key:       value.branch_key,
			message:          value.message,
			consent:          value.consent,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct UpdateReservationStatusRequest {
	pub status: ReservationStatus,
}
