use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::NaiveDate;
use common::Error;
use validator_derive::Validate;

/// A job application as submitted through the careers form
#[derive(Debug, TryFromMultipart, Validate)]
pub struct CreateApplicationRequest {
	#[validate(length(min = 1, max = 128, code = "name-length"))]
	pub name:                    String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:                   String,
	#[validate(length(min = 1, max = 32, code = "phone-length"))]
	pub phone:                   String,
	/// Formatted as `YYYY-MM-DD`
	pub birthdate:               String,
	#[validate(length(min = 1, code = "branch-key-length"))]
	pub branch_key:              String,
	#[validate(length(min = 1, max = 128, code = "department-length"))]
	pub department:              String,
	#[validate(range(
		min = 0,
		message = "experience years can not be negative",
		code = "experience-years-range"
	))]
	pub experience_years:        i32,
	pub message:                 Option<String>,
	pub privacy_policy_accepted: bool,
	#[form_data(limit = "6MiB")]
	pub cv_file:                 FieldData<Bytes>,
}

impl CreateApplicationRequest {
	/// Parse the submitted birthdate
	pub fn parsed_birthdate(&self) -> Result<NaiveDate, Error> {
		NaiveDate::parse_from_str(&self.birthdate, "%Y-%m-%d").map_err(|_| {
			Error::ValidationError(
				"birthdate must be formatted as YYYY-MM-DD".to_string(),
			)
		})
	}
}
