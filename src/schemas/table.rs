use branch::LinkMap;
use common::Error;
use serde::{Deserialize, Serialize};
use table::{MAX_BULK_TABLES, TableUpdate};
use validator_derive::Validate;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct BulkCreateTablesRequest {
	pub start_number: i32,
	pub end_number:   i32,
}

impl BulkCreateTablesRequest {
	/// Check that this request describes a non empty range of positive
	/// table numbers spanning at most [`MAX_BULK_TABLES`] tables
	pub fn check_range(&self) -> Result<(), Error> {
		if self.start_number <= 0 || self.end_number < self.start_number {
			return Err(Error::ValidationError(
				"invalid table number range, start must be positive and end \
				 must not be less than start"
					.to_string(),
			));
		}

		let span =
			i64::from(self.end_number) - i64::from(self.start_number) + 1;

		if span > MAX_BULK_TABLES {
			return Err(Error::ValidationError(format!(
				"at most {MAX_BULK_TABLES} tables can be created at once"
			)));
		}

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BulkDeleteTablesRequest {
	pub table_ids: Vec<i32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BulkDeleteTablesResponse {
	pub message:       String,
	pub deleted_count: usize,
}

impl BulkDeleteTablesResponse {
	#[must_use]
	pub fn new(deleted_count: usize) -> Self {
		Self {
			message: format!("Successfully deleted {deleted_count} tables."),
			deleted_count,
		}
	}
}

/// Partial table update, explicit `null`s clear the override fields
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateTableRequest {
	#[validate(range(
		min = 1,
		message = "table number must be positive",
		code = "table-number-range"
	))]
	pub table_number:          Option<i32>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "::serde_with::rust::double_option"
	)]
	pub override_main_qr_link: Option<Option<String>>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "::serde_with::rust::double_option"
	)]
	pub overridden_links:      Option<Option<LinkMap>>,
}

impl From<UpdateTableRequest> for TableUpdate {
	fn from(value: UpdateTableRequest) -> Self {
		Self {
			table_number:          value.table_number,
			override_main_qr_link: value.override_main_qr_link,
			overridden_links:      value.overridden_links,
		}
	}
}
