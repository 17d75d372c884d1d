use axum::Json;
use axum::extract::{Path, State};
use branch::Branch;
use common::{DbPool, Error};
use table::{Table, resolve_links};

use crate::schemas::view::CustomerViewResponse;

/// Resolve the links shown to a customer who scanned a table's QR code
#[instrument(skip(pool))]
pub(crate) async fn get_customer_view(
	State(pool): State<DbPool>,
	Path((slug, table_number)): Path<(String, String)>,
) -> Result<Json<CustomerViewResponse>, Error> {
	let table_number = parse_table_number(&table_number)?;

	let conn = pool.get().await?;

	let branch = Branch::get_by_slug(slug, &conn).await?;
	let table =
		Table::get_by_number_and_branch(table_number, branch.id, &conn).await?;

	let response = CustomerViewResponse {
		ordered_links:           resolve_links(&branch, &table),
		display_whatsapp_number: branch.display_whatsapp_number,
	};

	Ok(Json(response))
}

/// Parse the table number path segment, only positive integers are accepted
fn parse_table_number(segment: &str) -> Result<i32, Error> {
	match segment.parse::<i32>() {
		Ok(n) if n > 0 => Ok(n),
		_ => {
			Err(Error::ValidationError(
				"table number must be an integer greater than 0".to_string(),
			))
		},
	}
}
