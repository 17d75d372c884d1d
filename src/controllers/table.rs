use axum::Json;
use axum::extract::{Path, Query, State};
use branch::Branch;
use common::{DbPool, Error};
use models_common::BranchScope;
use permissions::{check_branch_access, managed_branch_id, scope_for};
use table::{Table, TableUpdate};
use validator::Validate;

use crate::schemas::pagination::PaginationOptions;
use crate::schemas::table::{
	BulkCreateTablesRequest,
	BulkDeleteTablesRequest,
	BulkDeleteTablesResponse,
	UpdateTableRequest,
};
use crate::{Config, Session};

#[instrument(skip(pool, session))]
pub(crate) async fn get_tables(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<Json<Vec<Table>>, Error> {
	let scope = scope_for(&session.user);

	// Unlike the other listings, a user without a branch is refused here
	if scope == BranchScope::Unassigned {
		return Err(Error::forbidden("User is not associated with any branch"));
	}

	let conn = pool.get().await?;
	let tables = Table::list(scope, p_opts.into(), &conn).await?;

	Ok(Json(tables))
}

#[instrument(skip(pool, config, session))]
pub(crate) async fn create_tables_bulk(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	Json(request): Json<BulkCreateTablesRequest>,
) -> Result<Json<Vec<Table>>, Error> {
	let b_id = managed_branch_id(&session.user)?;

	request.check_range()?;

	let conn = pool.get().await?;
	let branch = Branch::get(b_id, &conn).await?;

	let tables = Table::create_bulk(
		&branch,
		request.start_number,
		request.end_number,
		&config.base_url,
		&conn,
	)
	.await?;

	Ok(Json(tables))
}

#[instrument(skip(pool, session))]
pub(crate) async fn delete_tables_bulk(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<BulkDeleteTablesRequest>,
) -> Result<Json<BulkDeleteTablesResponse>, Error> {
	let b_id = managed_branch_id(&session.user)?;

	let conn = pool.get().await?;
	let deleted = Table::remove_bulk(b_id, request.table_ids, &conn).await?;

	Ok(Json(BulkDeleteTablesResponse::new(deleted)))
}

#[instrument(skip(pool, config, session))]
pub(crate) async fn update_table(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	Path(table_id): Path<i32>,
	Json(request): Json<UpdateTableRequest>,
) -> Result<Json<Table>, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let table = Table::get(table_id, &conn).await?;
	let branch = Branch::get(table.branch_id, &conn).await?;

	check_branch_access(&session.user, &branch)?;

	let table = TableUpdate::from(request)
		.apply_to(table.id, &config.base_url, &conn)
		.await?;

	Ok(Json(table))
}
