use axum::Json;
use axum::extract::{Path, Query, State};
use branch::{Branch, BranchRef, NewBranch};
use common::{DbPool, Error};
use permissions::{check_branch_access, scope_for};
use validator::Validate;

use crate::schemas::branch::{CreateBranchRequest, UpdateBranchRequest};
use crate::schemas::pagination::PaginationOptions;
use crate::{AdminSession, Session};

#[instrument(skip(pool, session))]
pub(crate) async fn get_branches(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<Json<Vec<Branch>>, Error> {
	let conn = pool.get().await?;

	let branches =
		Branch::list(scope_for(&session.user), p_opts.into(), &conn).await?;

	Ok(Json(branches))
}

#[instrument(skip(pool, session))]
pub(crate) async fn get_branch(
	State(pool): State<DbPool>,
	session: Session,
	Path(id_or_slug): Path<String>,
) -> Result<Json<Branch>, Error> {
	let conn = pool.get().await?;

	let branch = Branch::get_by_ref(BranchRef::from(id_or_slug), &conn).await?;

	check_branch_access(&session.user, &branch)?;

	Ok(Json(branch))
}

#[instrument(skip(pool, _session))]
pub(crate) async fn create_branch(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Json(request): Json<CreateBranchRequest>,
) -> Result<Json<Branch>, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let branch = NewBranch::from(request).insert(&conn).await?;

	Ok(Json(branch))
}

#[instrument(skip(pool, session))]
pub(crate) async fn update_branch(
	State(pool): State<DbPool>,
	session: Session,
	Path(id_or_slug): Path<String>,
	Json(request): Json<UpdateBranchRequest>,
) -> Result<Json<Branch>, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let branch = Branch::get_by_ref(BranchRef::from(id_or_slug), &conn).await?;

	check_branch_access(&session.user, &branch)?;

	let changes = request.into_update(&branch.slug)?;
	let branch = changes.apply_to(branch.id, &conn).await?;

	Ok(Json(branch))
}
