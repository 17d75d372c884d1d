#[macro_use]
extern crate tracing;

use branch::Branch;
use common::{DbConn, Error};
use models_common::BranchScope;
use user::User;

/// Check whether a user may act on the branch with the given id
///
/// Superusers may act on every branch, other users only on the branch they
/// are assigned to.
#[must_use]
pub fn authorize(user: &User, target_branch_id: i32) -> bool {
	user.is_superuser || user.branch_id == Some(target_branch_id)
}

/// The rows of branch owned data a user may list
#[must_use]
pub fn scope_for(user: &User) -> BranchScope {
	if user.is_superuser {
		return BranchScope::All;
	}

	match user.branch_id {
		Some(b_id) => BranchScope::Branch(b_id),
		None => BranchScope::Unassigned,
	}
}

/// Fail with [`Error::Forbidden`] if the user may not act on a branch
#[instrument(skip_all, fields(user = user.id, branch = branch.id))]
pub fn check_branch_access(user: &User, branch: &Branch) -> Result<(), Error> {
	if authorize(user, branch.id) {
		return Ok(());
	}

	warn!("user {} denied access to branch {}", user.id, branch.slug);

	Err(Error::forbidden("Not enough permissions to access this branch"))
}

/// Fail with [`Error::Forbidden`] if the user may not act on records
/// carrying the given branch key
#[instrument(skip(user, conn), fields(user = user.id))]
pub async fn check_branch_key_access(
	user: &User,
	branch_key: &str,
	conn: &DbConn,
) -> Result<(), Error> {
	if user.is_superuser {
		return Ok(());
	}

	let Some(b_id) = user.branch_id else {
		return Err(Error::forbidden("User is not associated with any branch"));
	};

	let branch = Branch::get(b_id, conn).await?;

	if branch.slug == branch_key {
		return Ok(());
	}

	warn!("user {} denied access to branch key {branch_key}", user.id);

	Err(Error::forbidden("Not enough permissions to access this record"))
}

/// The branch a user manages tables for
///
/// Superusers have no single branch to act on and users without an assigned
/// branch have none at all, both are refused.
pub fn managed_branch_id(user: &User) -> Result<i32, Error> {
	if user.is_superuser {
		return Err(Error::forbidden(
			"Superusers must manage tables through a branch user",
		));
	}

	user.branch_id
		.ok_or_else(|| Error::forbidden("User is not associated with any branch"))
}
