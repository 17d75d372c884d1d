#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::branch;
use diesel::pg::Pg;
use diesel::prelude::*;
use models_common::{BranchScope, PaginationConfig};
use serde::{Deserialize, Serialize};

mod link_map;

pub use link_map::LinkMap;

/// A reference to a branch given by a caller, either its numeric id or its
/// slug
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum BranchRef {
	ById(i32),
	BySlug(String),
}

impl From<&str> for BranchRef {
	fn from(value: &str) -> Self {
		match value.parse::<i32>() {
			Ok(id) => Self::ById(id),
			Err(_) => Self::BySlug(value.to_string()),
		}
	}
}

impl From<String> for BranchRef {
	fn from(value: String) -> Self {
		match value.parse::<i32>() {
			Ok(id) => Self::ById(id),
			Err(_) => Self::BySlug(value),
		}
	}
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = branch)]
#[diesel(check_for_backend(Pg))]
pub struct Branch {
	pub id:                      i32,
	pub slug:                    String,
	pub name:                    String,
	pub display_whatsapp_number: Option<String>,
	pub default_links:           LinkMap,
	pub link_order:              Vec<String>,
	pub created_at:              NaiveDateTime,
	pub updated_at:              NaiveDateTime,
}

impl Branch {
	/// Get a [`Branch`] by its id
	#[instrument(skip(conn))]
	pub async fn get(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let branch = conn
			.interact(move |conn| {
				use self::branch::dsl::*;

				branch
					.find(b_id)
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Branch not found"))?;

		Ok(branch)
	}

	/// Get a [`Branch`] by its slug
	#[instrument(skip(conn))]
	pub async fn get_by_slug(
		b_slug: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let branch = conn
			.interact(move |conn| {
				use self::branch::dsl::*;

				branch
					.filter(slug.eq(b_slug))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Branch not found"))?;

		Ok(branch)
	}

	/// Get a [`Branch`] by whichever identifier the caller gave
	#[instrument(skip(conn))]
	pub async fn get_by_ref(
		b_ref: BranchRef,
		conn: &DbConn,
	) -> Result<Self, Error> {
		match b_ref {
			BranchRef::ById(b_id) => Self::get(b_id, conn).await,
			BranchRef::BySlug(b_slug) => Self::get_by_slug(b_slug, conn).await,
		}
	}

	/// Check whether a branch with the given slug exists
	#[instrument(skip(conn))]
	pub async fn slug_exists(
		b_slug: String,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let found = conn
			.interact(move |conn| {
				use self::branch::dsl::*;

				diesel::select(diesel::dsl::exists(
					branch.filter(slug.eq(b_slug)),
				))
				.get_result(conn)
			})
			.await??;

		Ok(found)
	}

	/// List the branches visible in the given scope, ordered by name
	#[instrument(skip(conn))]
	pub async fn list(
		scope: BranchScope,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		if scope.is_empty() {
			return Ok(vec![]);
		}

		let branches = conn
			.interact(move |conn| {
				use self::branch::dsl::*;

				let mut query = branch.select(Self::as_select()).into_boxed();

				if let Some(b_id) = scope.branch_id() {
					query = query.filter(id.eq(b_id));
				}

				query
					.order(name.asc())
					.offset(p_cfg.offset)
					.limit(p_cfg.limit)
					.get_results(conn)
			})
			.await??;

		Ok(branches)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = branch)]
#[diesel(check_for_backend(Pg))]
pub struct NewBranch {
	pub slug:                    String,
	pub name:                    String,
	pub display_whatsapp_number: Option<String>,
	pub default_links:           LinkMap,
	pub link_order:              Vec<String>,
}

impl NewBranch {
	/// Insert this [`NewBranch`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Branch, Error> {
		let branch = conn
			.interact(|conn| {
				use self::branch::dsl::*;

				diesel::insert_into(branch)
					.values(self)
					.returning(Branch::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created branch {} ({})", branch.slug, branch.id);

		Ok(branch)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = branch)]
pub struct BranchUpdate {
	pub name:                    Option<String>,
	pub display_whatsapp_number: Option<Option<String>>,
	pub default_links:           Option<LinkMap>,
	pub link_order:              Option<Vec<String>>,
}

impl BranchUpdate {
	/// Apply these changes to the [`Branch`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Branch, Error> {
		let now = Utc::now().naive_utc();

		let branch = conn
			.interact(move |conn| {
				use self::branch::dsl::*;

				diesel::update(branch.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(Branch::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated branch {} ({})", branch.slug, branch.id);

		Ok(branch)
	}
}
