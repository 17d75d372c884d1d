#[macro_use]
extern crate tracing;

use std::collections::HashSet;

use branch::{Branch, LinkMap};
use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{branch as branch_table, managed_table};
use diesel::pg::Pg;
use diesel::prelude::*;
use models_common::{BranchScope, PaginationConfig};
use serde::{Deserialize, Serialize};

mod links;

pub use links::{LinkItem, display_for, resolve, resolve_links};

/// Maximum number of tables a single bulk request may span
pub const MAX_BULK_TABLES: i64 = 10_000;

/// Rows per insert statement, keeps bulk inserts well below the bind
/// parameter limit of Postgres
const INSERT_CHUNK_SIZE: usize = 1_000;

/// Build the canonical QR link of a table
///
/// A trailing slash on `base_url` is ignored.
#[must_use]
pub fn canonical_link(base_url: &str, slug: &str, table_number: i32) -> String {
	format!(
		"{}/customer/branch/{slug}/table/{table_number}",
		base_url.trim_end_matches('/'),
	)
}

/// The link encoded in a table's QR code, an explicit override wins over the
/// generated canonical link
#[must_use]
pub fn qr_link(
	base_url: &str,
	slug: &str,
	table_number: i32,
	override_link: Option<&str>,
) -> String {
	match override_link {
		Some(link) => link.to_string(),
		None => canonical_link(base_url, slug, table_number),
	}
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = managed_table)]
#[diesel(check_for_backend(Pg))]
pub struct Table {
	pub id:                    i32,
	pub table_number:          i32,
	pub branch_id:             i32,
	pub link:                  String,
	pub override_main_qr_link: Option<String>,
	pub overridden_links:      Option<LinkMap>,
	pub created_at:            NaiveDateTime,
	pub updated_at:            NaiveDateTime,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = managed_table)]
struct NewTable {
	table_number: i32,
	branch_id:    i32,
	link:         String,
}

impl Table {
	/// Get a [`Table`] given its id
	#[instrument(skip(conn))]
	pub async fn get(t_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let table = conn
			.interact(move |conn| {
				use self::managed_table::dsl::*;

				managed_table
					.find(t_id)
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Table not found"))?;

		Ok(table)
	}

	/// Get the [`Table`] with the given number in a branch
	#[instrument(skip(conn))]
	pub async fn get_by_number_and_branch(
		number: i32,
		b_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let table = conn
			.interact(move |conn| {
				use self::managed_table::dsl::*;

				managed_table
					.filter(table_number.eq(number))
					.filter(branch_id.eq(b_id))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Table not found"))?;

		Ok(table)
	}

	/// List the tables visible in the given scope, ordered by table number
	#[instrument(skip(conn))]
	pub async fn list(
		scope: BranchScope,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		if scope.is_empty() {
			return Ok(vec![]);
		}

		let tables = conn
			.interact(move |conn| {
				use self::managed_table::dsl::*;

				let mut query =
					managed_table.select(Self::as_select()).into_boxed();

				if let Some(b_id) = scope.branch_id() {
					query = query.filter(branch_id.eq(b_id));
				}

				query
					.order((table_number.asc(), id.asc()))
					.offset(p_cfg.offset)
					.limit(p_cfg.limit)
					.get_results(conn)
			})
			.await??;

		Ok(tables)
	}

	/// Create one table per number in `start..=end` for a branch, skipping
	/// numbers the branch already has
	///
	/// Returns the newly created tables only. Callers bound the range by
	/// [`MAX_BULK_TABLES`].
	#[instrument(skip(branch, base_url, conn), fields(branch = %branch.slug))]
	pub async fn create_bulk(
		branch: &Branch,
		start: i32,
		end: i32,
		base_url: &str,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let b_id = branch.id;
		let slug = branch.slug.clone();
		let base_url = base_url.to_string();

		let tables = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					use self::managed_table::dsl::*;

					let existing: HashSet<i32> = managed_table
						.filter(branch_id.eq(b_id))
						.filter(table_number.between(start, end))
						.select(table_number)
						.get_results(conn)?
						.into_iter()
						.collect();

					let new_tables: Vec<NewTable> = (start..=end)
						.filter(|n| !existing.contains(n))
						.map(|n| {
							NewTable {
								table_number: n,
								branch_id:    b_id,
								link:         canonical_link(&base_url, &slug, n),
							}
						})
						.collect();

					if new_tables.is_empty() {
						return Ok(vec![]);
					}

					let mut created = Vec::with_capacity(new_tables.len());

					for chunk in new_tables.chunks(INSERT_CHUNK_SIZE) {
						let inserted: Vec<Self> =
							diesel::insert_into(managed_table)
								.values(chunk)
								.returning(Self::as_returning())
								.get_results(conn)?;

						created.extend(inserted);
					}

					Ok(created)
				})
			})
			.await??;

		info!("created {} tables for branch {}", tables.len(), branch.slug);

		Ok(tables)
	}

	/// Delete the tables with the given ids that belong to a branch, ids of
	/// other branches are ignored
	///
	/// Returns the number of deleted tables.
	#[instrument(skip(conn))]
	pub async fn remove_bulk(
		b_id: i32,
		t_ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<usize, Error> {
		let deleted = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					use self::managed_table::dsl::*;

					let count = diesel::delete(
						managed_table
							.filter(branch_id.eq(b_id))
							.filter(id.eq_any(t_ids)),
					)
					.execute(conn)?;

					Ok(count)
				})
			})
			.await??;

		info!("deleted {deleted} tables for branch {b_id}");

		Ok(deleted)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = managed_table)]
pub struct TableUpdate {
	pub table_number:          Option<i32>,
	pub override_main_qr_link: Option<Option<String>>,
	pub overridden_links:      Option<Option<LinkMap>>,
}

impl TableUpdate {
	/// Apply these changes to the [`Table`] with the given id and regenerate
	/// its QR link
	#[instrument(skip(base_url, conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		base_url: &str,
		conn: &DbConn,
	) -> Result<Table, Error> {
		let base_url = base_url.to_string();
		let now = Utc::now().naive_utc();

		let table = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					use self::managed_table::dsl::*;

					let updated: Table =
						diesel::update(managed_table.find(target_id))
							.set((self, updated_at.eq(now)))
							.returning(Table::as_returning())
							.get_result(conn)?;

					let slug: String = branch_table::table
						.find(updated.branch_id)
						.select(branch_table::slug)
						.get_result(conn)?;

					let new_link = qr_link(
						&base_url,
						&slug,
						updated.table_number,
						updated.override_main_qr_link.as_deref(),
					);

					let table = diesel::update(managed_table.find(target_id))
						.set(link.eq(new_link))
						.returning(Table::as_returning())
						.get_result(conn)?;

					Ok(table)
				})
			})
			.await??;

		info!("updated table {} ({})", table.table_number, table.id);

		Ok(table)
	}
}
