#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime};
use common::{DbConn, Error};
use db::{application, branch};
use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use models_common::{BranchScope, PaginationConfig};
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = application)]
#[diesel(check_for_backend(Pg))]
pub struct Application {
	pub id:                      i32,
	pub name:                    String,
	pub email:                   String,
	pub phone:                   String,
	pub birthdate:               NaiveDate,
	pub branch_key:              String,
	pub department:              String,
	pub experience_years:        i32,
	pub message:                 Option<String>,
	pub privacy_policy_accepted: bool,
	pub cv_file_path:            String,
	pub submitted_at:            NaiveDateTime,
}

impl Application {
	/// Get an [`Application`] given its id
	#[instrument(skip(conn))]
	pub async fn get(a_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let application = conn
			.interact(move |conn| {
				use self::application::dsl::*;

				application
					.find(a_id)
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::not_found("Application not found"))?;

		Ok(application)
	}

	/// List the applications visible in the given scope, newest first
	#[instrument(skip(conn))]
	pub async fn list(
		scope: BranchScope,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		if scope.is_empty() {
			return Ok(vec![]);
		}

		let applications = conn
			.interact(move |conn| {
				use self::application::dsl::*;

				let mut query =
					application.select(Self::as_select()).into_boxed();

				if let Some(b_id) = scope.branch_id() {
					let slugs = branch::table
						.filter(branch::id.eq(b_id))
						.select(branch::slug);

					query = query.filter(branch_key.eq_any(slugs));
				}

				query
					.order((submitted_at.desc(), id.desc()))
					.offset(p_cfg.offset)
					.limit(p_cfg.limit)
					.get_results(conn)
			})
			.await??;

		Ok(applications)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = application)]
#[diesel(check_for_backend(Pg))]
pub struct NewApplication {
	pub name:                    String,
	pub email:                   String,
	pub phone:                   String,
	pub birthdate:               NaiveDate,
	pub branch_key:              String,
	pub department:              String,
	pub experience_years:        i32,
	pub message:                 Option<String>,
	pub privacy_policy_accepted: bool,
	pub cv_file_path:            String,
}

impl NewApplication {
	/// Insert this [`NewApplication`]
	///
	/// # Errors
	/// Fails with [`Error::InvalidBranchKey`] if no branch has the given
	/// branch key as its slug, nothing is inserted in that case
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Application, Error> {
		let application = conn
			.interact(|conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let known_branch = diesel::select(exists(
						branch::table.filter(branch::slug.eq(&self.branch_key)),
					))
					.get_result::<bool>(conn)?;

					if !known_branch {
						return Err(Error::InvalidBranchKey);
					}

					let application = diesel::insert_into(application::table)
						.values(self)
						.returning(Application::as_returning())
						.get_result(conn)?;

					Ok(application)
				})
			})
			.await??;

		info!(
			"received application {} for branch {}",
			application.id, application.branch_key
		);

		Ok(application)
	}
}
