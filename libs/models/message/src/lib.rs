#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::{branch, contact_message};
use diesel::pg::Pg;
use diesel::prelude::*;
use models_common::{BranchScope, PaginationConfig};
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = contact_message)]
#[diesel(check_for_backend(Pg))]
pub struct Message {
	pub id:          i32,
	pub name:        String,
	pub email:       String,
	pub phone:       Option<String>,
	pub subject:     Option<String>,
	pub message:     String,
	pub branch_key:  String,
	pub received_at: NaiveDateTime,
}

impl Message {
	/// List the messages visible in the given scope, newest first
	#[instrument(skip(conn))]
	pub async fn list(
		scope: BranchScope,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		if scope.is_empty() {
			return Ok(vec![]);
		}

		let messages = conn
			.interact(move |conn| {
				use self::contact_message::dsl::*;

				let mut query =
					contact_message.select(Self::as_select()).into_boxed();

				if let Some(b_id) = scope.branch_id() {
					let slugs = branch::table
						.filter(branch::id.eq(b_id))
						.select(branch::slug);

					query = query.filter(branch_key.eq_any(slugs));
				}

				query
					.order((received_at.desc(), id.desc()))
					.offset(p_cfg.offset)
					.limit(p_cfg.limit)
					.get_results(conn)
			})
			.await??;

		Ok(messages)
	}
}

/// A contact form submission, the branch key is kept as given
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = contact_message)]
#[diesel(check_for_backend(Pg))]
pub struct NewMessage {
	pub name:       String,
	pub email:      String,
	pub phone:      Option<String>,
	pub subject:    Option<String>,
	pub message:    String,
	pub branch_key: String,
}

impl NewMessage {
	/// Insert this [`NewMessage`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Message, Error> {
		let message = conn
			.interact(|conn| {
				diesel::insert_into(contact_message::table)
					.values(self)
					.returning(Message::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("received message {} for {}", message.id, message.branch_key);

		Ok(message)
	}
}
