use std::sync::LazyLock;

use common::{DbConn, DbPool};
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::RunQueryDsl;
use diesel_migrations::{
	EmbeddedMigrations,
	MigrationHarness,
	embed_migrations,
};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Global test database provider
pub static DATABASE_PROVIDER: LazyLock<DatabaseProvider> =
	LazyLock::new(DatabaseProvider::new);

/// Hands out throwaway databases on the server behind `DATABASE_URL`
pub struct DatabaseProvider {
	server_url: String,
	root_pool:  DbPool,
}

/// A throwaway test database, dropped together with this guard
pub struct DatabaseGuard {
	root_conn:     DbConn,
	database_name: String,
	database_url:  String,
}

impl DatabaseProvider {
	fn new() -> Self {
		if Ok("true".to_string()) == std::env::var("CI") {
			tracing_subscriber::fmt()
				.pretty()
				.with_thread_names(true)
				.with_max_level(tracing::Level::DEBUG)
				.init();
		}

		let database_url = std::env::var("DATABASE_URL").unwrap();
		let (server_url, _) = database_url.rsplit_once('/').unwrap();
		let server_url = server_url.to_string();

		let manager =
			Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
		let root_pool = Pool::builder(manager).build().unwrap();

		Self { server_url, root_pool }
	}

	/// Create a fresh database and return a guard for it
	///
	/// # Panics
	/// Panics if creating the database fails
	pub(crate) async fn acquire(&self) -> DatabaseGuard {
		let database_name =
			format!("adana_test_{}", Uuid::new_v4().simple());
		let database_url = format!("{}/{database_name}", self.server_url);

		let root_conn = self
			.root_pool
			.get()
			.await
			.expect("could not get root pool connection");

		let create_query = format!("CREATE DATABASE {database_name};");

		root_conn
			.interact(|conn| diesel::sql_query(create_query).execute(conn))
			.await
			.expect("could not interact with root connection")
			.expect("could not create test database");

		DatabaseGuard { root_conn, database_name, database_url }
	}
}

impl DatabaseGuard {
	#[must_use]
	pub fn database_url(&self) -> &str { &self.database_url }

	/// Create a pool for this database and run all migrations on it
	///
	/// # Panics
	/// Panics if the pool can not be built or migrating fails
	#[must_use]
	pub fn create_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.clone(),
			deadpool_diesel::Runtime::Tokio1,
		);

		let pool = Pool::builder(manager).build().unwrap();

		futures::executor::block_on(async {
			let conn = pool.get().await.unwrap();

			conn.interact(|conn| {
				conn.run_pending_migrations(MIGRATIONS).map(|_| ())
			})
			.await
			.unwrap()
			.unwrap();
		});

		pool
	}
}

impl Drop for DatabaseGuard {
	fn drop(&mut self) {
		let drop_query =
			format!("DROP DATABASE {} WITH (FORCE);", self.database_name);

		futures::executor::block_on(async move {
			self.root_conn
				.interact(|conn| diesel::sql_query(drop_query).execute(conn))
				.await
				.expect("could not interact with root connection")
				.expect("could not drop test database");
		});
	}
}
