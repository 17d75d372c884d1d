#![allow(dead_code)]

use std::path::PathBuf;

use adana_ustam::{
	AppState,
	Config,
	SeedBranch,
	SeedUser,
	Seeder,
	TokenService,
	routes,
};
use axum_test::TestServer;
use chrono::TimeDelta;
use common::DbPool;
use db::users;
use diesel::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tempfile::TempDir;

mod mock_db;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

pub const BASE_URL: &str = "http://menu.test";

/// Credentials of the seeded accounts
pub const ADMIN: (&str, &str) = ("admin", "adminadmin123");
pub const KURTTEPE_STAFF: (&str, &str) = ("kurttepe-staff", "kurttepe1234");
pub const ANKARA_STAFF: (&str, &str) = ("ankara-staff", "ankara123456");
pub const DRIFTER: (&str, &str) = ("drifter", "drifter12345");
pub const RETIRED: (&str, &str) = ("retired", "retired12345");

/// Ids of the seeded branches, in seed file order
pub const KURTTEPE_ID: i32 = 1;
pub const ANKARA_ID: i32 = 2;

#[derive(Serialize)]
struct LoginForm<'a> {
	username: &'a str,
	password: &'a str,
}

#[allow(dead_code)]
pub struct TestEnv {
	pub app:      TestServer,
	pub config:   Config,
	pub pool:     DbPool,
	pub db_guard: DatabaseGuard,
	pub cv_dir:   TempDir,
}

impl TestEnv {
	/// Get a test environment with a seeded throwaway database
	///
	/// # Panics
	/// Panics if seeding or building the test server fails
	pub async fn new() -> Self {
		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		{
			let conn = test_pool.get().await.unwrap();
			let mut seeder = Seeder::new(&conn);

			seeder
				.populate("seed/branches.json", async |conn, branches| {
					for branch in branches {
						SeedBranch::insert(branch, conn).await?;
					}

					Ok(())
				})
				.await
				.populate("seed/users.json", async |conn, users| {
					for user in users {
						SeedUser::insert(user, conn).await?;
					}

					Ok(())
				})
				.await;
		}

		let cv_dir = tempfile::tempdir().unwrap();

		let config = Config {
			database_url:           test_pool_guard.database_url().to_string(),
			server_address:         "127.0.0.1:0".to_string(),
			secret_key:             "test-secret-key".to_string(),
			access_token_lifetime:  TimeDelta::minutes(30),
			refresh_token_lifetime: TimeDelta::days(7),
			base_url:               BASE_URL.to_string(),
			cv_upload_dir:          PathBuf::from(cv_dir.path()),
			cors_origins:           vec!["*".to_string()],
		};

		let state = AppState::new(config.clone(), test_pool.clone());
		let app = routes::get_app_router(state);

		let test_server = TestServer::new(app).unwrap();

		TestEnv {
			app: test_server,
			config,
			pool: test_pool,
			db_guard: test_pool_guard,
			cv_dir,
		}
	}

	/// A token service sharing the secret of the app under test
	pub fn tokens(&self) -> TokenService {
		TokenService::from_config(&self.config)
	}

	/// Look up the id of a seeded user
	///
	/// # Panics
	/// Panics if the user does not exist
	pub async fn user_id(&self, name: &str) -> i32 {
		let name = name.to_string();
		let conn = self.pool.get().await.unwrap();

		conn.interact(move |conn| {
			users::table
				.filter(users::username.eq(name))
				.select(users::id)
				.first::<i32>(conn)
		})
		.await
		.unwrap()
		.unwrap()
	}

	/// Flip the active flag of a user
	pub async fn set_user_active(&self, name: &str, active: bool) {
		let name = name.to_string();
		let conn = self.pool.get().await.unwrap();

		conn.interact(move |conn| {
			diesel::update(users::table.filter(users::username.eq(name)))
				.set(users::is_active.eq(active))
				.execute(conn)
		})
		.await
		.unwrap()
		.unwrap();
	}

	/// Delete a user
	pub async fn delete_user(&self, name: &str) {
		let name = name.to_string();
		let conn = self.pool.get().await.unwrap();

		conn.interact(move |conn| {
			diesel::delete(users::table.filter(users::username.eq(name)))
				.execute(conn)
		})
		.await
		.unwrap()
		.unwrap();
	}

	/// Log in with a username or email and return the full token response
	pub async fn login_response(
		&self,
		identifier: &str,
		password: &str,
	) -> axum_test::TestResponse {
		self.app
			.post("/api/v1/auth/login")
			.form(&LoginForm { username: identifier, password })
			.await
	}

	/// Log in and return an access token
	///
	/// # Panics
	/// Panics if logging in fails
	pub async fn login(&self, (identifier, password): (&str, &str)) -> String {
		let response = self.login_response(identifier, password).await;

		response.assert_status_ok();

		let body = response.json::<Value>();

		body["access_token"].as_str().unwrap().to_string()
	}
}
