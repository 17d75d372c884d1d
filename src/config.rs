use std::path::PathBuf;

use chrono::TimeDelta;
use deadpool_diesel::postgres::{Manager, Pool};
use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url:   String,
	pub server_address: String,

	pub secret_key:             String,
	pub access_token_lifetime:  TimeDelta,
	pub refresh_token_lifetime: TimeDelta,

	pub base_url:      String,
	pub cv_upload_dir: PathBuf,
	pub cors_origins:  Vec<String>,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	fn parse_env_var_or(var: &str, default: i64) -> i64 {
		match std::env::var(var) {
			Ok(value) => {
				value.parse::<i64>().unwrap_or_else(|_| {
					panic!("{var} must be a whole number, got {value}")
				})
			},
			Err(_) => default,
		}
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or a value can
	/// not be parsed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let server_address =
			Self::get_env_var_or("SERVER_ADDRESS", "0.0.0.0:8000");

		let secret_key = Self::get_env_var("SECRET_KEY");
		let access_token_lifetime = TimeDelta::minutes(Self::parse_env_var_or(
			"ACCESS_TOKEN_EXPIRE_MINUTES",
			30,
		));
		let refresh_token_lifetime = TimeDelta::days(Self::parse_env_var_or(
			"REFRESH_TOKEN_EXPIRE_DAYS",
			7,
		));

		let base_url =
			Self::get_env_var_or("BASE_URL", "http://localhost:8000");
		if let Err(e) = Url::parse(&base_url) {
			panic!("BASE_URL must be a valid url, got {base_url} -- {e}");
		}

		let cv_upload_dir = PathBuf::from(Self::get_env_var_or(
			"CV_UPLOAD_DIR",
			"/app/uploads/cv",
		));

		let cors_origins = Self::get_env_var_or("BACKEND_CORS_ORIGINS", "*")
			.split(',')
			.map(str::trim)
			.filter(|origin| !origin.is_empty())
			.map(ToString::to_string)
			.collect();

		Self {
			database_url,
			server_address,
			secret_key,
			access_token_lifetime,
			refresh_token_lifetime,
			base_url,
			cv_upload_dir,
			cors_origins,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}
}
