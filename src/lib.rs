//! # Adana Ustam back office library

#[macro_use]
extern crate tracing;

use std::ops::Deref;

use axum::extract::FromRef;
use common::DbPool;

mod config;
mod seeder;
mod session;
mod tokens;

pub mod controllers;
pub mod middleware;
pub mod routes;
pub mod schemas;

pub use config::*;
pub use seeder::*;
pub use session::*;
pub use tokens::*;

/// Id of the user an access token was issued to
#[derive(Clone, Copy, Debug)]
pub(crate) struct UserId(pub(crate) i32);

impl Deref for UserId {
	type Target = i32;

	fn deref(&self) -> &Self::Target { &self.0 }
}

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
	pub tokens:        TokenService,
}

impl AppState {
	#[must_use]
	pub fn new(config: Config, database_pool: DbPool) -> Self {
		let tokens = TokenService::from_config(&config);

		Self { config, database_pool, tokens }
	}
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for TokenService {
	fn from_ref(input: &AppState) -> Self { input.tokens.clone() }
}
