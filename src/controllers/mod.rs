//! Defines controller functions that correspond to individual routes

use axum::extract::State;
use axum::http::StatusCode;
use common::{DbPool, Error};
use diesel::{RunQueryDsl, sql_query};

pub mod application;
pub mod auth;
pub mod branch;
pub mod message;
pub mod reservation;
pub mod table;
pub mod user;
pub mod view;

/// Check if the database connection and webserver are functional
#[instrument(skip(pool))]
pub(crate) async fn healthcheck(
	State(pool): State<DbPool>,
) -> Result<StatusCode, Error> {
	let conn = pool.get().await?;

	conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

	Ok(StatusCode::NO_CONTENT)
}
