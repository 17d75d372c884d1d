#[macro_use]
extern crate tracing;

mod util;

use std::env;

use branch::Branch;
use clap::error::ErrorKind;
use clap::{Error, Parser, Subcommand};
use common::DbConn;
use deadpool_diesel::postgres::{Manager, Pool};
use tracing::Level;
use user::NewUser;
use validator::ValidateEmail;

use crate::util::{into_cli_error, read_password};

#[derive(Parser, Debug)]
#[command(about = "Operator tasks for the Adana Ustam back office")]
struct Opt {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Create a user account, the password is read from stdin
	CreateUser {
		#[arg(long)]
		email:       String,
		#[arg(long)]
		username:    String,
		#[arg(long, default_value_t = false)]
		superuser:   bool,
		/// Slug of the branch the user works at, required for non-superusers
		#[arg(long)]
		branch_slug: Option<String>,
	},
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	tracing_subscriber::fmt().with_max_level(Level::INFO).init();

	let cli = Opt::parse();

	match cli.command {
		Command::CreateUser { email, username, superuser, branch_slug } => {
			let conn = get_conn().await;

			create_user(&conn, email, username, superuser, branch_slug).await
		},
	}
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// Create a user after checking its email and resolving its branch
async fn create_user(
	conn: &DbConn,
	email: String,
	username: String,
	is_superuser: bool,
	branch_slug: Option<String>,
) -> Result<(), Error> {
	if !email.validate_email() {
		return Err(Error::raw(
			ErrorKind::InvalidValue,
			format!("'{email}' is not a valid email address\n"),
		));
	}

	let branch_id = resolve_branch(conn, is_superuser, branch_slug).await?;

	let password = read_password()?;

	let new_user = NewUser {
		username,
		email,
		password,
		is_active: true,
		is_superuser,
		branch_id,
	};

	let user = new_user.insert(conn).await.map_err(into_cli_error)?;

	println!(
		"Created {} {} ({})",
		if user.is_superuser { "superuser" } else { "user" },
		user.username,
		user.id,
	);

	Ok(())
}

/// Look up the id of the branch a new user should be assigned to
///
/// Users that are not superusers must name an existing branch, a superuser
/// naming an unknown branch is created without one.
async fn resolve_branch(
	conn: &DbConn,
	is_superuser: bool,
	branch_slug: Option<String>,
) -> Result<Option<i32>, Error> {
	let Some(slug) = branch_slug else {
		if is_superuser {
			return Ok(None);
		}

		return Err(Error::raw(
			ErrorKind::MissingRequiredArgument,
			"--branch-slug is required for users that are not superusers\n",
		));
	};

	match Branch::get_by_slug(slug.clone(), conn).await {
		Ok(branch) => Ok(Some(branch.id)),
		Err(common::Error::NotFound(_)) if is_superuser => {
			warn!("branch {slug} does not exist, creating superuser without one");

			Ok(None)
		},
		Err(common::Error::NotFound(_)) => {
			Err(Error::raw(
				ErrorKind::InvalidValue,
				format!("branch '{slug}' does not exist\n"),
			))
		},
		Err(e) => Err(into_cli_error(e)),
	}
}
