#[macro_use]
extern crate tracing;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::users;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id:            i32,
	pub username:      String,
	pub email:         String,
	#[serde(skip)]
	pub password_hash: String,
	pub is_active:     bool,
	pub is_superuser:  bool,
	pub branch_id:     Option<i32>,
	pub created_at:    NaiveDateTime,
}

impl User {
	/// Get a [`User`] given its id
	#[instrument(skip(conn))]
	pub async fn get(u_id: i32, conn: &DbConn) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.find(u_id)
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}

	/// Get a [`User`] given its email
	#[instrument(skip(conn))]
	pub async fn get_by_email(
		u_email: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.filter(email.eq(u_email))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}

	/// Get a [`User`] given its username
	#[instrument(skip(conn))]
	pub async fn get_by_username(
		u_username: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.filter(username.eq(u_username))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}

	/// Find the [`User`] a login identifier refers to, trying it as an email
	/// before trying it as a username
	#[instrument(skip(conn))]
	pub async fn get_by_identifier(
		identifier: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		if let Some(user) = Self::get_by_email(identifier.clone(), conn).await? {
			return Ok(Some(user));
		}

		Self::get_by_username(identifier, conn).await
	}

	/// Hash a password using Argon2
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hashed_password = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hashed_password)
	}

	/// Check a plaintext password against the stored hash
	///
	/// # Errors
	/// A mismatch is reported as invalid credentials
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let password_hash = PasswordHash::new(&self.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &password_hash)?;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewUser {
	pub username:     String,
	pub email:        String,
	pub password:     String,
	pub is_active:    bool,
	pub is_superuser: bool,
	pub branch_id:    Option<i32>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = users)]
struct NewUserHashed {
	username:      String,
	email:         String,
	password_hash: String,
	is_active:     bool,
	is_superuser:  bool,
	branch_id:     Option<i32>,
}

impl NewUser {
	/// Insert this [`NewUser`], hashing its password
	#[instrument(skip_all, fields(username = %self.username))]
	pub async fn insert(self, conn: &DbConn) -> Result<User, Error> {
		let hash = User::hash_password(&self.password)?;

		let insertable = NewUserHashed {
			username:      self.username,
			email:         self.email,
			password_hash: hash,
			is_active:     self.is_active,
			is_superuser:  self.is_superuser,
			branch_id:     self.branch_id,
		};

		let user = conn
			.interact(|conn| {
				use self::users::dsl::*;

				diesel::insert_into(users)
					.values(insertable)
					.returning(User::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created user {} ({})", user.username, user.id);

		Ok(user)
	}
}
