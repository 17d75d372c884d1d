//! Load JSON seed files into the database

use std::path::PathBuf;

use branch::{Branch, LinkMap, NewBranch};
use common::{DbConn, Error};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use user::NewUser;

pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|_| panic!("COULD NOT READ SEED FILE {filename}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|_| panic!("COULD NOT MAP SEED FILE {filename}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<'s, T, F>(
		&'s mut self,
		filename: &str,
		loader: F,
	) -> &'s mut Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		loader(self.connection, records)
			.await
			.unwrap_or_else(|e| {
				panic!("COULD NOT LOAD RECORDS FOR {filename} -- {e:?}")
			});

		info!("seeded database from {filename}");

		self
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedBranch {
	pub slug:                    String,
	pub name:                    String,
	pub display_whatsapp_number: Option<String>,
	#[serde(default)]
	pub default_links:           LinkMap,
	#[serde(default)]
	pub link_order:              Vec<String>,
}

impl SeedBranch {
	/// Insert this [`SeedBranch`]
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let new_branch = NewBranch {
			slug:                    self.slug,
			name:                    self.name,
			display_whatsapp_number: self.display_whatsapp_number,
			default_links:           self.default_links,
			link_order:              self.link_order,
		};

		new_branch.insert(conn).await?;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedUser {
	pub username:     String,
	pub email:        String,
	pub password:     String,
	#[serde(default)]
	pub is_superuser: bool,
	#[serde(default = "active_by_default")]
	pub is_active:    bool,
	/// Slug of the branch this user works at
	pub branch:       Option<String>,
}

fn active_by_default() -> bool { true }

impl SeedUser {
	/// Insert this [`SeedUser`], resolving its branch slug
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let branch_id = match self.branch {
			Some(slug) => Some(Branch::get_by_slug(slug, conn).await?.id),
			None => None,
		};

		let new_user = NewUser {
			username:     self.username,
			email:        self.email,
			password:     self.password,
			is_active:    self.is_active,
			is_superuser: self.is_superuser,
			branch_id,
		};

		new_user.insert(conn).await?;

		Ok(())
	}
}
