use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use user::{NewUser, User};
use validator_derive::Validate;

static USERNAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-_]*$").unwrap());

const fn active_default() -> bool { true }

#[derive(Clone, Deserialize, Validate)]
pub struct SignupRequest {
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:     String,
	#[validate(regex(
		path = *USERNAME_REGEX,
		message = "username must start with a letter and only contain letters, numbers, dashes, or underscores",
		code = "username-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "username must be between 2 and 32 characters long",
		code = "username-length"
	))]
	pub username:  String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password:  String,
	#[serde(default = "active_default")]
	pub is_active: bool,
	pub branch_id: Option<i32>,
}

impl From<SignupRequest> for NewUser {
	fn from(value: SignupRequest) -> Self {
		Self {
			username:     value.username,
			email:        value.email,
			password:     value.password,
			is_active:    value.is_active,
			is_superuser: false,
			branch_id:    value.branch_id,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserResponse {
	pub id:           i32,
	pub username:     String,
	pub email:        String,
	pub is_active:    bool,
	pub is_superuser: bool,
	pub branch_id:    Option<i32>,
}

impl From<User> for UserResponse {
	fn from(value: User) -> Self {
		Self {
			id:           value.id,
			username:     value.username,
			email:        value.email,
			is_active:    value.is_active,
			is_superuser: value.is_superuser,
			branch_id:    value.branch_id,
		}
	}
}
