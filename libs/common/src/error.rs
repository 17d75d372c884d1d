//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_typed_multipart::TypedMultipartError;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Authenticated but not allowed to act on the target
	#[error("{0}")]
	Forbidden(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// A guest submission referenced a branch slug that does not exist
	#[error("invalid branch key provided")]
	InvalidBranchKey,
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Resource not found
	#[error("{0}")]
	NotFound(String),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Rejected file upload
	#[error(transparent)]
	UploadError(#[from] UploadError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes are never reused once assigned, the frontend may rely on them
	#[must_use]
	pub fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden(_) => 2,
			Self::InternalServerError => 3,
			Self::InvalidBranchKey => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::InvalidCredentials => 6,
					LoginError::InactiveUser => 7,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 8,
					TokenError::InvalidToken => 9,
					TokenError::InvalidRefreshToken => 10,
					TokenError::UnknownUser => 11,
				}
			},
			Self::UploadError(e) => {
				match e {
					UploadError::UnsupportedType(_) => 12,
					UploadError::TooLarge(_) => 13,
				}
			},
			Self::ValidationError(_) => 14,
		}
	}

	/// The HTTP status this error is reported with
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::Forbidden(_) => StatusCode::FORBIDDEN,
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::InvalidBranchKey
			| Self::LoginError(_)
			| Self::UploadError(UploadError::UnsupportedType(_)) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::UploadError(UploadError::TooLarge(_)) => {
				StatusCode::PAYLOAD_TOO_LARGE
			},
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		}
	}

	/// Shorthand for a [`Error::NotFound`] with a message
	pub fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound(message.into())
	}

	/// Shorthand for a [`Error::Forbidden`] with a message
	pub fn forbidden(message: impl Into<String>) -> Self {
		Self::Forbidden(message.into())
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		debug!("{self:?}");

		let status = self.status();

		let data = serde_json::json!({
			"detail": self.to_string(),
			"code": self.code(),
		});

		let mut response = (status, axum::Json(data)).into_response();

		if status == StatusCode::UNAUTHORIZED {
			response.headers_mut().insert(
				axum::http::header::WWW_AUTHENTICATE,
				axum::http::HeaderValue::from_static("Bearer"),
			);
		}

		response
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("incorrect email/username or password")]
	InvalidCredentials,
	#[error("inactive user")]
	InactiveUser,
}

/// Any error related to a bearer token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing access token")]
	MissingAccessToken,
	#[error("could not validate credentials")]
	InvalidToken,
	#[error("invalid refresh token")]
	InvalidRefreshToken,
	#[error("user not found or inactive")]
	UnknownUser,
}

/// Any error related to an uploaded file
#[derive(Debug, Error)]
pub enum UploadError {
	#[error(
		"invalid file type '{0}', only PDF and Word documents are allowed"
	)]
	UnsupportedType(String),
	#[error("file size exceeds the limit of {0} bytes")]
	TooLarge(usize),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error handling some form of I/O
	#[error("I/O error -- {0:?}")]
	IOError(std::io::Error),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error signing a token
	#[error("token encoding error -- {0:?}")]
	TokenEncodingError(jsonwebtoken::errors::Error),
	/// Attempted to extract the current user from a request that has not
	/// been authorized
	#[error("attempted to extract current user without checking authorization")]
	UserWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidCredentials.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("branch_slug_key", "slug"),
			("users_username_key", "username"),
			("users_email_key", "email"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("not found".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let column = info
					.constraint_name()
					.and_then(|c| CONSTRAINT_TO_COLUMN.get(c));

				match column {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		InternalServerError::IOError(err).into()
	}
}

impl From<jsonwebtoken::errors::Error> for Error {
	fn from(err: jsonwebtoken::errors::Error) -> Self {
		InternalServerError::TokenEncodingError(err).into()
	}
}

impl From<TypedMultipartError> for Error {
	fn from(err: TypedMultipartError) -> Self {
		Self::ValidationError(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn taxonomy_maps_to_status_codes() {
		assert_eq!(Error::not_found("x").status(), StatusCode::NOT_FOUND);
		assert_eq!(Error::forbidden("x").status(), StatusCode::FORBIDDEN);
		assert_eq!(
			Error::from(TokenError::InvalidToken).status(),
			StatusCode::UNAUTHORIZED
		);
		assert_eq!(
			Error::Duplicate("slug".into()).status(),
			StatusCode::CONFLICT
		);
		assert_eq!(
			Error::ValidationError("bad".into()).status(),
			StatusCode::UNPROCESSABLE_ENTITY
		);
		assert_eq!(
			Error::from(UploadError::TooLarge(5)).status(),
			StatusCode::PAYLOAD_TOO_LARGE
		);
		assert_eq!(
			Error::InternalServerError.status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn login_failures_are_distinguishable() {
		let invalid = Error::from(LoginError::InvalidCredentials);
		let inactive = Error::from(LoginError::InactiveUser);

		assert_eq!(invalid.status(), inactive.status());
		assert_ne!(invalid.code(), inactive.code());
		assert_ne!(invalid.to_string(), inactive.to_string());
	}

	#[test]
	fn wrong_password_is_invalid_credentials() {
		let err = Error::from(argon2::password_hash::Error::Password);

		assert!(matches!(
			err,
			Error::LoginError(LoginError::InvalidCredentials)
		));
	}

	#[test]
	fn unauthorized_responses_carry_bearer_challenge() {
		let response = Error::from(TokenError::MissingAccessToken).into_response();

		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(
			response.headers().get(axum::http::header::WWW_AUTHENTICATE),
			Some(&axum::http::HeaderValue::from_static("Bearer"))
		);
	}
}
