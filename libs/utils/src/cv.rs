use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use common::{Error, UploadError};

/// Content types accepted for an uploaded CV
pub const ALLOWED_CV_TYPES: [&str; 3] = [
	"application/pdf",
	"application/msword",
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Maximum size of an uploaded CV in bytes
pub const MAX_CV_SIZE: usize = 5 * 1024 * 1024;

/// Check the content type and size of an uploaded CV
pub fn validate_cv(
	content_type: Option<&str>,
	size: usize,
) -> Result<(), Error> {
	let content_type = content_type.unwrap_or_default();

	if !ALLOWED_CV_TYPES.contains(&content_type) {
		let content_type = content_type.to_string();

		return Err(UploadError::UnsupportedType(content_type).into());
	}

	if size > MAX_CV_SIZE {
		return Err(UploadError::TooLarge(MAX_CV_SIZE).into());
	}

	Ok(())
}

/// Build the stored file name of a CV from the applicant's email, the upload
/// time and the extension of the uploaded file
///
/// Every character of the email outside `[A-Za-z0-9_-]` becomes `_`, the
/// extension keeps only ASCII alphanumerics.
#[must_use]
pub fn cv_file_name(
	email: &str,
	timestamp: i64,
	uploaded_name: Option<&str>,
) -> String {
	let safe_email: String = email
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
				c
			} else {
				'_'
			}
		})
		.collect();

	let extension: String = uploaded_name
		.and_then(|name| Path::new(name).extension())
		.map(|ext| {
			ext.to_string_lossy()
				.chars()
				.filter(char::is_ascii_alphanumeric)
				.collect()
		})
		.unwrap_or_default();

	if extension.is_empty() {
		format!("{safe_email}_{timestamp}")
	} else {
		format!("{safe_email}_{timestamp}.{extension}")
	}
}

/// Number of suffixed names tried before giving up on a colliding file name
const MAX_NAME_ATTEMPTS: usize = 32;

/// Write an uploaded CV into `dir` and return the path it was stored at
///
/// Existing files are never overwritten, a colliding name gets a numeric
/// suffix. A partially written file is removed before the error is returned.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn store_cv(
	dir: &Path,
	email: &str,
	uploaded_name: Option<&str>,
	bytes: &Bytes,
) -> Result<PathBuf, Error> {
	std::fs::create_dir_all(dir)?;

	let name = cv_file_name(email, Utc::now().timestamp(), uploaded_name);

	for attempt in 0..MAX_NAME_ATTEMPTS {
		let candidate = match attempt {
			0 => name.clone(),
			n => suffixed(&name, n),
		};

		let path = dir.join(candidate);

		if path.parent() != Some(dir) {
			error!("refusing to store cv outside {}", dir.display());
			return Err(Error::ValidationError(
				"invalid applicant email".to_string(),
			));
		}

		match write_file(&path, bytes) {
			Ok(()) => {
				info!("stored cv at {}", path.display());
				return Ok(path);
			},
			Err(e) if e.kind() == ErrorKind::AlreadyExists => (),
			Err(e) => {
				remove_cv(&path);
				return Err(e.into());
			},
		}
	}

	Err(std::io::Error::from(ErrorKind::AlreadyExists).into())
}

/// Insert `_{n}` before the extension of a file name
fn suffixed(name: &str, n: usize) -> String {
	match name.rsplit_once('.') {
		Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
		None => format!("{name}_{n}"),
	}
}

fn write_file(path: &Path, bytes: &Bytes) -> std::io::Result<()> {
	let mut file = BufWriter::new(File::create_new(path)?);

	file.write_all(bytes)?;
	file.flush()?;

	Ok(())
}

/// Remove a stored CV, failures are only logged
pub fn remove_cv(path: &Path) {
	match std::fs::remove_file(path) {
		Ok(()) => debug!("removed cv at {}", path.display()),
		Err(e) if e.kind() == ErrorKind::NotFound => (),
		Err(e) => warn!("failed to remove cv at {} -- {e}", path.display()),
	}
}

/// Read a stored CV
///
/// # Errors
/// Fails with [`Error::NotFound`] if the file no longer exists
pub fn read_cv(path: &Path) -> Result<Vec<u8>, Error> {
	match std::fs::read(path) {
		Ok(bytes) => Ok(bytes),
		Err(e) if e.kind() == ErrorKind::NotFound => {
			Err(Error::not_found("CV file not found on server"))
		},
		Err(e) => Err(e.into()),
	}
}
