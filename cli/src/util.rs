use std::io::{self, BufRead, Write};

use clap::Error;
use clap::error::ErrorKind;

/// Wrap an application error so it can be reported by clap
pub fn into_cli_error(err: common::Error) -> Error {
	Error::raw(ErrorKind::Io, format!("{err}\n"))
}

/// Read a line from stdin without its line ending
fn prompt(label: &str) -> Result<String, Error> {
	print!("{label}: ");
	io::stdout().flush().map_err(|e| Error::raw(ErrorKind::Io, e))?;

	let mut line = String::new();

	io::stdin()
		.lock()
		.read_line(&mut line)
		.map_err(|e| Error::raw(ErrorKind::Io, e))?;

	Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a password twice from stdin, both entries have to match
pub fn read_password() -> Result<String, Error> {
	let password = prompt("Password")?;
	let confirmation = prompt("Repeat password")?;

	if password.is_empty() {
		return Err(Error::raw(
			ErrorKind::InvalidValue,
			"the password can not be empty\n",
		));
	}

	if password != confirmation {
		return Err(Error::raw(
			ErrorKind::InvalidValue,
			"the passwords do not match\n",
		));
	}

	Ok(password)
}
