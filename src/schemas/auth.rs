use serde::{Deserialize, Serialize};

/// Password login form, `username` may also hold an email address
#[derive(Clone, Deserialize)]
pub struct LoginForm {
	pub username: String,
	pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshRequest {
	pub refresh_token: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenResponse {
	pub access_token:  String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	pub token_type:    String,
}

impl TokenResponse {
	#[must_use]
	pub fn bearer(access_token: String, refresh_token: Option<String>) -> Self {
		Self { access_token, refresh_token, token_type: "bearer".to_string() }
	}
}
