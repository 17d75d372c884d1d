//! Signed bearer tokens

use chrono::{TimeDelta, Utc};
use common::{Error, TokenError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
	Algorithm,
	DecodingKey,
	EncodingKey,
	Header,
	Validation,
	decode,
	encode,
};
use serde::{Deserialize, Serialize};

use crate::Config;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
	Access,
	Refresh,
}

/// Claims carried by every token
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Claims {
	/// The id of the user this token was issued to
	pub sub:        String,
	#[serde(rename = "type")]
	pub token_type: TokenType,
	pub iat:        i64,
	pub exp:        i64,
}

/// Issues and validates HS256 signed tokens
#[derive(Clone)]
pub struct TokenService {
	encoding_key:           EncodingKey,
	decoding_key:           DecodingKey,
	access_token_lifetime:  TimeDelta,
	refresh_token_lifetime: TimeDelta,
}

impl TokenService {
	#[must_use]
	pub fn new(
		secret: &str,
		access_token_lifetime: TimeDelta,
		refresh_token_lifetime: TimeDelta,
	) -> Self {
		Self {
			encoding_key: EncodingKey::from_secret(secret.as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.as_bytes()),
			access_token_lifetime,
			refresh_token_lifetime,
		}
	}

	#[must_use]
	pub fn from_config(config: &Config) -> Self {
		Self::new(
			&config.secret_key,
			config.access_token_lifetime,
			config.refresh_token_lifetime,
		)
	}

	/// Issue a token of the given type for a user
	pub fn issue(
		&self,
		user_id: i32,
		token_type: TokenType,
	) -> Result<String, Error> {
		let lifetime = match token_type {
			TokenType::Access => self.access_token_lifetime,
			TokenType::Refresh => self.refresh_token_lifetime,
		};

		let now = Utc::now();
		let claims = Claims {
			sub: user_id.to_string(),
			token_type,
			iat: now.timestamp(),
			exp: (now + lifetime).timestamp(),
		};

		let token = encode(&Header::default(), &claims, &self.encoding_key)?;

		Ok(token)
	}

	/// Validate a token and return the id of the user it was issued to
	///
	/// # Errors
	/// Fails if the token is malformed, expired, badly signed or of a
	/// different type than expected
	pub fn verify(
		&self,
		token: &str,
		expected: TokenType,
	) -> Result<i32, TokenError> {
		let rejection = match expected {
			TokenType::Access => TokenError::InvalidToken,
			TokenType::Refresh => TokenError::InvalidRefreshToken,
		};

		let validation = Validation::new(Algorithm::HS256);

		let claims =
			match decode::<Claims>(token, &self.decoding_key, &validation) {
				Ok(data) => data.claims,
				Err(e) => {
					match e.kind() {
						ErrorKind::ExpiredSignature => {
							debug!("rejected expired {expected:?} token");
						},
						kind => debug!("rejected {expected:?} token -- {kind:?}"),
					}

					return Err(rejection);
				},
			};

		if claims.token_type != expected {
			debug!("rejected {:?} token used as {expected:?}", claims.token_type);

			return Err(rejection);
		}

		claims.sub.parse::<i32>().map_err(|_| rejection)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn service() -> TokenService {
		TokenService::new(
			"test-secret-key-of-sufficient-length",
			TimeDelta::minutes(30),
			TimeDelta::days(7),
		)
	}

	#[test]
	fn issued_tokens_verify_for_their_type() {
		let tokens = service();

		let access = tokens.issue(7, TokenType::Access).unwrap();
		let refresh = tokens.issue(7, TokenType::Refresh).unwrap();

		assert_eq!(tokens.verify(&access, TokenType::Access).unwrap(), 7);
		assert_eq!(tokens.verify(&refresh, TokenType::Refresh).unwrap(), 7);
	}

	#[test]
	fn access_token_is_not_a_refresh_token() {
		let tokens = service();
		let access = tokens.issue(7, TokenType::Access).unwrap();

		assert!(matches!(
			tokens.verify(&access, TokenType::Refresh),
			Err(TokenError::InvalidRefreshToken)
		));
	}

	#[test]
	fn refresh_token_is_not_an_access_token() {
		let tokens = service();
		let refresh = tokens.issue(7, TokenType::Refresh).unwrap();

		assert!(matches!(
			tokens.verify(&refresh, TokenType::Access),
			Err(TokenError::InvalidToken)
		));
	}

	#[test]
	fn expired_tokens_are_rejected() {
		let tokens = TokenService::new(
			"test-secret-key-of-sufficient-length",
			TimeDelta::minutes(-10),
			TimeDelta::days(7),
		);
		let access = tokens.issue(7, TokenType::Access).unwrap();

		assert!(tokens.verify(&access, TokenType::Access).is_err());
	}

	#[test]
	fn tokens_signed_with_another_secret_are_rejected() {
		let other = TokenService::new(
			"another-secret-key-of-sufficient-length",
			TimeDelta::minutes(30),
			TimeDelta::days(7),
		);
		let access = other.issue(7, TokenType::Access).unwrap();

		assert!(service().verify(&access, TokenType::Access).is_err());
		assert!(service().verify("not.a.token", TokenType::Access).is_err());
	}

	#[test]
	fn claims_carry_the_type_discriminator() {
		let claims = Claims {
			sub:        "1".to_string(),
			token_type: TokenType::Refresh,
			iat:        0,
			exp:        0,
		};

		let value = serde_json::to_value(claims).unwrap();

		assert_eq!(value["type"], "refresh");
		assert_eq!(value["sub"], "1");
	}
}
