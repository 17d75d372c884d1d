//! Middleware to authorize users and store their id on the request objects

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Response};
use axum::response::IntoResponse;
use common::{Error, TokenError};
use tower::{Layer, Service};

use crate::{AppState, TokenType, UserId};

/// Middleware layer that guarantees a request carries a valid access token
///
/// The id of the user the token was issued to is stored as an
/// [`Extension`](axum::Extension)
///
/// This layer does not load the user, controllers that need it should ask
/// for a [`Session`](crate::Session) in their arguments
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

/// Get the bearer token from an `Authorization` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let (scheme, token) = value.split_once(' ')?;

	if !scheme.eq_ignore_ascii_case("bearer") {
		return None;
	}

	let token = token.trim();

	if token.is_empty() { None } else { Some(token) }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let Some(token) = bearer_token(req.headers()) else {
				info!("got request without valid access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let user_id = match state.tokens.verify(token, TokenType::Access)
			{
				Ok(id) => id,
				Err(e) => {
					warn!("rejected access token -- {e}");

					return Ok(Error::from(e).into_response());
				},
			};

			req.extensions_mut().insert(UserId(user_id));

			inner.call(req).await
		})
	}
}
