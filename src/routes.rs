use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::application::{
	create_application,
	download_cv,
	get_applications,
};
use crate::controllers::auth::{get_current_user, login, refresh};
use crate::controllers::branch::{
	create_branch,
	get_branch,
	get_branches,
	update_branch,
};
use crate::controllers::healthcheck;
use crate::controllers::message::{create_message, get_messages};
use crate::controllers::reservation::{
	create_reservation,
	get_reservations,
	update_reservation_status,
};
use crate::controllers::table::{
	create_tables_bulk,
	delete_tables_bulk,
	get_tables,
	update_table,
};
use crate::controllers::user::signup;
use crate::controllers::view::get_customer_view;
use crate::middleware::AuthLayer;
use crate::{AppState, Config};

/// Request body limit of the CV upload route, a full size CV plus the other
/// form fields must fit
const CV_UPLOAD_BODY_LIMIT: usize = 7 * 1024 * 1024;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.nest("/auth", auth_routes(&state))
		.nest("/users", user_routes())
		.nest("/musteri", customer_routes())
		.merge(intake_routes())
		.merge(protected_routes(&state))
		.nest("/admin", protected_routes(&state));

	Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/api/v1", api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new())
				.layer(cors_layer(&state.config)),
		)
		.with_state(state)
}

/// Build the CORS layer for the configured origins
///
/// A `*` entry allows any origin, without credentials.
fn cors_layer(config: &Config) -> CorsLayer {
	if config.cors_origins.iter().any(|o| o == "*") {
		return CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any);
	}

	let origins: Vec<HeaderValue> = config
		.cors_origins
		.iter()
		.filter_map(|o| {
			o.parse::<HeaderValue>()
				.inspect_err(|e| warn!("invalid CORS origin {o} -- {e}"))
				.ok()
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods(AllowMethods::mirror_request())
		.allow_headers(AllowHeaders::mirror_request())
		.allow_credentials(true)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/login", post(login))
		.route("/refresh", post(refresh))
		.route(
			"/me",
			get(get_current_user).route_layer(AuthLayer::new(state.clone())),
		)
}

/// User routes
fn user_routes() -> Router<AppState> {
	Router::new().route("/signup", post(signup))
}

/// Public customer facing routes
fn customer_routes() -> Router<AppState> {
	Router::new()
		.route("/sube/{slug}/table/{table_number}", get(get_customer_view))
}

/// Public submission routes for guests
fn intake_routes() -> Router<AppState> {
	Router::new()
		.route("/reservations", post(create_reservation))
		.route(
			"/applications",
			post(create_application)
				.layer(DefaultBodyLimit::max(CV_UPLOAD_BODY_LIMIT)),
		)
		.route("/messages", post(create_message))
}

/// Back office routes, every one requires an access token
fn protected_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.nest("/settings/branches", branch_routes())
		.nest("/tables", table_routes())
		.route("/reservations", get(get_reservations))
		.route("/reservations/{id}", patch(update_reservation_status))
		.route("/applications", get(get_applications))
		.route("/applications/cv/{id}", get(download_cv))
		.route("/messages", get(get_messages))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Branch settings routes
fn branch_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_branches).post(create_branch))
		.route("/{id_or_slug}", get(get_branch).put(update_branch))
}

/// Table routes
fn table_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_tables))
		.route("/bulk", post(create_tables_bulk).delete(delete_tables_bulk))
		.route("/{id}", put(update_table))
}
