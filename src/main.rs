#[macro_use]
extern crate tracing;

use adana_ustam::routes::get_app_router;
use adana_ustam::{AppState, Config};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::DEBUG)
		.init();

	// Set up the configuration.
	let config = Config::from_env();

	// Set up the database connection pool.
	let pool = config.create_database_pool();

	let address = config.server_address.clone();
	let state = AppState::new(config, pool);
	let app = get_app_router(state);

	let listener = TcpListener::bind(&address)
		.await
		.unwrap_or_else(|e| panic!("COULD NOT BIND TO {address} -- {e}"));

	if let Ok(local_address) = listener.local_addr() {
		info!("listening on {local_address}");
	}

	if let Err(e) = axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_handler())
		.await
	{
		error!("server stopped unexpectedly -- {e}");
	}
}

async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	info!("shutting down");
}
