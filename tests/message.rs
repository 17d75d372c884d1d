use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;

use common::{ADMIN, ANKARA_STAFF, DRIFTER, TestEnv};

#[tokio::test(flavor = "multi_thread")]
async fn guest_sends_message() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/v1/messages")
		.json(&json!({
			"name": "Mehmet",
			"email": "mehmet@example.com",
			"subject": "Catering",
			"message": "Do you cater for weddings?",
			"branch_key": "ankara",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<Value>();

	assert_eq!(body["subject"], "Catering");
	assert_eq!(body["phone"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_key_is_free_text() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/v1/messages")
		.json(&json!({
			"name": "Mehmet",
			"email": "mehmet@example.com",
			"message": "General question",
			"branch_key": "general",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let token = env.login(ADMIN).await;

	let all = env
		.app
		.get("/api/v1/messages")
		.authorization_bearer(&token)
		.await
		.json::<Vec<Value>>();

	assert_eq!(all.len(), 1);
	assert_eq!(all[0]["branch_key"], "general");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_email_is_rejected() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/v1/messages")
		.json(&json!({
			"name": "Mehmet",
			"email": "not-an-email",
			"message": "Hello",
			"branch_key": "ankara",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn messages_are_scoped_by_branch_key() {
	let env = TestEnv::new().await;

	for branch_key in ["ankara", "kurttepe", "ankara"] {
		env.app
			.post("/api/v1/messages")
			.json(&json!({
				"name": "Guest",
				"email": "guest@example.com",
				"message": format!("About {branch_key}"),
				"branch_key": branch_key,
			}))
			.await
			.assert_status(StatusCode::CREATED);
	}

	let ankara = env.login(ANKARA_STAFF).await;
	let drifter = env.login(DRIFTER).await;

	let visible = env
		.app
		.get("/api/v1/messages")
		.authorization_bearer(&ankara)
		.await
		.json::<Vec<Value>>();

	assert_eq!(visible.len(), 2);
	assert!(visible.iter().all(|m| m["branch_key"] == "ankara"));

	let none = env
		.app
		.get("/api/v1/messages")
		.authorization_bearer(&drifter)
		.await
		.json::<Vec<Value>>();

	assert!(none.is_empty());
}
