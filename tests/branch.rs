use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;

use common::{
	ADMIN,
	ANKARA_ID,
	ANKARA_STAFF,
	DRIFTER,
	KURTTEPE_ID,
	KURTTEPE_STAFF,
	TestEnv,
};

#[tokio::test(flavor = "multi_thread")]
async fn superuser_lists_all_branches_by_name() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.get("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.await;

	response.assert_status_ok();

	let body = response.json::<Vec<Value>>();
	let slugs: Vec<&str> =
		body.iter().map(|b| b["slug"].as_str().unwrap()).collect();

	assert_eq!(slugs, vec!["ankara", "kurttepe"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_user_lists_only_own_branch() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	let response = env
		.app
		.get("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.await;

	response.assert_status_ok();

	let body = response.json::<Vec<Value>>();

	assert_eq!(body.len(), 1);
	assert_eq!(body[0]["id"], KURTTEPE_ID);
}

#[tokio::test(flavor = "multi_thread")]
async fn unassigned_user_lists_no_branches() {
	let env = TestEnv::new().await;
	let token = env.login(DRIFTER).await;

	let response = env
		.app
		.get("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.await;

	response.assert_status_ok();
	assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_paginated() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.get("/api/v1/settings/branches?skip=1&limit=1")
		.authorization_bearer(&token)
		.await;

	response.assert_status_ok();

	let body = response.json::<Vec<Value>>();

	assert_eq!(body.len(), 1);
	assert_eq!(body[0]["slug"], "kurttepe");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_oversized_limit() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.get("/api/v1/settings/branches?limit=1000")
		.authorization_bearer(&token)
		.await;

	assert!(response.status_code().is_client_error());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_branch_by_id_and_slug() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	let by_id = env
		.app
		.get(&format!("/api/v1/settings/branches/{KURTTEPE_ID}"))
		.authorization_bearer(&token)
		.await;

	let by_slug = env
		.app
		.get("/api/v1/settings/branches/kurttepe")
		.authorization_bearer(&token)
		.await;

	by_id.assert_status_ok();
	by_slug.assert_status_ok();

	assert_eq!(by_id.json::<Value>(), by_slug.json::<Value>());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_other_branch_is_forbidden() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	let response = env
		.app
		.get("/api/v1/settings/branches/ankara")
		.authorization_bearer(&token)
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_branch() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.get("/api/v1/settings/branches/nowhere")
		.authorization_bearer(&token)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_prefix_serves_the_same_routes() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	env.app
		.get("/api/v1/admin/settings/branches")
		.authorization_bearer(&token)
		.await
		.assert_status_ok();
}

#[tokio::test(flavor = "multi_thread")]
async fn superuser_creates_branch() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.post("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.json(&json!({
			"slug": "barajyolu",
			"name": "Adana Ustam Barajyolu",
			"default_links": { "order": "https://order.example.com/b" },
			"link_order": ["order"],
		}))
		.await;

	response.assert_status_ok();

	let body = response.json::<Value>();

	assert_eq!(body["slug"], "barajyolu");
	assert_eq!(body["default_links"]["order"], "https://order.example.com/b");
	assert_eq!(body["display_whatsapp_number"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_user_can_not_create_branch() {
	let env = TestEnv::new().await;
	let token = env.login(ANKARA_STAFF).await;

	let response = env
		.app
		.post("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.json(&json!({ "slug": "istanbul", "name": "Istanbul" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_slug_conflicts() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.post("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.json(&json!({ "slug": "ankara", "name": "Second Ankara" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_slug_is_rejected() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.post("/api/v1/settings/branches")
		.authorization_bearer(&token)
		.json(&json!({ "slug": "Not A Slug", "name": "Broken" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_user_updates_own_branch() {
	let env = TestEnv::new().await;
	let token = env.login(ANKARA_STAFF).await;

	let response = env
		.app
		.put(&format!("/api/v1/settings/branches/{ANKARA_ID}"))
		.authorization_bearer(&token)
		.json(&json!({
			"name": "Adana Ustam Ankara Merkez",
			"display_whatsapp_number": "+90 555 000 00 02",
			"link_order": ["order"],
		}))
		.await;

	response.assert_status_ok();

	let body = response.json::<Value>();

	assert_eq!(body["name"], "Adana Ustam Ankara Merkez");
	assert_eq!(body["display_whatsapp_number"], "+90 555 000 00 02");
	assert_eq!(body["link_order"], json!(["order"]));
	assert_eq!(body["slug"], "ankara");
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_null_clears_whatsapp_number() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let response = env
		.app
		.put("/api/v1/settings/branches/kurttepe")
		.authorization_bearer(&token)
		.json(&json!({ "display_whatsapp_number": null }))
		.await;

	response.assert_status_ok();

	let body = response.json::<Value>();

	assert_eq!(body["display_whatsapp_number"], Value::Null);
	assert_eq!(body["name"], "Adana Ustam Kurttepe");
}

#[tokio::test(flavor = "multi_thread")]
async fn slug_can_not_change() {
	let env = TestEnv::new().await;
	let token = env.login(ADMIN).await;

	let changed = env
		.app
		.put("/api/v1/settings/branches/kurttepe")
		.authorization_bearer(&token)
		.json(&json!({ "slug": "kurttepe-2" }))
		.await;

	let repeated = env
		.app
		.put("/api/v1/settings/branches/kurttepe")
		.authorization_bearer(&token)
		.json(&json!({ "slug": "kurttepe" }))
		.await;

	assert_eq!(changed.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	repeated.assert_status_ok();
}

#[tokio::test(flavor = "multi_thread")]
async fn update_other_branch_is_forbidden() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	let response = env
		.app
		.put("/api/v1/settings/branches/ankara")
		.authorization_bearer(&token)
		.json(&json!({ "name": "Taken over" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
