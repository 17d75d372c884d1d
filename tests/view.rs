use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;

use common::{KURTTEPE_STAFF, TestEnv};

async fn create_table(env: &TestEnv, token: &str, number: i32) -> Value {
	let response = env
		.app
		.post("/api/v1/tables/bulk")
		.authorization_bearer(token)
		.json(&json!({ "start_number": number, "end_number": number }))
		.await;

	response.assert_status_ok();

	response.json::<Vec<Value>>().remove(0)
}

fn keys(body: &Value) -> Vec<&str> {
	body["ordered_links"]
		.as_array()
		.unwrap()
		.iter()
		.map(|l| l["key"].as_str().unwrap())
		.collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn customer_sees_branch_links_in_order() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	create_table(&env, &token, 5).await;

	let response = env.app.get("/api/v1/musteri/sube/kurttepe/table/5").await;

	response.assert_status_ok();

	let body = response.json::<Value>();

	assert_eq!(
		keys(&body),
		vec!["order", "whatsapp", "instagram", "feedback", "branchAnkara"]
	);
	assert_eq!(body["display_whatsapp_number"], "+90 555 000 00 01");
	assert_eq!(body["ordered_links"][0]["label"], "Bir Tıkla Sipariş Ver!");
	assert_eq!(body["ordered_links"][4]["label"], "Ankara Şubemiz");
}

#[tokio::test(flavor = "multi_thread")]
async fn table_overrides_replace_branch_links() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	let table = create_table(&env, &token, 2).await;
	let table_id = table["id"].as_i64().unwrap();

	env.app
		.put(&format!("/api/v1/tables/{table_id}"))
		.authorization_bearer(&token)
		.json(&json!({
			"overridden_links": {
				"instagram": "https://instagram.com/table-two",
				"tiktok": "https://tiktok.com/@table-two",
			},
		}))
		.await
		.assert_status_ok();

	let body = env
		.app
		.get("/api/v1/musteri/sube/kurttepe/table/2")
		.await
		.json::<Value>();

	let instagram = body["ordered_links"]
		.as_array()
		.unwrap()
		.iter()
		.find(|l| l["key"] == "instagram")
		.unwrap();

	assert_eq!(instagram["url"], "https://instagram.com/table-two");

	// Keys outside the branch's link order are not shown
	assert!(!keys(&body).contains(&"tiktok"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_branch_or_table() {
	let env = TestEnv::new().await;
	let token = env.login(KURTTEPE_STAFF).await;

	create_table(&env, &token, 1).await;

	let unknown_branch =
		env.app.get("/api/v1/musteri/sube/atlantis/table/1").await;
	let unknown_table =
		env.app.get("/api/v1/musteri/sube/kurttepe/table/99").await;
	let other_branch = env.app.get("/api/v1/musteri/sube/ankara/table/1").await;

	assert_eq!(unknown_branch.status_code(), StatusCode::NOT_FOUND);
	assert_eq!(unknown_table.status_code(), StatusCode::NOT_FOUND);
	assert_eq!(other_branch.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn table_number_must_be_positive() {
	let env = TestEnv::new().await;

	let response = env.app.get("/api/v1/musteri/sube/kurttepe/table/0").await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_table_number_is_a_json_error() {
	let env = TestEnv::new().await;

	let response = env.app.get("/api/v1/musteri/sube/kurttepe/table/abc").await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(response.json::<Value>()["code"], 14);
}

#[tokio::test(flavor = "multi_thread")]
async fn healthcheck_reports_no_content() {
	let env = TestEnv::new().await;

	let response = env.app.get("/healthcheck").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}
