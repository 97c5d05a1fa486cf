// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use leanix_client::{
	client::LeanixClient,
	config::ClientConfig,
	error::Error,
	resource::{ResourceState, SubscriptionConfig, SubscriptionResource},
};

const TOKEN_PATH: &str = "/services/mtm/v1/oauth2/token";
const SUBSCRIPTIONS_PATH: &str = "/services/webhooks/v1/subscriptions";

fn build_client(server: &MockServer) -> LeanixClient {
	let config = ClientConfig::builder("reconcile-api-token")
		.base_url_str(&server.base_url())
		.expect("Mock server URL should parse.")
		.build()
		.expect("Client configuration should build.");

	LeanixClient::new(config).expect("Client should build.")
}

async fn start_server() -> MockServer {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"Bearer\",\"access_token\":\"reconcile-token\"}");
		})
		.await;

	server
}

fn desired() -> SubscriptionConfig {
	SubscriptionConfig::new("hook", "https://hooks.example.com/events", "POST")
		.with_tag_set(["pathfinder", "FACT_SHEET_UPDATED"])
		.with_tag_set(["pathfinder", "FACT_SHEET_ARCHIVED"])
}

fn envelope_for(config: &SubscriptionConfig, id: &str) -> serde_json::Value {
	json!({ "status": "Ok", "data": config.to_subscription(Some(id.into())) })
}

#[tokio::test]
async fn reconcile_creates_missing_resources() {
	let server = start_server().await;
	let desired = desired();
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(SUBSCRIPTIONS_PATH)
				.json_body(serde_json::to_value(desired.to_subscription(None)).expect("Encode."));
			then.status(200).json_body(envelope_for(&desired, "created-id"));
		})
		.await;
	let client = build_client(&server);
	let state = SubscriptionResource::new(&client)
		.reconcile(None, Some(&desired))
		.await
		.expect("Create should succeed.")
		.expect("A created resource should be tracked.");

	assert_eq!(state.id, "created-id");
	assert_eq!(state.config, desired);

	create_mock.assert_async().await;
}

#[tokio::test]
async fn reconcile_leaves_matching_resources_alone() {
	let server = start_server().await;
	let desired = desired();
	let mut observed = desired.clone();

	observed.tag_sets.reverse();

	let read_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("{SUBSCRIPTIONS_PATH}/stable"));
			then.status(200).json_body(envelope_for(&observed, "stable"));
		})
		.await;
	let update_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path(format!("{SUBSCRIPTIONS_PATH}/stable"));
			then.status(200).json_body(envelope_for(&desired, "stable"));
		})
		.await;
	let client = build_client(&server);
	let current = ResourceState { id: "stable".into(), config: desired.clone() };
	let state = SubscriptionResource::new(&client)
		.reconcile(Some(&current), Some(&desired))
		.await
		.expect("Refresh should succeed.")
		.expect("Existing resource should stay tracked.");

	assert_eq!(state.id, "stable");
	assert_eq!(state.config, observed);

	read_mock.assert_async().await;
	update_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn reconcile_updates_drifted_resources() {
	let server = start_server().await;
	let desired = desired();
	let drifted = SubscriptionConfig { active: false, ..desired.clone() };
	let _read_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("{SUBSCRIPTIONS_PATH}/drifted"));
			then.status(200).json_body(envelope_for(&drifted, "drifted"));
		})
		.await;
	let update_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path(format!("{SUBSCRIPTIONS_PATH}/drifted")).json_body(
				serde_json::to_value(desired.to_subscription(Some("drifted".into())))
					.expect("Encode."),
			);
			then.status(200).json_body(envelope_for(&desired, "drifted"));
		})
		.await;
	let client = build_client(&server);
	let current = ResourceState { id: "drifted".into(), config: desired.clone() };
	let state = SubscriptionResource::new(&client)
		.reconcile(Some(&current), Some(&desired))
		.await
		.expect("Update should succeed.")
		.expect("Updated resource should stay tracked.");

	assert_eq!(state.config, desired);

	update_mock.assert_async().await;
}

#[tokio::test]
async fn reconcile_recreates_resources_deleted_out_of_band() {
	let server = start_server().await;
	let desired = desired();
	let _read_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("{SUBSCRIPTIONS_PATH}/vanished"));
			then.status(200).json_body(json!({ "status": "Ok", "data": null }));
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBSCRIPTIONS_PATH);
			then.status(200).json_body(envelope_for(&desired, "replacement"));
		})
		.await;
	let client = build_client(&server);
	let resource = SubscriptionResource::new(&client);

	assert_eq!(resource.read("vanished").await.expect("Gone resources read as None."), None);

	let current = ResourceState { id: "vanished".into(), config: desired.clone() };
	let state = resource
		.reconcile(Some(&current), Some(&desired))
		.await
		.expect("Recreate should succeed.")
		.expect("Recreated resource should be tracked.");

	assert_eq!(state.id, "replacement");

	create_mock.assert_async().await;
}

#[tokio::test]
async fn reconcile_deletes_removed_resources() {
	let server = start_server().await;
	let desired = desired();
	let delete_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path(format!("{SUBSCRIPTIONS_PATH}/retired"));
			then.status(200).json_body(envelope_for(&desired, "retired"));
		})
		.await;
	let client = build_client(&server);
	let current = ResourceState { id: "retired".into(), config: desired };
	let state = SubscriptionResource::new(&client)
		.reconcile(Some(&current), None)
		.await
		.expect("Delete should succeed.");

	assert_eq!(state, None);

	delete_mock.assert_async().await;
}

#[tokio::test]
async fn empty_ids_are_rejected_locally() {
	let server = start_server().await;
	let client = build_client(&server);
	let resource = SubscriptionResource::new(&client);
	let read = resource.read("").await.expect_err("Empty ids cannot be refreshed.");
	let update = resource.update("", &desired()).await.expect_err("Empty ids cannot be updated.");
	let delete = resource.delete("").await.expect_err("Empty ids cannot be deleted.");

	assert!(matches!(read, Error::MissingId { .. }));
	assert!(matches!(update, Error::MissingId { .. }));
	assert!(matches!(delete, Error::MissingId { .. }));
	assert!(!client.credentials().is_cached());
}
