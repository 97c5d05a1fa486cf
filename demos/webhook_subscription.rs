//! Demonstrates the subscription lifecycle against a stubbed LeanIX service: one token exchange,
//! then create, read, and delete calls that reuse the memoized credential.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use leanix_client::{
	client::LeanixClient,
	config::ClientConfig,
	resource::{SubscriptionConfig, SubscriptionResource},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let desired = SubscriptionConfig::new("demo-hook", "https://hooks.example.com/events", "POST")
		.with_tag_set(["pathfinder", "FACT_SHEET_UPDATED"]);
	let persisted = json!({ "status": "Ok", "data": desired.to_subscription(Some("demo-id".into())) });
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/services/mtm/v1/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"Bearer\",\"access_token\":\"demo-access\"}");
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/services/webhooks/v1/subscriptions");
			then.status(200).json_body(persisted.clone());
		})
		.await;
	let read_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/services/webhooks/v1/subscriptions/demo-id");
			then.status(200).json_body(persisted.clone());
		})
		.await;
	let delete_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/services/webhooks/v1/subscriptions/demo-id");
			then.status(200).json_body(persisted.clone());
		})
		.await;
	let config = ClientConfig::builder("demo-api-token").base_url_str(&server.base_url())?.build()?;
	let client = LeanixClient::new(config)?;
	let resource = SubscriptionResource::new(&client);
	let created = resource.create(&desired).await?;

	println!("Created subscription {} ({}).", created.id, created.config.identifier);

	let refreshed = resource.read(&created.id).await?;

	println!("Refreshed subscription present: {}.", refreshed.is_some());

	resource.delete(&created.id).await?;

	println!("Deleted subscription {}.", created.id);

	token_mock.assert_async().await;
	create_mock.assert_async().await;
	read_mock.assert_async().await;
	delete_mock.assert_async().await;

	Ok(())
}
