use crate::errors::FetchError;
use crate::models::Deal;
use crate::state::{AppState, Feed};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub async fn fetch_deals(client: &Client, url: &str) -> Result<Vec<Deal>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Runs the single startup fetch and records its outcome in the feed.
pub async fn load_feed(state: AppState) {
    let url = state.config.deals_url.clone();
    let result = match build_client(state.config.fetch_timeout) {
        Ok(client) => fetch_deals(&client, &url).await,
        Err(err) => Err(err),
    };

    let feed = match result {
        Ok(deals) => {
            info!("loaded {} deals from {url}", deals.len());
            Feed::Ready(deals)
        }
        Err(err) => {
            error!("failed to load deals from {url}: {err}");
            Feed::Failed(err.to_string())
        }
    };
    state.resolve(feed).await;
}
