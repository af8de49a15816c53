//! Shared HTTP plumbing for the built-in widgets.

use gaze_types::{FetchError, FetchSettings};
use std::time::Duration;

/// Build the client every built-in widget shares.
pub fn build_client(settings: &FetchSettings) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(settings.user_agent.clone())
        .build()
        .unwrap_or_default()
}

/// Send `request`, turning transport failures and non-2xx statuses into
/// [`FetchError`]s.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    let resp = request
        .send()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    Ok(resp)
}

/// GET `url` and decode the JSON body.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    send(client.get(url), url)
        .await?
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}
