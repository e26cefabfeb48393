use crate::error::Error;
use reqwest::Client;

/// Builds the shared HTTP client. No client-level timeout is set; the
/// executor enforces the per-request timeout so classification lives in
/// one place.
pub(crate) fn build_client() -> Result<Client, Error> {
    Client::builder().build().map_err(Error::ClientInit)
}

/// One GET against `url`. The body is downloaded and discarded; only
/// completion matters. Non-success statuses map to an error and count as
/// transport failures.
pub(crate) async fn fetch(client: Client, url: String) -> Result<(), reqwest::Error> {
    let response = client.get(&url).send().await?.error_for_status()?;
    response.bytes().await?;
    Ok(())
}
