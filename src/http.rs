//! Shared HTTP plumbing for the remote collaborators.
use eyre::Result;

/// Build a configured HTTP client with a descriptive User-Agent.
pub fn build_http_client() -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "market-research/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
