use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Shared outbound client so provider calls reuse pooled connections
///
/// No request timeout is set: provider calls run under transport defaults.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .user_agent(concat!("voxgate/", env!("CARGO_PKG_VERSION")))
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
