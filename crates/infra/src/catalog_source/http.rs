use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{info, warn};

use shelfscan_products::Product;

use super::r#trait::{CatalogSnapshot, CatalogSource, FetchError, resolve_location};
use crate::config::CatalogSourceConfig;

/// Fetches the catalog as a JSON array over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    default_url: Option<String>,
    allow_override: bool,
    max_body_bytes: usize,
}

impl HttpCatalogSource {
    pub fn new(config: &CatalogSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            default_url: config.default_url.clone(),
            allow_override: config.allow_url_override,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

/// Read the body, failing as soon as it grows past `limit`.
async fn read_bounded(mut resp: Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    if resp.content_length().is_some_and(|len| len > limit as u64) {
        return Err(FetchError::TooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?
    {
        if body.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

fn parse_url(location: &str) -> Result<Url, FetchError> {
    let url = Url::parse(location).map_err(|e| FetchError::InvalidLocation {
        location: location.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidLocation {
            location: location.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, location: Option<&str>) -> Result<CatalogSnapshot, FetchError> {
        let location =
            resolve_location(self.default_url.as_deref(), location, self.allow_override)?;
        let url = parse_url(location)?;
        let started = Instant::now();

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(source = %url, status = status.as_u16(), "catalog source rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = read_bounded(resp, self.max_body_bytes).await.inspect_err(|e| {
            warn!(source = %url, error = %e, "catalog body rejected");
        })?;
        let products: Vec<Product> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        info!(
            source = %url,
            products = products.len(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched catalog snapshot"
        );

        Ok(CatalogSnapshot::new(products, url.to_string()))
    }

    fn describe(&self) -> String {
        match &self.default_url {
            Some(url) => format!("http({url})"),
            None => "http(per-request url)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{Router, body::Body, http::StatusCode, routing::get};

    use super::*;

    // No content-length: the body arrives as a chunked stream.
    async fn streamed_catalog() -> Body {
        let chunks = (0..32).map(|i| {
            Ok::<_, std::io::Error>(format!(r#"{{"id": {i}, "name": "Pils"}},"#))
        });
        Body::from_stream(futures_util::stream::iter(chunks))
    }

    struct Upstream {
        base_url: String,
        handle: tokio::task::JoinHandle<()>,
    }

    impl Upstream {
        async fn spawn() -> Self {
            let app = Router::new()
                .route(
                    "/catalog.json",
                    get(|| async {
                        r#"[{"id": 1, "name": "Pils", "articles": [{"id": 10, "price": 9.99}]}]"#
                    }),
                )
                .route("/broken.json", get(|| async { "{ not json" }))
                .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }))
                .route("/streamed.json", get(streamed_catalog));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let handle = tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                base_url: format!("http://{addr}"),
                handle,
            }
        }
    }

    impl Drop for Upstream {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    fn config(default_url: Option<String>) -> CatalogSourceConfig {
        CatalogSourceConfig {
            default_url,
            timeout: Duration::from_secs(5),
            allow_url_override: true,
            ..CatalogSourceConfig::default()
        }
    }

    #[tokio::test]
    async fn fetches_and_decodes_catalog() {
        let upstream = Upstream::spawn().await;
        let feed = format!("{}/catalog.json", upstream.base_url);
        let source = HttpCatalogSource::new(&config(Some(feed))).unwrap();

        let snapshot = source.fetch(None).await.unwrap();
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.products[0].name.as_deref(), Some("Pils"));
        assert!(snapshot.source.ends_with("/catalog.json"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let upstream = Upstream::spawn().await;
        let source = HttpCatalogSource::new(&config(None)).unwrap();

        let err = source
            .fetch(Some(&format!("{}/missing.json", upstream.base_url)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let upstream = Upstream::spawn().await;
        let source = HttpCatalogSource::new(&config(None)).unwrap();

        let err = source
            .fetch(Some(&format!("{}/broken.json", upstream.base_url)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn request_urls_are_refused_by_default() {
        let upstream = Upstream::spawn().await;
        let source = HttpCatalogSource::new(&CatalogSourceConfig::default()).unwrap();

        let err = source
            .fetch(Some(&format!("{}/catalog.json", upstream.base_url)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::OverrideDisabled));
        assert!(err.is_caller_error());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let upstream = Upstream::spawn().await;
        let source = HttpCatalogSource::new(&CatalogSourceConfig {
            max_body_bytes: 16,
            ..config(None)
        })
        .unwrap();

        let err = source
            .fetch(Some(&format!("{}/catalog.json", upstream.base_url)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::TooLarge { limit: 16 }));
        assert!(!err.is_caller_error());
    }

    #[tokio::test]
    async fn oversized_streamed_body_is_rejected() {
        let upstream = Upstream::spawn().await;
        let source = HttpCatalogSource::new(&CatalogSourceConfig {
            max_body_bytes: 64,
            ..config(None)
        })
        .unwrap();

        let err = source
            .fetch(Some(&format!("{}/streamed.json", upstream.base_url)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::TooLarge { limit: 64 }));
    }

    #[tokio::test]
    async fn rejects_non_http_locations() {
        let source = HttpCatalogSource::new(&config(None)).unwrap();

        let err = source.fetch(Some("file:///etc/passwd")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidLocation { .. }));

        let err = source.fetch(Some("not a url")).await.unwrap_err();
        assert!(err.is_caller_error());
    }
}
