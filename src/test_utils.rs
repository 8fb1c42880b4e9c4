#[cfg(test)]
pub mod test_utils {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use common::{CAPACITY_ENDPOINT, GENERATION_ENDPOINT};
    use serde_json::Value;
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::config::ClientConfig;

    /// Path prefix the mock backend serves the chart endpoints under.
    pub const API_PREFIX: &str = "/api";

    /// Canned reply for one chart endpoint.
    #[derive(Clone)]
    pub struct Reply {
        pub status: StatusCode,
        pub body: Value,
    }

    impl Reply {
        pub fn ok(body: Value) -> Self {
            Self {
                status: StatusCode::OK,
                body,
            }
        }

        pub fn status(status: StatusCode) -> Self {
            Self {
                status,
                body: serde_json::json!({ "detail": "mock failure" }),
            }
        }
    }

    /// Chart backend listening on an ephemeral local port.
    pub struct MockBackend {
        pub addr: SocketAddr,
        pub generation_hits: Arc<AtomicUsize>,
        pub capacity_hits: Arc<AtomicUsize>,
    }

    impl MockBackend {
        pub fn base_url(&self) -> String {
            format!("http://{}{}", self.addr, API_PREFIX)
        }

        pub fn generation_hits(&self) -> usize {
            self.generation_hits.load(Ordering::SeqCst)
        }

        pub fn capacity_hits(&self) -> usize {
            self.capacity_hits.load(Ordering::SeqCst)
        }
    }

    fn counted_route(router: Router, path: String, reply: Reply, hits: Arc<AtomicUsize>) -> Router {
        router.route(
            &path,
            post(move || {
                let reply = reply.clone();
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (reply.status, Json(reply.body))
                }
            }),
        )
    }

    /// Start a mock backend answering both chart endpoints
    pub async fn spawn_backend(generation: Reply, capacity: Reply) -> MockBackend {
        init_test_tracing();

        let generation_hits = Arc::new(AtomicUsize::new(0));
        let capacity_hits = Arc::new(AtomicUsize::new(0));

        let router = counted_route(
            Router::new(),
            format!("{}{}", API_PREFIX, GENERATION_ENDPOINT),
            generation,
            generation_hits.clone(),
        );
        let router = counted_route(
            router,
            format!("{}{}", API_PREFIX, CAPACITY_ENDPOINT),
            capacity,
            capacity_hits.clone(),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock backend failed");
        });

        MockBackend {
            addr,
            generation_hits,
            capacity_hits,
        }
    }

    /// Client configuration pointing at `base_url` with a cache inside `dir`
    pub fn test_config(base_url: String, dir: &TempDir) -> ClientConfig {
        ClientConfig {
            api_url: base_url,
            cache_dir: dir.path().join("cache"),
            cache_expiration_ms: 3_600_000,
            cache_quota_bytes: 5 * 1024 * 1024,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN. Only the
    /// first call installs the subscriber.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
