mod cors;
mod health;

use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use voxgate_config::Config;

/// Banner served at the root path
pub const BANNER: &str = "voxgate online";

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the speech dispatcher or tool state cannot be
    /// initialized, including when the storage directories cannot be created
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();

        let dispatcher = tts::build_dispatcher(config)?;
        let tools_state = tools::build_tools(config)?;

        let mut app = Router::new().route("/", get(|| async { BANNER }));

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Speech and cloning routes
        app = app.merge(tts::endpoint_router().with_state(dispatcher));

        // Tool routes
        app = app.merge(tools::endpoint_router().with_state(tools_state));

        // Generated artifacts
        app = app.nest_service("/downloads", ServeDir::new(&config.storage.outputs_dir));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
