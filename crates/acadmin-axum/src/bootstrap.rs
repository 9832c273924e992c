//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! database, identity client, message broker and HTTP listener.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use acadmin_broker::{BrokerConfig, BrokerConnection};
use acadmin_core::ports::{EventPublisherPort, IdentityProviderPort, TokenPrecheckPort};
use acadmin_core::services::{AccessService, AppCore};
use acadmin_core::{LoggingEventHandler, NoopEventPublisher};
use acadmin_db::{CoreFactory, setup_database};
use acadmin_identity::{HttpIdentityClient, IdentityClientConfig, JwtDecoder};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Parse a comma-separated origin list; empty or `*` means allow all.
    pub fn from_list(origins: Option<&str>) -> Self {
        let origins: Vec<String> = origins
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Shared secret for local token verification.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: Option<String>,
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `sqlite://` connection URL.
    pub database_url: String,
    pub identity: IdentityClientConfig,
    /// Local JWT pre-validation; disabled when `None`.
    pub jwt: Option<JwtSettings>,
    /// Messaging; disabled when `None`.
    pub broker: Option<BrokerConfig>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with local defaults and messaging disabled.
    pub fn with_defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "sqlite://data/acadmin.db".to_string(),
            identity: IdentityClientConfig::default(),
            jwt: None,
            broker: None,
            cors: CorsConfig::default(),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Authorization gate shared by every API route.
    pub access: Arc<AccessService>,
}

impl AxumContext {
    pub fn new(core: AppCore, access: AccessService) -> Self {
        Self {
            core: Arc::new(core),
            access: Arc::new(access),
        }
    }
}

/// Build the access gate from the identity settings.
pub fn build_access_service(config: &ServerConfig) -> Result<AccessService> {
    let identity: Arc<dyn IdentityProviderPort> = Arc::new(
        HttpIdentityClient::new(config.identity.clone())
            .context("failed to build identity client")?,
    );
    let mut access = AccessService::new(identity);
    if let Some(jwt) = &config.jwt {
        let decoder: Arc<dyn TokenPrecheckPort> =
            Arc::new(JwtDecoder::new(&jwt.secret, jwt.issuer.as_deref()));
        access = access.with_precheck(decoder);
        tracing::info!(issuer = ?jwt.issuer, "local JWT pre-validation enabled");
    }
    Ok(access)
}

/// Connect to the broker if configured.
///
/// An unreachable broker is not fatal: the server keeps running with
/// events dropped.
pub async fn connect_broker(config: Option<&BrokerConfig>) -> Option<BrokerConnection> {
    let config = config?;
    match BrokerConnection::connect(config.clone()).await {
        Ok(connection) => Some(connection),
        Err(e) => {
            tracing::warn!(error = %e, "message broker unavailable, continuing without events");
            None
        }
    }
}

/// Bootstrap the HTTP context: database, services and the access gate.
pub async fn bootstrap(
    config: &ServerConfig,
    publisher: Arc<dyn EventPublisherPort>,
) -> Result<AxumContext> {
    let pool = setup_database(&config.database_url).await?;
    let core = CoreFactory::build_app_core(pool, publisher);
    let access = build_access_service(config)?;
    Ok(AxumContext::new(core, access))
}

fn spawn_consumer(connection: &BrokerConnection, cancel: CancellationToken) -> JoinHandle<()> {
    let consumer = connection.consumer();
    tokio::spawn(async move {
        if let Err(e) = consumer.run(Arc::new(LoggingEventHandler), cancel).await {
            tracing::error!(error = %e, "event consumer exited with error");
        }
    })
}

/// Resolve when Ctrl-C or SIGTERM arrives, then cancel background tasks.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
    cancel.cancel();
}

/// Run the server until a shutdown signal arrives.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = config.bind_addr()?;

    let broker = connect_broker(config.broker.as_ref()).await;
    let publisher: Arc<dyn EventPublisherPort> = match &broker {
        Some(connection) => Arc::new(connection.publisher()),
        None => Arc::new(NoopEventPublisher::new()),
    };

    let ctx = bootstrap(&config, publisher).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let cancel = CancellationToken::new();
    let consumer = broker
        .as_ref()
        .map(|connection| spawn_consumer(connection, cancel.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, messaging = broker.is_some(), "acadmin back-office listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    cancel.cancel();
    if let Some(handle) = consumer {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "event consumer task failed to join");
        }
    }
    if let Some(connection) = broker {
        if let Err(e) = connection.close().await {
            tracing::warn!(error = %e, "failed to close broker connection cleanly");
        }
    }
    tracing::info!("server stopped");
    Ok(())
}
