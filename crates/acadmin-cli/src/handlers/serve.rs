//! Serve command handler.

use anyhow::Result;

use crate::commands::ServeArgs;

/// Run the HTTP server until a shutdown signal arrives.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database_url,
        messaging = config.broker.is_some(),
        jwt_precheck = config.jwt.is_some(),
        "starting back-office server"
    );
    acadmin_axum::start_server(config).await
}
