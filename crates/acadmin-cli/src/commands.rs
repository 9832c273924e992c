//! Subcommands and their argument groups.
//!
//! Every option falls back to an environment variable so the service can be
//! configured entirely from the container environment or a `.env` file.

use std::time::Duration;

use clap::{Args, Subcommand};

use acadmin_axum::bootstrap::JwtSettings;
use acadmin_axum::{CorsConfig, ServerConfig};
use acadmin_broker::BrokerConfig;
use acadmin_identity::IdentityClientConfig;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the back-office REST API
    Serve(ServeArgs),

    /// Create the database and schema, then exit
    InitDb(DatabaseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://data/acadmin.db")]
    pub database_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// Base URL of the identity service
    #[arg(
        id = "identity_url",
        long = "identity-url",
        env = "IDENTITY_SERVICE_URL",
        default_value = "http://localhost:8001"
    )]
    pub url: String,

    /// Path of the profile endpoint on the identity service
    #[arg(
        long = "identity-profile-path",
        env = "IDENTITY_PROFILE_PATH",
        default_value = "/api/v1/auth/me"
    )]
    pub profile_path: String,

    /// Identity request timeout in seconds
    #[arg(
        long = "identity-timeout",
        env = "IDENTITY_TIMEOUT_SECS",
        default_value_t = 10
    )]
    pub timeout_secs: u64,

    /// Shared secret for local JWT pre-validation
    #[arg(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Expected `iss` claim when JWT pre-validation is enabled
    #[arg(long = "jwt-issuer", env = "JWT_ISSUER")]
    pub jwt_issuer: Option<String>,
}

impl IdentityArgs {
    fn client_config(&self) -> IdentityClientConfig {
        IdentityClientConfig::default()
            .with_base_url(&self.url)
            .with_profile_path(&self.profile_path)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    fn jwt_settings(&self) -> Option<JwtSettings> {
        let secret = self.jwt_secret.as_deref().filter(|s| !s.is_empty())?;
        Some(JwtSettings {
            secret: secret.to_string(),
            issuer: self.jwt_issuer.clone().filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct BrokerArgs {
    /// AMQP URL; messaging is disabled when unset
    #[arg(
        id = "rabbitmq_url",
        long = "rabbitmq-url",
        env = "RABBITMQ_URL",
        hide_env_values = true
    )]
    pub url: Option<String>,

    #[arg(
        long = "rabbitmq-exchange",
        env = "RABBITMQ_EXCHANGE",
        default_value = "academic.events"
    )]
    pub exchange: String,

    #[arg(
        long = "rabbitmq-queue",
        env = "RABBITMQ_QUEUE",
        default_value = "backoffice.events"
    )]
    pub queue: String,

    #[arg(
        long = "rabbitmq-routing-key",
        env = "RABBITMQ_ROUTING_KEY",
        default_value = "#"
    )]
    pub routing_key: String,
}

impl BrokerArgs {
    fn broker_config(&self) -> Option<BrokerConfig> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        Some(
            BrokerConfig::new(url)
                .with_exchange(&self.exchange)
                .with_queue(&self.queue)
                .with_routing_key(&self.routing_key),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ACADMIN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "ACADMIN_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Comma-separated allowed origins; empty or `*` allows all
    #[arg(long = "cors-origins", env = "CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub broker: BrokerArgs,
}

impl ServeArgs {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            identity: self.identity.client_config(),
            jwt: self.identity.jwt_settings(),
            broker: self.broker.broker_config(),
            cors: CorsConfig::from_list(self.cors_origins.as_deref()),
            host: self.host,
            port: self.port,
            database_url: self.database.database_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    fn serve_args(args: &[&str]) -> ServeArgs {
        let argv = ["acadmin", "serve"].iter().chain(args).copied();
        match Cli::parse_from(argv).command {
            Some(Commands::Serve(args)) => args,
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_serve_flags_build_config() {
        let config = serve_args(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--database-url",
            "sqlite://tmp/test.db",
            "--identity-url",
            "http://identity:9000",
            "--identity-timeout",
            "3",
            "--cors-origins",
            "https://a.edu,https://b.edu",
        ])
        .into_config();

        assert_eq!(config.bind_addr().unwrap().port(), 9100);
        assert_eq!(config.database_url, "sqlite://tmp/test.db");
        assert_eq!(
            config.identity.profile_url().unwrap().as_str(),
            "http://identity:9000/api/v1/auth/me"
        );
        assert_eq!(
            config.cors,
            CorsConfig::AllowOrigins(vec![
                "https://a.edu".to_string(),
                "https://b.edu".to_string()
            ])
        );
    }

    #[test]
    fn test_broker_enabled_only_with_url() {
        let args = serve_args(&["--rabbitmq-url", "amqp://localhost:5672/%2f"]);
        let broker = args.broker.broker_config().unwrap();
        assert_eq!(broker.url, "amqp://localhost:5672/%2f");

        let empty = BrokerArgs {
            url: Some(String::new()),
            exchange: "x".to_string(),
            queue: "q".to_string(),
            routing_key: "#".to_string(),
        };
        assert!(empty.broker_config().is_none());
    }

    #[test]
    fn test_identity_and_broker_urls_stay_separate() {
        let config = serve_args(&[
            "--identity-url",
            "http://identity:9000",
            "--rabbitmq-url",
            "amqp://rabbit:5672/%2f",
        ])
        .into_config();

        assert_eq!(
            config.identity.profile_url().unwrap().as_str(),
            "http://identity:9000/api/v1/auth/me"
        );
        assert_eq!(config.broker.unwrap().url, "amqp://rabbit:5672/%2f");
    }

    #[test]
    fn test_jwt_settings_require_secret() {
        let args = serve_args(&["--jwt-secret", "s3cret", "--jwt-issuer", "identity"]);
        let jwt = args.identity.jwt_settings().unwrap();
        assert_eq!(jwt.secret, "s3cret");
        assert_eq!(jwt.issuer.as_deref(), Some("identity"));

        let none = IdentityArgs {
            jwt_secret: Some(String::new()),
            ..args.identity
        };
        assert!(none.jwt_settings().is_none());
    }
}
