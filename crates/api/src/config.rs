/// Server configuration loaded from environment variables.
///
/// All fields except the two secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Origin of the dashboard SPA. OAuth relay pages `postMessage` the
    /// provider redirect parameters to this origin and nothing else.
    pub dashboard_origin: String,
    /// Public base URL of this server, used to build the OAuth redirect
    /// URIs registered with each provider (`{base}/connect/{provider}/callback`).
    pub public_base_url: String,
    /// Secret keying the HMAC signature on OAuth state tokens.
    pub app_secret: String,
    /// Hex-encoded 32-byte AES key sealing provider tokens at rest.
    pub token_seal_key: String,
    /// Per-provider OAuth app credentials and endpoint overrides.
    pub integrations: IntegrationsConfig,
}

/// OAuth app credentials for every connectable provider.
#[derive(Debug, Clone)]
pub struct IntegrationsConfig {
    pub google: OAuthAppConfig,
    pub meta: OAuthAppConfig,
    pub tiktok: OAuthAppConfig,
}

/// One provider's OAuth app registration.
///
/// Credentials are optional at boot: a deployment that only connects
/// Google Drive does not need Meta or TikTok apps registered. Handlers
/// reject authorize/complete calls for unconfigured providers.
#[derive(Debug, Clone, Default)]
pub struct OAuthAppConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Endpoint base overrides for sandboxes and stub servers; `None`
    /// means the provider's real endpoints.
    pub auth_base: Option<String>,
    pub token_base: Option<String>,
    pub api_base: Option<String>,
}

impl OAuthAppConfig {
    /// Whether both credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    fn from_env(id_var: &str, secret_var: &str, base_prefix: &str) -> Self {
        Self {
            client_id: std::env::var(id_var).unwrap_or_default(),
            client_secret: std::env::var(secret_var).unwrap_or_default(),
            auth_base: optional_env(&format!("{base_prefix}_AUTH_BASE")),
            token_base: optional_env(&format!("{base_prefix}_TOKEN_BASE")),
            api_base: optional_env(&format!("{base_prefix}_API_BASE")),
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `DASHBOARD_ORIGIN`      | `http://localhost:5173`    |
    /// | `PUBLIC_BASE_URL`       | `http://localhost:3000`    |
    /// | `APP_SECRET`            | required                   |
    /// | `TOKEN_SEAL_KEY`        | required (64 hex chars)    |
    ///
    /// Provider apps: `GOOGLE_CLIENT_ID`/`GOOGLE_CLIENT_SECRET`,
    /// `META_APP_ID`/`META_APP_SECRET`, `TIKTOK_APP_ID`/`TIKTOK_APP_SECRET`,
    /// each with optional `*_AUTH_BASE`/`*_TOKEN_BASE`/`*_API_BASE` overrides.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let dashboard_origin = std::env::var("DASHBOARD_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let app_secret =
            std::env::var("APP_SECRET").expect("APP_SECRET must be set in the environment");
        assert!(!app_secret.is_empty(), "APP_SECRET must not be empty");

        let token_seal_key = std::env::var("TOKEN_SEAL_KEY")
            .expect("TOKEN_SEAL_KEY must be set in the environment");

        let integrations = IntegrationsConfig {
            google: OAuthAppConfig::from_env("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET", "GOOGLE"),
            meta: OAuthAppConfig::from_env("META_APP_ID", "META_APP_SECRET", "META"),
            tiktok: OAuthAppConfig::from_env("TIKTOK_APP_ID", "TIKTOK_APP_SECRET", "TIKTOK"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            dashboard_origin,
            public_base_url,
            app_secret,
            token_seal_key,
            integrations,
        }
    }

    /// Redirect URI for a provider's OAuth app, as registered with the
    /// provider's developer console.
    pub fn redirect_uri(&self, provider: adops_core::provider::Provider) -> String {
        format!("{}/connect/{}/callback", self.public_base_url, provider.as_str())
    }
}
