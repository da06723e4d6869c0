use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::path::PathBuf;

/// Default Zoom OAuth base URL used when `ZOOM_OAUTH_BASE_URL` is not set.
pub const DEFAULT_ZOOM_OAUTH_BASE_URL: &str = "https://zoom.us";

/// Default Zoom REST API base URL used when `ZOOM_API_BASE_URL` is not set.
pub const DEFAULT_ZOOM_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Origin value that allows any caller to receive server responses.
pub const ANY_ORIGIN: &str = "*";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that are allowed to receive server responses.
    /// A single `*` reflects whatever origin the caller presents.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = ANY_ORIGIN
    )]
    pub allowed_origins: Vec<String>,

    /// Require a bearer token (see `API_AUTH_TOKEN`) on every endpoint except the
    /// landing page, the health check and the webhook receiver.
    #[arg(long, env)]
    pub require_auth: bool,

    /// The bearer token callers must present when `REQUIRE_AUTH` is enabled.
    #[arg(long, env)]
    api_auth_token: Option<String>,

    /// Directory holding the last-value snapshot files.
    #[arg(long, env, default_value = "./")]
    pub snapshot_dir: PathBuf,

    /// The static HTML page served at the root path.
    #[arg(long, env, default_value = "./static/index.html")]
    pub landing_page: PathBuf,

    /// The secret token Zoom uses to sign webhook deliveries and validation challenges.
    #[arg(long, env)]
    zoom_webhook_secret_token: Option<String>,

    /// Reject webhook events whose `x-zm-signature` header does not verify.
    #[arg(long, env)]
    pub verify_webhook_signatures: bool,

    /// Maximum age in seconds of the `x-zm-request-timestamp` header when
    /// webhook signatures are verified.
    #[arg(long, env, default_value_t = 300)]
    pub webhook_timestamp_tolerance_secs: i64,

    /// Client ID of the Server-to-Server OAuth app.
    #[arg(long, env)]
    zoom_s2s_client_id: Option<String>,

    /// Client secret of the Server-to-Server OAuth app.
    #[arg(long, env)]
    zoom_s2s_client_secret: Option<String>,

    /// Zoom account ID the Server-to-Server OAuth app issues tokens for.
    #[arg(long = "zoom-s2s-account-id", env = "ZOOM_S2S_ACCOUNTID")]
    zoom_s2s_account_id: Option<String>,

    /// Client ID of the user-level OAuth app.
    #[arg(long, env)]
    zoom_oauth_userlevel_client_id: Option<String>,

    /// Client secret of the user-level OAuth app.
    #[arg(long, env)]
    zoom_oauth_userlevel_client_secret: Option<String>,

    /// Redirect URI registered with the user-level OAuth app. Must match the
    /// value configured on the Zoom Marketplace exactly.
    #[arg(
        long,
        env,
        default_value = "http://localhost:4001/redirecturlforoauth"
    )]
    zoom_oauth_redirect_uri: String,

    /// Meeting SDK key (also called client ID). Safe to hand out to clients.
    #[arg(long, env)]
    zoom_sdk_key: Option<String>,

    /// Meeting SDK secret used to sign SDK signatures. Never leaves the server.
    #[arg(long, env)]
    zoom_sdk_secret: Option<String>,

    /// The base URL of the Zoom OAuth service.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_BASE_URL)]
    zoom_oauth_base_url: String,

    /// The base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_API_BASE_URL)]
    zoom_api_base_url: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4001)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// True when the origin list is the wildcard, i.e. any origin is reflected.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }

    pub fn api_auth_token(&self) -> Option<String> {
        self.api_auth_token.clone()
    }

    pub fn zoom_webhook_secret_token(&self) -> Option<String> {
        self.zoom_webhook_secret_token.clone()
    }

    pub fn zoom_s2s_client_id(&self) -> Option<String> {
        self.zoom_s2s_client_id.clone()
    }

    pub fn zoom_s2s_client_secret(&self) -> Option<String> {
        self.zoom_s2s_client_secret.clone()
    }

    pub fn zoom_s2s_account_id(&self) -> Option<String> {
        self.zoom_s2s_account_id.clone()
    }

    pub fn zoom_oauth_userlevel_client_id(&self) -> Option<String> {
        self.zoom_oauth_userlevel_client_id.clone()
    }

    pub fn zoom_oauth_userlevel_client_secret(&self) -> Option<String> {
        self.zoom_oauth_userlevel_client_secret.clone()
    }

    /// Returns the redirect URI sent along with authorization code exchanges.
    pub fn zoom_oauth_redirect_uri(&self) -> &str {
        &self.zoom_oauth_redirect_uri
    }

    pub fn zoom_sdk_key(&self) -> Option<String> {
        self.zoom_sdk_key.clone()
    }

    pub fn zoom_sdk_secret(&self) -> Option<String> {
        self.zoom_sdk_secret.clone()
    }

    /// Returns the Zoom OAuth base URL.
    pub fn zoom_oauth_base_url(&self) -> &str {
        &self.zoom_oauth_base_url
    }

    /// Returns the Zoom REST API base URL.
    pub fn zoom_api_base_url(&self) -> &str {
        &self.zoom_api_base_url
    }
}
