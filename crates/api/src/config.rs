use zavia_core::access::Product;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Public site URL used to build checkout redirect URLs.
    pub app_base_url: String,
    /// Signups with one of these emails get the admin flag.
    pub admin_emails: Vec<String>,
    pub payments: PaymentsConfig,
}

/// Payment processor settings.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    pub api_base: String,
    /// Maximum webhook signature age in seconds.
    pub webhook_tolerance_secs: i64,
    pub prices: PriceTable,
}

/// Processor price ids per product. `None` means checkout is unavailable.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub canon: Option<String>,
    pub guild: Option<String>,
    pub fellowship: Option<String>,
    pub coaching: Option<String>,
}

impl PriceTable {
    pub fn price_id(&self, product: Product) -> Option<&str> {
        let id = match product {
            Product::Canon => &self.canon,
            Product::Guild => &self.guild,
            Product::Fellowship => &self.fellowship,
            Product::Coaching => &self.coaching,
        };
        id.as_deref()
    }
}

fn list_var(name: &str, default: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_else(|_| default.into())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                    |
    /// |---------------------------------|----------------------------|
    /// | `HOST`                          | `0.0.0.0`                  |
    /// | `PORT`                          | `3000`                     |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                       |
    /// | `APP_BASE_URL`                  | `http://localhost:3000`    |
    /// | `ADMIN_EMAILS`                  | (empty)                    |
    /// | `STRIPE_SECRET_KEY`             | (empty)                    |
    /// | `STRIPE_WEBHOOK_SECRET`         | (empty)                    |
    /// | `STRIPE_API_BASE`               | `https://api.stripe.com`   |
    /// | `STRIPE_WEBHOOK_TOLERANCE_SECS` | `300`                      |
    /// | `STRIPE_PRICE_CANON`            | (unset)                    |
    /// | `STRIPE_PRICE_GUILD`            | (unset)                    |
    /// | `STRIPE_PRICE_FELLOWSHIP`       | (unset)                    |
    /// | `STRIPE_PRICE_COACHING`         | (unset)                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = list_var("CORS_ORIGINS", "http://localhost:5173");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let admin_emails = list_var("ADMIN_EMAILS", "");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_base_url,
            admin_emails,
            payments: PaymentsConfig::from_env(),
        }
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}

impl PaymentsConfig {
    pub fn from_env() -> Self {
        let webhook_tolerance_secs: i64 = std::env::var("STRIPE_WEBHOOK_TOLERANCE_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("STRIPE_WEBHOOK_TOLERANCE_SECS must be a valid i64");

        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default();
        if webhook_secret.is_empty() {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is not set; every webhook will be rejected");
        }

        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            webhook_secret,
            api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
            webhook_tolerance_secs,
            prices: PriceTable {
                canon: optional_var("STRIPE_PRICE_CANON"),
                guild: optional_var("STRIPE_PRICE_GUILD"),
                fellowship: optional_var("STRIPE_PRICE_FELLOWSHIP"),
                coaching: optional_var("STRIPE_PRICE_COACHING"),
            },
        }
    }
}
