use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::orders::OrderPolicy;
use crate::utils::time::parse_timezone;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Minimum JWT secret length outside development
const MIN_JWT_SECRET_LEN: usize = 32;

/// Image storage configuration
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// S3 bucket; when set, images are stored in S3 instead of on disk
    pub s3_bucket: Option<String>,
    /// Public base URL prefixed to stored image keys
    pub public_base_url: Option<String>,
    /// Local image directory (used when `s3_bucket` is unset)
    pub local_dir: String,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | table_order.db | SQLite file path (`:memory:` allowed) |
/// | HTTP_PORT / PORT | 5000 | listening port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | dev fallback | required (>= 32 chars) outside development |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
/// | JWT_ISSUER / JWT_AUDIENCE | table-server / table-clients | token iss / aud |
/// | LOG_LEVEL / LOG_JSON / LOG_DIR | info / false / unset | logging |
/// | BUSINESS_TIMEZONE | UTC | analytics day boundaries |
/// | IMAGE_S3_BUCKET | unset | store images in S3 |
/// | IMAGE_PUBLIC_BASE_URL | derived | public URL prefix for images |
/// | IMAGE_DIR | ./uploads/images | local image directory |
/// | CLAMP_FINAL_AMOUNT | false | clamp order final amount at zero |
/// | ENFORCE_OFFER_COUPON_GATE | false | honor `allow_coupons=false` on offers |
/// | RECONCILE_ON_STARTUP | true | run the offer mirror consistency pass at boot |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub business_timezone: Tz,
    pub images: ImageConfig,
    pub order_policy: OrderPolicy,
    pub reconcile_on_startup: bool,
}

impl Default for Config {
    /// Development defaults, no environment lookups
    fn default() -> Self {
        Self {
            database_url: "table_order.db".into(),
            http_port: 5000,
            environment: "development".into(),
            jwt: JwtConfig::default(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            business_timezone: Tz::UTC,
            images: ImageConfig {
                s3_bucket: None,
                public_base_url: None,
                local_dir: "./uploads/images".into(),
            },
            order_policy: OrderPolicy::default(),
            reconcile_on_startup: true,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, using development fallback");
                format!("dev-{name}-not-for-production-use-only")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment)?;
        if environment != "development" && jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(
                format!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long").into(),
            );
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            http_port: std::env::var("HTTP_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            environment,
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES")
                    .unwrap_or(defaults.jwt.expiration_minutes),
                issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
                audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience),
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_parse("LOG_JSON").unwrap_or(defaults.log_json),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .map(|tz| parse_timezone(&tz))
                .unwrap_or(defaults.business_timezone),
            images: ImageConfig {
                s3_bucket: std::env::var("IMAGE_S3_BUCKET").ok().filter(|s| !s.is_empty()),
                public_base_url: std::env::var("IMAGE_PUBLIC_BASE_URL")
                    .ok()
                    .filter(|s| !s.is_empty()),
                local_dir: std::env::var("IMAGE_DIR").unwrap_or(defaults.images.local_dir),
            },
            order_policy: OrderPolicy {
                clamp_final_amount: env_parse("CLAMP_FINAL_AMOUNT")
                    .unwrap_or(defaults.order_policy.clamp_final_amount),
                enforce_offer_coupon_gate: env_parse("ENFORCE_OFFER_COUPON_GATE")
                    .unwrap_or(defaults.order_policy.enforce_offer_coupon_gate),
            },
            reconcile_on_startup: env_parse("RECONCILE_ON_STARTUP")
                .unwrap_or(defaults.reconcile_on_startup),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
