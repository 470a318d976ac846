use std::env;
use std::str::FromStr;
use tracing::warn;

/// Where the slot generator gets its availability flags from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAvailabilityMode {
    /// Independent random draws per slot. Placeholder behaviour.
    Random,
    /// Deterministic lookup against known bookings.
    Schedule,
}

impl FromStr for SlotAvailabilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SlotAvailabilityMode::Random),
            "schedule" => Ok(SlotAvailabilityMode::Schedule),
            other => Err(format!("unknown slot availability mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth_jwt_secret: String,
    pub server_port: u16,
    pub home_route: String,
    pub default_doctor_id: String,
    pub slot_availability_mode: SlotAvailabilityMode,
    pub booking_submit_delay_ms: u64,
    pub booking_submit_max_retries: u32,
    pub booking_retry_base_delay_ms: u64,
    pub booking_retry_max_delay_ms: u64,
    pub booking_session_idle_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_jwt_secret: String::new(),
            server_port: 3000,
            home_route: "/".to_string(),
            default_doctor_id: "doc-1".to_string(),
            slot_availability_mode: SlotAvailabilityMode::Schedule,
            booking_submit_delay_ms: 2000,
            booking_submit_max_retries: 2,
            booking_retry_base_delay_ms: 250,
            booking_retry_max_delay_ms: 2000,
            booking_session_idle_secs: 1800,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            auth_jwt_secret: env::var("AUTH_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("AUTH_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            server_port: parse_or("PORT", defaults.server_port),
            home_route: env::var("HOME_ROUTE")
                .unwrap_or_else(|_| defaults.home_route.clone()),
            default_doctor_id: env::var("DEFAULT_DOCTOR_ID")
                .unwrap_or_else(|_| defaults.default_doctor_id.clone()),
            slot_availability_mode: parse_or(
                "SLOT_AVAILABILITY_MODE",
                defaults.slot_availability_mode,
            ),
            booking_submit_delay_ms: parse_or(
                "BOOKING_SUBMIT_DELAY_MS",
                defaults.booking_submit_delay_ms,
            ),
            booking_submit_max_retries: parse_or(
                "BOOKING_SUBMIT_MAX_RETRIES",
                defaults.booking_submit_max_retries,
            ),
            booking_retry_base_delay_ms: parse_or(
                "BOOKING_RETRY_BASE_DELAY_MS",
                defaults.booking_retry_base_delay_ms,
            ),
            booking_retry_max_delay_ms: parse_or(
                "BOOKING_RETRY_MAX_DELAY_MS",
                defaults.booking_retry_max_delay_ms,
            ),
            booking_session_idle_secs: parse_or(
                "BOOKING_SESSION_IDLE_SECS",
                defaults.booking_session_idle_secs,
            ),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - signed-in routes will reject every request");
        }

        config
    }

    /// Auth needs a signing secret; everything else has a usable default.
    pub fn is_configured(&self) -> bool {
        !self.auth_jwt_secret.is_empty()
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
