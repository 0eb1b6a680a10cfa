use crate::models::user::PasswordCredentials;

/// Harness configuration, read from the environment once at startup.
/// Missing or malformed required values are fatal, by design: there is
/// no point starting a relay that cannot reach its gateway.
pub struct Config {
    pub port: u16,
    pub wsgw_host: String,
    pub wsgw_port: u16,
    pub delivery_timeout_secs: u64,
    pub credentials: Vec<PasswordCredentials>,
}

impl Config {
    pub fn from_env() -> Self {
        let wsgw_host =
            std::env::var("HARNESS_WSGW_HOST").expect("HARNESS_WSGW_HOST must be defined");
        let wsgw_port: u16 = std::env::var("HARNESS_WSGW_PORT")
            .expect("HARNESS_WSGW_PORT must be defined")
            .parse()
            .expect("HARNESS_WSGW_PORT must be a valid port number");

        let credentials_json =
            std::env::var("HARNESS_CREDENTIALS").expect("HARNESS_CREDENTIALS must be defined");
        let credentials: Vec<PasswordCredentials> = serde_json::from_str(&credentials_json)
            .expect("HARNESS_CREDENTIALS must be a JSON array of {username, password}");
        if credentials.is_empty() {
            panic!("HARNESS_CREDENTIALS must list at least one user");
        }

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(39080),
            wsgw_host,
            wsgw_port,
            delivery_timeout_secs: std::env::var("HARNESS_DELIVERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            credentials,
        }
    }

    /// Base URL of the gateway's HTTP surface.
    pub fn gateway_base_url(&self) -> String {
        format!("http://{}:{}", self.wsgw_host, self.wsgw_port)
    }
}
