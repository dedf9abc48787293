use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::DashboardError;

pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub dataset_url: String,
}

impl Settings {
    /// Reads settings from the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, DashboardError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let host = match lookup("HOST") {
            Some(host) => host
                .parse()
                .map_err(|_| DashboardError::Config(format!("HOST must be an IP address, got `{}`", host)))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| DashboardError::Config(format!("PORT must be a number, got `{}`", port)))?,
            None => DEFAULT_PORT,
        };

        let dataset_url = lookup("DATASET_URL").unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

        Ok(Settings {
            host,
            port,
            dataset_url,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, DashboardError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.port, 8050);
        assert_eq!(settings.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(settings.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(settings.socket_addr().to_string(), "127.0.0.1:8050");
    }

    #[test]
    fn test_overrides_from_environment() {
        let settings = settings_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DATASET_URL", "http://localhost/sales.csv"),
        ])
        .unwrap();

        assert_eq!(settings.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(settings.dataset_url, "http://localhost/sales.csv");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = settings_from(&[("PORT", "eighty")]);

        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
