use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// REST backend for the agency admin dashboard.
/// Data lives in one JSON file; uploaded images sit next to it.
#[derive(Debug, Clone, Parser)]
#[command(name = "agency-admin-server", version, about = "Agency admin REST store")]
pub struct ServerConfig {
    /// Interface to bind; use 0.0.0.0 to expose the dashboard on the LAN.
    #[arg(long, env = "ADMIN_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "ADMIN_SERVER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// JSON snapshot of every collection.
    #[arg(long, env = "ADMIN_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Built dashboard (trunk output) served for every non-API path.
    #[arg(long, env = "ADMIN_DIST_DIR", default_value = "dist")]
    pub dist: PathBuf,

    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@agency.local")]
    pub admin_email: String,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin")]
    pub admin_password: String,
}

impl ServerConfig {
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }

    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn is_public(&self) -> bool {
        self.host == "0.0.0.0"
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agency-admin")
        .join("store.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally() {
        let config = ServerConfig::parse_from(["agency-admin-server"]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:5000");
        assert!(!config.is_public());
        assert!(config.data_file().ends_with("agency-admin/store.json"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "agency-admin-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--data-file",
            "/tmp/admin.json",
        ]);
        assert!(config.is_public());
        assert_eq!(config.data_file(), PathBuf::from("/tmp/admin.json"));
    }
}
