use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "0.0.0.0" or "127.0.0.1"
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding every artifact the service reads or writes
    pub root: PathBuf,
    /// Upper bound for a single upload request body, in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Run the screening tools through docker images instead of local binaries
    pub docker_screening: bool,
    /// Image used for virulence screening
    pub abricate_image: String,
    /// Image used for resistance screening
    pub amrfinder_image: String,
    /// Abricate database queried by the virulence screen
    pub virulence_db: String,
    pub bin: ToolPaths,
}

/// Program names or absolute paths for every external tool the service
/// shells out to. Overriding these is how tests substitute stub scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub datasets: String,
    pub unzip: String,
    pub docker: String,
    pub nucmer: String,
    pub delta_filter: String,
    pub show_coords: String,
    pub minimap2: String,
    /// Used when `docker_screening` is off
    pub abricate: String,
    /// Used when `docker_screening` is off
    pub amrfinder: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("uploads"),
            max_upload_bytes: 1024 * 1024 * 1024,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            docker_screening: true,
            abricate_image: "staphb/abricate".to_string(),
            amrfinder_image: "ncbi/amr".to_string(),
            virulence_db: "vfdb".to_string(),
            bin: ToolPaths::default(),
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            datasets: "datasets".to_string(),
            unzip: "unzip".to_string(),
            docker: "docker".to_string(),
            nucmer: "nucmer".to_string(),
            delta_filter: "delta-filter".to_string(),
            show_coords: "show-coords".to_string(),
            minimap2: "minimap2".to_string(),
            abricate: "abricate".to_string(),
            amrfinder: "amrfinder".to_string(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::CaduceusError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::CaduceusError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::CaduceusError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::CaduceusError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_stock_tools() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.store.root, PathBuf::from("uploads"));
        assert!(config.tools.docker_screening);
        assert_eq!(config.tools.bin.delta_filter, "delta-filter");
        assert_eq!(config.tools.virulence_db, "vfdb");
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9100

            [tools]
            docker_screening = false
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert!(!config.tools.docker_screening);
        assert_eq!(config.tools.abricate_image, "staphb/abricate");
        assert_eq!(config.store.max_upload_bytes, 1024 * 1024 * 1024);
    }

    #[test]
    fn saved_files_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caduceus.toml");

        let mut config = Config::default();
        config.server.port = 9310;
        config.tools.docker_screening = false;
        config.tools.bin.minimap2 = "/opt/minimap2".to_string();
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.server.port, 9310);
        assert!(!loaded.tools.docker_screening);
        assert_eq!(loaded.tools.bin.minimap2, "/opt/minimap2");
    }
}
