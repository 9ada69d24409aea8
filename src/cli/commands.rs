//! CLI command implementations
//!
//! `serve` boots both stores and runs the HTTP server; `inspect` loads a
//! seed file into a single store and prints what the tree holds.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};
use crate::schema::{ChildRecord, NewChild};
use crate::store::{BalancedStore, OrderedStore, RecordStore};
use crate::tree::{SearchTree, TraversalOrder, TreeKind};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Listener and CORS settings
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// JSON array of records loaded into both stores at boot
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Lowest severity written to the log (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            seed_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.server.validate().map_err(CliError::config_error)?;

        if let Some(seed) = &self.seed_file {
            if !seed.is_file() {
                return Err(CliError::config_error(format!(
                    "seed_file '{}' does not exist",
                    seed.display()
                )));
            }
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Inspect {
            seed,
            variant,
            order,
        } => inspect(&seed, variant, order),
    }
}

/// Read a seed file: a JSON array of create payloads
pub fn read_seed(path: &Path) -> CliResult<Vec<NewChild>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::seed_error(format!("Failed to read seed '{}': {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        CliError::seed_error(format!("Invalid seed JSON '{}': {}", path.display(), e))
    })
}

/// Build both stores, seeded from `seed_file` when configured
pub fn boot_stores(config: &Config) -> CliResult<(OrderedStore, BalancedStore)> {
    let mut bst = OrderedStore::ordered();
    let mut avl = BalancedStore::balanced();

    if let Some(path) = &config.seed_file {
        let records = read_seed(path)?;
        seed_store(&mut bst, records.clone())?;
        seed_store(&mut avl, records)?;
    }

    Ok((bst, avl))
}

fn seed_store<T: SearchTree<ChildRecord>>(
    store: &mut RecordStore<T>,
    records: Vec<NewChild>,
) -> CliResult<usize> {
    store
        .load(records)
        .map_err(|e| CliError::seed_error(format!("{} store: {}", store.kind(), e)))
}

/// Start the HTTP server
///
/// 1. Load configuration (defaults when no file is given)
/// 2. Seed both stores
/// 3. Serve until Ctrl-C
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = port {
        config.server.port = port;
    }

    Logger::set_min_severity(config.log_level);
    let port_str = config.server.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("host", config.server.host.as_str()),
            ("port", port_str.as_str()),
        ],
    );

    let (bst, avl) = boot_stores(&config)?;
    let server = HttpServer::with_stores(config.server, bst, avl);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Load a seed file into one store and print it to stdout
pub fn inspect(seed: &Path, variant: TreeKind, order: TraversalOrder) -> CliResult<()> {
    // keep stdout pure JSON
    Logger::set_min_severity(Severity::Error);

    let report = inspect_report(seed, variant, order)?;

    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// The document printed by `inspect`
pub fn inspect_report(seed: &Path, variant: TreeKind, order: TraversalOrder) -> CliResult<Value> {
    let records = read_seed(seed)?;
    match variant {
        TreeKind::Bst => describe(OrderedStore::ordered(), records, order),
        TreeKind::Avl => describe(BalancedStore::balanced(), records, order),
    }
}

fn describe<T: SearchTree<ChildRecord>>(
    mut store: RecordStore<T>,
    records: Vec<NewChild>,
    order: TraversalOrder,
) -> CliResult<Value> {
    seed_store(&mut store, records)?;

    let children = store.list(order);
    Ok(json!({
        "tree": store.info(),
        "order": order,
        "children": children,
        "report": store.report(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use tempfile::TempDir;

    fn write_seed(temp_dir: &TempDir, documents: &[u64]) -> PathBuf {
        let path = temp_dir.path().join("seed.json");
        let records: Vec<Value> = documents
            .iter()
            .map(|d| {
                let city = if d % 2 == 0 { "Cali" } else { "Bogotá" };
                json!({
                    "document": d,
                    "name": "Valentina Rios",
                    "age": 6,
                    "city": city,
                    "gender": "Feminine",
                    "guardian": "Luz Rios"
                })
            })
            .collect();
        fs::write(&path, Value::Array(records).to_string()).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("childtree.json");
        fs::write(&config_path, "{}").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.log_level, Severity::Info);
    }

    #[test]
    fn test_config_flattened_fields() {
        let temp_dir = TempDir::new().unwrap();
        let seed = write_seed(&temp_dir, &[1]);
        let config_path = temp_dir.path().join("childtree.json");
        let config = json!({
            "port": 9100,
            "host": "0.0.0.0",
            "seed_file": seed,
            "log_level": "warn"
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.server.socket_addr(), "0.0.0.0:9100");
        assert_eq!(config.seed_file.as_deref(), Some(seed.as_path()));
        assert_eq!(config.log_level, Severity::Warn);
    }

    #[test]
    fn test_config_rejects_missing_seed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("childtree.json");
        let config = json!({ "seed_file": temp_dir.path().join("nope.json") });
        fs::write(&config_path, config.to_string()).unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("childtree.json");
        fs::write(&config_path, "{ port: ").unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_boot_stores_seeds_both_variants() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            seed_file: Some(write_seed(&temp_dir, &[1, 2, 3, 4, 5])),
            ..Default::default()
        };

        let (bst, avl) = boot_stores(&config).unwrap();
        assert_eq!(bst.count(), 5);
        assert_eq!(avl.count(), 5);
        assert_eq!(bst.info().height, 5);
        assert_eq!(avl.info().height, 3);
    }

    #[test]
    fn test_boot_stores_reports_avl_bound() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            seed_file: Some(write_seed(&temp_dir, &[1, 2_000_000])),
            ..Default::default()
        };

        let err = boot_stores(&config).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SeedError);
        assert!(err.message().starts_with("avl store"));
    }

    #[test]
    fn test_inspect_report() {
        let temp_dir = TempDir::new().unwrap();
        let seed = write_seed(&temp_dir, &[20, 11, 30]);

        let report = inspect_report(&seed, TreeKind::Avl, TraversalOrder::Pre).unwrap();
        assert_eq!(report["tree"]["kind"], "avl");
        assert_eq!(report["order"], "pre");
        let documents: Vec<u64> = report["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["document"].as_u64().unwrap())
            .collect();
        assert_eq!(documents, vec![20, 11, 30]);
        assert_eq!(report["report"][0]["city"], "Bogotá");
        assert_eq!(report["report"][1]["city"], "Cali");
        assert_eq!(report["report"][1]["total"], 2);
    }

    #[test]
    fn test_inspect_duplicate_seed_fails() {
        let temp_dir = TempDir::new().unwrap();
        let seed = write_seed(&temp_dir, &[7, 7]);

        let err = inspect_report(&seed, TreeKind::Bst, TraversalOrder::In).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SeedError);
        assert!(err.message().contains("#1"));
    }
}
