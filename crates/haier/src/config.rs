use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_builder::Builder;
use toml::Value;

use crate::common::error::HaierError;

pub const ENRICH_JOB_GRAPH: &str = "client.enrich-job-graph";
pub const HAIER_REST_URL: &str = "haier.rest.url";
pub const HAIER_REST_TIMEOUT: &str = "haier.rest.timeout";
pub const NODE_MANAGER_HOST: &str = "haier.node-manager.host";
pub const NODE_MANAGER_PORT: &str = "haier.node-manager.port";
pub const ACCELERATORS_OVERRIDE: &str = "haier.accelerators.override";
pub const ARTIFACT_DIR: &str = "haier.artifact.dir";

pub const DEFAULT_REST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_NODE_MANAGER_HOST: &str = "localhost";
pub const DEFAULT_NODE_MANAGER_PORT: u16 = 8042;

/// Flat key/value configuration with dotted keys.
///
/// Nested TOML tables are flattened, so `[haier.rest] url = "..."` and
/// `"haier.rest.url" = "..."` describe the same entry.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    values: BTreeMap<String, Value>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut values = BTreeMap::new();
        flatten_table("", table, &mut values);
        Ok(Configuration { values })
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_bool(&self, key: &str) -> crate::Result<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::Boolean(value)) => Ok(Some(*value)),
            Some(Value::String(value)) => match value.trim().to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(type_error(key, "a boolean")),
            },
            Some(_) => Err(type_error(key, "a boolean")),
        }
    }

    pub fn get_string(&self, key: &str) -> crate::Result<Option<String>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(type_error(key, "a string")),
        }
    }

    pub fn get_integer(&self, key: &str) -> crate::Result<Option<i64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::Integer(value)) => Ok(Some(*value)),
            Some(Value::String(value)) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| type_error(key, "an integer")),
            Some(_) => Err(type_error(key, "an integer")),
        }
    }

    /// Durations are written in the `humantime` format, e.g. `"30s"` or `"1m 30s"`.
    pub fn get_duration(&self, key: &str) -> crate::Result<Option<Duration>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => humantime::parse_duration(value.trim())
                .map(Some)
                .map_err(|e| HaierError::ConfigError(format!("Invalid duration in '{key}': {e}"))),
            Some(_) => Err(type_error(key, "a duration")),
        }
    }

    /// Accepts an array of strings or a single comma separated string.
    pub fn get_string_list(&self, key: &str) -> crate::Result<Option<Vec<String>>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(value) => Ok(value.clone()),
                    _ => Err(type_error(key, "a list of strings")),
                })
                .collect::<crate::Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(type_error(key, "a list of strings")),
        }
    }
}

fn flatten_table(prefix: &str, table: toml::Table, out: &mut BTreeMap<String, Value>) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(table) => flatten_table(&key, table, out),
            value => {
                out.insert(key, value);
            }
        }
    }
}

fn type_error(key: &str, expected: &str) -> HaierError {
    HaierError::ConfigError(format!("Value of '{key}' is not {expected}"))
}

/// Settings of the enrichment client and of accelerator discovery.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(pattern = "owned")]
pub struct HaierConfig {
    #[builder(default)]
    enrich_job_graph: bool,
    #[builder(default, setter(strip_option, into))]
    rest_url: Option<String>,
    #[builder(default = "DEFAULT_REST_TIMEOUT")]
    rest_timeout: Duration,
    #[builder(default = "DEFAULT_NODE_MANAGER_HOST.to_string()", setter(into))]
    node_manager_host: String,
    #[builder(default = "DEFAULT_NODE_MANAGER_PORT")]
    node_manager_port: u16,
    #[builder(default, setter(strip_option))]
    accelerator_override: Option<Vec<String>>,
    #[builder(default, setter(strip_option, into))]
    artifact_dir: Option<PathBuf>,
}

impl Default for HaierConfig {
    fn default() -> Self {
        HaierConfig {
            enrich_job_graph: false,
            rest_url: None,
            rest_timeout: DEFAULT_REST_TIMEOUT,
            node_manager_host: DEFAULT_NODE_MANAGER_HOST.to_string(),
            node_manager_port: DEFAULT_NODE_MANAGER_PORT,
            accelerator_override: None,
            artifact_dir: None,
        }
    }
}

impl HaierConfig {
    pub fn from_configuration(config: &Configuration) -> crate::Result<Self> {
        let rest_url = config.get_string(HAIER_REST_URL)?;
        if rest_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(HaierError::ConfigError(format!(
                "'{HAIER_REST_URL}' must not be empty"
            )));
        }
        let node_manager_port = match config.get_integer(NODE_MANAGER_PORT)? {
            None => DEFAULT_NODE_MANAGER_PORT,
            Some(port) => u16::try_from(port)
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| {
                    HaierError::ConfigError(format!(
                        "'{NODE_MANAGER_PORT}' must be between 1 and 65535, got {port}"
                    ))
                })?,
        };
        Ok(HaierConfig {
            enrich_job_graph: config.get_bool(ENRICH_JOB_GRAPH)?.unwrap_or(false),
            rest_url,
            rest_timeout: config
                .get_duration(HAIER_REST_TIMEOUT)?
                .unwrap_or(DEFAULT_REST_TIMEOUT),
            node_manager_host: config
                .get_string(NODE_MANAGER_HOST)?
                .unwrap_or_else(|| DEFAULT_NODE_MANAGER_HOST.to_string()),
            node_manager_port,
            accelerator_override: config.get_string_list(ACCELERATORS_OVERRIDE)?,
            artifact_dir: config.get_string(ARTIFACT_DIR)?.map(PathBuf::from),
        })
    }

    pub fn enrich_job_graph(&self) -> bool {
        self.enrich_job_graph
    }

    pub fn rest_url(&self) -> Option<&str> {
        self.rest_url.as_deref()
    }

    /// The scheduler endpoint, if enrichment is switched on and an endpoint is set.
    pub fn enrichment_endpoint(&self) -> Option<&str> {
        if self.enrich_job_graph {
            self.rest_url()
        } else {
            None
        }
    }

    pub fn rest_timeout(&self) -> Duration {
        self.rest_timeout
    }

    pub fn node_manager_host(&self) -> &str {
        &self.node_manager_host
    }

    pub fn node_manager_port(&self) -> u16 {
        self.node_manager_port
    }

    pub fn node_manager_url(&self) -> String {
        format!(
            "http://{}:{}/node",
            self.node_manager_host, self.node_manager_port
        )
    }

    pub fn accelerator_override(&self) -> Option<&[String]> {
        self.accelerator_override.as_deref()
    }

    pub fn artifact_dir(&self) -> Option<&Path> {
        self.artifact_dir.as_deref()
    }
}
