//! Declarative logger setup, for harnesses that keep their settings in a config file.
//!
//! ```
//! use cdflog::{Logger, LoggerConfig};
//!
//! let config: LoggerConfig =
//!     serde_json::from_str(r#"{ "prefix": "run-7", "histograms": 3 }"#).unwrap();
//! assert_eq!(config.capacity, cdflog::DEFAULT_CAPACITY);
//!
//! let logger = Logger::<u64>::from_config(&config).unwrap();
//! assert_eq!(logger.len(), 3);
//! assert_eq!(logger.file_prefix(), "run-7");
//! ```

use crate::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Shape of a `Logger`: how many histograms, how large, and how its reports are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// File prefix handed to the report writer.
    pub prefix: String,
    /// Number of histograms.
    pub histograms: usize,
    /// Buckets per histogram.
    pub capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            prefix: String::new(),
            histograms: 1,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
