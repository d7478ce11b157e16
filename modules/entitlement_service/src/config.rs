//! Configuration for entitlement service module

use serde::{Deserialize, Serialize};

/// Entitlement service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page size used when the caller supplies none (or an unusable one)
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound applied to caller-supplied page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Include the error debug rendering as `stack` in error responses.
    /// The server turns this off in production.
    #[serde(default = "default_true")]
    pub include_error_stack: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            include_error_stack: true,
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}
