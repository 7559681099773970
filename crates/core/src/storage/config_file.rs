use std::path::Path;

use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::portfolio::PortfolioSet;

/// Reads the portfolio configuration (`portfolios.json`).
///
/// Two entry points: `load` is strict and surfaces every failure;
/// `load_or_demo` is the serving path and degrades to the built-in demo
/// set — a dashboard with sample data beats a blank page when the config
/// file is missing or broken.
pub struct ConfigFile;

impl ConfigFile {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<PortfolioSet, CoreError> {
        let set: PortfolioSet = serde_json::from_str(json)?;
        Ok(set)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<PortfolioSet, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read a configuration file, falling back to the demo set when the
    /// file is missing, unparsable, or configures zero portfolios.
    pub fn load_or_demo(path: impl AsRef<Path>) -> PortfolioSet {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "portfolio config not found, using demo data");
            return PortfolioSet::demo();
        }

        match Self::load(path) {
            Ok(set) if set.is_empty() => {
                warn!(path = %path.display(), "portfolio config has no portfolios, using demo data");
                PortfolioSet::demo()
            }
            Ok(set) => {
                info!(path = %path.display(), portfolios = set.portfolios.len(), "loaded portfolio config");
                set
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load portfolio config, using demo data");
                PortfolioSet::demo()
            }
        }
    }
}
