//! Generator configuration
//!
//! Every field has a default, so an empty YAML document (or no file at
//! all) reproduces the standard suite.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tzjs_gen::{DEFAULT_CUTOFF_YEAR, LcgSequence, RANDOM_SAMPLE_COUNT, SEED, ZoneList, cutoff_instant};

use crate::command::RealCommandRunner;
use crate::error::{Error, Result};

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Year whose first instant bounds the tested domain
    pub cutoff_year: i32,
    /// Number of randomized assertions
    pub sample_count: usize,
    /// PRNG seed
    pub seed: u32,
    /// zdump executable
    pub zdump_binary: String,
    /// GNU date executable
    pub date_binary: String,
    /// Compiled zone directory walked when no list file is given
    pub zoneinfo_dir: PathBuf,
    /// Optional zone list file, one name per line
    pub zones_file: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            sample_count: RANDOM_SAMPLE_COUNT,
            seed: SEED,
            zdump_binary: "zdump".to_string(),
            date_binary: "date".to_string(),
            zoneinfo_dir: PathBuf::from("/usr/share/zoneinfo"),
            zones_file: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Convert to YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Error::from)
    }

    /// Check the settings against the zone list they will run over
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a cutoff at or before 1970, or an
    /// empty zone list when samples are requested.
    pub fn validate(&self, zones: &ZoneList) -> Result<()> {
        cutoff_instant(self.cutoff_year).map_err(|e| Error::Validation(e.to_string()))?;
        if zones.is_empty() && self.sample_count > 0 {
            return Err(Error::Validation(
                "cannot draw random samples from an empty zone list".to_string(),
            ));
        }
        Ok(())
    }

    /// Zone list: the list file if set, otherwise every zone under
    /// `zoneinfo_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the list file or directory cannot be read.
    pub fn zone_list(&self) -> Result<ZoneList> {
        let zones = match &self.zones_file {
            Some(path) => ZoneList::from_file(path)?,
            None => ZoneList::discover(&self.zoneinfo_dir)?,
        };
        Ok(zones)
    }

    /// Command runner for the configured tools
    #[must_use]
    pub fn command_runner(&self) -> RealCommandRunner {
        RealCommandRunner::with_binaries(&self.zdump_binary, &self.date_binary)
    }

    /// Fresh PRNG at the configured seed
    #[must_use]
    pub fn prng(&self) -> LcgSequence {
        LcgSequence::with_seed(self.seed)
    }
}
