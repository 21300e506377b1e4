//! Policy configuration loading.
//!
//! This module provides the [`PolicyLoader`] for building a
//! [`PolicyRegistry`] from a YAML policy file, for deployments that
//! override the built-in tables.
//!
//! # File Structure
//!
//! ```yaml
//! policies:
//!   - name: offer_letter_annexure
//!     document_type: offer_letter
//!     words_basis: annual_rupees
//!     components:
//!       - code: basic
//!         label: Basic
//!         basis:
//!           percent_of_ctc: '40'
//!       - code: special
//!         label: Special Allowance
//!         basis: balance
//! statutory:
//!   pf_monthly_cap: '1800'
//! ```
//!
//! The `statutory` section is optional and defaults to the built-in rates.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::registry::PolicyRegistry;
use super::types::{CompensationPolicy, StatutoryConfig};

/// On-disk policy file structure.
#[derive(Debug, Deserialize)]
struct PolicyFile {
    policies: Vec<CompensationPolicy>,
    #[serde(default)]
    statutory: StatutoryConfig,
}

/// Loads policy configuration from YAML into a validated registry.
///
/// # Example
///
/// ```no_run
/// use salary_engine::policy::PolicyLoader;
///
/// let registry = PolicyLoader::load("./config/policies.yaml").unwrap();
/// println!("Loaded {} policies", registry.document_types().len());
/// ```
#[derive(Debug)]
pub struct PolicyLoader;

impl PolicyLoader {
    /// Loads a policy file from disk.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `ConfigNotFound` if the file does not exist
    /// - `ConfigParseError` if the YAML is malformed
    /// - `PolicyConfiguration` if any policy fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<PolicyRegistry> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parses a policy document from an in-memory YAML string.
    ///
    /// # Errors
    ///
    /// Same as [`PolicyLoader::load`], except a missing file cannot occur.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<PolicyRegistry> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, path: &str) -> EngineResult<PolicyRegistry> {
        let file: PolicyFile =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let mut registry = PolicyRegistry::new(file.statutory);
        for policy in file.policies {
            registry.insert(policy)?;
        }
        Ok(registry)
    }
}
