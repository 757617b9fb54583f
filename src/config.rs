use crate::error::{Error, Result};
use std::path::PathBuf;

/// Environment variable overriding the catalog file
pub const DATA_ENV: &str = "COUNCIL_INSIGHTS_DATA";
/// Environment variable overriding the session file
pub const SESSION_ENV: &str = "COUNCIL_INSIGHTS_SESSION";
/// Environment variable selecting the count policy (`clamp` or `reject`)
pub const COUNT_POLICY_ENV: &str = "COUNCIL_INSIGHTS_COUNT_POLICY";

/// What to do with negative vote counts in loaded data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPolicy {
    /// Accept the data; totals clamp negatives to zero
    Clamp,
    /// Fail the load with a validation error
    Reject,
}

impl From<&str> for CountPolicy {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reject" => CountPolicy::Reject,
            "clamp" | _ => CountPolicy::Clamp,
        }
    }
}

/// Default session file: $HOME/.council-insights/session.json
pub fn default_session_file() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| {
            Error::Config(
                "Could not determine home directory. Set HOME or USERPROFILE environment variable."
                    .to_string(),
            )
        })?;

    Ok(PathBuf::from(home)
        .join(".council-insights")
        .join("session.json"))
}

/// Configuration for the dashboard tools
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog file; built-in fixtures when unset
    pub data_file: Option<PathBuf>,
    pub session_file: PathBuf,
    pub count_policy: CountPolicy,
    /// Width of text-rendered bars, in cells
    pub bar_width: usize,
}

impl Config {
    /// Create a new default configuration
    pub fn new(session_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: None,
            session_file: session_file.into(),
            count_policy: CountPolicy::Clamp,
            bar_width: 40,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref data_file) = self.data_file {
            if !data_file.exists() {
                return Err(Error::Config(format!(
                    "Data file does not exist: {}",
                    data_file.display()
                )));
            }

            if !data_file.is_file() {
                return Err(Error::Config(format!(
                    "Data file is not a file: {}",
                    data_file.display()
                )));
            }
        }

        if self.bar_width == 0 {
            return Err(Error::Config("Bar width must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(session_file: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(session_file),
        }
    }

    /// Set the catalog file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = Some(path.into());
        self
    }

    /// Set the count policy
    pub fn count_policy(mut self, policy: CountPolicy) -> Self {
        self.config.count_policy = policy;
        self
    }

    /// Set count policy from string
    pub fn count_policy_str(mut self, policy: &str) -> Self {
        self.config.count_policy = CountPolicy::from(policy);
        self
    }

    /// Set the bar width
    pub fn bar_width(mut self, width: usize) -> Self {
        self.config.bar_width = width;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
