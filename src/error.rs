use pagerduty_slack::{client::error::Error, config::ConfigError};
use std::fmt;

/// Sum type representing every possible unexceptional fail state of the
/// binary.
pub enum Failure {
    Usage(String),
    Config(ConfigError),
    API(Error),
    ReadInput(std::io::Error),
    ParseInput(serde_json::Error),
    WriteOutput(serde_json::Error),
}

impl From<ConfigError> for Failure {
    fn from(e: ConfigError) -> Self {
        Failure::Config(e)
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::API(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::Usage(e) => format!("{}\n\n{}", e, crate::USAGE),
            Failure::Config(e) => e.to_string(),
            Failure::API(e) => e.to_string(),
            Failure::ReadInput(e) => format!("Failed to read stdin: {}", e),
            Failure::ParseInput(e) => format!("Failed to parse Slack connection JSON: {}", e),
            Failure::WriteOutput(e) => format!("Failed to serialize output: {}", e),
        };

        write!(f, "{}", x)
    }
}
