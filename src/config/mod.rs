use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "crm-dashboard")]
#[command(about = "Terminal dashboard over a remote CRM collection store")]
pub struct CliConfig {
    /// Base URL of the collection store, e.g. https://api.example.com/v1
    #[arg(long, default_value = "http://localhost:4000/api")]
    pub base_url: String,

    /// How many recent activities to show in the feed
    #[arg(long, default_value = "5")]
    pub feed_limit: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("feed_limit", self.feed_limit, 1, 50)?;
        Ok(())
    }
}
