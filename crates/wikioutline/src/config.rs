use std::time::Duration;

use crate::fetch::UpstreamConfig;
use wikioutline_core::wiki::DEFAULT_BASE_URL;

pub const DEFAULT_USER_AGENT: &str = "WikipediaOutlineGenerator/1.0 (Contact: user@example.com)";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutlineMode {
    /// "# Contents" first, then the article title, then H2 as "###" (default)
    Contents,
    /// Article title first, then H2 as "##"
    Title,
}

impl From<OutlineMode> for wikioutline_core::outline::OutlineMode {
    fn from(mode: OutlineMode) -> Self {
        match mode {
            OutlineMode::Contents => wikioutline_core::outline::OutlineMode::Contents,
            OutlineMode::Title => wikioutline_core::outline::OutlineMode::Title,
        }
    }
}

/// Settings shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct Settings {
    /// Base URL of the Wikipedia edition articles are fetched from
    #[arg(long, env = "WIKIPEDIA_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User-Agent header sent with every upstream request
    #[arg(long, env = "OUTLINE_USER_AGENT", global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Upstream timeout in seconds (default: 10)
    #[arg(long, env = "OUTLINE_TIMEOUT", global = true, default_value = "10")]
    pub timeout: u64,

    /// Outline layout (default: contents)
    #[arg(long, env = "OUTLINE_MODE", global = true, default_value = "contents")]
    pub mode: OutlineMode,
}

impl Settings {
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    pub fn outline_mode(&self) -> wikioutline_core::outline::OutlineMode {
        self.mode.into()
    }
}
