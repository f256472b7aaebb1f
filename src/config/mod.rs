use clap::{Parser, Subcommand};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::chart::ChartConfig;

/// Substituted when no Gemini key is configured. Requests made with it fail.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/* =======================
CLI ARGS
======================= */

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive desk: type a prompt, then `:accept` to submit its orders
    Desk,
    /// Ask once and print the completion with the orders found in it
    Ask {
        /// Free-text trading request
        prompt: String,
        /// Submit the extracted orders without asking
        #[arg(long)]
        accept: bool,
    },
    /// Print the chart widget embed configuration
    Chart,
    /// Show the SOL balance of the configured wallet
    Balance,
}

/* =======================
SUBMISSION POLICY
======================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitMode {
    /// Stop at the first failed order; earlier acknowledgments stand.
    #[default]
    FailFast,
    /// Attempt every order and report each outcome.
    ContinueOnError,
}

impl SubmitMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "FAIL_FAST" => Some(SubmitMode::FailFast),
            "CONTINUE_ON_ERROR" | "CONTINUE" => Some(SubmitMode::ContinueOnError),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default)]
    pub mode: SubmitMode,

    /// Check each draft against the order shape before sending it.
    #[serde(default)]
    pub validate_shape: bool,
}

/* =======================
MAIN CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub genai: GenAiConfig,
    pub order_api: OrderApiConfig,
    pub wallet: WalletConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/* =======================
GENAI CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenAiConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl GenAiConfig {
    /// The configured key, or the placeholder when none is set.
    pub fn api_key(&self) -> String {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                warn!("⚠️  No Gemini API key configured — using placeholder credential");
                PLACEHOLDER_API_KEY.to_string()
            }
        }
    }

    pub fn uses_placeholder_key(&self) -> bool {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) => key.is_empty() || key == PLACEHOLDER_API_KEY,
            None => true,
        }
    }
}

/* =======================
ORDER API CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub submit: SubmitConfig,
}

/* =======================
WALLET CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    pub rpc_url: String,
    pub public_key: Option<String>,
}

/* =======================
DEFAULT CONFIG
======================= */

impl Default for Config {
    fn default() -> Self {
        Self {
            genai: GenAiConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-2.0-flash".to_string(),
                api_key: None,
                timeout_secs: 60,
            },
            order_api: OrderApiConfig {
                base_url: "http://localhost:5000".to_string(),
                timeout_secs: 30,
                submit: SubmitConfig::default(),
            },
            wallet: WalletConfig {
                rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
                public_key: None,
            },
            chart: ChartConfig::default(),
        }
    }
}

/* =======================
LOAD / CREATE CONFIG
======================= */

impl Config {
    /// Read `path`, writing the defaults there first if it does not exist,
    /// then apply environment overrides.
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        let mut cfg = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            let cfg = Config::default();
            let content = serde_json::to_string_pretty(&cfg)?;
            std::fs::write(path, content)?;
            cfg
        };

        cfg.apply_env();
        Ok(cfg)
    }

    /// Secrets and endpoints from the environment win over the file.
    pub fn apply_env(&mut self) {
        if let Some(key) = first_env(&["GOOGLE_GENAI_API_KEY", "NEXT_PUBLIC_GOOGLE_GENAI_API_KEY"]) {
            self.genai.api_key = Some(key);
        }
        if let Some(model) = first_env(&["GENAI_MODEL"]) {
            self.genai.model = model;
        }
        if let Some(url) = first_env(&["ORDER_API_URL"]) {
            self.order_api.base_url = url;
        }
        if let Some(url) = first_env(&["SOLANA_RPC_URL", "RPC_URL"]) {
            self.wallet.rpc_url = url;
        }
        if let Some(key) = first_env(&["PUBLIC_KEY"]) {
            self.wallet.public_key = Some(key);
        }
        if let Some(raw) = first_env(&["SUBMIT_MODE"]) {
            match SubmitMode::parse(&raw) {
                Some(mode) => self.order_api.submit.mode = mode,
                None => warn!("⚠️  Ignoring unknown SUBMIT_MODE {:?}", raw),
            }
        }
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| env::var(n).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
