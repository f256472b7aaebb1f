use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::config::WalletConfig;

pub mod balance;

/// Read-only view of the connected wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn public_key(&self) -> Option<String>;
    async fn refresh_balance(&self) -> Result<Decimal>;
}

/// Wallet known by its public key only; balance comes from Solana RPC.
#[derive(Clone)]
pub struct SolanaWallet {
    http: Client,
    rpc_url: String,
    public_key: Option<String>,
    last_balance: Arc<Mutex<Option<Decimal>>>,
}

impl SolanaWallet {
    pub fn new(config: &WalletConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            public_key: config.public_key.clone(),
            last_balance: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn last_balance(&self) -> Option<Decimal> {
        *self.last_balance.lock().await
    }
}

#[async_trait]
impl WalletProvider for SolanaWallet {
    fn public_key(&self) -> Option<String> {
        self.public_key.clone()
    }

    async fn refresh_balance(&self) -> Result<Decimal> {
        let key = self
            .public_key
            .as_deref()
            .ok_or_else(|| anyhow!("No wallet public key configured (PUBLIC_KEY)"))?;

        let bal = balance::get_sol_balance(&self.http, &self.rpc_url, key).await?;
        *self.last_balance.lock().await = Some(bal);
        info!("💰 SOL balance of {}: {}", key, bal);
        Ok(bal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refresh_without_key_fails_before_any_request() {
        let cfg = WalletConfig {
            rpc_url: "http://127.0.0.1:9".into(),
            public_key: None,
        };
        let wallet = SolanaWallet::new(&cfg).unwrap();
        assert!(wallet.public_key().is_none());
        let err = wallet.refresh_balance().await.unwrap_err();
        assert!(err.to_string().contains("PUBLIC_KEY"));
        assert!(wallet.last_balance().await.is_none());
    }
}
