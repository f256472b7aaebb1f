use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::errors::SubmitError;
use crate::config::OrderApiConfig;
use crate::domain::OrderAck;

/// Anything that accepts one order body and acknowledges it.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit(&self, body: &Value) -> Result<OrderAck, SubmitError>;
}

// ==================================================
// HTTP ORDER INTAKE
// ==================================================

#[derive(Clone)]
pub struct OrderClient {
    http: Client,
    order_url: Url,
}

impl OrderClient {
    pub fn new(config: &OrderApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            order_url: order_url(&config.base_url)?,
        })
    }

    pub fn order_url(&self) -> &Url {
        &self.order_url
    }
}

/// `{base}/order`, whether or not `base` ends with a slash.
fn order_url(base: &str) -> Result<Url> {
    let mut base = Url::parse(base).with_context(|| format!("Invalid order API url {:?}", base))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("order")?)
}

#[async_trait]
impl OrderGateway for OrderClient {
    async fn submit(&self, body: &Value) -> Result<OrderAck, SubmitError> {
        let response = self
            .http
            .post(self.order_url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body: text.trim().to_string(),
            });
        }

        debug!("📨 Order response: {}", text);
        parse_ack(&text)
    }
}

pub(crate) fn parse_ack(text: &str) -> Result<OrderAck, SubmitError> {
    let ack: OrderAck = serde_json::from_str(text)
        .map_err(|_| SubmitError::MissingRequestId(text.trim().to_string()))?;

    match ack.request_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(ack),
        _ => Err(SubmitError::MissingRequestId(text.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_url_appends_path_segment() {
        assert_eq!(
            order_url("http://localhost:5000").unwrap().as_str(),
            "http://localhost:5000/order"
        );
        assert_eq!(
            order_url("http://localhost:5000/").unwrap().as_str(),
            "http://localhost:5000/order"
        );
        assert_eq!(
            order_url("https://desk.example/api").unwrap().as_str(),
            "https://desk.example/api/order"
        );
        assert!(order_url("not a url").is_err());
    }

    #[test]
    fn ack_needs_a_request_id() {
        let ack = parse_ack(r#"{"status":"scheduled","requestId":"abc","execute_in_seconds":0}"#)
            .unwrap();
        assert_eq!(ack.request_id.as_deref(), Some("abc"));
        assert_eq!(ack.execute_in_seconds, Some(0));

        assert!(matches!(
            parse_ack(r#"{"status":"scheduled"}"#),
            Err(SubmitError::MissingRequestId(_))
        ));
        assert!(matches!(
            parse_ack(r#"{"requestId":""}"#),
            Err(SubmitError::MissingRequestId(_))
        ));
        assert!(matches!(parse_ack("ok"), Err(SubmitError::MissingRequestId(_))));
    }
}
