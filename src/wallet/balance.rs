use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;

const LAMPORTS_PER_SOL: Decimal = dec!(1000000000);

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<BalanceResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

// ================================
// SIMPLE ONE-SHOT BALANCE FETCH
// ================================
pub async fn get_sol_balance(client: &Client, rpc_url: &str, public_key: &str) -> Result<Decimal> {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getBalance",
        "params": [public_key]
    });

    let text = client
        .post(rpc_url)
        .json(&request)
        .send()
        .await
        .context("RPC request failed")?
        .error_for_status()?
        .text()
        .await?;

    parse_balance(&text)
}

fn parse_balance(text: &str) -> Result<Decimal> {
    let response: RpcResponse = serde_json::from_str(text).context("Malformed RPC response")?;

    if let Some(e) = response.error {
        bail!("RPC error {}: {}", e.code, e.message);
    }

    let lamports = response
        .result
        .ok_or_else(|| anyhow!("RPC response has no result"))?
        .value;

    Ok(Decimal::from(lamports) / LAMPORTS_PER_SOL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lamports_become_sol() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":1500000000},"id":1}"#;
        assert_eq!(parse_balance(body).unwrap(), dec!(1.5));
    }

    #[test]
    fn rpc_errors_are_reported() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param"},"id":1}"#;
        let err = parse_balance(body).unwrap_err();
        assert!(err.to_string().contains("Invalid param"));
    }
}
