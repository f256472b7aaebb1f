use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// A SOL/USDC trigger order as the order-intake endpoint expects it.
///
/// `amount` is the USD notional, `price` is USD per SOL, `expiry` and
/// `aftertime` are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub amount: f64,
    pub side: Side,
    pub price: f64,
    pub expiry: u64,
    pub aftertime: u64,
}

impl Order {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            bail!("amount must be a positive number, got {}", self.amount);
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            bail!("price must be a positive number, got {}", self.price);
        }
        Ok(())
    }
}

/// One JSON object lifted out of a fenced block of a completion.
///
/// The body is kept exactly as the model wrote it; it is only checked
/// against [`Order`] when someone asks for [`OrderDraft::order`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Zero-based position of the fenced block inside the completion.
    pub block: usize,
    pub body: Map<String, Value>,
}

impl OrderDraft {
    pub fn new(block: usize, body: Map<String, Value>) -> Self {
        Self { block, body }
    }

    pub fn order(&self) -> Result<Order> {
        let order: Order = serde_json::from_value(Value::Object(self.body.clone()))?;
        order.validate()?;
        Ok(order)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.body.clone())
    }

    /// Short human label, e.g. `BUY $10 @ 136.5`.
    pub fn describe(&self) -> String {
        match self.order() {
            Ok(o) => format!(
                "{} ${} @ {} (expiry {}m, after {}m)",
                o.side.as_str().to_uppercase(),
                o.amount,
                o.price,
                o.expiry,
                o.aftertime
            ),
            Err(_) => Value::Object(self.body.clone()).to_string(),
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        let body = match serde_json::to_value(order) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { block: 0, body }
    }
}
