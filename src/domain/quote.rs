use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::order::{Order, Side};

// ==================================================
// TOKEN MINTS
// ==================================================

pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

const USDC_SCALE: Decimal = dec!(1000000);
const SOL_SCALE: Decimal = dec!(1000000000);

/// What the intake backend will ask the trigger API for, given one order.
/// Only used for display; the desk always sends the raw order.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerQuote {
    pub input_mint: &'static str,
    pub output_mint: &'static str,
    pub making_amount: u128,
    pub taking_amount: u128,
    pub execute_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TriggerQuote {
    /// Buy spends `amount` USDC for SOL; sell spends `amount` SOL for USDC.
    /// Smallest-unit amounts are truncated, never rounded up.
    pub fn for_order(order: &Order, now: DateTime<Utc>) -> Result<Self> {
        order.validate()?;

        let amount = Decimal::from_f64_retain(order.amount)
            .ok_or_else(|| anyhow!("amount {} is not representable", order.amount))?;
        let price = Decimal::from_f64_retain(order.price)
            .ok_or_else(|| anyhow!("price {} is not representable", order.price))?;

        let (input_mint, output_mint, making, taking) = match order.side {
            Side::Buy => (
                USDC_MINT,
                SOL_MINT,
                amount.checked_mul(USDC_SCALE),
                amount
                    .checked_div(price)
                    .and_then(|units| units.checked_mul(SOL_SCALE)),
            ),
            Side::Sell => (
                SOL_MINT,
                USDC_MINT,
                amount.checked_mul(SOL_SCALE),
                amount
                    .checked_mul(price)
                    .and_then(|notional| notional.checked_mul(USDC_SCALE)),
            ),
        };

        let making = making.ok_or_else(|| anyhow!("making amount overflows for {:?}", order))?;
        let taking = taking.ok_or_else(|| anyhow!("taking amount overflows for {:?}", order))?;

        let execute_at = shift_minutes(now, order.aftertime)?;
        let expires_at = shift_minutes(execute_at, order.expiry)?;

        Ok(Self {
            input_mint,
            output_mint,
            making_amount: to_units(making)?,
            taking_amount: to_units(taking)?,
            execute_at,
            expires_at,
        })
    }
}

fn shift_minutes(from: DateTime<Utc>, minutes: u64) -> Result<DateTime<Utc>> {
    i64::try_from(minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .and_then(|d| from.checked_add_signed(d))
        .ok_or_else(|| anyhow!("{} minutes from {} is out of range", minutes, from))
}

fn to_units(v: Decimal) -> Result<u128> {
    v.trunc()
        .to_u128()
        .ok_or_else(|| anyhow!("amount {} out of range", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(side: Side) -> Order {
        Order {
            amount: 10.0,
            side,
            price: 136.5,
            expiry: 10,
            aftertime: 5,
        }
    }

    #[test]
    fn buy_spends_usdc_for_sol() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let q = TriggerQuote::for_order(&order(Side::Buy), now).unwrap();

        assert_eq!(q.input_mint, USDC_MINT);
        assert_eq!(q.output_mint, SOL_MINT);
        assert_eq!(q.making_amount, 10_000_000);
        assert_eq!(q.taking_amount, 73_260_073);
        assert_eq!(q.execute_at, now + Duration::minutes(5));
        assert_eq!(q.expires_at, now + Duration::minutes(15));
    }

    #[test]
    fn sell_spends_sol_for_usdc() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let q = TriggerQuote::for_order(&order(Side::Sell), now).unwrap();

        assert_eq!(q.input_mint, SOL_MINT);
        assert_eq!(q.output_mint, USDC_MINT);
        assert_eq!(q.making_amount, 10_000_000_000);
        assert_eq!(q.taking_amount, 1_365_000_000);
    }

    fn draft_order(body: serde_json::Value) -> Order {
        crate::domain::OrderDraft::new(0, body.as_object().unwrap().clone())
            .order()
            .unwrap()
    }

    #[test]
    fn huge_expiry_is_an_error_not_a_panic() {
        let o = draft_order(serde_json::json!(
            {"amount": 10, "side": "buy", "price": 136.5, "expiry": 9999999999999u64, "aftertime": 0}
        ));
        assert!(TriggerQuote::for_order(&o, Utc::now()).is_err());

        let o = draft_order(serde_json::json!(
            {"amount": 10, "side": "buy", "price": 136.5, "expiry": 0, "aftertime": u64::MAX}
        ));
        assert!(TriggerQuote::for_order(&o, Utc::now()).is_err());
    }

    #[test]
    fn huge_amount_is_an_error_not_a_panic() {
        let o = draft_order(serde_json::json!(
            {"amount": 1e28, "side": "sell", "price": 136.5, "expiry": 10, "aftertime": 0}
        ));
        assert!(TriggerQuote::for_order(&o, Utc::now()).is_err());
    }

    #[test]
    fn tiny_price_is_an_error_not_a_panic() {
        let o = draft_order(serde_json::json!(
            {"amount": 10, "side": "buy", "price": 1e-27, "expiry": 10, "aftertime": 0}
        ));
        assert!(TriggerQuote::for_order(&o, Utc::now()).is_err());
    }

    #[test]
    fn invalid_orders_have_no_quote() {
        let mut bad = order(Side::Buy);
        bad.price = 0.0;
        assert!(TriggerQuote::for_order(&bad, Utc::now()).is_err());
    }
}
