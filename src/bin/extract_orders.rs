use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Read;

use soltrader::domain::TriggerQuote;
use soltrader::extract::extract_orders;
use soltrader::logging;

/// Dry run: read a saved completion (file argument or stdin) and print the
/// orders that would be submitted, without sending anything.
fn main() -> Result<()> {
    logging::init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let drafts = match extract_orders(&text) {
        Ok(d) => d,
        Err(e) => {
            println!("❌ {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== {} ORDER(S) FOUND ===\n", drafts.len());

    let now = Utc::now();
    for (i, draft) in drafts.iter().enumerate() {
        println!("📍 Order {} (block {})", i + 1, draft.block);
        println!("   Body: {}", draft.to_json());

        match draft.order() {
            Ok(order) => {
                println!("   ✅ {}", draft.describe());
                if let Ok(q) = TriggerQuote::for_order(&order, now) {
                    println!("   {} -> {}", q.input_mint, q.output_mint);
                    println!("   making {} / taking {}", q.making_amount, q.taking_amount);
                }
            }
            Err(e) => println!("   ⚠️  Not an order shape, would be forwarded as-is: {}", e),
        }
        println!();
    }

    Ok(())
}
