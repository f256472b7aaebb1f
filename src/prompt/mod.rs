//! Instruction template that turns a free-text request into an order-writing task.

const ORDER_INSTRUCTIONS: &str = r#"You are a SOL/USDC trading assistant. Turn the user's request into one or more trigger orders.

Every order is a single JSON object with exactly these fields:
{
  "amount": <number>,       # USD amount
  "side": "buy"|"sell",     # buy SOL (USDC -> SOL) or sell SOL (SOL -> USDC)
  "price": <number>,        # USD per SOL
  "expiry": <minutes>,      # order time-to-live in minutes
  "aftertime": <minutes>    # delay before the order is placed, in minutes
}

Formatting rules:
- Put EVERY order inside its own fenced code block opened with ```json and closed with ```.
- Never put two orders in the same code block. To chain several orders, write several code blocks.
- Use plain numbers, no units or quotes, for amount, price, expiry and aftertime.
- After the orders, briefly explain what the orders do.

Example of a valid response:

I'll enter a position and protect it.

```json
{
  "amount": 10,
  "side": "buy",
  "price": 136.5,
  "expiry": 10,
  "aftertime": 0
}
```

Then a take-profit once the entry has had time to fill:

```json
{
  "amount": 10,
  "side": "sell",
  "price": 150.0,
  "expiry": 60,
  "aftertime": 10
}
```

1. Buys $10 of SOL at 136.5.
2. Sells at 150.0 ten minutes later, valid for an hour.

Here is the user's request:

"#;

/// Embed `user_prompt` at the end of the fixed order instructions.
///
/// The user's text is appended verbatim, so the result always ends with it.
pub fn compose_prompt(user_prompt: &str) -> String {
    let mut prompt = String::with_capacity(ORDER_INSTRUCTIONS.len() + user_prompt.len());
    prompt.push_str(ORDER_INSTRUCTIONS);
    prompt.push_str(user_prompt);
    prompt
}
