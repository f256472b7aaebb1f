use soltrader::*;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use config::{Args, Command, Config};
use log::info;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use client::GenAiClient;
use desk::{AcceptOutcome, PromptOutcome, TradeDesk};
use domain::{Notification, NotificationKind, TriggerQuote};
use execution::OrderClient;
use notify::Notifier;
use wallet::{SolanaWallet, WalletProvider};

// ===============================
// TERMINAL NOTIFICATIONS
// ===============================
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Success => println!("{} {}", "✔".green().bold(), n.message.green()),
            NotificationKind::Error => println!("{} {}", "✘".red().bold(), n.message.red()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    match args.command.unwrap_or(Command::Desk) {
        Command::Chart => {
            println!("{}", config.chart.embed_snippet()?);
            Ok(())
        }
        Command::Balance => {
            let wallet = SolanaWallet::new(&config.wallet)?;
            let bal = wallet.refresh_balance().await?;
            println!("{} SOL", bal);
            Ok(())
        }
        Command::Ask { prompt, accept } => {
            let desk = build_desk(&config)?;
            run_prompt(&desk, &prompt).await;
            if accept {
                run_accept(&desk).await;
            }
            Ok(())
        }
        Command::Desk => run_desk(build_desk(&config)?).await,
    }
}

// ===============================
// WIRING
// ===============================
fn build_desk(config: &Config) -> Result<TradeDesk> {
    let genai = Arc::new(GenAiClient::new(&config.genai)?);
    let orders = Arc::new(OrderClient::new(&config.order_api)?);
    let wallet = Arc::new(SolanaWallet::new(&config.wallet)?);

    info!("🚀 SOLTRADER desk");
    info!("🧠 Model: {}", genai.model);
    info!("📮 Orders go to {}", orders.order_url());
    info!("🧾 Submit mode: {:?}", config.order_api.submit.mode);

    let mut desk = TradeDesk::new(
        genai,
        orders,
        Arc::new(ConsoleNotifier),
        config.order_api.submit.clone(),
    );
    if wallet.public_key().is_some() {
        desk = desk.with_wallet(wallet);
    }
    Ok(desk)
}

// ===============================
// INTERACTIVE DESK
// ===============================
async fn run_desk(desk: TradeDesk) -> Result<()> {
    if let Some(key) = desk.wallet_key() {
        println!("Wallet: {}", key.cyan());
    }
    println!(
        "Type a trading request and press Enter. {} submits the orders, {} exits.",
        ":accept".bold(),
        ":quit".bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":accept" | ":a" => run_accept(&desk).await,
            ":show" => println!("{}", desk.display()),
            _ => run_prompt(&desk, &line).await,
        }
    }

    Ok(())
}

async fn run_prompt(desk: &TradeDesk, prompt: &str) {
    println!("{}", "Loading...".dimmed());

    match desk.submit_prompt(prompt).await {
        PromptOutcome::Ready(text) => {
            println!("{}", text);
            preview_orders(&text);
        }
        PromptOutcome::Failed(shown) => println!("{}", shown.red()),
        PromptOutcome::Ignored => {}
    }
}

async fn run_accept(desk: &TradeDesk) {
    match desk.accept().await {
        AcceptOutcome::Submitted(report) => println!(
            "{} acknowledged, {} failed, {} not sent",
            report.acknowledged(),
            report.failed(),
            report.skipped
        ),
        AcceptOutcome::Failed(_) => {}
        AcceptOutcome::NotReady => println!("{}", "Nothing to accept — enter a prompt first".yellow()),
        AcceptOutcome::Ignored => println!("{}", "Busy — wait for the current call".yellow()),
    }
}

/// What the intake backend will do with each order, before anything is sent.
fn preview_orders(completion: &str) {
    let drafts = match extract::extract_orders(completion) {
        Ok(d) => d,
        Err(e) => {
            println!("{}", e.to_string().yellow());
            return;
        }
    };

    println!("{}", format!("── {} order(s) ready ──", drafts.len()).bold());
    let now = Utc::now();
    for (i, draft) in drafts.iter().enumerate() {
        match draft.order().and_then(|o| TriggerQuote::for_order(&o, now)) {
            Ok(q) => println!(
                "  {}. {} | make {} / take {} | runs {} | expires {}",
                i + 1,
                draft.describe(),
                q.making_amount,
                q.taking_amount,
                q.execute_at.format("%H:%M:%S"),
                q.expires_at.format("%H:%M:%S")
            ),
            Err(e) => println!("  {}. {} {}", i + 1, draft.describe(), format!("({})", e).yellow()),
        }
    }
}
