use anyhow::Result;
use colored::Colorize;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use soltrader::config::{Config, GenAiConfig, OrderApiConfig};
use soltrader::extract::extract_orders;
use soltrader::logging;
use soltrader::prompt::compose_prompt;
use soltrader::wallet::{SolanaWallet, WalletProvider};

// ==================================================
// DIAGNOSTICS STRUCTURE
// ==================================================
struct Diagnostic {
    name: String,
    status: DiagStatus,
    message: String,
}

enum DiagStatus {
    Pass,
    Warn,
    Fail,
}

impl DiagStatus {
    fn icon(&self) -> String {
        match self {
            DiagStatus::Pass => "✅".green().to_string(),
            DiagStatus::Warn => "⚠️ ".yellow().to_string(),
            DiagStatus::Fail => "❌".red().to_string(),
        }
    }
}

impl Diagnostic {
    fn new(name: &str, status: DiagStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

// ==================================================
// MAIN DIAGNOSTICS RUNNER
// ==================================================
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    print_header();

    let total_tests = 6;
    let mut results = Vec::new();

    print_test(1, total_tests, "Checking environment configuration");
    results.push(check_env_vars());

    print_test(2, total_tests, "Loading config.json");
    let config = match Config::load(&PathBuf::from("config.json")) {
        Ok(cfg) => {
            results.push(Diagnostic::new(
                "Config.json",
                DiagStatus::Pass,
                format!(
                    "Model: {}\nOrder API: {}\nSubmit mode: {:?} (validate shape: {})",
                    cfg.genai.model,
                    cfg.order_api.base_url,
                    cfg.order_api.submit.mode,
                    cfg.order_api.submit.validate_shape
                ),
            ));
            cfg
        }
        Err(e) => {
            results.push(Diagnostic::new(
                "Config.json",
                DiagStatus::Fail,
                format!("{} — falling back to defaults", e),
            ));
            let mut cfg = Config::default();
            cfg.apply_env();
            cfg
        }
    };

    print_test(3, total_tests, "Checking Gemini credential");
    results.push(check_api_key(&config.genai));

    print_test(4, total_tests, "Reaching Gemini model endpoint");
    results.push(check_genai(&config.genai).await);

    print_test(5, total_tests, "Reaching order-intake endpoint");
    results.push(check_order_api(&config.order_api).await);

    print_test(6, total_tests, "Fetching wallet balance");
    results.push(check_wallet(&config).await);

    results.push(check_prompt_template());

    print_results(&results);
    Ok(())
}

fn check_env_vars() -> Diagnostic {
    let wanted = ["GOOGLE_GENAI_API_KEY", "ORDER_API_URL", "PUBLIC_KEY"];

    let missing: Vec<&str> = wanted
        .iter()
        .copied()
        .filter(|var| std::env::var(var).is_err())
        .collect();

    if missing.is_empty() {
        Diagnostic::new("Environment Variables", DiagStatus::Pass, "All set")
    } else {
        Diagnostic::new(
            "Environment Variables",
            DiagStatus::Warn,
            format!("Not set (config.json values used): {}", missing.join(", ")),
        )
    }
}

fn check_api_key(genai: &GenAiConfig) -> Diagnostic {
    if genai.uses_placeholder_key() {
        Diagnostic::new(
            "Gemini API Key",
            DiagStatus::Fail,
            "No key configured — requests will go out with the placeholder credential",
        )
    } else {
        Diagnostic::new("Gemini API Key", DiagStatus::Pass, "Key configured")
    }
}

async fn check_genai(genai: &GenAiConfig) -> Diagnostic {
    if genai.uses_placeholder_key() {
        return Diagnostic::new("Gemini Endpoint", DiagStatus::Warn, "Skipped (no key)");
    }

    let url = format!("{}/models/{}", genai.api_url.trim_end_matches('/'), genai.model);
    let result = http()
        .get(&url)
        .header("x-goog-api-key", genai.api_key())
        .send()
        .await;

    match result {
        Ok(r) if r.status().is_success() => {
            Diagnostic::new("Gemini Endpoint", DiagStatus::Pass, format!("{} available", genai.model))
        }
        Ok(r) => Diagnostic::new(
            "Gemini Endpoint",
            DiagStatus::Fail,
            format!("HTTP {} from {}", r.status(), url),
        ),
        Err(e) => Diagnostic::new("Gemini Endpoint", DiagStatus::Fail, format!("Network error: {}", e)),
    }
}

async fn check_order_api(order_api: &OrderApiConfig) -> Diagnostic {
    // Any HTTP answer means something is listening; nothing is posted.
    match http().get(&order_api.base_url).send().await {
        Ok(r) => Diagnostic::new(
            "Order Intake",
            DiagStatus::Pass,
            format!("{} answered HTTP {}", order_api.base_url, r.status()),
        ),
        Err(e) => Diagnostic::new(
            "Order Intake",
            DiagStatus::Fail,
            format!("{} unreachable: {}", order_api.base_url, e),
        ),
    }
}

async fn check_wallet(config: &Config) -> Diagnostic {
    let wallet = match SolanaWallet::new(&config.wallet) {
        Ok(w) => w,
        Err(e) => return Diagnostic::new("Wallet", DiagStatus::Fail, e.to_string()),
    };

    if wallet.public_key().is_none() {
        return Diagnostic::new("Wallet", DiagStatus::Warn, "No PUBLIC_KEY — balance display disabled");
    }

    match wallet.refresh_balance().await {
        Ok(bal) => Diagnostic::new("Wallet", DiagStatus::Pass, format!("Balance: {} SOL", bal)),
        Err(e) => Diagnostic::new("Wallet", DiagStatus::Fail, e.to_string()),
    }
}

fn check_prompt_template() -> Diagnostic {
    match extract_orders(&compose_prompt("diagnostics")) {
        Ok(d) => Diagnostic::new(
            "Prompt Template",
            DiagStatus::Pass,
            format!("Worked example yields {} order(s)", d.len()),
        ),
        Err(e) => Diagnostic::new("Prompt Template", DiagStatus::Fail, e.to_string()),
    }
}

fn http() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

fn print_header() {
    println!("\n╔════════════════════════════════════════════════╗");
    println!("║        SOLTRADER - ENVIRONMENT DIAGNOSTICS     ║");
    println!("╚════════════════════════════════════════════════╝\n");
}

fn print_test(num: usize, total: usize, description: &str) {
    println!("[{}/{}] {}...", num, total, description);
}

fn print_results(results: &[Diagnostic]) {
    println!();

    let mut passed = 0;
    let mut warned = 0;
    let mut failed = 0;

    for diag in results {
        match diag.status {
            DiagStatus::Pass => passed += 1,
            DiagStatus::Warn => warned += 1,
            DiagStatus::Fail => failed += 1,
        }

        println!("{} {}", diag.status.icon(), diag.name.bold());
        for line in diag.message.lines() {
            println!("   {}", line);
        }
    }

    println!("\n✅ Passed:  {}", passed);
    println!("⚠️  Warnings: {}", warned);
    println!("❌ Failed:  {}", failed);

    if failed == 0 {
        println!("\n✅ Desk is ready.");
    } else {
        println!("\n❌ Fix the failures above before trading.");
    }
    println!();
}
