//! The page controller: owns the pipeline state and is the only thing that
//! moves it.
//!
//! ```text
//! Idle -> AwaitingCompletion -> CompletionReady | CompletionError
//! CompletionReady -> Submitting -> AllSubmitted | SubmissionFailed
//! ```
//!
//! A new prompt can be entered from any state except while a call is in
//! flight. Accepting is only possible from `CompletionReady`.

use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::CompletionProvider;
use crate::config::SubmitConfig;
use crate::domain::SubmissionReport;
use crate::execution::{submit_orders, OrderGateway, PipelineError};
use crate::extract::extract_orders;
use crate::notify::{deliver, error_notification, report_notifications, Notifier};
use crate::prompt::compose_prompt;
use crate::wallet::WalletProvider;

#[derive(Debug, Clone)]
pub enum DeskState {
    Idle,
    AwaitingCompletion,
    CompletionReady(String),
    CompletionError(String),
    Submitting {
        completion: String,
    },
    AllSubmitted {
        completion: String,
        report: SubmissionReport,
    },
    SubmissionFailed {
        completion: String,
        reason: String,
    },
}

#[derive(Debug)]
pub enum PromptOutcome {
    /// The completion text, now stored on the desk.
    Ready(String),
    /// The completion call failed; the message is what the desk displays.
    Failed(String),
    /// Empty prompt, or another call was still in flight.
    Ignored,
}

#[derive(Debug)]
pub enum AcceptOutcome {
    Submitted(SubmissionReport),
    Failed(PipelineError),
    /// There is no fresh completion to accept.
    NotReady,
    /// Another call was still in flight.
    Ignored,
}

pub struct TradeDesk {
    completer: Arc<dyn CompletionProvider>,
    gateway: Arc<dyn OrderGateway>,
    notifier: Arc<dyn Notifier>,
    wallet: Option<Arc<dyn WalletProvider>>,
    policy: SubmitConfig,
    state: Mutex<DeskState>,
    busy: AtomicBool,
}

/// Clears the in-flight flag when the call that set it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TradeDesk {
    pub fn new(
        completer: Arc<dyn CompletionProvider>,
        gateway: Arc<dyn OrderGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SubmitConfig,
    ) -> Self {
        Self {
            completer,
            gateway,
            notifier,
            wallet: None,
            policy,
            state: Mutex::new(DeskState::Idle),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    // ==================================================
    // STATE
    // ==================================================

    fn lock_state(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, next: DeskState) {
        *self.lock_state() = next;
    }

    pub fn state(&self) -> DeskState {
        self.lock_state().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.lock_state(), DeskState::AwaitingCompletion)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// What the response pane shows.
    pub fn display(&self) -> String {
        match &*self.lock_state() {
            DeskState::AwaitingCompletion => "Loading...".to_string(),
            DeskState::CompletionReady(text) => text.clone(),
            DeskState::CompletionError(msg) => format!("Error: {}", msg),
            DeskState::Submitting { completion }
            | DeskState::AllSubmitted { completion, .. }
            | DeskState::SubmissionFailed { completion, .. } => completion.clone(),
            DeskState::Idle => String::new(),
        }
    }

    fn enter(&self) -> Option<InFlight<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.busy))
    }

    // ==================================================
    // PROMPT -> COMPLETION
    // ==================================================

    pub async fn submit_prompt(&self, prompt: &str) -> PromptOutcome {
        if prompt.trim().is_empty() {
            return PromptOutcome::Ignored;
        }
        let _in_flight = match self.enter() {
            Some(guard) => guard,
            None => {
                warn!("⏳ Still waiting on the previous call — prompt ignored");
                return PromptOutcome::Ignored;
            }
        };

        let composed = compose_prompt(prompt);
        self.set_state(DeskState::AwaitingCompletion);

        match self.completer.generate(&composed).await {
            Ok(text) => {
                info!("🧠 Completion ready ({} chars)", text.len());
                self.set_state(DeskState::CompletionReady(text.clone()));
                PromptOutcome::Ready(text)
            }
            Err(e) => {
                let msg = e.to_string();
                warn!("🧠 Completion failed: {}", msg);
                self.set_state(DeskState::CompletionError(msg.clone()));
                PromptOutcome::Failed(format!("Error: {}", msg))
            }
        }
    }

    // ==================================================
    // ACCEPT -> EXTRACT -> SUBMIT
    // ==================================================

    pub async fn accept(&self) -> AcceptOutcome {
        let _in_flight = match self.enter() {
            Some(guard) => guard,
            None => return AcceptOutcome::Ignored,
        };

        let completion = match self.state() {
            DeskState::CompletionReady(text) => text,
            _ => return AcceptOutcome::NotReady,
        };

        self.set_state(DeskState::Submitting {
            completion: completion.clone(),
        });

        let drafts = match extract_orders(&completion) {
            Ok(d) => d,
            Err(e) => {
                self.notifier.notify(error_notification(&e));
                self.set_state(DeskState::SubmissionFailed {
                    completion,
                    reason: e.to_string(),
                });
                return AcceptOutcome::Failed(e);
            }
        };

        info!("📋 {} order(s) extracted", drafts.len());

        let report = submit_orders(self.gateway.as_ref(), &drafts, &self.policy).await;
        deliver(self.notifier.as_ref(), report_notifications(&report));

        if report.all_acknowledged() {
            self.set_state(DeskState::AllSubmitted {
                completion,
                report: report.clone(),
            });
        } else {
            self.set_state(DeskState::SubmissionFailed {
                completion,
                reason: format!(
                    "{} of {} order(s) acknowledged",
                    report.acknowledged(),
                    drafts.len()
                ),
            });
        }

        if let Some(wallet) = &self.wallet {
            if let Err(e) = wallet.refresh_balance().await {
                warn!("⚠️  Balance refresh failed: {}", e);
            }
        }

        AcceptOutcome::Submitted(report)
    }

    // ==================================================
    // WALLET
    // ==================================================

    pub fn wallet_key(&self) -> Option<String> {
        self.wallet.as_ref().and_then(|w| w.public_key())
    }
}
