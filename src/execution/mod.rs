use log::{info, warn};

use crate::config::{SubmitConfig, SubmitMode};
use crate::domain::{OrderDraft, SubmissionReport, SubmissionResult, SubmittedOrder};

pub mod errors;
pub mod order_client;

pub use errors::{PipelineError, SubmitError};
pub use order_client::{OrderClient, OrderGateway};

// ==================================================
// SEQUENTIAL SUBMISSION
// ==================================================

/// Post `drafts` one at a time, in order.
///
/// Each POST finishes before the next begins. Under [`SubmitMode::FailFast`]
/// the batch stops at the first failure and the remaining drafts are counted
/// as skipped; nothing already acknowledged is undone.
pub async fn submit_orders<G>(
    gateway: &G,
    drafts: &[OrderDraft],
    policy: &SubmitConfig,
) -> SubmissionReport
where
    G: OrderGateway + ?Sized,
{
    let mut report = SubmissionReport::default();

    info!("📝 Submitting {} order(s)...", drafts.len());

    for (i, draft) in drafts.iter().enumerate() {
        info!("   Order {}: {}", i + 1, draft.describe());

        let result = match submit_one(gateway, draft, policy.validate_shape).await {
            Ok(request_id) => {
                info!("   ✅ Order {} scheduled — request {}", i + 1, request_id);
                SubmissionResult::Acknowledged { request_id }
            }
            Err(e) => {
                warn!("   ❌ Order {} failed: {}", i + 1, e);
                SubmissionResult::Failed {
                    error_message: e.to_string(),
                }
            }
        };

        let failed = !result.is_success();
        report.submitted.push(SubmittedOrder {
            draft: draft.clone(),
            result,
        });

        if failed && policy.mode == SubmitMode::FailFast {
            report.skipped = drafts.len() - (i + 1);
            if report.skipped > 0 {
                warn!("⛔ Halting batch — {} order(s) not sent", report.skipped);
            }
            break;
        }
    }

    report
}

async fn submit_one<G>(gateway: &G, draft: &OrderDraft, validate: bool) -> Result<String, SubmitError>
where
    G: OrderGateway + ?Sized,
{
    if validate {
        draft
            .order()
            .map_err(|e| SubmitError::InvalidOrder(e.to_string()))?;
    }

    let ack = gateway.submit(&draft.to_json()).await?;
    ack.request_id
        .ok_or_else(|| SubmitError::MissingRequestId(String::new()))
}
