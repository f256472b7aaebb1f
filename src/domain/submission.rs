use super::order::OrderDraft;

/// Outcome of posting one order to the intake endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Acknowledged { request_id: String },
    Failed { error_message: String },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Acknowledged { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SubmittedOrder {
    pub draft: OrderDraft,
    pub result: SubmissionResult,
}

/// Per-order results of one batch, in submission order.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    pub submitted: Vec<SubmittedOrder>,
    /// Orders never attempted because the batch halted early.
    pub skipped: usize,
}

impl SubmissionReport {
    pub fn acknowledged(&self) -> usize {
        self.submitted.iter().filter(|s| s.result.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.submitted.len() - self.acknowledged()
    }

    pub fn all_acknowledged(&self) -> bool {
        self.failed() == 0 && self.skipped == 0
    }

    pub fn request_ids(&self) -> Vec<&str> {
        self.submitted
            .iter()
            .filter_map(|s| match &s.result {
                SubmissionResult::Acknowledged { request_id } => Some(request_id.as_str()),
                SubmissionResult::Failed { .. } => None,
            })
            .collect()
    }
}
