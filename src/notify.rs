use crate::domain::{Notification, SubmissionReport, SubmissionResult};
use crate::execution::PipelineError;

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

// ==================================================
// RESULT -> NOTIFICATION ADAPTERS
// ==================================================

/// One notification per attempted order, in submission order.
pub fn report_notifications(report: &SubmissionReport) -> Vec<Notification> {
    let mut out: Vec<Notification> = report
        .submitted
        .iter()
        .map(|s| match &s.result {
            SubmissionResult::Acknowledged { request_id } => Notification::success(format!(
                "Order scheduled successfully! Request ID: {}",
                request_id
            )),
            SubmissionResult::Failed { error_message } => {
                Notification::error(error_message.clone())
            }
        })
        .collect();

    if report.skipped > 0 {
        out.push(Notification::error(format!(
            "{} remaining order(s) were not submitted",
            report.skipped
        )));
    }

    out
}

pub fn error_notification(err: &PipelineError) -> Notification {
    Notification::error(err.to_string())
}

pub fn deliver(notifier: &dyn Notifier, notifications: Vec<Notification>) {
    for n in notifications {
        notifier.notify(n);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }
}
