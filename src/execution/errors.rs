use std::fmt;

/// Failure of a single order POST.
#[derive(Debug)]
pub enum SubmitError {
    /// The endpoint answered with a non-2xx status.
    Rejected { status: u16, body: String },
    /// The request never produced a response.
    Transport(String),
    /// 2xx answer without a usable `requestId`.
    MissingRequestId(String),
    /// Shape validation was enabled and the draft is not an order.
    InvalidOrder(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Rejected { status, body } if body.is_empty() => {
                write!(f, "HTTP error! status: {}", status)
            }
            SubmitError::Rejected { status, body } => {
                write!(f, "HTTP error! status: {} ({})", status, body)
            }
            SubmitError::Transport(msg) => write!(f, "Order request failed: {}", msg),
            SubmitError::MissingRequestId(body) => {
                write!(f, "Order acknowledged without a request id: {}", body)
            }
            SubmitError::InvalidOrder(msg) => write!(f, "Invalid order: {}", msg),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Failures surfaced to the user when accepting a completion.
#[derive(Debug)]
pub enum PipelineError {
    /// No fenced block of the completion parsed as a JSON object.
    NoValidOrders,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NoValidOrders => {
                write!(f, "No valid JSON blocks found in the response")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reads_like_an_http_error() {
        let e = SubmitError::Rejected {
            status: 400,
            body: String::new(),
        };
        assert_eq!(e.to_string(), "HTTP error! status: 400");

        let e = SubmitError::Rejected {
            status: 500,
            body: "createOrder failed".into(),
        };
        assert_eq!(e.to_string(), "HTTP error! status: 500 (createOrder failed)");
    }
}
