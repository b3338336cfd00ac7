use std::fmt;

use crate::asset::endpoint::{Endpoint, STATUS_NOT_FOUND, STATUS_OK};

/// Terminal classification of one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Found,
    NotFound,
    Failed(FailureCause),
}

/// Last failure recorded before the retry budget ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    HttpStatus(u16),
    Transport(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::HttpStatus(status) => write!(f, "received HTTP {status}"),
            FailureCause::Transport(message) => write!(f, "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub id: u32,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    pub fn found(id: u32) -> Self {
        Self {
            id,
            status: ProbeStatus::Found,
        }
    }

    pub fn not_found(id: u32) -> Self {
        Self {
            id,
            status: ProbeStatus::NotFound,
        }
    }

    pub fn failed(id: u32, cause: FailureCause) -> Self {
        Self {
            id,
            status: ProbeStatus::Failed(cause),
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == ProbeStatus::Found
    }
}

/// Stateless single-id prober with a bounded retry budget, safe to share
/// across worker threads.
pub struct Prober<E> {
    endpoint: E,
    max_retries: u32,
}

impl<E: Endpoint> Prober<E> {
    pub fn new(endpoint: E, max_retries: u32) -> Self {
        Self {
            endpoint,
            max_retries,
        }
    }

    /// Classifies one identifier. A 200 or 404 is terminal; anything else,
    /// including transport errors, consumes the retry budget. Retries are
    /// immediate since the batch scheduler already bounds the request rate.
    pub fn probe(&self, id: u32) -> ProbeOutcome {
        let mut remaining = self.max_retries;

        loop {
            let cause = match self.endpoint.status(id) {
                Ok(STATUS_OK) => return ProbeOutcome::found(id),
                Ok(STATUS_NOT_FOUND) => return ProbeOutcome::not_found(id),
                Ok(status) => FailureCause::HttpStatus(status),
                Err(message) => FailureCause::Transport(message),
            };

            if remaining == 0 {
                return ProbeOutcome::failed(id, cause);
            }

            remaining -= 1;
            log::debug!("[{id}] {cause}, retrying ({} attempts left)", remaining + 1);
        }
    }
}
