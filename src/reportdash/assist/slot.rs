//! Per-operation request state with last-invocation-wins commits.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Observable state of one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistRequest {
    pub status: AssistStatus,
    /// Prompt or content the current (or last) call was issued with.
    pub input: String,
    pub result_text: Option<String>,
    pub error_message: Option<String>,
}

impl AssistRequest {
    pub fn is_pending(&self) -> bool {
        self.status == AssistStatus::Pending
    }
}

/// Identifies one invocation on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct SlotInner {
    latest: u64,
    request: AssistRequest,
}

/// One independent instance of the request state machine.
///
/// The lock is only held for the few instructions of a transition, never
/// across the generator call.
#[derive(Debug)]
pub struct Slot {
    name: &'static str,
    inner: Mutex<SlotInner>,
}

impl Slot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(SlotInner::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Moves to `Pending` and hands out a ticket that supersedes every
    /// earlier one.
    pub fn begin(&self, input: &str) -> Ticket {
        let mut inner = self.inner.lock();
        inner.latest += 1;
        inner.request = AssistRequest {
            status: AssistStatus::Pending,
            input: input.to_string(),
            result_text: None,
            error_message: None,
        };
        Ticket(inner.latest)
    }

    /// Commits an outcome if `ticket` is still the newest. Returns `false`
    /// (and changes nothing) for a superseded ticket.
    pub fn commit(&self, ticket: Ticket, outcome: Result<String, String>) -> bool {
        let mut inner = self.inner.lock();
        if inner.latest != ticket.0 {
            return false;
        }
        match outcome {
            Ok(text) => {
                inner.request.status = AssistStatus::Success;
                inner.request.result_text = Some(text);
                inner.request.error_message = None;
            }
            Err(message) => {
                inner.request.status = AssistStatus::Error;
                inner.request.result_text = None;
                inner.request.error_message = Some(message);
            }
        }
        true
    }

    /// Back to `Idle`. Any call still in flight is superseded.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.latest += 1;
        inner.request = AssistRequest::default();
    }

    pub fn snapshot(&self) -> AssistRequest {
        self.inner.lock().request.clone()
    }
}
