//! Request state machine shared by every panel and the chat session.
//!
//! ```text
//! Idle | Success | Error --begin--> Loading --settle--> Success | Error
//! any --reset--> Idle
//! ```
//!
//! `begin` hands out a ticket; `settle` only applies while that ticket is
//! current, so a call that finishes after a `reset` cannot resurrect a result.

use super::PanelError;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Error(PanelError),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PanelError> {
        match self {
            RequestState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Identifies one outstanding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Lifecycle<T> {
    state: RequestState<T>,
    generation: u64,
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
        }
    }
}

impl<T> Lifecycle<T> {
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Enters Loading. `None` if a call is already outstanding.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_loading() {
            return None;
        }
        self.generation += 1;
        self.state = RequestState::Loading;
        Some(Ticket(self.generation))
    }

    /// Applies the outcome of the call identified by `ticket`. Returns
    /// `false` when the call was superseded by a reset.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<T, PanelError>) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            return false;
        }
        self.state = match outcome {
            Ok(value) => RequestState::Success(value),
            Err(e) => RequestState::Error(e),
        };
        true
    }

    /// Completes without a call (cache hit). Ignored while Loading.
    pub fn succeed(&mut self, value: T) {
        if !self.is_loading() {
            self.state = RequestState::Success(value);
        }
    }

    /// Fails without a call (validation, rate limit). Ignored while Loading.
    pub fn fail(&mut self, error: PanelError) {
        if !self.is_loading() {
            self.state = RequestState::Error(error);
        }
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_rejects_while_loading() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        assert!(lc.begin().is_some());
        assert!(lc.begin().is_none());
    }

    #[test]
    fn test_settle_moves_to_success_or_error() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        let ticket = lc.begin().unwrap();
        assert!(lc.settle(ticket, Ok(7)));
        assert_eq!(lc.state(), &RequestState::Success(7));

        let ticket = lc.begin().unwrap();
        assert!(lc.settle(ticket, Err(PanelError::Network("down".into()))));
        assert_eq!(
            lc.state().error(),
            Some(&PanelError::Network("down".into()))
        );
    }

    #[test]
    fn test_reset_discards_late_outcome() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        let ticket = lc.begin().unwrap();
        lc.reset();
        assert!(!lc.settle(ticket, Ok(1)));
        assert!(lc.state().is_idle());
    }

    #[test]
    fn test_stale_ticket_cannot_settle_newer_call() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        let first = lc.begin().unwrap();
        lc.reset();
        let second = lc.begin().unwrap();
        assert!(!lc.settle(first, Ok(1)));
        assert!(lc.state().is_loading());
        assert!(lc.settle(second, Ok(2)));
        assert_eq!(lc.state().success(), Some(&2));
    }

    #[test]
    fn test_fail_and_succeed_do_not_interrupt_loading() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        lc.begin().unwrap();
        lc.fail(PanelError::Validation("blank".into()));
        lc.succeed(3);
        assert!(lc.state().is_loading());
    }
}
