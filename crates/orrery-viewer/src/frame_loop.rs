// SPDX-License-Identifier: Apache-2.0
//! Frame-loop state machine: {Running, Stopped} plus schedule tickets.
//!
//! The windowing layer issues one redraw callback per `request_redraw`;
//! this machine decides whether a callback that arrives is still the
//! live one. A fresh ticket is taken each time a frame is scheduled, so
//! teardown always cancels the correct pending invocation and a stale
//! callback can never render after `stop`.

/// Token for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped,
}

/// The viewer's render-loop lifecycle.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    latest: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    /// A fresh loop in the `Running` state with no ticket armed.
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            latest: 0,
        }
    }

    /// Schedule the next frame. Returns `None` once stopped.
    pub fn arm(&mut self) -> Option<Ticket> {
        if self.state == LoopState::Stopped {
            return None;
        }
        self.latest += 1;
        Some(Ticket(self.latest))
    }

    /// Whether a callback holding `ticket` should render.
    ///
    /// True only while running and only for the most recently armed
    /// ticket.
    pub fn fire(&self, ticket: Ticket) -> bool {
        self.state == LoopState::Running && ticket.0 == self.latest
    }

    /// Transition to `Stopped`. Safe to call more than once; no ticket
    /// fires afterwards.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_ticket_fires_while_running() {
        let mut fl = FrameLoop::new();
        let t = fl.arm().expect("ticket");
        assert!(fl.fire(t));
    }

    #[test]
    fn stale_ticket_never_fires() {
        let mut fl = FrameLoop::new();
        let old = fl.arm().expect("ticket");
        let fresh = fl.arm().expect("ticket");
        assert!(!fl.fire(old));
        assert!(fl.fire(fresh));
    }

    #[test]
    fn stop_cancels_the_pending_ticket() {
        let mut fl = FrameLoop::new();
        let t = fl.arm().expect("ticket");
        fl.stop();
        assert!(!fl.fire(t));
    }

    #[test]
    fn stopped_loop_cannot_be_rearmed() {
        let mut fl = FrameLoop::new();
        fl.stop();
        assert!(fl.arm().is_none());
        assert!(!fl.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut fl = FrameLoop::new();
        let t = fl.arm().expect("ticket");
        fl.stop();
        fl.stop();
        assert!(!fl.fire(t));
        assert!(fl.arm().is_none());
    }
}
