use std::time::Duration;

use instant::Instant;


// A single cancellable deadline. Owned by whatever it hides or triggers, so there is never more
// than one live timer per owner: arming replaces the old deadline.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ExpiryTimer {
    deadline: Option<Instant>,
}

impl ExpiryTimer {
    pub fn new() -> Self { ExpiryTimer { deadline: None } }

    pub fn is_armed(&self) -> bool { self.deadline.is_some() }
    pub fn deadline(&self) -> Option<Instant> { self.deadline }

    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.cancel();
        self.deadline = Some(now + duration);
    }

    pub fn cancel(&mut self) { self.deadline = None; }

    // Returns true exactly once per arming: the first call at or after the deadline disarms the
    // timer.
    #[must_use]
    pub fn fire_if_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
