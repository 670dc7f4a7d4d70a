//! Deferred status changes (bonus screen hand-off, countdown) as a polled
//! timer. There is at most one pending transition; scheduling replaces it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionAction {
    /// Load the map at this index and enter the countdown.
    LoadMap(usize),
    /// Last map done: game over with the completed flag set.
    FinishGame,
    /// Countdown finished.
    StartPlaying,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scheduled {
    pub fire_at_ms: f64,
    pub action: TransitionAction,
}

#[derive(Clone, Debug, Default)]
pub struct TransitionTimer {
    pending: Option<Scheduled>,
}

impl TransitionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, action: TransitionAction) {
        if let Some(prev) = self.pending {
            log::debug!("transition {:?} replaced by {:?}", prev.action, action);
        }
        self.pending = Some(Scheduled {
            fire_at_ms: now_ms + delay_ms,
            action,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Scheduled> {
        self.pending
    }

    /// Take the pending action if its time has come.
    pub fn poll(&mut self, now_ms: f64) -> Option<TransitionAction> {
        match self.pending {
            Some(s) if now_ms >= s.fire_at_ms => {
                self.pending = None;
                Some(s.action)
            }
            _ => None,
        }
    }
}
