use crate::heap::Handle;
use crate::Time;

/// Per-clock bookkeeping kept by [`crate::next_reaction::NextReaction`]
/// across enable/modify/disable cycles.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRecord {
    /// The unit-exponential residual `xi`: sampled once, then aged down
    /// whenever the clock's putative firing time is recomputed, and reused
    /// across intensity modifications until the clock fires.
    pub exponential_interval: Time,
    /// Position in the firing queue, or `None` when the clock is
    /// enabled-state-preserved but not currently queued (disabled).
    pub heap_handle: Option<Handle>,
    /// The simulation time as of which `exponential_interval` is valid.
    /// Hazard accumulated between this time and `now` must be aged out of
    /// `exponential_interval` before it is combined with a new intensity.
    pub last_modification_time: Time,
}

impl TransitionRecord {
    pub fn queued(exponential_interval: Time, heap_handle: Handle, last_modification_time: Time) -> Self {
        Self {
            exponential_interval,
            heap_handle: Some(heap_handle),
            last_modification_time,
        }
    }

    pub fn is_queued(&self) -> bool {
        self.heap_handle.is_some()
    }

    /// Age `exponential_interval` from `last_modification_time` up to `now`,
    /// given that the clock was queued to fire at `t_fire` under the
    /// intensity that was in effect over that span. Assumes the hazard
    /// accumulated linearly over `[last_modification_time, t_fire]` — exact
    /// for an exponential (constant-rate) clock, and the standard
    /// piecewise-constant-propensity assumption between modify/disable
    /// events otherwise. Returns the residual unchanged if `now` has not
    /// advanced past `last_modification_time`.
    pub fn aged(&self, t_fire: Time, now: Time) -> Time {
        let span = t_fire - self.last_modification_time;
        if span <= 0.0 {
            return self.exponential_interval;
        }
        let remaining_fraction = (t_fire - now) / span;
        self.exponential_interval * remaining_fraction
    }
}

impl crate::Arbitrary for TransitionRecord {
    /// A record with a plausible residual and no queue position, for tests
    /// that need a fixture record without driving a whole propagator.
    fn random() -> Self {
        use rand::Rng;
        Self {
            exponential_interval: rand::rng().random_range(0.0..10.0),
            heap_handle: None,
            last_modification_time: 0.0,
        }
    }
}

impl std::fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.heap_handle {
            Some(_) => write!(f, "xi={:.4} queued", self.exponential_interval),
            None => write!(f, "xi={:.4} disabled", self.exponential_interval),
        }
    }
}
