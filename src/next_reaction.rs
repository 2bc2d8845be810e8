use crate::event::Event;
use crate::heap::MinHeap;
use crate::process::{Intensity, Process};
use crate::record::TransitionRecord;
use crate::sampler::Sampler;
use crate::Time;
use rand::RngCore;
use std::collections::HashMap;

/// General semi-Markov propagator using Anderson's Next Reaction Method:
/// each clock keeps a unit-exponential residual `xi` that survives
/// enable/modify/disable cycles, so modifying a clock's intensity thins the
/// process instead of re-randomizing it. Amortized O(log n) per step via a
/// mutable min-heap.
///
/// See §4.5 of the specification for the full derivation; `disable` is the
/// trickiest operation, since its heap removal must distinguish "disabled,
/// residual preserved" from "fired, record discarded".
pub struct NextReaction<P: Process> {
    heap: MinHeap<P::Clock>,
    transition_state: HashMap<P::Clock, TransitionRecord>,
    initialized: bool,
}

impl<P: Process> NextReaction<P> {
    pub fn new() -> Self {
        Self {
            heap: MinHeap::new(),
            transition_state: HashMap::new(),
            initialized: false,
        }
    }

    fn bootstrap<R: RngCore>(&mut self, process: &P, rng: &mut R) {
        let mut clocks = Vec::new();
        process.hazards(rng, |clock, _now, _event, _rng| clocks.push(clock));
        for clock in clocks {
            self.enable(process, clock, process.time(), rng);
        }
        self.initialized = true;
    }

    /// Unified routine for `Enabled` and `Modified` events (§4.5). The
    /// residual `ξ` carried by an already-queued clock is aged down by the
    /// hazard consumed under the *previous* intensity between
    /// `record.last_modification_time` and `now` before it is handed to the
    /// new intensity's `putative` — otherwise a `Modified` event would
    /// double-count whatever hazard already accumulated, firing later than
    /// it should.
    fn enable<R: RngCore>(&mut self, process: &P, clock: P::Clock, now: Time, rng: &mut R) {
        let intensity = process.intensity(clock);
        match self.transition_state.get(&clock).copied() {
            None => {
                let (t_fire, xi) = intensity.measured_sample(now, rng);
                assert!(t_fire >= now, "measured_sample produced {t_fire} before now {now}");
                let handle = self.heap.push(t_fire, clock);
                self.transition_state.insert(clock, TransitionRecord::queued(xi, handle, now));
            }
            Some(record) => {
                let xi = match record.heap_handle {
                    Some(handle) => record.aged(self.heap.time_at(handle), now),
                    None => record.exponential_interval,
                };
                let t_fire = intensity.putative(now, xi);
                assert!(t_fire >= now, "putative produced {t_fire} before now {now}");
                match record.heap_handle {
                    Some(handle) => {
                        self.heap.update(handle, t_fire);
                        self.transition_state.insert(clock, TransitionRecord::queued(xi, handle, now));
                    }
                    None => {
                        let handle = self.heap.push(t_fire, clock);
                        self.transition_state.insert(clock, TransitionRecord::queued(xi, handle, now));
                    }
                }
            }
        }
    }

    /// Unified routine for `Disabled` and `Fired` events (§4.5). `Disabled`
    /// ages the residual down to its value at `now` and freezes it there
    /// (no hazard accumulates while disabled); `Fired` discards the record.
    fn disable<R: RngCore>(&mut self, clock: P::Clock, now: Time, event: Event, _rng: &mut R) {
        let record = *self
            .transition_state
            .get(&clock)
            .expect("disable of a clock with no transition record");
        let t_fire = record.heap_handle.map(|handle| self.heap.time_at(handle));
        if let Some(handle) = record.heap_handle {
            let (_time, popped) = self.heap.remove(handle);
            assert!(
                popped == clock,
                "heap sentinel removal popped a different clock than expected"
            );
        }
        match event {
            Event::Disabled => {
                let xi = match t_fire {
                    Some(t_fire) => record.aged(t_fire, now),
                    None => record.exponential_interval,
                };
                self.transition_state.insert(
                    clock,
                    TransitionRecord {
                        exponential_interval: xi,
                        heap_handle: None,
                        last_modification_time: now,
                    },
                );
            }
            Event::Fired => {
                self.transition_state.remove(&clock);
            }
            _ => unreachable!("disable() only handles Disabled and Fired"),
        }
    }
}

impl<P: Process> Default for NextReaction<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Process> Sampler<P> for NextReaction<P> {
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>) {
        if !self.initialized {
            self.bootstrap(process, rng);
        }
        match self.heap.peek() {
            Some((time, clock)) => (time, Some(clock)),
            None => (Time::INFINITY, None),
        }
    }

    fn observe<R: RngCore>(&mut self, process: &P, clock: P::Clock, time: Time, event: Event, rng: &mut R) {
        if !self.initialized {
            self.initialized = true;
        }
        if event.is_enable() {
            self.enable(process, clock, time, rng);
        } else {
            self.disable(clock, time, event, rng);
        }
    }
}
