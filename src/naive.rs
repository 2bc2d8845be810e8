use crate::event::Event;
use crate::heap::{Handle, MinHeap};
use crate::process::{Intensity, Process};
use crate::sampler::Sampler;
use crate::Time;
use rand::RngCore;
use std::collections::HashMap;

/// Deliberately incorrect reference sampler, retained for differential
/// testing against First Reaction and Next Reaction (§4.6). Uses the same
/// heap as Next Reaction but none of its residual bookkeeping: every
/// `Enabled`/`Modified` event re-samples a fresh putative firing time from
/// scratch, which biases the joint distribution of firing times whenever
/// intensities are non-memoryless or modified mid-flight.
///
/// Re-enabling a clock this sampler previously disabled is permitted (the
/// guard the source code commented out is not reproduced) but is unsafe by
/// specification: the disabled set is just bookkeeping, not a correctness
/// mechanism, and callers should not rely on its behavior.
pub struct Naive<P: Process> {
    heap: MinHeap<P::Clock>,
    queued: HashMap<P::Clock, Handle>,
    disabled: std::collections::HashSet<P::Clock>,
    initialized: bool,
}

impl<P: Process> Naive<P> {
    pub fn new() -> Self {
        Self {
            heap: MinHeap::new(),
            queued: HashMap::new(),
            disabled: std::collections::HashSet::new(),
            initialized: false,
        }
    }

    fn bootstrap<R: RngCore>(&mut self, process: &P, rng: &mut R) {
        let mut clocks = Vec::new();
        process.hazards(rng, |clock, _now, _event, _rng| clocks.push(clock));
        let now = process.time();
        for clock in clocks {
            self.resample(process, clock, now, rng);
        }
        self.initialized = true;
    }

    fn resample<R: RngCore>(&mut self, process: &P, clock: P::Clock, now: Time, rng: &mut R) {
        let t_fire = process.intensity(clock).sample(now, rng);
        assert!(t_fire >= now, "sample produced {t_fire} before now {now}");
        self.disabled.remove(&clock);
        match self.queued.get(&clock).copied() {
            Some(handle) => self.heap.update(handle, t_fire),
            None => {
                let handle = self.heap.push(t_fire, clock);
                self.queued.insert(clock, handle);
            }
        }
    }

    fn remove<R: RngCore>(&mut self, clock: P::Clock, _rng: &mut R) {
        if let Some(handle) = self.queued.remove(&clock) {
            let (_time, popped) = self.heap.remove(handle);
            assert!(popped == clock, "heap removal popped an unexpected clock");
        }
        self.disabled.insert(clock);
    }
}

impl<P: Process> Default for Naive<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Process> Sampler<P> for Naive<P> {
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
            self.resample(process, clock, time, rng);
        } else {
            self.remove(clock, rng);
        }
    }
}
