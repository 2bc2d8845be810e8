use crate::event::Event;
use crate::process::{Intensity, Process};
use crate::sampler::Sampler;
use crate::Time;
use rand::RngCore;

/// Stateless general semi-Markov sampler: draws a putative firing time from
/// every enabled clock's intensity and keeps the minimum. Correct for
/// arbitrary (non-exponential) intensities, at O(n) intensity samples per
/// `next` call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstReaction;

impl FirstReaction {
    pub fn new() -> Self {
        Self
    }
}

impl<P: Process> Sampler<P> for FirstReaction {
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>) {
        let now = process.time();
        let mut best: (Time, Option<P::Clock>) = (Time::INFINITY, None);
        process.hazards(rng, |clock, _now, _event, rng| {
            let t = process.intensity(clock).sample(now, rng);
            assert!(t >= now, "intensity sampled a firing time {t} before now {now}");
            if t < best.0 {
                best = (t, Some(clock));
            }
        });
        best
    }

    /// First Reaction re-samples every clock from scratch on every `next`
    /// call; it keeps no state between observed events.
    fn observe<R: RngCore>(&mut self, _process: &P, _clock: P::Clock, _time: Time, _event: Event, _rng: &mut R) {}
}
