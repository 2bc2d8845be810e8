use crate::event::Event;
use crate::process::{Intensity, Process};
use crate::rng::uniform01;
use crate::sampler::Sampler;
use crate::{Time, EPSILON};
use rand::RngCore;

/// Classical Gillespie direct method. Exponential clocks only; holds no
/// state between steps, so every `next` call re-enumerates the process'
/// enabled clocks in O(n).
///
/// Using this with a non-exponential intensity is undefined behavior by
/// contract: the sampler reads `parameters()[0]` as a rate and nothing
/// checks that the distribution actually is exponential.
#[derive(Debug, Default, Clone, Copy)]
pub struct Direct;

impl Direct {
    pub fn new() -> Self {
        Self
    }
}

impl<P: Process> Sampler<P> for Direct {
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>) {
        let now = process.time();
        let mut keys = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;
        process.hazards(rng, |clock, _now, _event, _rng| {
            let lambda = process.intensity(clock).parameters()[0];
            total += lambda;
            keys.push(clock);
            cumulative.push(total);
        });
        if total <= EPSILON {
            return (Time::INFINITY, None);
        }
        let u = uniform01(rng) * total;
        let i = cumulative.partition_point(|&c| c < u);
        assert!(i < cumulative.len(), "selection fell past the last enabled clock");
        let time_draw = uniform01(rng).max(f64::MIN_POSITIVE);
        (now - time_draw.ln() / total, Some(keys[i]))
    }

    /// Direct Method is stateless between steps.
    fn observe<R: RngCore>(&mut self, _process: &P, _clock: P::Clock, _time: Time, _event: Event, _rng: &mut R) {}
}
