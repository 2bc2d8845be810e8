use crate::direct::Direct;
use crate::event::Event;
use crate::first_reaction::FirstReaction;
use crate::fixed_direct::FixedDirect;
use crate::naive::Naive;
use crate::next_reaction::NextReaction;
use crate::process::IndexedProcess;
use crate::Time;
use rand::RngCore;

/// The two-operation contract every propagator implements: ask for the next
/// firing, and learn about clock-state changes that result from firing it.
///
/// `next` must be idempotent and non-destructive: repeated calls without an
/// intervening `observe` return the same `(time, clock)`, modulo whatever
/// randomness a particular variant (re-)consumes on each call.
pub trait Sampler<P: crate::process::Process> {
    /// Which clock fires next, and at what absolute time. `(Time::INFINITY,
    /// None)` signals a degenerate, empty process.
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>);

    /// Told of a single clock's state change. The outer loop must deliver
    /// one `observe` call for every clock touched by a firing before the
    /// next `next` call. `process` is passed through so variants that keep
    /// per-clock state (Fixed Direct, Next Reaction, Naive) can read the
    /// clock's current intensity and metadata at the moment of the event.
    fn observe<R: RngCore>(&mut self, process: &P, clock: P::Clock, time: Time, event: Event, rng: &mut R);
}

/// Tagged-variant dispatch over the five samplers (§9 "Variant dispatch").
/// Lets a driver pick a sampling scheme at runtime (e.g. from a CLI flag)
/// while any one trajectory still resolves to a single, monomorphic variant
/// for the lifetime of the propagator.
pub enum Propagator<P: IndexedProcess> {
    Direct(Direct),
    FixedDirect(FixedDirect<P>),
    FirstReaction(FirstReaction),
    NextReaction(NextReaction<P>),
    Naive(Naive<P>),
}

impl<P: IndexedProcess> Sampler<P> for Propagator<P> {
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>) {
        match self {
            Propagator::Direct(s) => s.next(process, rng),
            Propagator::FixedDirect(s) => s.next(process, rng),
            Propagator::FirstReaction(s) => s.next(process, rng),
            Propagator::NextReaction(s) => s.next(process, rng),
            Propagator::Naive(s) => s.next(process, rng),
        }
    }

    fn observe<R: RngCore>(&mut self, process: &P, clock: P::Clock, time: Time, event: Event, rng: &mut R) {
        match self {
            Propagator::Direct(s) => s.observe(process, clock, time, event, rng),
            Propagator::FixedDirect(s) => s.observe(process, clock, time, event, rng),
            Propagator::FirstReaction(s) => s.observe(process, clock, time, event, rng),
            Propagator::NextReaction(s) => s.observe(process, clock, time, event, rng),
            Propagator::Naive(s) => s.observe(process, clock, time, event, rng),
        }
    }
}

impl<P: IndexedProcess> std::fmt::Display for Propagator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Propagator::Direct(_) => write!(f, "direct"),
            Propagator::FixedDirect(_) => write!(f, "fixed-direct"),
            Propagator::FirstReaction(_) => write!(f, "first-reaction"),
            Propagator::NextReaction(_) => write!(f, "next-reaction"),
            Propagator::Naive(_) => write!(f, "naive"),
        }
    }
}
