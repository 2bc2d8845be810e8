use crate::event::Event;
use crate::Time;
use rand::RngCore;

/// Supplied by the process. The core never inspects an intensity's
/// internals directly; it only ever asks one of these four questions.
pub trait Intensity {
    /// `parameters()[0]` is the rate `lambda`, for the Direct and Fixed
    /// Direct samplers which require exponential clocks.
    fn parameters(&self) -> &[f64];

    /// Absolute firing time for the current intensity. Must be `>= now`.
    fn sample<R: RngCore>(&self, now: Time, rng: &mut R) -> Time;

    /// `(firing_time, xi)`: a firing time together with the unit-exponential
    /// residual that was consumed to produce it. `firing_time` must be
    /// `>= now`.
    fn measured_sample<R: RngCore>(&self, now: Time, rng: &mut R) -> (Time, Time);

    /// Deterministic firing time given a previously drawn residual `xi`.
    /// Must be `>= now`.
    fn putative(&self, now: Time, xi: Time) -> Time;
}

/// The process contract consumed by every sampler. `Clock` is an opaque,
/// identity-keyed handle: equality and hashing must be by identity, not
/// structure, since the same clock can be enabled, modified, and disabled
/// many times over a trajectory.
pub trait Process {
    type Clock: Copy + Eq + std::hash::Hash;
    type Intensity: Intensity;

    /// Current absolute simulation time.
    fn time(&self) -> Time;

    /// The intensity object currently governing `clock`.
    fn intensity(&self, clock: Self::Clock) -> &Self::Intensity;

    /// Invoke `visit` once per currently-enabled clock. Used only for
    /// propagator bootstrap.
    fn hazards<R: RngCore>(
        &self,
        rng: &mut R,
        visit: impl FnMut(Self::Clock, Time, Event, &mut R),
    );
}

/// Extends [`Process`] with the stable `index in [0, N)` metadata that
/// [`crate::fixed_direct::FixedDirect`] requires of every clock.
pub trait IndexedProcess: Process {
    /// Total number of clock slots, fixed at construction time.
    fn n(&self) -> usize;

    /// `clock`'s stable slot index. Missing metadata is a programmer error
    /// and the implementation should panic rather than return a sentinel.
    fn index(&self, clock: Self::Clock) -> usize;
}
