use crate::event::Event;
use crate::process::{IndexedProcess, Intensity};
use crate::rng::uniform01;
use crate::sampler::Sampler;
use crate::tree::PrefixSumTree;
use crate::{Time, EPSILON};
use rand::RngCore;

/// Gillespie direct method reindexed over a fixed-size prefix-sum tree:
/// O(log n) selection instead of Direct Method's O(n) cumulative scan, at
/// the cost of requiring every clock to carry a stable `index in [0, N)`
/// and `N` being fixed at construction.
///
/// Exponential clocks only, same contract as [`crate::direct::Direct`]: a
/// non-exponential intensity is undefined behavior by contract, not a
/// checked error. Missing `index` metadata is a programmer error and
/// panics rather than silently degrading.
pub struct FixedDirect<P: IndexedProcess> {
    tree: PrefixSumTree,
    clock_index: Vec<Option<P::Clock>>,
    initialized: bool,
}

impl<P: IndexedProcess> FixedDirect<P> {
    pub fn new(n: usize) -> Self {
        Self {
            tree: PrefixSumTree::new(n),
            clock_index: vec![None; n],
            initialized: false,
        }
    }

    fn bootstrap<R: RngCore>(&mut self, process: &P, rng: &mut R) {
        let mut updates = Vec::new();
        process.hazards(rng, |clock, _now, _event, _rng| {
            let index = process.index(clock);
            let lambda = process.intensity(clock).parameters()[0];
            self.clock_index[index] = Some(clock);
            updates.push((index, lambda));
        });
        self.tree.bulk_update(&updates);
        self.initialized = true;
    }
}

impl<P: IndexedProcess> Sampler<P> for FixedDirect<P> {
    fn next<R: RngCore>(&mut self, process: &P, rng: &mut R) -> (Time, Option<P::Clock>) {
        if !self.initialized {
            self.bootstrap(process, rng);
        }
        let now = process.time();
        let total = self.tree.total();
        if total <= EPSILON {
            return (Time::INFINITY, None);
        }
        let u = uniform01(rng) * total;
        let (index, _) = self.tree.choose(u);
        let clock = self.clock_index[index].expect("tree has nonzero weight at an unassigned index");
        let time_draw = uniform01(rng).max(f64::MIN_POSITIVE);
        (now - time_draw.ln() / total, Some(clock))
    }

    fn observe<R: RngCore>(&mut self, process: &P, clock: P::Clock, _time: Time, event: Event, _rng: &mut R) {
        if !self.initialized {
            // an observer arriving before the first `next` call still needs
            // somewhere to land; treat it like any other bootstrapped clock.
            self.initialized = true;
        }
        let index = process.index(clock);
        if event.is_enable() {
            let lambda = process.intensity(clock).parameters()[0];
            self.clock_index[index] = Some(clock);
            self.tree.update(index, lambda);
        } else {
            self.tree.update(index, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    struct ClockId(u32);

    struct Exp(f64);
    impl Intensity for Exp {
        fn parameters(&self) -> &[f64] {
            std::slice::from_ref(&self.0)
        }
        fn sample<R: RngCore>(&self, now: Time, _rng: &mut R) -> Time {
            now
        }
        fn measured_sample<R: RngCore>(&self, now: Time, _rng: &mut R) -> (Time, Time) {
            (now, 0.0)
        }
        fn putative(&self, now: Time, _xi: Time) -> Time {
            now
        }
    }

    /// S2: N=4, clocks at indices {0: lambda=1, 2: lambda=3}.
    struct S2Process {
        now: Time,
        slots: [Option<Exp>; 4],
    }

    impl S2Process {
        fn new() -> Self {
            Self {
                now: 0.0,
                slots: [Some(Exp(1.0)), None, Some(Exp(3.0)), None],
            }
        }
    }

    impl crate::process::Process for S2Process {
        type Clock = ClockId;
        type Intensity = Exp;
        fn time(&self) -> Time {
            self.now
        }
        fn intensity(&self, clock: Self::Clock) -> &Self::Intensity {
            self.slots[clock.0 as usize].as_ref().expect("clock must be enabled")
        }
        fn hazards<R: RngCore>(&self, rng: &mut R, mut visit: impl FnMut(Self::Clock, Time, Event, &mut R)) {
            for (index, slot) in self.slots.iter().enumerate() {
                if slot.is_some() {
                    visit(ClockId(index as u32), self.time(), Event::Enabled, rng);
                }
            }
        }
    }

    impl IndexedProcess for S2Process {
        fn n(&self) -> usize {
            4
        }
        fn index(&self, clock: Self::Clock) -> usize {
            clock.0 as usize
        }
    }

    struct ZeroRng;
    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            1u64 << 62
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn s2_bootstrap_and_disable_reshape_the_tree() {
        let process = S2Process::new();
        let mut sampler: FixedDirect<S2Process> = FixedDirect::new(4);
        let mut rng = ZeroRng;
        // trigger bootstrap without consuming the selection draw.
        sampler.bootstrap(&process, &mut rng);
        assert_eq!(sampler.tree.total(), 4.0);
        assert_eq!(sampler.tree.choose(2.5).0, 2);

        sampler.observe(&process, ClockId(2), 0.0, Event::Disabled, &mut rng);
        assert_eq!(sampler.tree.total(), 1.0);
        assert_eq!(sampler.tree.choose(0.5).0, 0);
    }

    #[test]
    fn s6_all_clocks_disabled_is_degenerate() {
        struct Empty;
        impl crate::process::Process for Empty {
            type Clock = ClockId;
            type Intensity = Exp;
            fn time(&self) -> Time {
                0.0
            }
            fn intensity(&self, _clock: Self::Clock) -> &Self::Intensity {
                unreachable!()
            }
            fn hazards<R: RngCore>(&self, _rng: &mut R, _visit: impl FnMut(Self::Clock, Time, Event, &mut R)) {}
        }
        impl IndexedProcess for Empty {
            fn n(&self) -> usize {
                4
            }
            fn index(&self, clock: Self::Clock) -> usize {
                clock.0 as usize
            }
        }
        let mut sampler: FixedDirect<Empty> = FixedDirect::new(4);
        let mut rng = ZeroRng;
        let (time, clock) = sampler.next(&Empty, &mut rng);
        assert_eq!(time, Time::INFINITY);
        assert_eq!(clock, None);
    }

    #[test]
    fn round_trip_update_zero_update_matches_s2_exactly() {
        let mut tree = crate::tree::PrefixSumTree::new(4);
        tree.update(0, 1.0);
        tree.update(2, 3.0);
        let before = tree.total();
        tree.update(2, 0.0);
        tree.update(2, 3.0);
        assert_eq!(tree.total(), before);
    }
}
