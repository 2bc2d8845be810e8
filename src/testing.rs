//! Statistical boundary tests (spec §8, property 8) and a differential
//! testing harness comparing samplers' empirical firing-time marginals on
//! the same seeded toy process. Cross-cutting enough — it drives four
//! different samplers against one fixture — that it doesn't belong beside
//! any single sampler module, so it gets its own `#[cfg(test)]`-only file
//! instead.

use crate::direct::Direct;
use crate::event::Event;
use crate::first_reaction::FirstReaction;
use crate::naive::Naive;
use crate::next_reaction::NextReaction;
use crate::process::{Intensity, Process};
use crate::rng::uniform01;
use crate::sampler::Sampler;
use crate::Time;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct OnlyClock;

struct Exp(f64);

impl Intensity for Exp {
    fn parameters(&self) -> &[f64] {
        std::slice::from_ref(&self.0)
    }
    fn sample<R: RngCore>(&self, now: Time, rng: &mut R) -> Time {
        let xi = -uniform01(rng).max(f64::MIN_POSITIVE).ln();
        self.putative(now, xi)
    }
    fn measured_sample<R: RngCore>(&self, now: Time, rng: &mut R) -> (Time, Time) {
        let xi = -uniform01(rng).max(f64::MIN_POSITIVE).ln();
        (self.putative(now, xi), xi)
    }
    fn putative(&self, now: Time, xi: Time) -> Time {
        now + xi / self.0
    }
}

/// A single always-enabled, never-modified exponential clock.
struct SingleExp(Exp);

impl Process for SingleExp {
    type Clock = OnlyClock;
    type Intensity = Exp;
    fn time(&self) -> Time {
        0.0
    }
    fn intensity(&self, _clock: Self::Clock) -> &Self::Intensity {
        &self.0
    }
    fn hazards<R: RngCore>(&self, rng: &mut R, mut visit: impl FnMut(Self::Clock, Time, Event, &mut R)) {
        visit(OnlyClock, 0.0, Event::Enabled, rng);
    }
}

/// Pearson chi-squared goodness-of-fit statistic against Exp(`lambda`),
/// using `k` equal-probability bins derived from the exponential CDF.
/// Callers compare the result against a critical value for `k - 1` degrees
/// of freedom.
fn chi_squared_exponential(samples: &[Time], lambda: f64, k: usize) -> f64 {
    let mut counts = vec![0usize; k];
    for &t in samples {
        let cdf = 1.0 - (-lambda * t).exp();
        let bin = ((cdf * k as f64) as usize).min(k - 1);
        counts[bin] += 1;
    }
    let expected = samples.len() as f64 / k as f64;
    counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Critical value is ~21.7 at alpha=0.01 and ~27.9 at alpha=0.001 for 9
/// degrees of freedom (10 bins); this threshold leaves a wide margin so the
/// fixed seeds below aren't on a knife's edge.
const CHI_SQUARED_THRESHOLD_9_DOF: f64 = 30.0;

#[test]
fn direct_method_recovers_exponential_marginal() {
    let lambda = 2.0;
    let process = SingleExp(Exp(lambda));
    let mut rng = SmallRng::seed_from_u64(42);
    let mut samples = Vec::with_capacity(5000);
    for _ in 0..5000 {
        let mut sampler = Direct::new();
        let (time, clock) = sampler.next(&process, &mut rng);
        assert_eq!(clock, Some(OnlyClock));
        samples.push(time);
    }
    let stat = chi_squared_exponential(&samples, lambda, 10);
    assert!(stat < CHI_SQUARED_THRESHOLD_9_DOF, "chi-squared statistic {stat} too large for Exp({lambda})");
}

#[test]
fn next_reaction_recovers_exponential_marginal_on_a_memoryless_clock() {
    let lambda = 1.5;
    let mut samples = Vec::with_capacity(5000);
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..5000 {
        let process = SingleExp(Exp(lambda));
        let mut sampler = NextReaction::<SingleExp>::new();
        let (time, clock) = sampler.next(&process, &mut rng);
        assert_eq!(clock, Some(OnlyClock));
        samples.push(time);
    }
    let stat = chi_squared_exponential(&samples, lambda, 10);
    assert!(stat < CHI_SQUARED_THRESHOLD_9_DOF, "chi-squared statistic {stat} too large for Exp({lambda})");
}

/// §4.6: "its marginals can match First Reaction on memoryless-only
/// models" — exercised here as a differential test against a shared
/// Exp(lambda) fixture rather than left as an aspirational claim.
#[test]
fn first_reaction_and_naive_agree_with_exponential_marginal_on_a_memoryless_clock() {
    let lambda = 1.0;
    let n = 3000;
    let mut rng_fr = SmallRng::seed_from_u64(99);
    let mut rng_nv = SmallRng::seed_from_u64(99);
    let mut fr_samples = Vec::with_capacity(n);
    let mut nv_samples = Vec::with_capacity(n);
    for _ in 0..n {
        let process = SingleExp(Exp(lambda));
        let mut fr = FirstReaction::new();
        let (t, clock) = fr.next(&process, &mut rng_fr);
        assert_eq!(clock, Some(OnlyClock));
        fr_samples.push(t);

        let process = SingleExp(Exp(lambda));
        let mut nv = Naive::<SingleExp>::new();
        let (t, clock) = nv.next(&process, &mut rng_nv);
        assert_eq!(clock, Some(OnlyClock));
        nv_samples.push(t);
    }
    let fr_stat = chi_squared_exponential(&fr_samples, lambda, 10);
    let nv_stat = chi_squared_exponential(&nv_samples, lambda, 10);
    assert!(fr_stat < CHI_SQUARED_THRESHOLD_9_DOF, "first reaction chi-squared {fr_stat} too large");
    assert!(nv_stat < CHI_SQUARED_THRESHOLD_9_DOF, "naive chi-squared {nv_stat} too large");
}
