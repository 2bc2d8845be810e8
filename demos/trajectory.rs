//! Outer-loop demo binary exercising all five samplers against a toy
//! birth-death process. The propagator core this binary drives is the
//! crate's entire deliverable; the process model, CLI, and logging here
//! are ambient plumbing outside the spec's scope (§1), shipped the way the
//! teacher ships its own `src/bin/*.rs` atop a library core.

use clap::Parser;
use clockwork::event::Event;
use clockwork::process::{IndexedProcess, Intensity, Process};
use clockwork::sampler::{Propagator, Sampler};
use clockwork::{Rate, Time};
use colored::Colorize;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "trajectory", about = "drive a toy semi-Markov process with one of five samplers")]
struct Cli {
    /// Which propagator to run.
    #[arg(long, value_enum, default_value = "next-reaction")]
    sampler: Variant,

    /// Arrival rate (birth clock), must be exponential.
    #[arg(long, default_value_t = 2.0)]
    birth_rate: Rate,

    /// Per-occupant departure rate (death clock), must be exponential.
    #[arg(long, default_value_t = 1.0)]
    death_rate: Rate,

    /// Include a non-exponential wear clock (Weibull hazard). Rejected for
    /// `direct` and `fixed-direct`, which require exponential-only clocks.
    #[arg(long, default_value_t = false)]
    wear: bool,

    /// RNG seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of firings to simulate before stopping.
    #[arg(long, default_value_t = 20)]
    steps: usize,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Variant {
    Direct,
    FixedDirect,
    FirstReaction,
    NextReaction,
    Naive,
}

/// Exponential or Weibull hazard. Weibull gives the demo a genuinely
/// non-memoryless clock to exercise First Reaction / Next Reaction / Naive
/// beyond what Direct and Fixed Direct can legally sample.
enum Hazard {
    Exponential { rate: Rate },
    Weibull { shape: f64, scale: f64 },
}

impl Hazard {
    /// Cumulative hazard `H(t)` from `0` to `t`.
    fn cumulative(&self, t: Time) -> f64 {
        match self {
            Hazard::Exponential { rate } => rate * t,
            Hazard::Weibull { shape, scale } => (t / scale).powf(*shape),
        }
    }

    /// Inverse of `H`: given accumulated hazard `h`, the time at which it
    /// was reached.
    fn inverse_cumulative(&self, h: f64) -> Time {
        match self {
            Hazard::Exponential { rate } => h / rate,
            Hazard::Weibull { shape, scale } => scale * h.powf(1.0 / shape),
        }
    }
}

impl Intensity for Hazard {
    fn parameters(&self) -> &[f64] {
        match self {
            Hazard::Exponential { rate } => std::slice::from_ref(rate),
            Hazard::Weibull { .. } => panic!("Weibull clocks are not exponential; Direct/FixedDirect must exclude them"),
        }
    }

    fn sample<R: RngCore>(&self, now: Time, rng: &mut R) -> Time {
        let xi = -clockwork::rng::uniform01(rng).max(f64::MIN_POSITIVE).ln();
        self.putative(now, xi)
    }

    fn measured_sample<R: RngCore>(&self, now: Time, rng: &mut R) -> (Time, Time) {
        let xi = -clockwork::rng::uniform01(rng).max(f64::MIN_POSITIVE).ln();
        (self.putative(now, xi), xi)
    }

    fn putative(&self, now: Time, xi: Time) -> Time {
        self.inverse_cumulative(self.cumulative(now) + xi)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Clock {
    Birth,
    Death,
    Wear,
}

struct Shop {
    now: Time,
    population: u64,
    birth: Hazard,
    death_rate: Rate,
    death: Hazard,
    wear: Hazard,
    wear_on: bool,
}

impl Shop {
    fn new(birth_rate: Rate, death_rate: Rate, wear_on: bool) -> Self {
        Self {
            now: 0.0,
            population: 0,
            birth: Hazard::Exponential { rate: birth_rate },
            death_rate,
            death: Hazard::Exponential { rate: 0.0 },
            wear: Hazard::Weibull { shape: 2.0, scale: 3.0 },
            wear_on,
        }
    }

    /// Recompute `death`'s cached rate from the current occupancy. Must be
    /// called by the driver after every change to `population`, before the
    /// next `intensity`/`observe` call touching `Clock::Death`.
    fn resync_death(&mut self) {
        self.death = Hazard::Exponential {
            rate: self.death_rate * self.population as f64,
        };
    }
}

impl Process for Shop {
    type Clock = Clock;
    type Intensity = Hazard;

    fn time(&self) -> Time {
        self.now
    }

    fn intensity(&self, clock: Self::Clock) -> &Self::Intensity {
        match clock {
            Clock::Birth => &self.birth,
            Clock::Death => {
                assert!(self.population > 0, "Death queried while no one is in the shop");
                &self.death
            }
            Clock::Wear => &self.wear,
        }
    }

    fn hazards<R: RngCore>(&self, rng: &mut R, mut visit: impl FnMut(Self::Clock, Time, Event, &mut R)) {
        visit(Clock::Birth, self.now, Event::Enabled, rng);
        if self.population > 0 {
            visit(Clock::Death, self.now, Event::Enabled, rng);
        }
        if self.wear_on {
            visit(Clock::Wear, self.now, Event::Enabled, rng);
        }
    }
}

impl IndexedProcess for Shop {
    fn n(&self) -> usize {
        3
    }
    fn index(&self, clock: Self::Clock) -> usize {
        match clock {
            Clock::Birth => 0,
            Clock::Death => 1,
            Clock::Wear => 2,
        }
    }
}

fn build(variant: Variant, n: usize) -> Propagator<Shop> {
    match variant {
        Variant::Direct => Propagator::Direct(clockwork::direct::Direct::new()),
        Variant::FixedDirect => Propagator::FixedDirect(clockwork::fixed_direct::FixedDirect::new(n)),
        Variant::FirstReaction => Propagator::FirstReaction(clockwork::first_reaction::FirstReaction::new()),
        Variant::NextReaction => Propagator::NextReaction(clockwork::next_reaction::NextReaction::new()),
        Variant::Naive => Propagator::Naive(clockwork::naive::Naive::new()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    #[cfg(feature = "cli")]
    clockwork::init_logging();

    if cli.wear && matches!(cli.sampler, Variant::Direct | Variant::FixedDirect) {
        anyhow::bail!("--wear requires a sampler that tolerates non-exponential clocks (first-reaction, next-reaction, naive)");
    }

    let mut process = Shop::new(cli.birth_rate, cli.death_rate, cli.wear);
    let mut rng = SmallRng::seed_from_u64(cli.seed);
    let mut propagator = build(cli.sampler, process.n());

    for step in 0..cli.steps {
        let (time, clock) = propagator.next(&process, &mut rng);
        let Some(clock) = clock else {
            log::info!("{}", "degenerate total rate, trajectory terminated".yellow());
            break;
        };
        process.now = time;
        match clock {
            Clock::Birth => {
                propagator.observe(&process, Clock::Birth, time, Event::Fired, &mut rng);
                let was_empty = process.population == 0;
                process.population += 1;
                process.resync_death();
                propagator.observe(&process, Clock::Birth, time, Event::Enabled, &mut rng);
                if was_empty {
                    propagator.observe(&process, Clock::Death, time, Event::Enabled, &mut rng);
                } else {
                    propagator.observe(&process, Clock::Death, time, Event::Modified, &mut rng);
                }
            }
            Clock::Death => {
                propagator.observe(&process, Clock::Death, time, Event::Fired, &mut rng);
                process.population -= 1;
                process.resync_death();
                if process.population > 0 {
                    propagator.observe(&process, Clock::Death, time, Event::Enabled, &mut rng);
                }
            }
            Clock::Wear => {
                propagator.observe(&process, Clock::Wear, time, Event::Fired, &mut rng);
                propagator.observe(&process, Clock::Wear, time, Event::Enabled, &mut rng);
            }
        }
        println!(
            "{:>4}  t={:>8.4}  {:<12}  population={}",
            step,
            time,
            format!("{clock:?}").cyan(),
            process.population
        );
    }

    Ok(())
}
