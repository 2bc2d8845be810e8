pub mod direct;
pub mod event;
pub mod fixed_direct;
pub mod first_reaction;
pub mod heap;
pub mod naive;
pub mod next_reaction;
pub mod process;
pub mod record;
pub mod rng;
pub mod sampler;
#[cfg(test)]
mod testing;
pub mod tree;

/// absolute simulation time
pub type Time = f64;
/// a rate / hazard parameter, always nonnegative
pub type Rate = f64;

/// rates below this are treated as zero; below this threshold a total rate
/// is considered degenerate and samplers return `(Time::INFINITY, None)`
/// rather than dividing by (near) zero.
pub const EPSILON: Rate = 1e-12;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize logging for the demo binary
#[cfg(feature = "cli")]
pub fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term]).expect("initialize logger");
}
