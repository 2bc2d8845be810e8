/// The four ways a clock's state can change between `next` calls.
///
/// A process reports these to a propagator's `observer` callback; the
/// propagator never infers them on its own.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Event {
    /// A previously-unknown clock became enabled.
    Enabled,
    /// A known, currently-enabled clock's intensity changed.
    Modified,
    /// A known clock stopped being enabled, without firing.
    Disabled,
    /// A known clock fired.
    Fired,
}

impl Event {
    pub fn is_enable(&self) -> bool {
        matches!(self, Event::Enabled | Event::Modified)
    }
    pub fn is_disable(&self) -> bool {
        matches!(self, Event::Disabled | Event::Fired)
    }
}

impl crate::Arbitrary for Event {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..4) {
            0 => Self::Enabled,
            1 => Self::Modified,
            2 => Self::Disabled,
            3 => Self::Fired,
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Enabled => write!(f, "ENABLED "),
            Event::Modified => write!(f, "MODIFIED"),
            Event::Disabled => write!(f, "DISABLED"),
            Event::Fired => write!(f, "FIRED   "),
        }
    }
}
