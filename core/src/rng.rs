//! Seeded randomness for market draws and scheme shuffles.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! `MarketCatalog::draw`, `SchemeCatalog::recommend` and
//! `Journey::advance_month` take a caller-supplied `RandomSource`.
//!
//! A runner holds one master seed. The scheme shuffle stream comes from
//! the master bank directly; every journey session gets its own bank,
//! keyed by the order in which sessions were opened, and draws its
//! market events from that bank's `MarketEvents` slot. Replaying the
//! same seed and the same session order replays every month.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Golden-ratio multiplier used to spread slot and session indices
/// across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// The seam every random operation draws through.
/// Tests implement it with scripted values to force outcomes.
pub trait RandomSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll an integer in [0, n). Returns 0 when `n` is 0.
    fn next_u64_below(&mut self, n: u64) -> u64;
}

/// A named PCG stream.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Stream for `slot_index` under `master_seed`. Slot indices are
    /// fixed by `RngSlot`, so adding a slot never moves existing ones.
    pub fn derived(master_seed: u64, slot_index: u64) -> Self {
        Self::seeded(master_seed ^ slot_index.wrapping_mul(SEED_SPREAD))
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.inner.gen_range(0..n)
    }
}

/// Streams for one runner or one journey session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Bank for the `ordinal`-th journey session opened under this seed.
    pub fn session(&self, ordinal: u64) -> RngBank {
        let mixed = (ordinal.wrapping_add(1)).wrapping_mul(SEED_SPREAD).rotate_left(29);
        RngBank::new(self.master_seed ^ mixed)
    }

    pub fn for_slot(&self, slot: RngSlot) -> SimRng {
        SimRng::derived(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stream indices. Append only: changing an index reseeds its stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    MarketEvents = 0,
    Schemes = 1,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketEvents => "market_events",
            Self::Schemes => "schemes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::seeded(7);
        let mut b = SimRng::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.next_u64_below(1000), b.next_u64_below(1000));
        }
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = SimRng::seeded(0xC0FFEE);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn bounded_draws_respect_bound() {
        let mut rng = SimRng::seeded(3);
        assert_eq!(rng.next_u64_below(0), 0);
        for _ in 0..1_000 {
            assert!(rng.next_u64_below(3) < 3);
        }
    }

    #[test]
    fn slots_produce_distinct_streams() {
        let bank = RngBank::new(42);
        let mut market = bank.for_slot(RngSlot::MarketEvents);
        let mut schemes = bank.for_slot(RngSlot::Schemes);
        assert_eq!(market.name, "market_events");
        let a: Vec<u64> = (0..8).map(|_| market.next_u64_below(u64::MAX)).collect();
        let b: Vec<u64> = (0..8).map(|_| schemes.next_u64_below(u64::MAX)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn sessions_get_distinct_reproducible_banks() {
        let bank = RngBank::new(42);
        assert_eq!(bank.session(0), RngBank::new(42).session(0));
        assert_ne!(bank.session(0), bank.session(1));
        assert_ne!(bank.session(0), bank);
        // Neighbouring master seeds must not hand out each other's sessions.
        assert_ne!(RngBank::new(43).session(0), bank.session(1));
    }
}
