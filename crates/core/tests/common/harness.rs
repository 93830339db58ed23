use std::cell::Cell;

use isb_core::config::{Config, PrefetcherKind};
use isb_core::prefetch::{MemAccess, PrefetchRequest};
use isb_core::sim::PrefetchDriver;

use super::init_tracing;

/// A single-core driver with an adjustable MSHR occupancy.
pub struct TestContext {
    pub driver: PrefetchDriver,
    occupancy: Cell<usize>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(PrefetcherKind::Isb)
    }
}

impl TestContext {
    pub fn new(kind: PrefetcherKind) -> Self {
        let config = Config {
            prefetcher: kind,
            ..Config::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        let mut driver = PrefetchDriver::new(config).unwrap();
        driver.initialize(0).unwrap();
        Self {
            driver,
            occupancy: Cell::new(0),
        }
    }

    pub fn set_occupancy(&self, occupancy: usize) {
        self.occupancy.set(occupancy);
    }

    /// Observes one access on core 0 as a cache miss.
    pub fn access(&mut self, ip: u64, addr: u64) -> Vec<PrefetchRequest> {
        let occupancy = &self.occupancy;
        let probe = || occupancy.get();
        self.driver.operate(0, addr, ip, false, &probe).unwrap()
    }

    /// Replays `(ip, addr)` pairs on core 0, returning every request.
    pub fn replay(&mut self, trace: &[(u64, u64)]) -> Vec<PrefetchRequest> {
        let occupancy = &self.occupancy;
        let probe = || occupancy.get();
        let accesses = trace
            .iter()
            .map(|&(ip, addr)| MemAccess::new(addr, ip, false));
        self.driver.replay(0, accesses, &probe).unwrap()
    }
}
