//! Per-core prefetcher driver.
//!
//! The harness talks to the engines exclusively through this type. It
//! provides:
//! 1. **Lifecycle:** One independent engine per simulated core, built on `initialize`.
//! 2. **Access path:** `operate` forwards each observed access in order.
//! 3. **Notifications:** Cache fills and the heartbeat/warmup/final reporting hooks.
//!
//! Engines hold no shared state, so distinct cores may be driven from
//! distinct threads as long as each core's calls stay serialized.

use std::fmt;

use crate::common::error::{ConfigError, DriverError};
use crate::config::{Config, PrefetcherKind};
use crate::prefetch::{
    CacheFill, IsbPrefetcher, MemAccess, MshrProbe, NullPrefetcher, PrefetchRequest, Prefetcher,
    StrideFsmPrefetcher,
};
use crate::stats::PrefetchStats;

/// Owns the engine of every simulated core.
pub struct PrefetchDriver {
    config: Config,
    cores: Vec<Option<Box<dyn Prefetcher>>>,
}

impl PrefetchDriver {
    /// Creates a driver for `config.general.cores` cores.
    ///
    /// No engine exists until `initialize` is called for its core.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is rejected.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let cores = (0..config.general.cores).map(|_| None).collect();
        Ok(Self { config, cores })
    }

    /// Configuration the engines are built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of cores this driver serves.
    pub fn cores(&self) -> usize {
        self.cores.len()
    }

    /// Builds a fresh engine for `core`.
    ///
    /// # Errors
    ///
    /// [`DriverError::UnknownCore`] for an out-of-range id and
    /// [`DriverError::AlreadyInitialized`] on a second call.
    pub fn initialize(&mut self, core: usize) -> Result<(), DriverError> {
        let cores = self.cores.len();
        let config = &self.config;
        let slot = self
            .cores
            .get_mut(core)
            .ok_or(DriverError::UnknownCore { core, cores })?;
        if slot.is_some() {
            return Err(DriverError::AlreadyInitialized(core));
        }
        let engine = build_engine(config);
        tracing::info!(
            core,
            engine = engine.name(),
            degree = config.isb.degree,
            mshr_threshold = config.fill.mshr_threshold,
            "prefetcher initialized"
        );
        *slot = Some(engine);
        Ok(())
    }

    /// Observes one memory access on `core`.
    ///
    /// # Arguments
    ///
    /// * `core` - Core that issued the access.
    /// * `addr` - Byte address accessed.
    /// * `ip` - Instruction pointer of the access.
    /// * `cache_hit` - Whether the access hit.
    /// * `probe` - Live MSHR occupancy of the core's cache.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn operate(
        &mut self,
        core: usize,
        addr: u64,
        ip: u64,
        cache_hit: bool,
        probe: &dyn MshrProbe,
    ) -> Result<Vec<PrefetchRequest>, DriverError> {
        let engine = self.engine_mut(core)?;
        Ok(engine.operate(MemAccess::new(addr, ip, cache_hit), probe))
    }

    /// Feeds a sequence of accesses to `core`, collecting every request.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn replay<I>(
        &mut self,
        core: usize,
        accesses: I,
        probe: &dyn MshrProbe,
    ) -> Result<Vec<PrefetchRequest>, DriverError>
    where
        I: IntoIterator<Item = MemAccess>,
    {
        let engine = self.engine_mut(core)?;
        Ok(accesses
            .into_iter()
            .flat_map(|access| engine.operate(access, probe))
            .collect())
    }

    /// Reports a cache fill on `core`.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn cache_fill(&mut self, core: usize, fill: &CacheFill) -> Result<(), DriverError> {
        self.engine_mut(core)?.cache_fill(fill);
        Ok(())
    }

    /// Periodic progress report.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn heartbeat_stats(&self, core: usize) -> Result<&PrefetchStats, DriverError> {
        let engine = self.engine(core)?;
        let stats = engine.stats();
        tracing::info!(
            core,
            engine = engine.name(),
            accesses = stats.accesses,
            prefetches = stats.prefetches(),
            "prefetcher heartbeat"
        );
        Ok(stats)
    }

    /// Marks the end of warmup.
    ///
    /// Returns the warmup counters and clears them so `final_stats` covers
    /// only the measured region. Prediction state is kept.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn warmup_complete_stats(&mut self, core: usize) -> Result<PrefetchStats, DriverError> {
        let engine = self.engine_mut(core)?;
        let snapshot = engine.stats().clone();
        engine.stats_mut().clear();
        tracing::info!(
            core,
            engine = engine.name(),
            accesses = snapshot.accesses,
            prefetches = snapshot.prefetches(),
            "prefetcher warmup complete"
        );
        Ok(snapshot)
    }

    /// End-of-run report; prints the full statistics block to stdout.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn final_stats(&self, core: usize) -> Result<&PrefetchStats, DriverError> {
        let engine = self.engine(core)?;
        let stats = engine.stats();
        tracing::info!(core, engine = engine.name(), "prefetcher final stats");
        stats.print(engine.name());
        Ok(stats)
    }

    /// Engine of `core`.
    ///
    /// # Errors
    ///
    /// [`DriverError`] if `core` is unknown or not initialized.
    pub fn engine(&self, core: usize) -> Result<&dyn Prefetcher, DriverError> {
        match self.cores.get(core) {
            None => Err(DriverError::UnknownCore {
                core,
                cores: self.cores.len(),
            }),
            Some(None) => Err(DriverError::NotInitialized(core)),
            Some(Some(engine)) => Ok(&**engine),
        }
    }

    fn engine_mut(&mut self, core: usize) -> Result<&mut Box<dyn Prefetcher>, DriverError> {
        let cores = self.cores.len();
        match self.cores.get_mut(core) {
            None => Err(DriverError::UnknownCore { core, cores }),
            Some(None) => Err(DriverError::NotInitialized(core)),
            Some(Some(engine)) => Ok(engine),
        }
    }
}

impl fmt::Debug for PrefetchDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live: Vec<usize> = self
            .cores
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|_| i))
            .collect();
        f.debug_struct("PrefetchDriver")
            .field("prefetcher", &self.config.prefetcher)
            .field("cores", &self.cores.len())
            .field("initialized", &live)
            .finish()
    }
}

/// Instantiates the engine selected by `config`.
fn build_engine(config: &Config) -> Box<dyn Prefetcher> {
    match config.prefetcher {
        PrefetcherKind::Isb => Box::new(IsbPrefetcher::from_config(config)),
        PrefetcherKind::StrideFsm => Box::new(StrideFsmPrefetcher::from_config(config)),
        PrefetcherKind::None => Box::new(NullPrefetcher::default()),
    }
}
