use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Per-stage timing, plus resident memory when the `cli` feature is on.
pub struct StageMonitor {
    enabled: bool,
    /// Start of the current run and time of the latest mark.
    clock: Mutex<(Instant, Instant)>,
    #[cfg(feature = "cli")]
    memory_sampler: Option<Mutex<(System, Pid)>>,
}

impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            clock: Mutex::new((now, now)),
            #[cfg(feature = "cli")]
            memory_sampler: if enabled {
                sysinfo::get_current_pid()
                    .ok()
                    .map(|pid| Mutex::new((System::new(), pid)))
            } else {
                None
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts a new run; marks and the total are measured from here.
    pub fn reset(&self) {
        if let Ok(mut clock) = self.clock.lock() {
            let now = Instant::now();
            *clock = (now, now);
        }
    }

    #[cfg(feature = "cli")]
    fn memory_mb(&self) -> Option<u64> {
        let mut guard = self.memory_sampler.as_ref()?.lock().ok()?;
        let (system, pid) = &mut *guard;
        let pid = *pid;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn memory_mb(&self) -> Option<u64> {
        None
    }

    /// Logs the time spent since the previous mark.
    pub fn mark(&self, stage: &str) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let elapsed = {
            let mut clock = self.clock.lock().ok()?;
            let elapsed = clock.1.elapsed();
            clock.1 = Instant::now();
            elapsed
        };
        match self.memory_mb() {
            Some(mb) => tracing::info!("📊 {} took {:?} (memory: {}MB)", stage, elapsed, mb),
            None => tracing::info!("📊 {} took {:?}", stage, elapsed),
        }
        Some(elapsed)
    }

    pub fn log_total(&self) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let total = self.clock.lock().ok()?.0.elapsed();
        tracing::info!("📊 Total time: {:?}", total);
        Some(total)
    }
}

impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
