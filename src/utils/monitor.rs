use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Timing for one engine phase, plus resident memory when sampling is on.
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
}

/// Records phase timings for an analysis run.
///
/// With the `cli` feature and `enabled == true` it also samples the
/// process's resident memory through `sysinfo` and keeps the peak.
pub struct RunMonitor {
    enabled: bool,
    started: Instant,
    last_mark: Mutex<Instant>,
    peak_memory_mb: Mutex<u64>,
    #[cfg(feature = "cli")]
    probe: Option<(Mutex<System>, Pid)>,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            last_mark: Mutex::new(now),
            peak_memory_mb: Mutex::new(0),
            #[cfg(feature = "cli")]
            probe: if enabled { Self::probe() } else { None },
        }
    }

    #[cfg(feature = "cli")]
    fn probe() -> Option<(Mutex<System>, Pid)> {
        match sysinfo::get_current_pid() {
            Ok(pid) => Some((Mutex::new(System::new()), pid)),
            Err(e) => {
                tracing::warn!("Unable to resolve current PID, memory sampling disabled: {}", e);
                None
            }
        }
    }

    #[cfg(feature = "cli")]
    fn sample_memory_mb(&self) -> Option<u64> {
        let (system, pid) = self.probe.as_ref()?;
        let mut system = system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[*pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(*pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn sample_memory_mb(&self) -> Option<u64> {
        None
    }

    /// Closes the current phase and returns its stats.
    pub fn mark(&self, phase: &str) -> PhaseStats {
        let now = Instant::now();
        let elapsed = match self.last_mark.lock() {
            Ok(mut last) => {
                let elapsed = now.duration_since(*last);
                *last = now;
                elapsed
            }
            Err(_) => Duration::ZERO,
        };

        let memory_mb = if self.enabled { self.sample_memory_mb() } else { None };
        if let (Some(mb), Ok(mut peak)) = (memory_mb, self.peak_memory_mb.lock()) {
            *peak = (*peak).max(mb);
        }

        let stats = PhaseStats {
            phase: phase.to_string(),
            elapsed,
            memory_mb,
        };

        if self.enabled {
            match stats.memory_mb {
                Some(mb) => tracing::info!("📊 {} - {:?}, Memory: {}MB", phase, elapsed, mb),
                None => tracing::info!("📊 {} - {:?}", phase, elapsed),
            }
        }

        stats
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak = self.peak_memory_mb.lock().map(|p| *p).unwrap_or(0);
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            self.started.elapsed(),
            peak
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
