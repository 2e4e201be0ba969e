//! Background check-cycle scheduler

use crate::health::orchestrator::Orchestrator;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Invokes the orchestrator on a fixed interval, independent of request
/// handling
///
/// Ticks that elapse while a cycle is still running are dropped, not
/// replayed: a cycle that outlasts the interval delays the next one to
/// the following tick boundary instead of triggering back-to-back runs,
/// which bounds resource usage exactly when dependencies are already
/// slow.
pub struct Scheduler {
    orchestrator: Arc<Orchestrator>,
    interval: Duration,
    active: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Create a scheduler over the given orchestrator
    pub fn new(orchestrator: Arc<Orchestrator>, interval: Duration) -> Self {
        Self {
            orchestrator,
            interval,
            active: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Start the background task; a second start while running is a no-op
    pub fn start(&self) {
        if self.active.swap(true, Ordering::AcqRel) {
            debug!("Scheduler already running");
            return;
        }

        info!("Starting health check scheduler (interval: {:?})", self.interval);

        let orchestrator = self.orchestrator.clone();
        let active = self.active.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Ticks missed during a long cycle must not be replayed as an
            // immediate burst once it finishes.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                if !active.load(Ordering::Acquire) {
                    break;
                }

                let snapshot = orchestrator.run_all().await;
                debug!(status = ?snapshot.status, "Scheduled check cycle finished");
            }
        });

        *self.handle.lock() = Some(handle);
    }

    /// Stop the background task; idempotent and safe when never started
    pub fn stop(&self) {
        self.active.store(false, Ordering::Release);
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
            info!("Health check scheduler stopped");
        }
    }

    /// Whether the scheduler is currently running
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::probes::Probe;
    use crate::health::types::ProbeResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    /// Records how many checks overlap at any moment
    struct SlowProbe {
        delay: Duration,
        current: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Probe for SlowProbe {
        fn name(&self) -> &str {
            "slow"
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(10)
        }

        async fn check(&self) -> ProbeResult {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            self.runs.fetch_add(1, Ordering::SeqCst);
            ProbeResult::healthy("slow", self.delay.as_millis() as u64, HashMap::new())
        }
    }

    #[tokio::test]
    async fn overlapping_ticks_are_skipped_not_queued() {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        let probe = SlowProbe {
            delay: Duration::from_millis(120),
            current: current.clone(),
            peak: peak.clone(),
            runs: runs.clone(),
        };
        let orchestrator = Arc::new(Orchestrator::new(vec![Arc::new(probe)]));
        let scheduler = Scheduler::new(orchestrator, Duration::from_millis(20));

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.stop();

        assert_eq!(peak.load(Ordering::SeqCst), 1, "cycles must never overlap");
        // 400ms of 120ms cycles with 20ms ticks: far fewer runs than ticks
        let completed = runs.load(Ordering::SeqCst);
        assert!(completed >= 1 && completed <= 4, "got {} runs", completed);
    }

    /// Records when each cycle started and finished
    struct TimedProbe {
        delay: Duration,
        spans: Arc<Mutex<Vec<(tokio::time::Instant, tokio::time::Instant)>>>,
    }

    #[async_trait]
    impl Probe for TimedProbe {
        fn name(&self) -> &str {
            "timed"
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(10)
        }

        async fn check(&self) -> ProbeResult {
            let started = tokio::time::Instant::now();
            tokio::time::sleep(self.delay).await;
            self.spans.lock().push((started, tokio::time::Instant::now()));
            ProbeResult::healthy("timed", self.delay.as_millis() as u64, HashMap::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missed_ticks_leave_a_gap_instead_of_bursting() {
        let spans = Arc::new(Mutex::new(Vec::new()));
        // each cycle outlasts the interval, so every cycle misses a tick
        let probe = TimedProbe {
            delay: Duration::from_millis(180),
            spans: spans.clone(),
        };
        let orchestrator = Arc::new(Orchestrator::new(vec![Arc::new(probe)]));
        let scheduler = Scheduler::new(orchestrator, Duration::from_millis(100));

        scheduler.start();
        tokio::time::sleep(Duration::from_secs(1)).await;
        scheduler.stop();

        let spans = spans.lock().clone();
        assert!(spans.len() >= 3, "got {} completed cycles", spans.len());
        for pair in spans.windows(2) {
            let gap = pair[1].0 - pair[0].1;
            assert!(
                gap >= Duration::from_millis(15),
                "cycles ran back-to-back, gap {:?}",
                gap
            );
        }
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_safe_when_never_started() {
        let orchestrator = Arc::new(Orchestrator::new(Vec::new()));
        let scheduler = Scheduler::new(orchestrator, Duration::from_secs(60));

        // never started
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());

        scheduler.start();
        assert!(scheduler.is_running());
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn restart_after_stop_runs_cycles_again() {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        let probe = SlowProbe {
            delay: Duration::from_millis(1),
            current,
            peak,
            runs: runs.clone(),
        };
        let orchestrator = Arc::new(Orchestrator::new(vec![Arc::new(probe)]));
        let scheduler = Scheduler::new(orchestrator, Duration::from_millis(10));

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.stop();
        let after_first = runs.load(Ordering::SeqCst);
        assert!(after_first >= 1);

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.stop();
        assert!(runs.load(Ordering::SeqCst) > after_first);
    }
}
