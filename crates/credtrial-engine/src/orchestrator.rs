//! The scheduling core.
//!
//! A run moves through `Idle -> Scheduling -> Draining -> Completed`:
//! the pool is filled and `min(N, candidates)` scoped workers start, the
//! caller blocks until every worker has exited, then the result is
//! assembled from the shared [`Coordination`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use credtrial_detect::DetectionAnalyzer;
use credtrial_types::{
    Advisory, Candidate, DetectionSignal, EngineConfig, EngineResult, ErrorKind, ErrorRecord,
    StopReason, TargetDescriptor,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coordination::{Coordination, StopHandle};
use crate::pool::CandidatePool;
use crate::probe::{AttemptContext, AuthProbe, ProbeResponse};

/// Attempts between progress events.
const PROGRESS_EVERY: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Scheduling,
    Draining,
    Completed,
}

pub struct AttemptOrchestrator {
    probe: Arc<dyn AuthProbe>,
    analyzer: DetectionAnalyzer,
    config: EngineConfig,
    context: AttemptContext,
    stop: StopHandle,
    phase: Mutex<RunPhase>,
}

impl AttemptOrchestrator {
    pub fn new(probe: Arc<dyn AuthProbe>, target: TargetDescriptor, config: EngineConfig) -> Self {
        let context = AttemptContext::new(target, config.timeout());
        Self {
            probe,
            analyzer: DetectionAnalyzer::new(),
            config,
            context,
            stop: StopHandle::new(),
            phase: Mutex::new(RunPhase::Idle),
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.context.proxy = Some(proxy.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: DetectionAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle for aborting a run from another thread. A handle stopped
    /// before `run` makes the run schedule nothing.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn phase(&self) -> RunPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: RunPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
        debug!(?phase, "run phase");
    }

    /// Try `candidates` in order until one is accepted (when stopping on
    /// success), the run is aborted, or the candidates run out. Always
    /// returns a complete result.
    pub fn run(&self, mut candidates: Vec<Candidate>) -> EngineResult {
        let started = Instant::now();
        if let Some(max) = self.config.max_candidates {
            candidates.truncate(max);
        }

        self.set_phase(RunPhase::Scheduling);
        let workers = self.config.concurrency.max(1).min(candidates.len());
        info!(
            probe = self.probe.name(),
            host = %self.context.target.host,
            candidates = candidates.len(),
            workers,
            "starting run"
        );
        let pool = CandidatePool::from_candidates(candidates);
        let coord = Coordination::new(self.stop.clone());

        std::thread::scope(|s| {
            for worker in 0..workers {
                let pool = &pool;
                let coord = &coord;
                s.spawn(move || self.worker_loop(worker, pool, coord));
            }
            self.set_phase(RunPhase::Draining);
        });

        let result = self.assemble(&coord, started);
        self.set_phase(RunPhase::Completed);
        info!(
            success = result.success,
            attempts = result.attempts,
            errors = result.errors.len(),
            blocked = result.blocked,
            stop_reason = ?result.stop_reason,
            "run finished"
        );
        result
    }

    fn worker_loop(&self, worker: usize, pool: &CandidatePool, coord: &Coordination) {
        loop {
            if coord.should_stop() {
                break;
            }
            let Some(candidate) = pool.pop() else {
                break;
            };
            // The stop flag may have flipped while popping.
            if coord.should_stop() {
                break;
            }

            let response = self.invoke(&candidate.value);
            let attempt = coord.record_attempt();
            if attempt % PROGRESS_EVERY == 0 {
                debug!(attempt, worker, "progress");
            }
            self.handle_response(worker, candidate, response, coord);
        }
        debug!(worker, "worker exiting");
    }

    /// Call the probe, turning a panic into an `unknown` failure.
    fn invoke(&self, candidate: &str) -> ProbeResponse {
        panic::catch_unwind(AssertUnwindSafe(|| self.probe.attempt(candidate, &self.context)))
            .unwrap_or_else(|payload| {
                ProbeResponse::failed(ErrorKind::Unknown, format!("probe panicked: {}", panic_message(&*payload)))
            })
    }

    fn handle_response(
        &self,
        worker: usize,
        candidate: Candidate,
        response: ProbeResponse,
        coord: &Coordination,
    ) {
        // The probe's own verdict fills in a success flag the signals left unset.
        let mut response = response;
        if response.signals.success.is_none() {
            response.signals.success = Some(response.success);
        }
        let signals = &response.signals;

        if let Some(signal) = self.analyzer.honeypot_advisory(signals) {
            warn!(candidate = %candidate.value, "response looks like a honeypot");
            coord.push_advisory(Advisory {
                candidate: candidate.value.clone(),
                signal,
                reason: "response looks like a honeypot".to_string(),
            });
        }

        let detection = self.analyzer.classify_detailed(signals);
        if detection.signal == DetectionSignal::MfaDetected {
            coord.push_advisory(Advisory {
                candidate: candidate.value.clone(),
                signal: detection.signal,
                reason: detection
                    .reason
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            });
        }

        if response.success {
            let value = candidate.value.clone();
            if coord.record_success(candidate) {
                info!(candidate = %value, worker, "candidate accepted");
                if self.config.stop_on_success {
                    coord.finish();
                }
            } else {
                debug!(candidate = %value, worker, "late success discarded");
            }
            return;
        }

        if detection.is_escalation() {
            let reason = detection
                .reason
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            let message = match signals.message.as_deref() {
                Some(m) => format!("{reason}: {m}"),
                None => reason,
            };
            warn!(
                candidate = %candidate.value,
                worker,
                signal = ?detection.signal,
                cooldown_ms = self.config.cooldown_ms,
                "defense escalation, cooling down worker"
            );
            coord.push_error(ErrorRecord {
                candidate: candidate.value,
                kind: signals.error.unwrap_or(ErrorKind::RateLimitedOrBanned),
                detection: detection.signal,
                message,
                worker,
            });
            coord.cooldown(self.config.cooldown());
            return;
        }

        // A plain wrong password is not an error.
        match signals.error {
            None | Some(ErrorKind::AuthenticationFailed) => {}
            Some(kind) => {
                debug!(candidate = %candidate.value, worker, %kind, "attempt failed");
                coord.push_error(ErrorRecord {
                    candidate: candidate.value,
                    kind,
                    detection: detection.signal,
                    message: signals.message.clone().unwrap_or_else(|| kind.to_string()),
                    worker,
                });
            }
        }
    }

    fn assemble(&self, coord: &Coordination, started: Instant) -> EngineResult {
        let success = coord.success();
        let errors = coord.errors();
        let blocked = errors
            .iter()
            .any(|e| self.analyzer.message_indicates_block(&e.message));

        let stop_reason = if success.is_some() && self.config.stop_on_success {
            StopReason::Success
        } else if coord.is_aborted() {
            StopReason::Aborted
        } else {
            StopReason::Exhausted
        };

        EngineResult {
            success: success.is_some(),
            candidate: success,
            attempts: coord.attempts(),
            elapsed_secs: started.elapsed().as_secs_f64(),
            errors,
            blocked,
            advisories: coord.advisories(),
            stop_reason,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::from_fn;
    use credtrial_types::ResponseSignals;

    fn orchestrator(probe: Arc<dyn AuthProbe>, config: EngineConfig) -> AttemptOrchestrator {
        AttemptOrchestrator::new(probe, TargetDescriptor::new("127.0.0.1", "admin"), config)
    }

    #[test]
    fn test_phase_transitions() {
        let orch = orchestrator(
            from_fn(|_, _| ProbeResponse::rejected(ResponseSignals::new())),
            EngineConfig::default(),
        );
        assert_eq!(orch.phase(), RunPhase::Idle);
        orch.run(vec![Candidate::original("x")]);
        assert_eq!(orch.phase(), RunPhase::Completed);
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*payload), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(&*payload), "non-string panic payload");
    }

    #[test]
    fn test_max_candidates_truncates() {
        let orch = orchestrator(
            from_fn(|_, _| ProbeResponse::rejected(ResponseSignals::new())),
            EngineConfig::default().with_max_candidates(2),
        );
        let result = orch.run((0..5).map(|i| Candidate::original(format!("p{i}"))).collect());
        assert_eq!(result.attempts, 2);
        assert_eq!(result.stop_reason, StopReason::Exhausted);
    }
}
