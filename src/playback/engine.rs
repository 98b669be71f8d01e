// Playback engine: drives one step producer with history and future stacks

use crate::algorithms::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::config::PlaybackConfig;
use crate::counters::{CounterRegistry, Counts};
use crate::playback::record::{RecordSink, RunRecord};
use crate::snapshot::{Snapshot, SnapshotStack};
use std::time::{Duration, Instant};

/// Lifecycle of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No run; also entered after `stop`
    Idle,
    /// Auto-advance is enabled
    Running,
    /// Auto-advance is suspended; stepping still works
    Paused,
    /// Serving a step request; returns to Running or Paused afterwards
    Stepping,
    /// Producer exhausted and the run finalized; history can still be reviewed
    Completed,
    /// Ended by a producer fault
    Cancelled,
}

/// What a playback request did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Pulled a new frame from the live producer
    Advanced,
    /// Restored a cached future snapshot without touching the producer
    Replayed,
    /// Restored the previous snapshot from history
    SteppedBack,
    /// The producer was exhausted; carries the finalize record
    Completed(RunRecord),
    /// Nothing to do in the current state
    NothingToDo,
}

/// The snapshot/history controller for a single run
pub struct Player {
    config: PlaybackConfig,

    /// Counter tallies; the player's run uses `instance` (global when `None`)
    registry: CounterRegistry,
    instance: Option<String>,

    /// Live producer, present from `start` until stop/cancel
    producer: Option<Box<dyn StepProducer>>,
    algorithm: Option<Algorithm>,

    /// Exposed state, which may lag behind the producer after stepping back
    array: Vec<Value>,
    highlights: Highlights,
    heat: Vec<u32>,
    elapsed: Duration,
    started_at: Option<Instant>,

    /// Counter totals and swap heat reached by the live producer
    frontier: Counts,
    frontier_heat: Vec<u32>,

    history: SnapshotStack,
    future: SnapshotStack,

    status: RunStatus,
    finalized: bool,
    fault: Option<SortError>,
    last_tick: Option<Instant>,

    sink: Option<Box<dyn RecordSink>>,
}

impl Player {
    /// Create an idle player counting into the global tally
    pub fn new(config: PlaybackConfig) -> Self {
        Player {
            registry: CounterRegistry::new(),
            instance: None,
            producer: None,
            algorithm: None,
            array: Vec::new(),
            highlights: Highlights::none(),
            heat: Vec::new(),
            elapsed: Duration::ZERO,
            started_at: None,
            frontier: Counts::default(),
            frontier_heat: Vec::new(),
            history: SnapshotStack::new(config.history_limit),
            future: SnapshotStack::new(config.history_limit),
            status: RunStatus::Idle,
            finalized: false,
            fault: None,
            last_tick: None,
            sink: None,
            config,
        }
    }

    /// Count into a named instance instead of the global tally
    pub fn with_instance(mut self, name: impl Into<String>) -> Self {
        self.instance = Some(name.into());
        self
    }

    /// Send finalize records to `sink`
    pub fn with_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Start a fresh run of `algorithm` over `array`
    pub fn start(&mut self, array: Vec<Value>, algorithm: Algorithm, seed: u64) {
        self.start_with(algorithm.producer(array, seed));
    }

    /// Start a fresh run driven by an already-built producer
    pub fn start_with(&mut self, producer: Box<dyn StepProducer>) {
        self.registry.reset(self.instance.as_deref());
        self.array = producer.array().to_vec();
        self.highlights = Highlights::none();
        self.heat = vec![0; self.array.len()];
        self.elapsed = Duration::ZERO;
        self.started_at = Some(Instant::now());
        self.frontier = Counts::default();
        self.frontier_heat = self.heat.clone();
        self.history.clear();
        self.future.clear();
        self.finalized = false;
        self.fault = None;
        self.last_tick = None;
        self.algorithm = Some(producer.algorithm());
        self.producer = Some(producer);
        self.status = RunStatus::Running;

        tracing::info!(
            algorithm = %producer_name(self.algorithm),
            size = self.array.len(),
            "run started"
        );
    }

    /// Pull one frame from the live producer.
    ///
    /// Any cached future is discarded first, and the current state is pushed
    /// onto history so it can be stepped back to.
    pub fn advance(&mut self) -> Result<StepOutcome, SortError> {
        if !matches!(self.status, RunStatus::Running | RunStatus::Paused) {
            return Ok(StepOutcome::NothingToDo);
        }

        if !self.future.is_empty() {
            tracing::trace!(discarded = self.future.len(), "future invalidated");
            self.future.clear();
        }
        self.history.push(self.capture());
        self.pull()
    }

    /// Auto-advance if running and at least one delay has passed since the
    /// last auto-advance
    pub fn tick(&mut self, now: Instant) -> Result<StepOutcome, SortError> {
        if self.status != RunStatus::Running {
            return Ok(StepOutcome::NothingToDo);
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.config.delay {
                return Ok(StepOutcome::NothingToDo);
            }
        }
        self.last_tick = Some(now);
        self.advance()
    }

    /// Restore the previous snapshot, moving the current state onto the future
    pub fn step_back(&mut self) -> StepOutcome {
        if !self.is_navigable() {
            return StepOutcome::NothingToDo;
        }
        let Some(snapshot) = self.history.pop() else {
            return StepOutcome::NothingToDo;
        };

        let prior = self.enter_stepping();
        self.future.push(self.capture());
        self.restore(snapshot);
        self.leave_stepping(prior);

        tracing::trace!(
            history = self.history.len(),
            future = self.future.len(),
            "stepped back"
        );
        StepOutcome::SteppedBack
    }

    /// Replay the next cached future snapshot, or pull from the producer when
    /// the future is empty
    pub fn step_forward(&mut self) -> Result<StepOutcome, SortError> {
        if !self.is_navigable() {
            return Ok(StepOutcome::NothingToDo);
        }

        if let Some(snapshot) = self.future.pop() {
            let prior = self.enter_stepping();
            self.history.push(self.capture());
            self.restore(snapshot);
            self.leave_stepping(prior);

            tracing::trace!(future = self.future.len(), "replayed from future");
            return Ok(StepOutcome::Replayed);
        }

        if self.status == RunStatus::Completed {
            return Ok(StepOutcome::NothingToDo);
        }

        let prior = self.enter_stepping();
        self.history.push(self.capture());
        let outcome = self.pull();
        self.leave_stepping(prior);
        outcome
    }

    /// Drain the live producer and finalize the run
    pub fn run_to_completion(&mut self) -> Result<StepOutcome, SortError> {
        loop {
            match self.advance()? {
                StepOutcome::Completed(record) => return Ok(StepOutcome::Completed(record)),
                StepOutcome::NothingToDo => return Ok(StepOutcome::NothingToDo),
                _ => {}
            }
        }
    }

    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == RunStatus::Paused {
            self.status = RunStatus::Running;
            self.last_tick = None;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            RunStatus::Running => self.pause(),
            RunStatus::Paused => self.resume(),
            _ => {}
        }
    }

    /// Discard the run without finalizing it
    pub fn stop(&mut self) {
        if self.status == RunStatus::Idle {
            return;
        }
        tracing::info!(
            algorithm = %producer_name(self.algorithm),
            status = ?self.status,
            "run stopped"
        );

        self.producer = None;
        self.history.clear();
        self.future.clear();
        self.registry.reset(self.instance.as_deref());
        self.frontier = Counts::default();
        self.frontier_heat.clear();
        self.highlights = Highlights::none();
        self.status = RunStatus::Idle;
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay = delay;
    }

    // ========== Getter methods for the render sink ==========

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    pub fn highlights(&self) -> Highlights {
        self.highlights
    }

    pub fn heat(&self) -> &[u32] {
        &self.heat
    }

    /// Heat at which a bar is drawn fully hot
    pub fn heat_threshold(&self) -> f64 {
        (self.array.len() as f64 * 1.5).max(1.0)
    }

    /// Counter totals as of the exposed state
    pub fn counts(&self) -> Counts {
        self.registry.read(self.instance.as_deref())
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    pub fn history(&self) -> &SnapshotStack {
        &self.history
    }

    pub fn future(&self) -> &SnapshotStack {
        &self.future
    }

    /// True when the exposed state is the newest the producer has reached
    pub fn is_at_frontier(&self) -> bool {
        self.future.is_empty()
    }

    /// Cause of the fault that cancelled the last run
    pub fn fault(&self) -> Option<&SortError> {
        self.fault.as_ref()
    }

    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Capture the exposed state as an independent snapshot
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            array: self.array.clone(),
            highlights: self.highlights,
            counts: self.counts(),
            elapsed: self.elapsed,
            heat: self.heat.clone(),
        }
    }

    // ========== Internals ==========

    fn is_navigable(&self) -> bool {
        matches!(
            self.status,
            RunStatus::Running | RunStatus::Paused | RunStatus::Completed
        )
    }

    fn enter_stepping(&mut self) -> RunStatus {
        let prior = self.status;
        if matches!(prior, RunStatus::Running | RunStatus::Paused) {
            self.status = RunStatus::Stepping;
        }
        prior
    }

    fn leave_stepping(&mut self, prior: RunStatus) {
        if self.status == RunStatus::Stepping {
            self.status = prior;
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.array = snapshot.array;
        self.highlights = snapshot.highlights;
        self.heat = snapshot.heat;
        self.elapsed = snapshot.elapsed;
        self.registry
            .set_absolute(self.instance.as_deref(), snapshot.counts);
    }

    fn run_time(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Pull from the live producer at the frontier
    fn pull(&mut self) -> Result<StepOutcome, SortError> {
        let Some(producer) = self.producer.as_mut() else {
            return Ok(StepOutcome::NothingToDo);
        };

        // Counters may have been rewound by stepping back
        self.registry
            .set_absolute(self.instance.as_deref(), self.frontier);
        let result = match self.instance.as_deref() {
            Some(name) => producer.step(&mut self.registry.scope(name)),
            None => producer.step(&mut self.registry),
        };

        match result {
            Ok(Some(highlights)) => {
                let counts = self.registry.read(self.instance.as_deref());
                let gained = counts.swaps.saturating_sub(self.frontier.swaps);
                self.frontier = counts;

                self.array.clear();
                self.array.extend_from_slice(producer.array());
                self.highlights = highlights;
                // Heat may have been rewound by stepping back
                self.heat.clone_from(&self.frontier_heat);
                if gained > 0 {
                    let gained = u32::try_from(gained).unwrap_or(u32::MAX);
                    for index in highlights.active.into_iter().flatten() {
                        if let Some(heat) = self.heat.get_mut(index) {
                            *heat = heat.saturating_add(gained);
                        }
                    }
                    self.frontier_heat.clone_from(&self.heat);
                }
                self.elapsed = self.started_at.map(|t| t.elapsed()).unwrap_or_default();
                Ok(StepOutcome::Advanced)
            }
            Ok(None) => {
                let sorted = producer.array().to_vec();
                Ok(self.complete(sorted))
            }
            Err(fault) => Err(self.cancel(fault)),
        }
    }

    fn complete(&mut self, sorted: Vec<Value>) -> StepOutcome {
        self.frontier = self.counts();
        self.heat.clone_from(&self.frontier_heat);
        self.array = sorted;
        self.highlights = Highlights::none();
        self.elapsed = self.run_time();
        self.status = RunStatus::Completed;

        if self.finalized {
            return StepOutcome::NothingToDo;
        }
        self.finalized = true;

        let counts = self.counts();
        let record = RunRecord {
            algorithm: producer_name(self.algorithm).to_string(),
            array_size: self.array.len(),
            swaps: counts.swaps,
            comparisons: counts.comparisons,
            elapsed_ms: self.elapsed.as_secs_f64() * 1000.0,
        };
        tracing::info!(
            algorithm = %record.algorithm,
            size = record.array_size,
            comparisons = record.comparisons,
            swaps = record.swaps,
            elapsed_ms = record.elapsed_ms,
            "run completed"
        );

        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.record(&record) {
                tracing::warn!(error = %err, "failed to persist run record");
            }
        }
        StepOutcome::Completed(record)
    }

    fn cancel(&mut self, fault: SortError) -> SortError {
        tracing::error!(error = %fault, "producer fault, run cancelled");
        self.producer = None;
        self.highlights = Highlights::none();
        self.status = RunStatus::Cancelled;
        self.fault = Some(fault.clone());
        fault
    }
}

fn producer_name(algorithm: Option<Algorithm>) -> &'static str {
    algorithm.map(Algorithm::name).unwrap_or("none")
}
