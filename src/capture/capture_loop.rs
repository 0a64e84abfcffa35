use std::time::Duration;

use tracing::{debug, info, warn};

use crate::canonical::fingerprint::{Fingerprint, FingerprintBasis, FingerprintStore, fingerprint_markup};
use crate::capture::sink::SnapshotSink;
use crate::capture::source::SnapshotSource;
use crate::capture::stop::StopSignal;
use crate::error::{HarvestError, Result};
use crate::trace::logger::CaptureJournal;
use crate::trace::trace::CaptureEvent;

/// What one poll cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// A snapshot not seen before in this run was written out
    Saved {
        seq: u64,
        location: String,
        fingerprint: Fingerprint,
    },
    Duplicate {
        fingerprint: Fingerprint,
    },
    /// Another app is in the foreground; nothing was fetched
    ForeignApp {
        current: String,
    },
    /// The source has nothing more to offer
    Exhausted,
}

impl CaptureOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            CaptureOutcome::Saved { .. } => "saved",
            CaptureOutcome::Duplicate { .. } => "duplicate",
            CaptureOutcome::ForeignApp { .. } => "foreign_app",
            CaptureOutcome::Exhausted => "exhausted",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    pub cycles: u64,
    pub saved: u64,
    pub duplicates: u64,
    pub foreign_app: u64,
    pub source_errors: u64,
    pub exhausted: bool,
}

/// State of one capture run: the fingerprints seen so far and the next
/// output sequence number. Independent sessions share nothing.
pub struct CaptureSession {
    target_app: String,
    poll_interval: Duration,
    store: FingerprintStore,
    next_seq: u64,
    journal: CaptureJournal,
}

impl CaptureSession {
    pub fn new(target_app: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            target_app: target_app.into(),
            poll_interval,
            store: FingerprintStore::new(),
            next_seq: 1,
            journal: CaptureJournal::disabled(),
        }
    }

    pub fn with_journal(mut self, journal: CaptureJournal) -> Self {
        self.journal = journal;
        self
    }

    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    pub fn target_app(&self) -> &str {
        &self.target_app
    }

    /// Run a single cycle: check the foreground app, fetch the page source,
    /// and save it if its fingerprint is new.
    ///
    /// The fingerprint is only recorded once the sink accepted the markup, so
    /// a failed write does not hide that screen from later cycles.
    pub fn poll_once(
        &mut self,
        source: &mut dyn SnapshotSource,
        sink: &mut dyn SnapshotSink,
    ) -> Result<CaptureOutcome> {
        let current = match source.active_app_identifier()? {
            Some(app) => app,
            None => return Ok(CaptureOutcome::Exhausted),
        };

        if current != self.target_app {
            info!(
                "Not in {} (currently in {}), waiting...",
                self.target_app, current
            );
            return Ok(CaptureOutcome::ForeignApp { current });
        }

        let markup = source.snapshot_markup()?;
        let (fingerprint, basis) = fingerprint_markup(&markup);
        if basis == FingerprintBasis::RawText {
            debug!("Page source did not parse; deduplicating on raw text");
        }

        if self.store.contains(&fingerprint) {
            info!("Page already saved, skipping ({})", fingerprint);
            return Ok(CaptureOutcome::Duplicate { fingerprint });
        }

        let seq = self.next_seq;
        let location = sink.save(seq, &markup)?;
        self.store.observe(fingerprint);
        self.next_seq += 1;

        info!("Saved new page source: {}", location);
        Ok(CaptureOutcome::Saved {
            seq,
            location,
            fingerprint,
        })
    }

    /// Poll until `stop` fires or the source is exhausted.
    ///
    /// Unavailable-source errors are logged and retried on the next cycle;
    /// any other error ends the run. The source is released in every case.
    pub fn run(
        &mut self,
        source: &mut dyn SnapshotSource,
        sink: &mut dyn SnapshotSink,
        stop: &dyn StopSignal,
    ) -> Result<CaptureSummary> {
        info!("Tracking app: {}", self.target_app);

        let mut summary = CaptureSummary::default();
        let result = self.run_cycles(source, sink, stop, &mut summary);

        let released = source.release();
        if let Err(e) = &released {
            warn!("Failed to release snapshot source: {}", e);
        }

        info!(
            "Stopped capturing page sources ({} saved, {} duplicates, {} cycles)",
            summary.saved, summary.duplicates, summary.cycles
        );

        result?;
        released?;
        Ok(summary)
    }

    fn run_cycles(
        &mut self,
        source: &mut dyn SnapshotSource,
        sink: &mut dyn SnapshotSink,
        stop: &dyn StopSignal,
        summary: &mut CaptureSummary,
    ) -> Result<()> {
        while !stop.should_stop() {
            summary.cycles += 1;
            let cycle = summary.cycles;

            match self.poll_once(source, sink) {
                Ok(outcome) => {
                    self.journal.log(&CaptureEvent::from_outcome(cycle, &outcome));
                    match outcome {
                        CaptureOutcome::Saved { .. } => summary.saved += 1,
                        CaptureOutcome::Duplicate { .. } => summary.duplicates += 1,
                        CaptureOutcome::ForeignApp { .. } => summary.foreign_app += 1,
                        CaptureOutcome::Exhausted => {
                            summary.exhausted = true;
                            return Ok(());
                        }
                    }
                }
                Err(e @ HarvestError::SourceUnavailable(_)) => {
                    warn!("{}", e);
                    self.journal
                        .log(&CaptureEvent::now(cycle, "source_unavailable").with_error(&e));
                    summary.source_errors += 1;
                }
                Err(e) => {
                    self.journal
                        .log(&CaptureEvent::now(cycle, "failed").with_error(&e));
                    return Err(e);
                }
            }

            if !self.poll_interval.is_zero() {
                std::thread::sleep(self.poll_interval);
            }
        }

        Ok(())
    }
}
