use std::time::Duration;

use locator_harvest::capture::{
    capture_loop::{CaptureOutcome, CaptureSession},
    sink::{DirectorySink, MemorySink, SnapshotSink},
    source::{RecordingSource, SnapshotSource},
    stop::{CycleLimit, StopFlag},
};
use locator_harvest::error::{HarvestError, Result};
use locator_harvest::trace::logger::CaptureJournal;

use crate::common::utils::{ScriptedSource, Step, fixture_path};

mod common;

const APP: &str = "com.example.demo";

fn session() -> CaptureSession {
    CaptureSession::new(APP, Duration::ZERO)
}

// =========================================================================
// poll_once
// =========================================================================

#[test]
fn novel_snapshot_is_saved_with_raw_markup() {
    let raw = r#"<R><F name="q" value="typed"/></R>"#;
    let mut source = ScriptedSource::frames(APP, &[raw]);
    let mut sink = MemorySink::default();
    let mut session = session();

    let outcome = session.poll_once(&mut source, &mut sink).unwrap();

    assert!(matches!(outcome, CaptureOutcome::Saved { seq: 1, .. }));
    assert_eq!(sink.saved, vec![(1, raw.to_string())], "raw markup, not canonical");
    assert_eq!(session.store().len(), 1);
}

#[test]
fn value_only_change_is_a_duplicate() {
    let mut source = ScriptedSource::frames(
        APP,
        &[r#"<R><F name="q" value=""/></R>"#, r#"<R><F name="q" value="abc"/></R>"#],
    );
    let mut sink = MemorySink::default();
    let mut session = session();

    session.poll_once(&mut source, &mut sink).unwrap();
    let second = session.poll_once(&mut source, &mut sink).unwrap();

    assert!(matches!(second, CaptureOutcome::Duplicate { .. }));
    assert_eq!(sink.saved.len(), 1);
}

#[test]
fn foreign_app_is_skipped_without_fetching() {
    let mut source = ScriptedSource::new(vec![Step::Frame {
        app: "com.apple.springboard",
        markup: "<SpringBoard/>".into(),
    }]);
    let mut sink = MemorySink::default();
    let mut session = session();

    let outcome = session.poll_once(&mut source, &mut sink).unwrap();

    assert_eq!(
        outcome,
        CaptureOutcome::ForeignApp {
            current: "com.apple.springboard".into()
        }
    );
    assert!(sink.saved.is_empty());
    assert!(session.store().is_empty());
}

#[test]
fn unparsable_markup_is_still_deduplicated_on_raw_text() {
    let mut source = ScriptedSource::frames(APP, &["<R><open>", "<R><open>", "<R><other>"]);
    let mut sink = MemorySink::default();
    let mut session = session();

    let outcomes: Vec<&'static str> = (0..3)
        .map(|_| session.poll_once(&mut source, &mut sink).unwrap().kind())
        .collect();

    assert_eq!(outcomes, vec!["saved", "duplicate", "saved"]);
}

struct FailingSink;

impl SnapshotSink for FailingSink {
    fn save(&mut self, _seq: u64, _markup: &str) -> Result<String> {
        Err(HarvestError::io(
            "/nowhere",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }
}

#[test]
fn failed_save_does_not_mark_snapshot_as_seen() {
    let markup = "<R/>";
    let mut source = ScriptedSource::frames(APP, &[markup, markup]);
    let mut session = session();

    assert!(session.poll_once(&mut source, &mut FailingSink).is_err());
    assert!(session.store().is_empty());

    let mut sink = MemorySink::default();
    let retry = session.poll_once(&mut source, &mut sink).unwrap();
    assert!(matches!(retry, CaptureOutcome::Saved { seq: 1, .. }));
}

// =========================================================================
// run
// =========================================================================

#[test]
fn run_until_exhausted_counts_every_outcome() {
    let mut source = ScriptedSource::new(vec![
        Step::Frame { app: APP, markup: "<A/>".into() },
        Step::Frame { app: APP, markup: "<A/>".into() },
        Step::Unavailable,
        Step::Frame { app: "other.app", markup: "<X/>".into() },
        Step::Frame { app: APP, markup: "<B/>".into() },
    ]);
    let mut sink = MemorySink::default();

    let summary = session()
        .run(&mut source, &mut sink, &StopFlag::new())
        .unwrap();

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.source_errors, 1);
    assert_eq!(summary.foreign_app, 1);
    assert_eq!(summary.cycles, 6);
    assert!(summary.exhausted);
    assert_eq!(
        sink.saved.iter().map(|(seq, _)| *seq).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(source.released, 1);
}

#[test]
fn triggered_stop_ends_run_before_polling_and_releases_source() {
    let mut source = ScriptedSource::frames(APP, &["<A/>"]);
    let mut sink = MemorySink::default();
    let stop = StopFlag::new();
    stop.trigger();

    let summary = session().run(&mut source, &mut sink, &stop).unwrap();

    assert_eq!(summary.cycles, 0);
    assert!(!summary.exhausted);
    assert!(sink.saved.is_empty());
    assert_eq!(source.released, 1);
}

#[test]
fn cycle_limit_stops_an_endless_source() {
    let markups: Vec<String> = (0..50).map(|i| format!("<P n=\"{}\"/>", i)).collect();
    let refs: Vec<&str> = markups.iter().map(String::as_str).collect();
    let mut source = ScriptedSource::frames(APP, &refs);
    let mut sink = MemorySink::default();

    let summary = session()
        .run(&mut source, &mut sink, &CycleLimit::new(3))
        .unwrap();

    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.saved, 3);
    assert_eq!(source.released, 1);
}

#[test]
fn sink_failure_aborts_run_but_still_releases_source() {
    let mut source = ScriptedSource::frames(APP, &["<A/>", "<B/>"]);

    let result = session().run(&mut source, &mut FailingSink, &StopFlag::new());

    assert!(matches!(result, Err(HarvestError::Io { .. })));
    assert_eq!(source.released, 1);
}

// =========================================================================
// Recording source, directory sink, journal
// =========================================================================

#[test]
fn recording_replay_writes_numbered_page_files() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("journal.jsonl");
    let pages = dir.path().join("pages");

    let mut source = RecordingSource::open(&fixture_path("recording.jsonl")).unwrap();
    assert_eq!(source.remaining(), 5);
    let mut sink = DirectorySink::create(&pages, "page_", "xml").unwrap();

    let mut session = session().with_journal(CaptureJournal::new(journal_path.to_str().unwrap()));
    let summary = session.run(&mut source, &mut sink, &StopFlag::new()).unwrap();

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.duplicates, 2);
    assert_eq!(summary.foreign_app, 1);

    let first = std::fs::read_to_string(pages.join("page_1.xml")).unwrap();
    assert_eq!(
        first,
        r#"<AppiumAUT><XCUIElementTypeTextField name="email" value=""/></AppiumAUT>"#
    );
    assert!(pages.join("page_2.xml").exists());
    assert!(!pages.join("page_3.xml").exists());

    let journal = std::fs::read_to_string(&journal_path).unwrap();
    let kinds: Vec<String> = journal
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["outcome"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["saved", "duplicate", "foreign_app", "saved", "duplicate", "exhausted"]
    );
}

#[test]
fn directory_sink_names_files_by_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::create(dir.path(), "screen-", ".txt").unwrap();

    let location = sink.save(7, "<R/>").unwrap();

    assert!(location.ends_with("screen-7.txt"));
    assert_eq!(std::fs::read_to_string(sink.path_for(7)).unwrap(), "<R/>");
}

#[test]
fn recording_source_exhausts_cleanly() {
    let mut source = RecordingSource::from_jsonl("").unwrap();
    assert_eq!(source.active_app_identifier().unwrap(), None);
}
