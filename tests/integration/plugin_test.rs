// Phase runner tests through the host hook contract

use buildsweep::core::config::{LogOptions, PhaseOptions, PluginOptions};
use buildsweep::core::diagnostics::Diagnostics;
use buildsweep::core::items::TrimmedItems;
use buildsweep::core::plugin::{
    BuildContext, BuildHooks, CollectingContext, Done, NoContext, PhaseHook, SweepPlugin,
};
use buildsweep::core::report::{Phase, PhaseReport, PhaseState, Reporter};
use buildsweep::core::trash::{Trash, TrashEvent};
use buildsweep::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

struct UnusedTrash;

impl Trash for UnusedTrash {
    fn move_to_trash(&self, path: &Path) -> Result<()> {
        panic!("trash should not be used for {}", path.display());
    }
}

#[derive(Default)]
struct RecordingReporter {
    reports: Mutex<Vec<PhaseReport>>,
    leftovers: Mutex<Vec<Diagnostics>>,
}

impl Reporter for RecordingReporter {
    fn report(&self, report: &PhaseReport) {
        self.reports.lock().push(report.clone());
    }

    fn diagnostics(&self, _phase: Phase, diagnostics: &Diagnostics, _log: LogOptions) {
        self.leftovers.lock().push(diagnostics.clone());
    }

    fn trash_event(&self, _phase: Phase, _event: &TrashEvent, _log: LogOptions) {}
}

/// Minimal host: keeps one hook per phase
#[derive(Default)]
struct FakeHost {
    hooks: HashMap<Phase, (&'static str, PhaseHook)>,
}

impl BuildHooks for FakeHost {
    fn tap(&mut self, phase: Phase, name: &'static str, hook: PhaseHook) {
        self.hooks.insert(phase, (name, hook));
    }
}

impl FakeHost {
    fn fire(&self, phase: Phase, ctx: &mut dyn BuildContext) -> usize {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let done: Done = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let (_, hook) = &self.hooks[&phase];
        hook(ctx, done);
        calls.load(Ordering::SeqCst)
    }
}

fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("dist/js")).unwrap();
    fs::write(root.join("dist/js/app.js"), "app").unwrap();
    fs::write(root.join("stats.json"), "{}").unwrap();
    fs::write(root.join("keep.txt"), "keep").unwrap();
    temp_dir
}

fn options(root: &Path) -> PhaseOptions {
    PhaseOptions {
        root: Some(root.to_path_buf()),
        include: vec!["dist".to_string(), "stats.json".to_string()],
        ..PhaseOptions::default()
    }
}

fn plugin(options: PluginOptions, reporter: Arc<RecordingReporter>) -> Arc<SweepPlugin> {
    Arc::new(SweepPlugin::with_collaborators(options, Arc::new(UnusedTrash), reporter).unwrap())
}

#[test]
fn test_apply_registers_only_configured_phases() {
    let temp_dir = fixture();
    let plugin = plugin(
        PluginOptions {
            before: Some(options(temp_dir.path())),
            after: Some(options(temp_dir.path())),
            watch: None,
        },
        Arc::new(RecordingReporter::default()),
    );
    let mut host = FakeHost::default();

    plugin.apply(&mut host);

    assert!(host.hooks.contains_key(&Phase::Before));
    assert!(host.hooks.contains_key(&Phase::After));
    assert!(!host.hooks.contains_key(&Phase::Watch));
    assert_eq!(host.hooks[&Phase::Before].0, SweepPlugin::NAME);
}

#[test]
fn test_hook_removes_and_signals_completion_once() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let reporter = Arc::new(RecordingReporter::default());
    let plugin = plugin(
        PluginOptions {
            after: Some(options(root)),
            ..PluginOptions::default()
        },
        reporter.clone(),
    );
    let mut host = FakeHost::default();
    plugin.apply(&mut host);

    let calls = host.fire(Phase::After, &mut NoContext);

    assert_eq!(calls, 1);
    assert!(!root.join("dist").exists());
    assert!(!root.join("stats.json").exists());
    assert!(root.join("keep.txt").exists());

    let reports = reporter.reports.lock();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].state, PhaseState::Done);
    assert_eq!(reports[0].items.directories, vec!["dist".to_string()]);
    assert_eq!(reports[0].items.files, vec!["stats.json".to_string()]);
}

#[test]
fn test_emulate_leaves_filesystem_untouched() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let reporter = Arc::new(RecordingReporter::default());
    let mut phase = options(root);
    phase.emulate = true;
    let plugin = plugin(
        PluginOptions {
            before: Some(phase),
            ..PluginOptions::default()
        },
        reporter.clone(),
    );

    let outcome = plugin.handle(Phase::Before, &mut NoContext, Box::new(|| {}));

    assert_eq!(outcome.state, PhaseState::ReportOnly);
    assert!(root.join("dist/js/app.js").exists());
    assert!(root.join("stats.json").exists());
    assert!(outcome.removal.removed.is_empty());

    let reports = reporter.reports.lock();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].emulate);
    assert_eq!(reports[0].items.directories.len() + reports[0].items.files.len(), 2);
}

#[test]
fn test_before_remove_can_cancel() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut phase = options(root);
    phase.before_remove = Some(Arc::new(move |items: &TrimmedItems| {
        sink.lock().extend(items.files.iter().cloned());
        true
    }));
    let plugin = plugin(
        PluginOptions {
            before: Some(phase),
            ..PluginOptions::default()
        },
        Arc::new(RecordingReporter::default()),
    );

    let mut ctx = CollectingContext::default();
    let outcome = plugin.run_phase(Phase::Before, &mut ctx);

    assert_eq!(outcome.state, PhaseState::Cancelled);
    assert!(root.join("stats.json").exists());
    assert_eq!(*seen.lock(), vec!["stats.json".to_string()]);
    assert_eq!(ctx.warnings.len(), 1);
}

#[test]
fn test_after_remove_receives_removed_paths() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let removed: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&removed);
    let mut phase = options(root);
    phase.after_remove = Some(Arc::new(move |paths: &[PathBuf]| sink.lock().extend_from_slice(paths)));
    let plugin = plugin(
        PluginOptions {
            after: Some(phase),
            ..PluginOptions::default()
        },
        Arc::new(RecordingReporter::default()),
    );

    plugin.run_phase(Phase::After, &mut NoContext);

    assert_eq!(*removed.lock(), vec![root.join("dist"), root.join("stats.json")]);
}

#[test]
fn test_diagnostics_go_to_reporter_without_context_lists() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let reporter = Arc::new(RecordingReporter::default());
    let mut phase = options(root);
    phase.include.push("..".to_string());
    let plugin = plugin(
        PluginOptions {
            after: Some(phase),
            ..PluginOptions::default()
        },
        reporter.clone(),
    );

    let outcome = plugin.run_phase(Phase::After, &mut NoContext);

    assert_eq!(outcome.state, PhaseState::Done);
    assert_eq!(outcome.diagnostics.warnings.len(), 1);
    let leftovers = reporter.leftovers.lock();
    assert_eq!(leftovers.len(), 1);
    assert_eq!(leftovers[0].warnings.len(), 1);
}

#[test]
fn test_muted_warnings_are_not_forwarded() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let mut phase = options(root);
    phase.include = vec!["..".to_string()];
    phase.log.log_warning = false;
    let plugin = plugin(
        PluginOptions {
            after: Some(phase),
            ..PluginOptions::default()
        },
        Arc::new(RecordingReporter::default()),
    );

    let mut ctx = CollectingContext::default();
    let outcome = plugin.run_phase(Phase::After, &mut ctx);

    assert_eq!(outcome.state, PhaseState::Empty);
    assert!(ctx.warnings.is_empty());
    assert_eq!(outcome.diagnostics.warnings.len(), 2);
}

#[test]
fn test_each_phase_plans_from_scratch() {
    let temp_dir = fixture();
    let root = temp_dir.path();
    let plugin = plugin(
        PluginOptions {
            before: Some(options(root)),
            ..PluginOptions::default()
        },
        Arc::new(RecordingReporter::default()),
    );

    let first = plugin.run_phase(Phase::Before, &mut NoContext);
    assert_eq!(first.state, PhaseState::Done);

    fs::write(root.join("stats.json"), "{}").unwrap();
    let second = plugin.run_phase(Phase::Before, &mut NoContext);
    assert_eq!(second.state, PhaseState::Done);
    assert_eq!(second.removal.removed, vec![root.join("stats.json")]);
    assert!(second.diagnostics.warnings.is_empty());
}
