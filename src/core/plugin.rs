//! Phase runner and host build tool contract
//!
//! A host registers [`SweepPlugin`] on its `beforeRun`, `watchRun` and
//! `afterEmit` extension points through [`BuildHooks`]. Each invocation
//! plans from scratch and walks the same state machine:
//!
//! ```text
//! PLANNING -> EMPTY
//! PLANNING -> BUILT -> REPORT-ONLY            (emulate)
//! PLANNING -> BUILT -> CANCELLED              (beforeRemove returned true)
//! PLANNING -> BUILT -> DELETING -> DONE
//! ```
//!
//! Planning and permanent deletion finish before the completion signal is
//! invoked. Trash operations are only queued; their results arrive through
//! the reporter after the phase has already signalled completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::config::{PhaseOptions, PluginOptions};
use crate::core::diagnostics::Diagnostics;
use crate::core::executor::{execute, Method, RemovalOutcome};
use crate::core::items::Items;
use crate::core::planner::plan;
use crate::core::report::{Phase, PhaseReport, PhaseState, Reporter};
use crate::core::trash::{Trash, TrashCallback, TrashEvent, TrashQueue};
use crate::error::Result;
use crate::platform::SystemTrash;
use crate::ui::ConsoleReporter;

/// Context object the host passes to each hook invocation.
///
/// Hosts that collect diagnostics expose their lists; the default says there
/// are none and everything goes to the reporter instead.
pub trait BuildContext {
    fn warnings(&mut self) -> Option<&mut Vec<String>> {
        None
    }

    fn errors(&mut self) -> Option<&mut Vec<String>> {
        None
    }
}

/// Context without diagnostic collections
#[derive(Debug, Default)]
pub struct NoContext;

impl BuildContext for NoContext {}

/// Context that collects diagnostics, for hosts that surface them per build
#[derive(Debug, Default)]
pub struct CollectingContext {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl BuildContext for CollectingContext {
    fn warnings(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.warnings)
    }

    fn errors(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.errors)
    }
}

/// Completion signal; must be invoked exactly once per hook call
pub type Done = Box<dyn FnOnce() + Send>;

pub type PhaseHook = Box<dyn Fn(&mut dyn BuildContext, Done) + Send + Sync>;

/// Registration surface of the host build tool
pub trait BuildHooks {
    fn tap(&mut self, phase: Phase, name: &'static str, hook: PhaseHook);
}

/// Result of one phase invocation
#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub state: PhaseState,
    pub items: Items,
    pub removal: RemovalOutcome,
    pub diagnostics: Diagnostics,
}

impl PhaseOutcome {
    fn new(phase: Phase, state: PhaseState) -> Self {
        Self {
            phase,
            state,
            items: Items::new(),
            removal: RemovalOutcome::default(),
            diagnostics: Diagnostics::new(),
        }
    }
}

pub struct SweepPlugin {
    options: PluginOptions,
    reporter: Arc<dyn Reporter>,
    queue: TrashQueue,
    first_watch: AtomicBool,
}

impl SweepPlugin {
    pub const NAME: &'static str = "buildsweep";

    /// Plugin with the system trash and the console reporter
    pub fn new(options: PluginOptions) -> Result<Self> {
        Self::with_collaborators(options, Arc::new(SystemTrash), Arc::new(ConsoleReporter))
    }

    /// Plugin with caller-supplied trash and reporter.
    ///
    /// Fails when no phase is configured.
    pub fn with_collaborators(
        options: PluginOptions,
        trash: Arc<dyn Trash>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            reporter,
            queue: TrashQueue::new(trash)?,
            first_watch: AtomicBool::new(true),
        })
    }

    /// Register a hook for every configured phase
    pub fn apply(self: &Arc<Self>, hooks: &mut dyn BuildHooks) {
        for phase in Phase::ALL {
            if self.phase_options(phase).is_none() {
                continue;
            }
            log::debug!("Registering {} on {}", Self::NAME, phase.hook_name());

            let plugin = Arc::clone(self);
            hooks.tap(
                phase,
                Self::NAME,
                Box::new(move |ctx: &mut dyn BuildContext, done: Done| {
                    plugin.handle(phase, ctx, done);
                }),
            );
        }
    }

    /// Run `phase` and signal completion once its synchronous work is over
    pub fn handle(&self, phase: Phase, ctx: &mut dyn BuildContext, done: Done) -> PhaseOutcome {
        let outcome = self.run_phase(phase, ctx);
        done();
        outcome
    }

    /// Plan and execute one phase without a completion signal
    pub fn run_phase(&self, phase: Phase, ctx: &mut dyn BuildContext) -> PhaseOutcome {
        let options = match self.select_options(phase) {
            Some(options) => options,
            None => {
                log::debug!("No options for phase {}, skipping", phase);
                return PhaseOutcome::new(phase, PhaseState::Skipped);
            }
        };

        let mut outcome = PhaseOutcome::new(phase, PhaseState::Failed);
        let mut diagnostics = Diagnostics::new();

        let request = match options.to_request() {
            Ok(request) => request,
            Err(e) => {
                diagnostics.error(format!("Cannot build removal request: {}", e));
                self.flush(phase, options, ctx, &diagnostics);
                outcome.diagnostics = diagnostics;
                return outcome;
            }
        };

        if options.log.log_debug {
            log::info!(
                "[{}] root: {}, include: {:?}, exclude: {:?}, test folders: {}",
                phase,
                request.root.display(),
                request.include,
                request.exclude,
                request.test.len()
            );
        }

        let items = match plan(&request, &mut diagnostics) {
            Ok(items) => items,
            Err(e) => {
                diagnostics.error(format!("Cannot plan removal: {}", e));
                self.flush(phase, options, ctx, &diagnostics);
                outcome.diagnostics = diagnostics;
                return outcome;
            }
        };

        let state = if items.is_empty() {
            diagnostics.warn("There is nothing to remove");
            PhaseState::Empty
        } else if request.emulate {
            PhaseState::ReportOnly
        } else if options
            .before_remove
            .as_ref()
            .map_or(false, |hook| hook(&items.trimmed(&request.root)))
        {
            diagnostics.warn("Removal cancelled by the beforeRemove hook");
            PhaseState::Cancelled
        } else {
            let method = if request.to_trash {
                Method::Trash {
                    queue: &self.queue,
                    on_event: self.trash_callback(phase, options),
                }
            } else {
                Method::Permanent
            };
            outcome.removal = execute(&items, method, &mut diagnostics);

            if let Some(hook) = &options.after_remove {
                if !request.to_trash {
                    hook(&outcome.removal.removed);
                }
            }
            PhaseState::Done
        };

        if state != PhaseState::Empty {
            self.reporter.report(&PhaseReport {
                phase,
                root: request.root.clone(),
                items: items.trimmed(&request.root),
                state,
                emulate: request.emulate,
                to_trash: request.to_trash,
                log: options.log,
            });
        }

        self.flush(phase, options, ctx, &diagnostics);

        outcome.state = state;
        outcome.items = items;
        outcome.diagnostics = diagnostics;
        outcome
    }

    /// Block until queued trash operations have resolved
    pub fn settle(&self) {
        self.queue.settle();
    }

    pub fn pending_trash(&self) -> usize {
        self.queue.pending()
    }

    fn phase_options(&self, phase: Phase) -> Option<&PhaseOptions> {
        match phase {
            Phase::Before => self.options.before.as_ref(),
            Phase::Watch => self.options.watch.as_ref(),
            Phase::After => self.options.after.as_ref(),
        }
    }

    /// Options for this invocation; the first watch run may borrow `before`
    fn select_options(&self, phase: Phase) -> Option<&PhaseOptions> {
        if phase == Phase::Watch {
            let first = self.first_watch.swap(false, Ordering::SeqCst);
            if let Some(watch) = &self.options.watch {
                if first && watch.before_for_first_build {
                    if let Some(before) = &self.options.before {
                        log::debug!("First watch build uses the before options");
                        return Some(before);
                    }
                }
            }
        }
        self.phase_options(phase)
    }

    fn trash_callback(&self, phase: Phase, options: &PhaseOptions) -> TrashCallback {
        let reporter = Arc::clone(&self.reporter);
        let log = options.log;
        Arc::new(move |event: TrashEvent| reporter.trash_event(phase, &event, log))
    }

    /// Hand diagnostics to the host context, or to the reporter if it has no lists
    fn flush(
        &self,
        phase: Phase,
        options: &PhaseOptions,
        ctx: &mut dyn BuildContext,
        diagnostics: &Diagnostics,
    ) {
        if diagnostics.is_empty() {
            return;
        }

        let mut leftover = Diagnostics::new();
        let tag = |msg: &String| format!("{} ({}): {}", Self::NAME, phase, msg);

        if options.log.log_warning {
            match ctx.warnings() {
                Some(list) => list.extend(diagnostics.warnings.iter().map(&tag)),
                None => leftover.warnings = diagnostics.warnings.clone(),
            }
        }
        if options.log.log_error {
            match ctx.errors() {
                Some(list) => list.extend(diagnostics.errors.iter().map(&tag)),
                None => leftover.errors = diagnostics.errors.clone(),
            }
        }

        if !leftover.is_empty() {
            self.reporter.diagnostics(phase, &leftover, options.log);
        }
    }
}
