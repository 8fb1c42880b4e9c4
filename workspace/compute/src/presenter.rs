//! Widget state machine: `Loading → Ready | Error`.
//!
//! A widget starts in [`WidgetState::Loading`] when it mounts and settles
//! exactly once. Results arriving after the widget unmounted are dropped.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use common::{ChartConfig, WidgetKind};
use tracing::{debug, error};

use crate::error::FetchError;
use crate::pipeline::LoadedChart;

/// Delay before the chart is redrawn once after it first renders.
pub const REDRAW_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Loading,
    Ready {
        config: ChartConfig,
        from_cache: bool,
    },
    Error {
        message: String,
    },
}

impl WidgetState {
    /// Maps a pipeline outcome to the terminal state of `kind`. Every fetch
    /// failure collapses into the widget's static error message.
    pub fn from_outcome(kind: WidgetKind, outcome: Result<LoadedChart, FetchError>) -> Self {
        match outcome {
            Ok(loaded) => WidgetState::Ready {
                config: loaded.config,
                from_cache: loaded.from_cache,
            },
            Err(err) => {
                error!(?kind, %err, "Failed to load chart data");
                WidgetState::Error {
                    message: kind.error_message().to_string(),
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn config(&self) -> Option<&ChartConfig> {
        match self {
            Self::Ready { config, .. } => Some(config),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Shared flag telling an in-flight load whether its widget is still
/// mounted. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct MountGuard(Rc<Cell<bool>>);

impl MountGuard {
    /// A guard for a freshly mounted widget.
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one mounted widget instance.
#[derive(Debug)]
pub struct Presenter {
    kind: WidgetKind,
    state: WidgetState,
    mount: MountGuard,
}

impl Presenter {
    pub fn mount(kind: WidgetKind) -> Self {
        debug!(?kind, "Widget mounted");
        Self {
            kind,
            state: WidgetState::Loading,
            mount: MountGuard::new(),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn guard(&self) -> MountGuard {
        self.mount.clone()
    }

    pub fn unmount(&self) {
        debug!(kind = ?self.kind, "Widget unmounted");
        self.mount.unmount();
    }

    /// Applies the outcome of the load started on mount.
    ///
    /// Returns `false` and leaves the state untouched when the widget is no
    /// longer mounted or has already settled.
    pub fn complete(&mut self, outcome: Result<LoadedChart, FetchError>) -> bool {
        if !self.mount.is_mounted() {
            debug!(kind = ?self.kind, "Discarding result for unmounted widget");
            return false;
        }
        if !self.state.is_loading() {
            return false;
        }
        self.state = WidgetState::from_outcome(self.kind, outcome);
        true
    }

    pub fn into_state(self) -> WidgetState {
        self.state
    }
}
