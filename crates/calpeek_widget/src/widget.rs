// --- File: crates/calpeek_widget/src/widget.rs ---
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use calpeek_common::models::AvailabilityResult;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::client::AvailabilityFetcher;
use crate::format::{format_busy, DisplayOptions, FormattedInterval};

pub const DEFAULT_DAYS: u32 = 7;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

/// What the widget currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState {
    Loading,
    Error(String),
    Empty { days: u32 },
    Populated(Vec<FormattedInterval>),
}

impl WidgetState {
    /// The one-line message for non-list states.
    pub fn message(&self) -> Option<String> {
        match self {
            WidgetState::Loading => Some("Loading availability…".to_string()),
            WidgetState::Error(message) => Some(message.clone()),
            WidgetState::Empty { days } => {
                Some(format!("No busy times in the next {days} day(s)."))
            }
            WidgetState::Populated(_) => None,
        }
    }
}

/// Normalizes a requested day count: clamped to `[1, 30]` and truncated.
/// Non-finite input is rejected.
pub fn clamp_days(input: f64) -> Option<u32> {
    if !input.is_finite() {
        return None;
    }
    Some(input.clamp(f64::from(MIN_DAYS), f64::from(MAX_DAYS)).trunc() as u32)
}

#[derive(Debug)]
struct Inner {
    days: u32,
    generation: u64,
    mounted: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<WidgetState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Availability widget. Fetches on mount and whenever `days` changes; only
/// the most recently started fetch may update the displayed state.
pub struct AvailabilityWidget<F: AvailabilityFetcher> {
    fetcher: Arc<F>,
    options: DisplayOptions,
    shared: Arc<Shared>,
}

impl<F: AvailabilityFetcher> AvailabilityWidget<F> {
    pub fn new(fetcher: F, options: DisplayOptions) -> Self {
        let (state, _) = watch::channel(WidgetState::Loading);
        Self {
            fetcher: Arc::new(fetcher),
            options,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    days: DEFAULT_DAYS,
                    generation: 0,
                    mounted: false,
                }),
                state,
            }),
        }
    }

    pub fn days(&self) -> u32 {
        self.shared.lock().days
    }

    pub fn state(&self) -> WidgetState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.shared.state.subscribe()
    }

    /// Starts the first fetch. Must be called within a tokio runtime.
    pub fn mount(&self) -> JoinHandle<()> {
        self.shared.lock().mounted = true;
        self.start_fetch()
    }

    /// Applies a new day count. Returns the spawned fetch when the normalized
    /// value differs from the current one and the widget is mounted.
    pub fn set_days(&self, input: f64) -> Option<JoinHandle<()>> {
        let Some(days) = clamp_days(input) else {
            warn!("Ignoring non-finite days value {}", input);
            return None;
        };
        let mounted = {
            let mut inner = self.shared.lock();
            if inner.days == days {
                return None;
            }
            inner.days = days;
            inner.mounted
        };
        mounted.then(|| self.start_fetch())
    }

    fn start_fetch(&self) -> JoinHandle<()> {
        let (generation, days) = {
            let mut inner = self.shared.lock();
            inner.generation += 1;
            self.shared.state.send_replace(WidgetState::Loading);
            (inner.generation, inner.days)
        };
        debug!("Fetching availability for {} day(s), request #{}", days, generation);

        let fetcher = Arc::clone(&self.fetcher);
        let shared = Arc::clone(&self.shared);
        let options = self.options;
        tokio::spawn(async move {
            let next = match fetcher.fetch(days).await {
                Ok(result) => render(result, days, &options),
                Err(e) => {
                    warn!("Availability request failed: {}", e);
                    WidgetState::Error(e.to_string())
                }
            };

            let inner = shared.lock();
            if inner.generation != generation {
                debug!(
                    "Discarding availability for {} day(s): request #{} superseded by #{}",
                    days, generation, inner.generation
                );
                return;
            }
            shared.state.send_replace(next);
        })
    }
}

fn render(result: AvailabilityResult, days: u32, options: &DisplayOptions) -> WidgetState {
    if result.busy.is_empty() {
        WidgetState::Empty { days }
    } else {
        WidgetState::Populated(format_busy(result.busy, options))
    }
}
