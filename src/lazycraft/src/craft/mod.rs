//! Currency craft loop
//!
//! A [`CraftSession`] reads the item, decides which currency to apply next and
//! repeats until the item carries every target mod, the retry budget runs out
//! or the [`CancelToken`] is raised.
//!
//! The session never touches input devices or the clipboard itself. It talks
//! to a [`TextSource`] for the current item text and an [`ActionExecutor`]
//! that performs the currency click. The executor is expected to wait for the
//! game to settle before returning, so the next read sees the new item.
//!
//! Loop outline:
//! 1. Read the item. Unreadable text ends the run, here and after any action.
//! 2. Normal items get a Transmutation, Rare items a Scouring followed by a
//!    Transmutation once the scoured item reads back. This does not count
//!    against the retry budget.
//! 3. While retries remain: stop if the item matches, otherwise apply an
//!    Augmentation when a slot is open (stopping right away on a match) or an
//!    Alteration when the item is full.

pub mod cancel;
pub mod currency;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::CraftConfig;
use crate::item::ItemRarity;
use crate::parser::{ItemSnapshot, ModParser, TextModParser};

pub use cancel::CancelToken;
pub use currency::Currency;

/// Screen rectangle, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add((self.width / 2) as i32),
            self.y.saturating_add((self.height / 2) as i32),
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.center();
        write!(f, "({}, {})", x, y)
    }
}

/// Supplies the description of the item under the cursor.
pub trait TextSource {
    /// `None` (or blank text) when nothing could be copied.
    fn read_item_text(&mut self) -> Option<String>;
}

/// Performs the input needed to apply one currency to the item.
pub trait ActionExecutor {
    /// Returns once the game has had time to update the item.
    fn apply_action(&mut self, currency: Currency, target: Region) -> Result<(), ActionError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ActionError(pub String);

/// Why a craft ended without a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    RetriesExhausted,
    StoppedByUser,
    UnreadableItem,
    ActionFailed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::RetriesExhausted => write!(f, "retries exhausted"),
            FailureReason::StoppedByUser => write!(f, "stopped by user"),
            FailureReason::UnreadableItem => write!(f, "item unreadable"),
            FailureReason::ActionFailed(e) => write!(f, "action failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftOutcome {
    Success,
    Failure(FailureReason),
}

impl CraftOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CraftOutcome::Success)
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CraftOutcome::Success => write!(f, "matched"),
            CraftOutcome::Failure(reason) => reason.fmt(f),
        }
    }
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftState {
    Idle,
    Reading,
    Deciding,
    Acting,
    Matched,
    RetriesExhausted,
    StoppedExternally,
    Unreadable,
    ActionFailed,
}

/// Status notifications for a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftEvent {
    Applied { currency: Currency, target: Region },
    Retry { attempt: u32, max: u32 },
    Finished(CraftOutcome),
}

/// Result of one [`CraftSession::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraftReport {
    pub outcome: CraftOutcome,
    pub retries: u32,
    pub applied: Vec<Currency>,
    /// Last successful read of the item
    pub snapshot: Option<ItemSnapshot>,
}

type Observer = Box<dyn FnMut(&CraftEvent)>;

/// Per-run bookkeeping.
#[derive(Default)]
struct Run {
    snapshot: Option<ItemSnapshot>,
    applied: Vec<Currency>,
    action_error: Option<String>,
}

impl Run {
    fn matched(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.matched)
    }
}

pub struct CraftSession<S, E, P = TextModParser> {
    source: S,
    executor: E,
    parser: P,
    cancel: CancelToken,
    max_retries: u32,
    target: Region,
    state: CraftState,
    observer: Option<Observer>,
}

impl<S: TextSource, E: ActionExecutor> CraftSession<S, E> {
    pub fn new(source: S, executor: E, cancel: CancelToken, config: &CraftConfig) -> Self {
        Self {
            source,
            executor,
            parser: TextModParser,
            cancel,
            max_retries: config.max_retries.get(),
            target: config.item_region,
            state: CraftState::Idle,
            observer: None,
        }
    }
}

impl<S: TextSource, E: ActionExecutor, P: ModParser> CraftSession<S, E, P> {
    /// Swap in another parser implementation.
    pub fn with_parser<Q: ModParser>(self, parser: Q) -> CraftSession<S, E, Q> {
        CraftSession {
            source: self.source,
            executor: self.executor,
            parser,
            cancel: self.cancel,
            max_retries: self.max_retries,
            target: self.target,
            state: self.state,
            observer: self.observer,
        }
    }

    /// Register a callback receiving every [`CraftEvent`].
    pub fn on_event(mut self, observer: impl FnMut(&CraftEvent) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> CraftState {
        self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Craft until the item carries every mod in `targets`.
    ///
    /// A stop requested before this call is discarded; one raised while the
    /// loop runs ends it at the next check.
    pub fn run(&mut self, targets: &[String]) -> CraftReport {
        self.cancel.reset();
        let mut run = Run::default();
        let mut retries = 0;

        run.snapshot = self.read(targets);
        let Some(initial) = run.snapshot.as_ref().map(|s| s.rarity.clone()) else {
            return self.finish(run, retries);
        };

        match initial {
            ItemRarity::Normal => self.apply(Currency::Transmutation, targets, &mut run),
            ItemRarity::Rare => {
                self.apply(Currency::Scouring, targets, &mut run);
                if run.snapshot.is_some() {
                    self.apply(Currency::Transmutation, targets, &mut run);
                }
            }
            _ => {}
        }

        while retries < self.max_retries && !self.cancel.is_cancelled() && run.action_error.is_none()
        {
            let Some(snapshot) = &run.snapshot else {
                break;
            };
            self.state = CraftState::Deciding;

            if snapshot.matched {
                break;
            }

            if snapshot.affixes.has_open_affix {
                debug!(missing = ?snapshot.affixes.missing, "open affix slot");
                self.apply(Currency::Augmentation, targets, &mut run);
                if run.matched() {
                    break;
                }
            } else {
                self.apply(Currency::Alteration, targets, &mut run);
            }

            retries += 1;
            info!("Retrying craft ({}/{})", retries, self.max_retries);
            self.emit(&CraftEvent::Retry {
                attempt: retries,
                max: self.max_retries,
            });
        }

        self.finish(run, retries)
    }

    /// Apply one currency and re-read the item.
    fn apply(&mut self, currency: Currency, targets: &[String], run: &mut Run) {
        if self.cancel.is_cancelled() || run.action_error.is_some() {
            return;
        }

        self.state = CraftState::Acting;
        if let Err(e) = self.executor.apply_action(currency, self.target) {
            warn!("Failed to apply {}: {}", currency, e);
            run.action_error = Some(e.0);
            return;
        }

        info!("Applied {} to item at {}", currency, self.target);
        run.applied.push(currency);
        self.emit(&CraftEvent::Applied {
            currency,
            target: self.target,
        });

        run.snapshot = self.read(targets);
    }

    fn read(&mut self, targets: &[String]) -> Option<ItemSnapshot> {
        self.state = CraftState::Reading;

        let Some(text) = self
            .source
            .read_item_text()
            .filter(|t| !t.trim().is_empty())
        else {
            warn!("No item text could be read");
            return None;
        };

        match self.parser.snapshot(&text, targets) {
            Ok(snapshot) => {
                debug!(
                    rarity = %snapshot.rarity,
                    mods = snapshot.mods.len(),
                    matched = snapshot.matched,
                    "read item"
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!("Item unreadable: {}", e);
                None
            }
        }
    }

    fn finish(&mut self, run: Run, retries: u32) -> CraftReport {
        let outcome = if run.matched() {
            CraftOutcome::Success
        } else if let Some(e) = run.action_error {
            CraftOutcome::Failure(FailureReason::ActionFailed(e))
        } else if run.snapshot.is_none() {
            CraftOutcome::Failure(FailureReason::UnreadableItem)
        } else if self.cancel.is_cancelled() {
            CraftOutcome::Failure(FailureReason::StoppedByUser)
        } else {
            CraftOutcome::Failure(FailureReason::RetriesExhausted)
        };

        self.state = match &outcome {
            CraftOutcome::Success => CraftState::Matched,
            CraftOutcome::Failure(FailureReason::RetriesExhausted) => CraftState::RetriesExhausted,
            CraftOutcome::Failure(FailureReason::StoppedByUser) => CraftState::StoppedExternally,
            CraftOutcome::Failure(FailureReason::UnreadableItem) => CraftState::Unreadable,
            CraftOutcome::Failure(FailureReason::ActionFailed(_)) => CraftState::ActionFailed,
        };

        match &outcome {
            CraftOutcome::Success => info!("Mods match, crafting successful"),
            CraftOutcome::Failure(reason) => info!("Crafting stopped: {}", reason),
        }
        self.emit(&CraftEvent::Finished(outcome.clone()));

        CraftReport {
            outcome,
            retries,
            applied: run.applied,
            snapshot: run.snapshot,
        }
    }

    fn emit(&mut self, event: &CraftEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}
