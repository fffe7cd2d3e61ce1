//! Offline craft driver
//!
//! Replays a sequence of captured item texts instead of reading the game's
//! clipboard. Every applied currency advances to the next capture.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use lazycraft::{ActionError, ActionExecutor, Currency, Region, TextSource};

/// Reads the capture the cursor points at.
pub struct ReplaySource {
    frames: Rc<Vec<String>>,
    cursor: Rc<Cell<usize>>,
}

impl TextSource for ReplaySource {
    fn read_item_text(&mut self) -> Option<String> {
        self.frames.get(self.cursor.get()).cloned()
    }
}

/// Logs each action and moves the cursor on.
pub struct ReplayExecutor {
    frames: Rc<Vec<String>>,
    cursor: Rc<Cell<usize>>,
    settle: Duration,
    applied: usize,
}

impl ReplayExecutor {
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl ActionExecutor for ReplayExecutor {
    fn apply_action(&mut self, currency: Currency, target: Region) -> Result<(), ActionError> {
        let next = self.cursor.get() + 1;
        if next >= self.frames.len() {
            return Err(ActionError(format!(
                "no capture left after frame {} for {}",
                self.cursor.get() + 1,
                currency
            )));
        }

        tracing::debug!(
            %currency,
            stash_slot = currency.stash_index(),
            %target,
            frame = next + 1,
            "replaying action"
        );
        self.cursor.set(next);
        self.applied += 1;

        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }
        Ok(())
    }
}

/// Build a source/executor pair over the same captures.
pub fn replay(frames: Vec<String>, settle: Duration) -> (ReplaySource, ReplayExecutor) {
    let frames = Rc::new(frames);
    let cursor = Rc::new(Cell::new(0));

    (
        ReplaySource {
            frames: Rc::clone(&frames),
            cursor: Rc::clone(&cursor),
        },
        ReplayExecutor {
            frames,
            cursor,
            settle,
            applied: 0,
        },
    )
}
