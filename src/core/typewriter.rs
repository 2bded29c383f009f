// One-shot typewriter animation.
//
// Driven either by discrete timer ticks (`tick` then `finish_hold`) or by an
// injected clock (`advance`). Both paths share the same transitions:
//
// - `Typing`: every tick reveals one more character.
// - The first tick after the last character moves to `Holding`.
// - When the hold expires the cursor is dropped and the animation is `Done`.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Done,
}

/// Result of one interval tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A character was revealed; redraw.
    Revealed,
    /// Everything is visible; stop the interval and start the hold.
    Completed,
    /// Nothing to do.
    Idle,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
    phase: Phase,
    cursor: char,
    tick: Duration,
    hold: Duration,
    // clock-driven bookkeeping
    since_tick: Duration,
    held: Duration,
}

impl Typewriter {
    pub fn new(text: &str, cursor: char, tick: Duration, hold: Duration) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
            phase: Phase::Typing,
            cursor,
            tick,
            hold,
            since_tick: Duration::ZERO,
            held: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn full_len(&self) -> usize {
        self.chars.len()
    }

    pub fn full_text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn revealed_text(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    /// What the bitmap should show: revealed text, plus the cursor until done.
    pub fn display_text(&self) -> String {
        let mut s = self.revealed_text();
        if self.phase != Phase::Done {
            s.push(self.cursor);
        }
        s
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::Typing if self.revealed < self.chars.len() => {
                self.revealed += 1;
                TickOutcome::Revealed
            }
            Phase::Typing => {
                self.phase = Phase::Holding;
                TickOutcome::Completed
            }
            Phase::Holding | Phase::Done => TickOutcome::Idle,
        }
    }

    /// End the hold. Returns true exactly once, when the cursor is dropped.
    pub fn finish_hold(&mut self) -> bool {
        if self.phase == Phase::Holding {
            self.phase = Phase::Done;
            true
        } else {
            false
        }
    }

    /// Advance by `dt` of wall time. Returns true if the display changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        let mut budget = dt;
        loop {
            match self.phase {
                Phase::Typing => {
                    let need = self.tick.saturating_sub(self.since_tick);
                    if budget < need || (need.is_zero() && budget.is_zero()) {
                        self.since_tick += budget;
                        break;
                    }
                    budget -= need;
                    self.since_tick = Duration::ZERO;
                    changed |= self.tick() == TickOutcome::Revealed;
                }
                Phase::Holding => {
                    let need = self.hold.saturating_sub(self.held);
                    if budget < need {
                        self.held += budget;
                        break;
                    }
                    budget -= need;
                    changed |= self.finish_hold();
                }
                Phase::Done => break,
            }
        }
        changed
    }
}
