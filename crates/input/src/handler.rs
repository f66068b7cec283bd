//! Held-key auto-repeat for terminal environments.
//!
//! A press emits one command at once. While the key stays held, repeats start
//! after a delay and then fire at a fixed interval: soft drop uses 120ms/20ms,
//! horizontal movement 150ms/30ms.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    InputCommand, DOWN_REPEAT_DELAY_MS, DOWN_REPEAT_MS, HORIZONTAL_REPEAT_DELAY_MS,
    HORIZONTAL_REPEAT_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Delay-then-interval repeat timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    pub delay_ms: u32,
    pub interval_ms: u32,
}

impl RepeatTiming {
    pub const fn new(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_ms,
            interval_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    held_ms: u32,
    accumulator: u32,
}

impl RepeatTimer {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats are due
    fn advance(&mut self, timing: RepeatTiming, elapsed_ms: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < timing.delay_ms {
            return 0;
        }

        let excess = if prev < timing.delay_ms {
            self.held_ms - timing.delay_ms
        } else {
            elapsed_ms
        };
        self.accumulator += excess;

        let interval = timing.interval_ms.max(1);
        let due = self.accumulator / interval;
        self.accumulator %= interval;
        due
    }
}

fn is_left(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H')
    )
}

fn is_right(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L')
    )
}

fn is_down(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J')
    )
}

/// Tracks held movement keys and produces repeat commands.
#[derive(Debug, Clone)]
pub struct RepeatHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_timer: RepeatTimer,
    down_timer: RepeatTimer,
    horizontal_timing: RepeatTiming,
    down_timing: RepeatTiming,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Upper bound on repeats returned by one `update`
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

impl RepeatHandler {
    pub fn new() -> Self {
        Self::with_timing(
            RepeatTiming::new(HORIZONTAL_REPEAT_DELAY_MS, HORIZONTAL_REPEAT_MS),
            RepeatTiming::new(DOWN_REPEAT_DELAY_MS, DOWN_REPEAT_MS),
        )
    }

    pub fn with_timing(horizontal: RepeatTiming, down: RepeatTiming) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_timer: RepeatTimer::default(),
            down_timer: RepeatTimer::default(),
            horizontal_timing: horizontal,
            down_timing: down,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    fn hold_horizontal(&mut self, direction: HorizontalDirection, command: InputCommand) -> Option<InputCommand> {
        self.last_key_time = Instant::now();
        if self.horizontal == direction && self.horizontal_timer.held_ms >= self.horizontal_timing.delay_ms {
            // Terminal auto-repeat of a key we already track
            None
        } else {
            // A second press inside the delay is another tap
            self.horizontal = direction;
            self.horizontal_timer.clear();
            Some(command)
        }
    }

    /// Register a press; returns the immediate command for movement keys.
    ///
    /// Non-movement keys return `None` and are left to [`crate::map_key`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<InputCommand> {
        if is_left(code) {
            self.hold_horizontal(HorizontalDirection::Left, InputCommand::MoveLeft)
        } else if is_right(code) {
            self.hold_horizontal(HorizontalDirection::Right, InputCommand::MoveRight)
        } else if is_down(code) {
            self.last_key_time = Instant::now();
            if self.down_held && self.down_timer.held_ms >= self.down_timing.delay_ms {
                None
            } else {
                self.down_held = true;
                self.down_timer.clear();
                Some(InputCommand::MoveDown)
            }
        } else {
            None
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let releases_horizontal = (is_left(code) && self.horizontal == HorizontalDirection::Left)
            || (is_right(code) && self.horizontal == HorizontalDirection::Right);
        if releases_horizontal {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_timer.clear();
        }
        if is_down(code) {
            self.down_held = false;
            self.down_timer.clear();
        }
    }

    /// Advance held keys by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<InputCommand, MAX_REPEATS_PER_UPDATE> {
        let mut commands = ArrayVec::new();

        // Auto-release when terminal does not emit release events.
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_timer.clear();
            self.down_held = false;
            self.down_timer.clear();
        }

        let horizontal = match self.horizontal {
            HorizontalDirection::Left => Some(InputCommand::MoveLeft),
            HorizontalDirection::Right => Some(InputCommand::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(command) = horizontal {
            let due = self.horizontal_timer.advance(self.horizontal_timing, elapsed_ms);
            for _ in 0..due {
                let _ = commands.try_push(command);
            }
        }

        if self.down_held {
            let due = self.down_timer.advance(self.down_timing, elapsed_ms);
            for _ in 0..due {
                let _ = commands.try_push(InputCommand::MoveDown);
            }
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = Instant::now();
        self.horizontal_timer.clear();
        self.down_timer.clear();
    }
}

impl Default for RepeatHandler {
    fn default() -> Self {
        Self::new()
    }
}
