//! Engine module - the game state machine
//!
//! Ties together board, pieces, randomizer and scoring. The engine is driven
//! from outside: a host loop feeds elapsed time through [`Engine::update`] and
//! discrete commands through the movement methods (or [`Engine::apply`]), then
//! reads accessors or a [`GameSnapshot`] for rendering.
//!
//! # States
//!
//! ```text
//! Playing --pause--> Paused --pause--> Playing
//! Playing --spawn blocked--> GameOver --reset--> Playing
//! ```
//!
//! While `Playing`, the engine is either `Falling` (a current piece responds
//! to input and gravity) or `Clearing` (full rows are animating; no piece
//! exists and nothing spawns until the animation finishes).

use tracing::{debug, info};

use crate::board::{Board, FullLines};
use crate::pieces::Tetromino;
use crate::rng::{PieceGenerator, UniformRandomizer};
use crate::scoring::{drop_interval_ms, hard_drop_points, level_for_lines, line_clear_points};
use crate::snapshot::{ClearProgress, GameSnapshot};
use crate::types::{GameStatus, InputCommand, CLEAR_FADE_MS, CLEAR_FLASH_MS};

/// Horizontal offsets tried, in order, when an in-place rotation is blocked
pub const WALL_KICKS: [i32; 4] = [-1, 1, -2, 2];

/// Tunables that are not game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Flash phase of the line-clear hold
    pub clear_flash_ms: u32,
    /// Fade phase of the line-clear hold, after the flash
    pub clear_fade_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_flash_ms: CLEAR_FLASH_MS,
            clear_fade_ms: CLEAR_FADE_MS,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clear_flash_ms(mut self, ms: u32) -> Self {
        self.clear_flash_ms = ms;
        self
    }

    pub fn with_clear_fade_ms(mut self, ms: u32) -> Self {
        self.clear_fade_ms = ms;
        self
    }

    /// Resolve line clears inside the lock itself
    pub fn without_clear_animation(self) -> Self {
        self.with_clear_flash_ms(0).with_clear_fade_ms(0)
    }

    pub fn clear_total_ms(&self) -> u32 {
        self.clear_flash_ms.saturating_add(self.clear_fade_ms)
    }
}

/// Rows waiting to be removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub rows: FullLines,
    /// Engine clock value when the hold began
    pub started_at_ms: u64,
}

/// What the playfield is doing while the game is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Falling(Tetromino),
    Clearing(LineClear),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine<G = UniformRandomizer> {
    config: EngineConfig,
    generator: G,
    board: Board,
    phase: Phase,
    next: Tetromino,
    next_next: Tetromino,
    status: GameStatus,
    score: u32,
    lines: u32,
    level: u32,
    /// Sum of every `update` delta while playing
    clock_ms: u64,
    drop_timer_ms: u32,
}

impl Engine<UniformRandomizer> {
    /// Create a new game with the default randomizer and config
    pub fn new(seed: u32) -> Self {
        Self::with_generator(EngineConfig::default(), UniformRandomizer::new(seed))
    }
}

impl Default for Engine<UniformRandomizer> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<G: PieceGenerator> Engine<G> {
    /// Create a new game on an empty board
    pub fn with_generator(config: EngineConfig, generator: G) -> Self {
        Self::with_board(config, generator, Board::new())
    }

    /// Create a game on a prepared board and spawn the first piece
    ///
    /// If the board blocks the spawn, the engine starts in `GameOver`.
    pub fn with_board(config: EngineConfig, mut generator: G, board: Board) -> Self {
        let current = Tetromino::new(generator.next_kind());
        let next = Tetromino::new(generator.next_kind());
        let next_next = Tetromino::new(generator.next_kind());

        let mut engine = Self {
            config,
            generator,
            board,
            phase: Phase::Falling(current),
            next,
            next_next,
            status: GameStatus::Playing,
            score: 0,
            lines: 0,
            level: 1,
            clock_ms: 0,
            drop_timer_ms: 0,
        };
        engine.activate(current);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// The falling piece; `None` while full rows are animating
    pub fn current_piece(&self) -> Option<Tetromino> {
        match self.phase {
            Phase::Falling(piece) => Some(piece),
            Phase::Clearing(_) => None,
        }
    }

    pub fn next_piece(&self) -> Tetromino {
        self.next
    }

    pub fn next_next_piece(&self) -> Tetromino {
        self.next_next
    }

    /// Rows currently animating a clear, top to bottom
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.phase {
            Phase::Clearing(clear) => &clear.rows,
            Phase::Falling(_) => &[],
        }
    }

    /// Engine clock value when the current clear animation started
    pub fn clear_started_at_ms(&self) -> Option<u64> {
        match &self.phase {
            Phase::Clearing(clear) => Some(clear.started_at_ms),
            Phase::Falling(_) => None,
        }
    }

    /// Flash/fade progress of the running clear animation
    pub fn clear_progress(&self) -> Option<ClearProgress> {
        let started = self.clear_started_at_ms()?;
        let elapsed = self.clock_ms.saturating_sub(started);
        Some(ClearProgress::at(
            elapsed,
            self.config.clear_flash_ms,
            self.config.clear_fade_ms,
        ))
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Where the current piece would land, without touching any state
    pub fn ghost_piece(&self) -> Option<Tetromino> {
        self.controllable().map(|piece| self.landing(piece).0)
    }

    /// The current piece if input may act on it
    fn controllable(&self) -> Option<Tetromino> {
        if self.status != GameStatus::Playing {
            return None;
        }
        self.current_piece()
    }

    /// Lowest legal position straight below `piece` and the rows travelled
    fn landing(&self, piece: Tetromino) -> (Tetromino, u32) {
        let mut landed = piece;
        let mut distance = 0;
        while self.board.can_place(&landed.moved(0, 1)) {
            landed = landed.moved(0, 1);
            distance += 1;
        }
        (landed, distance)
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let moved = piece.moved(dx, 0);
        if !self.board.can_place(&moved) {
            return false;
        }
        self.phase = Phase::Falling(moved);
        true
    }

    /// Shift one column left if the board allows it
    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    /// Shift one column right if the board allows it
    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Drop one row; if blocked, lock the piece and return `false`
    pub fn move_down(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let moved = piece.moved(0, 1);
        if self.board.can_place(&moved) {
            self.phase = Phase::Falling(moved);
            return true;
        }
        self.lock_piece(piece);
        false
    }

    /// Rotate clockwise, trying the wall kicks in order when blocked
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let rotated = piece.rotated(true);
        let candidate = std::iter::once(0)
            .chain(WALL_KICKS)
            .map(|dx| rotated.moved(dx, 0))
            .find(|candidate| self.board.can_place(candidate));

        match candidate {
            Some(candidate) => {
                self.phase = Phase::Falling(candidate);
                true
            }
            None => false,
        }
    }

    /// Drop straight to the landing row and lock; returns rows travelled
    pub fn hard_drop(&mut self) -> u32 {
        let Some(piece) = self.controllable() else {
            return 0;
        };
        let (landed, distance) = self.landing(piece);
        self.lock_piece(landed);
        self.score = self.score.saturating_add(hard_drop_points(distance));
        distance
    }

    /// Toggle between `Playing` and `Paused`; ignored after game over
    pub fn pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.status = GameStatus::Paused,
            GameStatus::Paused => {
                self.status = GameStatus::Playing;
                self.drop_timer_ms = 0;
            }
            GameStatus::GameOver => {}
        }
    }

    /// Start over with an empty board; the randomizer keeps its sequence
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.status = GameStatus::Playing;
        self.clock_ms = 0;

        let current = Tetromino::new(self.generator.next_kind());
        self.next = Tetromino::new(self.generator.next_kind());
        self.next_next = Tetromino::new(self.generator.next_kind());
        info!(first = current.kind().as_str(), "game reset");
        self.activate(current);
    }

    /// Advance the clock: finish a due clear animation or apply gravity
    ///
    /// Returns true if the playfield changed. At most one gravity step
    /// happens per call.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms as u64);

        if let Some(started) = self.clear_started_at_ms() {
            let elapsed = self.clock_ms.saturating_sub(started);
            if elapsed >= self.config.clear_total_ms() as u64 {
                self.resolve_line_clear();
                return true;
            }
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;
        self.move_down();
        true
    }

    /// Apply one input command; returns whether it changed anything
    pub fn apply(&mut self, command: InputCommand) -> bool {
        match command {
            InputCommand::MoveLeft => self.move_left(),
            InputCommand::MoveRight => self.move_right(),
            InputCommand::MoveDown => {
                let playable = self.controllable().is_some();
                self.move_down();
                playable
            }
            InputCommand::Rotate => self.rotate(),
            InputCommand::HardDrop => {
                let playable = self.controllable().is_some();
                self.hard_drop();
                playable
            }
            InputCommand::Pause => {
                let before = self.status;
                self.pause();
                before != self.status
            }
            InputCommand::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Cement `piece`, then either start the clear hold or spawn
    fn lock_piece(&mut self, piece: Tetromino) {
        self.board.place(&piece);
        let rows = self.board.full_lines();
        debug!(
            kind = piece.kind().as_str(),
            x = piece.position().x,
            y = piece.position().y,
            full_rows = rows.len(),
            "piece locked"
        );

        if rows.is_empty() {
            self.spawn_next();
        } else if self.config.clear_total_ms() == 0 {
            self.resolve_line_clear();
        } else {
            self.phase = Phase::Clearing(LineClear {
                rows,
                started_at_ms: self.clock_ms,
            });
        }
    }

    /// Remove full rows, score them and bring in the next piece
    fn resolve_line_clear(&mut self) {
        let cleared = self.board.clear_lines();
        if cleared > 0 {
            let points = line_clear_points(cleared, self.level);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.score = self.score.saturating_add(points);
            self.level = level_for_lines(self.lines);
            debug!(
                cleared,
                points,
                lines = self.lines,
                level = self.level,
                "lines cleared"
            );
        }
        self.spawn_next();
    }

    /// Promote the preview pieces and draw a new one
    fn spawn_next(&mut self) {
        let piece = self.next;
        self.next = self.next_next;
        self.next_next = Tetromino::new(self.generator.next_kind());
        self.activate(piece);
    }

    fn activate(&mut self, piece: Tetromino) {
        self.phase = Phase::Falling(piece);
        self.drop_timer_ms = 0;
        if self.board.can_place(&piece) {
            debug!(kind = piece.kind().as_str(), "piece spawned");
        } else {
            self.status = GameStatus::GameOver;
            info!(score = self.score, lines = self.lines, level = self.level, "game over");
        }
    }

    /// Copy the full observable state into `out`
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.rows();
        out.current = self.current_piece();
        out.ghost = self.ghost_piece();
        out.next = self.next;
        out.next_next = self.next_next;
        out.status = self.status;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.clearing_rows = self.clearing_rows().iter().copied().collect();
        out.clear_started_at_ms = self.clear_started_at_ms();
        out.clear_progress = self.clear_progress();
        out.clock_ms = self.clock_ms;
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
