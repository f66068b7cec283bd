//! Shared engine - one engine driven from several threads
//!
//! Producers (input handlers) push commands with [`SharedEngine::queue_input`];
//! the simulation thread calls [`SharedEngine::update`], which drains the
//! queue in FIFO order and then advances time, all under one lock. Readers
//! take a [`GameSnapshot`] copy and never hold the lock while drawing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::Engine;
use crate::rng::{PieceGenerator, UniformRandomizer};
use crate::snapshot::GameSnapshot;
use crate::types::{GameStatus, InputCommand};

#[derive(Debug)]
struct Inner<G> {
    engine: Engine<G>,
    pending: VecDeque<InputCommand>,
}

/// Cloneable handle to an engine behind a mutex
#[derive(Debug)]
pub struct SharedEngine<G = UniformRandomizer> {
    inner: Arc<Mutex<Inner<G>>>,
}

impl<G> Clone for SharedEngine<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: PieceGenerator> SharedEngine<G> {
    pub fn new(engine: Engine<G>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                engine,
                pending: VecDeque::new(),
            })),
        }
    }

    // A panic elsewhere leaves the engine in a consistent state between
    // operations, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner<G>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a command for the next `update`
    pub fn queue_input(&self, command: InputCommand) {
        self.lock().pending.push_back(command);
    }

    /// Apply queued commands in order, then advance the clock
    ///
    /// Returns true if anything changed.
    pub fn update(&self, elapsed_ms: u32) -> bool {
        let mut inner = self.lock();
        let mut changed = false;
        while let Some(command) = inner.pending.pop_front() {
            changed |= inner.engine.apply(command);
        }
        changed |= inner.engine.update(elapsed_ms);
        changed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().engine.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().engine.snapshot_into(out);
    }

    pub fn status(&self) -> GameStatus {
        self.lock().engine.status()
    }

    pub fn pending_inputs(&self) -> usize {
        self.lock().pending.len()
    }

    /// Run `f` against the engine while holding the lock
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine<G>) -> R) -> R {
        f(&mut self.lock().engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::rng::SequenceGenerator;
    use crate::types::PieceKind;
    use std::thread;

    fn shared() -> SharedEngine<SequenceGenerator> {
        SharedEngine::new(Engine::with_generator(
            EngineConfig::default(),
            SequenceGenerator::repeat(PieceKind::T),
        ))
    }

    #[test]
    fn test_inputs_wait_for_update() {
        let game = shared();
        game.queue_input(InputCommand::MoveLeft);
        assert_eq!(game.pending_inputs(), 1);
        assert_eq!(game.snapshot().current.unwrap().position().x, 4);

        assert!(game.update(0));
        assert_eq!(game.pending_inputs(), 0);
        assert_eq!(game.snapshot().current.unwrap().position().x, 3);
    }

    #[test]
    fn test_inputs_applied_in_fifo_order() {
        let game = shared();
        // Pause first: the moves after it are dropped by the engine
        game.queue_input(InputCommand::Pause);
        game.queue_input(InputCommand::MoveLeft);
        game.queue_input(InputCommand::MoveLeft);
        game.update(0);
        assert_eq!(game.status(), GameStatus::Paused);
        assert_eq!(game.snapshot().current.unwrap().position().x, 4);

        game.queue_input(InputCommand::Pause);
        game.queue_input(InputCommand::MoveLeft);
        game.update(0);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.snapshot().current.unwrap().position().x, 3);
    }

    #[test]
    fn test_clones_share_state() {
        let game = shared();
        let producer = game.clone();

        let handle = thread::spawn(move || {
            for _ in 0..3 {
                producer.queue_input(InputCommand::MoveRight);
            }
        });
        handle.join().unwrap();

        game.update(0);
        assert_eq!(game.with_engine(|e| e.current_piece().unwrap().position().x), 7);
    }
}
