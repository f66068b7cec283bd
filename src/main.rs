//! Terminal Tetrix runner (default binary).
//!
//! A simulation thread advances the shared engine every tick; the main thread
//! reads keys, queues commands and draws snapshots with the framebuffer
//! renderer.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tetrix::core::{Engine, EngineConfig, GameSnapshot, SharedEngine, UniformRandomizer};
use tetrix::input::{map_key, should_quit, KeyAction, RepeatHandler};
use tetrix::settings::{GameSettings, SettingsError, SettingsStore};
use tetrix::term::{FrameBuffer, GameView, PanelInfo, TerminalRenderer, Viewport};
use tetrix::types::{GameStatus, InputCommand, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tetrix", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Seed for the piece randomizer (random if omitted)
    #[arg(long, env = "TETRIX_SEED")]
    seed: Option<u32>,

    /// Settings file (default: $TETRIX_SETTINGS_PATH, then $HOME/.config/tetrix.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write logs to this file; logging is off otherwise
    #[arg(long, env = "TETRIX_LOG_PATH")]
    log_file: Option<PathBuf>,

    /// Remove full rows immediately instead of flashing them
    #[arg(long)]
    no_clear_animation: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let store = settings_store(args.settings);
    let mut settings = store.as_ref().map(SettingsStore::load).unwrap_or_default();

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut config = EngineConfig::default();
    if args.no_clear_animation {
        config = config.without_clear_animation();
    }
    info!(seed, clear_ms = config.clear_total_ms(), "starting game");

    let game = SharedEngine::new(Engine::with_generator(config, UniformRandomizer::new(seed)));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &game, store.as_ref(), &mut settings);

    // Always try to restore terminal state.
    let _ = term.exit();

    let final_score = game.snapshot().score;
    persist_high_score(store.as_ref(), &mut settings, final_score);
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // Stdout belongs to the game screen; only log to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn settings_store(explicit: Option<PathBuf>) -> Option<SettingsStore> {
    if let Some(path) = explicit {
        return Some(SettingsStore::new(path));
    }
    match SettingsStore::from_env() {
        Ok(store) => Some(store),
        Err(SettingsError::NoConfigDir) => {
            warn!("no home directory, settings will not be saved");
            None
        }
        Err(e) => {
            warn!(error = %e, "settings disabled");
            None
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn persist_high_score(store: Option<&SettingsStore>, settings: &mut GameSettings, score: u32) {
    if !settings.record_score(score) {
        return;
    }
    info!(score, "new high score");
    save(store, settings);
}

fn save(store: Option<&SettingsStore>, settings: &GameSettings) {
    if let Some(store) = store {
        if let Err(e) = store.save(settings) {
            warn!(error = %e, "failed to save settings");
        }
    }
}

/// Fixed-step simulation on its own thread until `running` clears.
fn spawn_simulation(game: SharedEngine, running: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let tick = Duration::from_millis(TICK_MS as u64);
        let mut next_tick = Instant::now() + tick;
        while running.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now < next_tick {
                thread::sleep(next_tick - now);
                continue;
            }
            game.update(TICK_MS);
            next_tick += tick;
            // Drop missed ticks after a stall rather than replaying them all.
            if Instant::now() > next_tick + tick * 4 {
                next_tick = Instant::now() + tick;
            }
        }
    })
}

fn run(
    term: &mut TerminalRenderer,
    game: &SharedEngine,
    store: Option<&SettingsStore>,
    settings: &mut GameSettings,
) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let sim = spawn_simulation(game.clone(), Arc::clone(&running));

    let result = input_loop(term, game, store, settings);

    running.store(false, Ordering::Relaxed);
    if sim.join().is_err() {
        warn!("simulation thread panicked");
    }
    result
}

fn input_loop(
    term: &mut TerminalRenderer,
    game: &SharedEngine,
    store: Option<&SettingsStore>,
    settings: &mut GameSettings,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut repeat = RepeatHandler::new();

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();
    let mut last_status = GameStatus::Playing;

    loop {
        game.snapshot_into(&mut snap);

        if snap.status == GameStatus::GameOver && last_status != GameStatus::GameOver {
            info!(score = snap.score, lines = snap.lines, level = snap.level, "game finished");
            persist_high_score(store, settings, snap.score);
        }
        last_status = snap.status;

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let panel = PanelInfo {
            high_score: settings.high_score,
            music_enabled: settings.music_enabled,
        };
        view.render_into(&snap, panel, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        match map_key(key, snap.status) {
                            // Movement goes through the repeat handler so a
                            // held key is not applied twice.
                            Some(KeyAction::Command(
                                InputCommand::MoveLeft | InputCommand::MoveRight | InputCommand::MoveDown,
                            )) => {
                                if let Some(command) = repeat.handle_key_press(key.code) {
                                    game.queue_input(command);
                                }
                            }
                            Some(KeyAction::Command(command)) => game.queue_input(command),
                            Some(KeyAction::ToggleMusic) => {
                                let on = settings.toggle_music();
                                info!(music = on, "music toggled");
                                save(store, settings);
                            }
                            None => {}
                        }
                    }
                    // Held keys repeat through the handler instead.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => repeat.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            for command in repeat.update(elapsed.as_millis() as u32) {
                game.queue_input(command);
            }
        }
    }
}
