//! TUI runner: main loop that wires everything together.
//!
//! Creates terminal, runs the TEA loop, and performs the effects the model
//! queues. Deferred work (clipboard writes, label-reset timers) runs on
//! spawned tasks and reports back through the same message channel.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

use crate::clipboard::ClipboardSink;
use crate::config::GradientConfig;

use super::app::{Effect, GradientApp};
use super::event::AppMessage;
use super::layout;

/// How long the input reader waits for an event before rechecking `stop`.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// What the runner needs beyond the model.
pub struct RunnerContext {
    pub clipboard: Arc<dyn ClipboardSink>,
    pub config: GradientConfig,
    /// Where `s` saves the preset. `None` = the user config file.
    pub preset_path: Option<PathBuf>,
}

/// Perform one queued effect. Async results come back on `tx`.
pub fn dispatch_effect(
    effect: Effect,
    app: &mut GradientApp,
    ctx: &mut RunnerContext,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    match effect {
        Effect::Copy(text) => {
            let sink = Arc::clone(&ctx.clipboard);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = sink.write_text(text).await;
                let _ = tx.send(AppMessage::CopyFinished(result));
            });
        }
        Effect::ResetCopyLabel { generation, after } => {
            // Fire-and-forget; stale resets are ignored by the model
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                let _ = tx.send(AppMessage::ResetCopyLabel(generation));
            });
        }
        Effect::SavePreset(state) => {
            ctx.config.set_initial(&state);
            let result = match &ctx.preset_path {
                Some(path) => ctx.config.save_to(path).map(|()| path.clone()),
                None => ctx.config.save(),
            };
            match result {
                Ok(path) => {
                    info!("saved preset to {}", path.display());
                    app.set_status(format!("Saved preset to {}", path.display()), false);
                }
                Err(e) => {
                    warn!("Failed to save preset: {e}");
                    app.set_status(e, true);
                }
            }
        }
    }
}

/// Apply a message, then run whatever effects it queued.
pub fn step(
    app: &mut GradientApp,
    msg: AppMessage,
    ctx: &mut RunnerContext,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    app.update(msg);
    for effect in app.take_effects() {
        dispatch_effect(effect, app, ctx, tx);
    }
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(mut app: GradientApp, mut ctx: RunnerContext) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut ctx).await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

/// Forward every key event from `next_event` to `tx` until `stop` is set or
/// the receiver is dropped. A read error ends the session with `Quit`.
pub fn pump_input<F>(
    mut next_event: F,
    tx: mpsc::UnboundedSender<AppMessage>,
    stop: Arc<AtomicBool>,
) where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !stop.load(Ordering::Relaxed) {
        match next_event() {
            Ok(Some(Event::Key(key))) => {
                if tx.send(AppMessage::Input(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("terminal input failed: {e}");
                let _ = tx.send(AppMessage::Quit);
                break;
            }
        }
    }
}

fn poll_terminal() -> io::Result<Option<Event>> {
    if event::poll(INPUT_POLL)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut GradientApp,
    ctx: &mut RunnerContext,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut tick_interval = interval(Duration::from_millis(ctx.config.ui.tick_rate_ms.max(1)));
    let mut render_interval = interval(Duration::from_millis(ctx.config.ui.frame_rate_ms.max(1)));

    // Sole reader of terminal input; keys reach the model only through `rx`
    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let tx = tx.clone();
        let stop = Arc::clone(&stop);
        tokio::task::spawn_blocking(move || pump_input(poll_terminal, tx, stop))
    };

    info!(gradient = %app.gradient_string(), "TUI started");

    let result = loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                step(app, AppMessage::Tick, ctx, &tx);
            }
            _ = render_interval.tick() => {
                if let Err(e) = terminal.draw(|f| layout::draw(f, app)) {
                    break Err(e.into());
                }
            }
            Some(msg) = rx.recv() => {
                step(app, msg, ctx, &tx);
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    stop.store(true, Ordering::Relaxed);
    let _ = reader.await;

    info!(gradient = %app.gradient_string(), "TUI exiting");
    result
}
