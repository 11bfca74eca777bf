//! Runtime: event loop, effect execution and terminal lifecycle.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Route terminal input to the tag editor and execute returned `Effect`s.
//! - Run blur timers as abortable tasks keyed by their generation token.
//! - Fetch suggestions (static seed, then HTTP) in the background and deliver
//!   each result when ready.
//!
//! Input comes from a dedicated task that blocks on `crossterm::event::read()`
//! and forwards events over a channel, so `poll()` and `read()` stay on one
//! thread.
use std::collections::HashMap;
use std::io::Stdout;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quill_api::{HttpSuggestionSource, StaticSuggestionSource, SuggestionSource};
use quill_types::{BlurToken, Effect};
use quill_util::AppConfig;
use rat_focus::FocusBuilder;
use ratatui::{Terminal, backend::Backend, prelude::CrosstermBackend};
use tokio::{signal, sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::TagEditorComponent;
use crate::ui::components::component::Component;
use crate::ui::components::suggestion_input::InputMsg;
use crate::ui::components::tag_editor::TagEditorMsg;

/// Messages produced by background tasks.
#[derive(Debug)]
enum RuntimeMsg {
    Candidates(Vec<String>),
    BlurElapsed(BlurToken),
}

/// Spawn the input task that blocks on terminal input and forwards `crossterm`
/// events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(16);
        loop {
            match event::poll(poll_interval) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved) {
                            continue;
                        }
                        if let Err(error) = sender.blocking_send(event) {
                            debug!("input channel closed: {}", error);
                            break;
                        }
                    }
                    Err(error) => {
                        warn!("Failed to read event: {}", error);
                        break;
                    }
                },
                Err(error) => {
                    warn!("Failed to poll events: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Fetch candidates from each source in order. Every successful fetch replaces
/// the candidate set, so later sources win. Failures are logged and leave the
/// current candidates in place.
fn spawn_suggestion_fetch(sources: Vec<Arc<dyn SuggestionSource>>, sender: mpsc::UnboundedSender<RuntimeMsg>) {
    tokio::spawn(async move {
        for source in sources {
            match source.fetch().await {
                Ok(candidates) => {
                    info!(count = candidates.len(), "suggestions fetched");
                    if sender.send(RuntimeMsg::Candidates(candidates)).is_err() {
                        break;
                    }
                }
                Err(error) => warn!("Failed to fetch suggestions: {}", error),
            }
        }
    });
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableFocusChange)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render<B>(terminal: &mut Terminal<B>, app: &mut App, editor: &mut TagEditorComponent) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    // Rebuild focus just before rendering so structure changes are reflected
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = Rc::new(FocusBuilder::rebuild_for(&*app, Some(Rc::unwrap_or_clone(old_focus))));
    terminal.draw(|frame| {
        let area = frame.area();
        editor.render(frame, area, app);
    })?;
    Ok(())
}

/// Translate one terminal event into editor messages.
fn handle_input_event(app: &mut App, editor: &mut TagEditorComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                return app.quit();
            }
            editor.handle_key_events(app, key_event)
        }
        Event::Mouse(mouse_event) => editor.handle_mouse_events(app, mouse_event),
        Event::FocusGained => app.terminal_focus_changed(true),
        Event::FocusLost => app.terminal_focus_changed(false),
        Event::Key(_) | Event::Resize(..) | Event::Paste(_) => Vec::new(),
    }
}

/// Blur timers in flight, keyed by generation token.
#[derive(Default)]
struct BlurTimers {
    handles: HashMap<BlurToken, JoinHandle<()>>,
}

impl BlurTimers {
    fn schedule(&mut self, token: BlurToken, delay: Duration, sender: mpsc::UnboundedSender<RuntimeMsg>) {
        debug!(?token, ?delay, "scheduling blur");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(RuntimeMsg::BlurElapsed(token));
        });
        if let Some(previous) = self.handles.insert(token, handle) {
            previous.abort();
        }
    }

    fn cancel(&mut self, token: BlurToken) {
        if let Some(handle) = self.handles.remove(&token) {
            debug!(?token, "cancelling blur");
            handle.abort();
        }
    }

    fn finished(&mut self, token: BlurToken) {
        self.handles.remove(&token);
    }

    fn abort_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

/// Execute effects. Returns `false` once the app should stop.
fn process_effects(effects: Vec<Effect>, timers: &mut BlurTimers, sender: &mpsc::UnboundedSender<RuntimeMsg>) -> bool {
    let mut keep_running = true;
    for effect in effects {
        match effect {
            Effect::ScheduleBlur { token, delay } => timers.schedule(token, delay, sender.clone()),
            Effect::CancelBlur(token) => timers.cancel(token),
            Effect::Quit => keep_running = false,
        }
    }
    keep_running
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event loop,
/// and returns the final tag set. The terminal is restored even when the loop
/// fails.
pub async fn run_app(config: AppConfig, tags: Vec<String>, seed_candidates: Vec<String>) -> Result<Vec<String>> {
    let api_base = config.api_base().context("invalid suggestion API base URL")?;

    let (runtime_sender, runtime_receiver) = mpsc::unbounded_channel();
    let mut sources: Vec<Arc<dyn SuggestionSource>> = Vec::new();
    if !seed_candidates.is_empty() {
        sources.push(Arc::new(StaticSuggestionSource::new(seed_candidates)));
    }
    if let Some(base) = api_base {
        let source = HttpSuggestionSource::new(&base).context("build suggestion client")?;
        info!(endpoint = %source.endpoint(), "suggestions will be fetched");
        sources.push(Arc::new(source));
    } else {
        debug!("no API base configured; using static suggestions only");
    }
    spawn_suggestion_fetch(sources, runtime_sender.clone());

    let mut app = App::new(&config, tags);
    let mut editor = TagEditorComponent::new();
    let mut timers = BlurTimers::default();
    process_effects(app.focus_input(), &mut timers, &runtime_sender);

    let input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    let result = event_loop(
        &mut terminal,
        &mut app,
        &mut editor,
        &mut timers,
        input_receiver,
        &runtime_sender,
        runtime_receiver,
    )
    .await;

    timers.abort_all();
    cleanup_terminal(&mut terminal)?;
    result?;
    info!(count = app.tags().len(), updates = app.updates(), "tag editor closed");
    Ok(app.tags().to_vec())
}

/// Run until quit or until the input channel closes. Terminal lifecycle stays
/// with the caller.
async fn event_loop<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    editor: &mut TagEditorComponent,
    timers: &mut BlurTimers,
    mut input_receiver: mpsc::Receiver<Event>,
    runtime_sender: &mpsc::UnboundedSender<RuntimeMsg>,
    mut runtime_receiver: mpsc::UnboundedReceiver<RuntimeMsg>,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    render(terminal, app, editor)?;

    loop {
        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) => handle_input_event(app, editor, event),
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }
            Some(msg) = runtime_receiver.recv() => {
                match msg {
                    RuntimeMsg::Candidates(candidates) => {
                        app.set_candidates(candidates);
                        Vec::new()
                    }
                    RuntimeMsg::BlurElapsed(token) => {
                        timers.finished(token);
                        app.dispatch(TagEditorMsg::Input(InputMsg::BlurElapsed(token)))
                    }
                }
            }
            _ = signal::ctrl_c() => app.quit(),
        };

        if !process_effects(effects, timers, runtime_sender) || app.should_quit {
            break;
        }
        render(terminal, app, editor)?;
    }
    Ok(())
}
