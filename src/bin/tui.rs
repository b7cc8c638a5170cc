use std::io;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use taskboard::client::api::{self, HttpTaskApi, TaskApi};
use taskboard::client::controller::{Completion, Controller, Mode, Request};
use taskboard::client::view;

enum AppEvent {
    Key(KeyEvent),
    Api(Completion),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("TASKBOARD_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let api: Arc<dyn TaskApi> = Arc::new(HttpTaskApi::new(base_url));

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: Arc<dyn TaskApi>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // Key events come from a blocking reader thread; API completions come
    // from spawned requests. Both land on the same channel, so this loop is
    // the sole writer of controller state.
    let key_tx = tx.clone();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if let Event::Key(key) = event {
                if key_tx.blocking_send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    let mut app = Controller::new();
    let initial = app.load();
    dispatch(initial, &api, &tx);

    loop {
        terminal.draw(|frame| view::render(frame, &app))?;

        let Some(event) = rx.recv().await else { break };
        match event {
            AppEvent::Api(completion) => app.apply(completion),
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(&mut app, key, &api, &tx) {
                    break;
                }
            }
            AppEvent::Key(_) => {}
        }
    }

    Ok(())
}

fn dispatch(request: Request, api: &Arc<dyn TaskApi>, tx: &mpsc::Sender<AppEvent>) {
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = api::execute(api.as_ref(), request).await;
        let _ = tx.send(AppEvent::Api(completion)).await;
    });
}

/// Returns false when the user asks to quit.
fn handle_key(
    app: &mut Controller,
    key: KeyEvent,
    api: &Arc<dyn TaskApi>,
    tx: &mpsc::Sender<AppEvent>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    if app.editing().is_some() {
        match key.code {
            KeyCode::Enter => {
                if let Some(request) = app.save_edit() {
                    dispatch(request, api, tx);
                }
            }
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.backspace_draft(),
            KeyCode::Char(c) => app.push_draft_char(c),
            _ => {}
        }
        return true;
    }

    match app.mode() {
        Mode::Insert => match key.code {
            KeyCode::Enter => {
                if let Some(request) = app.submit_input() {
                    dispatch(request, api, tx);
                }
            }
            KeyCode::Esc => app.leave_insert(),
            KeyCode::Backspace => app.backspace_input(),
            KeyCode::Char(c) => app.push_input_char(c),
            _ => {}
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('i') | KeyCode::Char('a') => app.enter_insert(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Char(' ') => {
                if let Some(task) = app.selected_task() {
                    let id = task.id;
                    if let Some(request) = app.toggle(id) {
                        dispatch(request, api, tx);
                    }
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = app.selected_task() {
                    let id = task.id;
                    app.start_edit(id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = app.selected_task() {
                    let request = app.delete(task.id);
                    dispatch(request, api, tx);
                }
            }
            KeyCode::Char('r') => {
                let request = app.load();
                dispatch(request, api, tx);
            }
            _ => {}
        },
    }

    true
}
