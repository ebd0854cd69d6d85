mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, StorageEvent, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::storage;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tourcal_api::client::TournamentApi;
use tourcal_api::store::{JsonFileStore, TournamentStore};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Warn);

    let store = JsonFileStore::from_env();
    log::info!("data directory: {}", store.dir().display());
    let store: Arc<dyn TournamentStore> = Arc::new(store);
    let app = Arc::new(Mutex::new(App::new(store.clone())));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);
    let (storage_tx, storage_rx) = mpsc::channel::<StorageEvent>(10);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(TournamentApi::from_env(), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Cache and liked set, read once
    let storage_task = storage::spawn_startup_reads(store, storage_tx);

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(
        terminal,
        app,
        ui_event_rx,
        ui_event_tx,
        network_req_tx,
        network_resp_rx,
        storage_rx,
    )
    .await;

    input_handler.abort();
    network_task.abort();
    storage_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("tourcal {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "tourcal - sports tournament calendar for the terminal

Usage:
  tourcal
  tourcal --help
  tourcal --version

Environment:
  TOURCAL_API_BASE          Base URL of the tournament API (default https://stapubox.com)
  TOURCAL_TOURNAMENTS_JSON  Read tournaments from a local JSON payload instead
  TOURCAL_DATA_DIR          Directory for the tournament cache and liked list
  TOURCAL_LOG               Log level for the log pane (default warn)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    ui_event_tx: mpsc::Sender<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    mut storage_events: mpsc::Receiver<StorageEvent>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests, &ui_event_tx).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(event) = storage_events.recv() => {
                handle_storage_event(event, &app).await;
                if !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    ui_events: &mpsc::Sender<UiEvent>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadSports).await;
            let _ = network_requests.send(NetworkRequest::LoadTournaments).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests, ui_events).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::LoadMoreSettled(token) => {
            app.lock().await.finish_load_more(token);
            true
        }
    }
}

async fn handle_storage_event(event: StorageEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;
    match event {
        StorageEvent::CacheLoaded { tournaments } => guard.on_cache_loaded(tournaments),
        StorageEvent::LikedLoaded { liked } => guard.on_liked_loaded(liked),
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::SportsLoaded { sports } => {
            let mut guard = app.lock().await;
            guard.on_sports_loaded(sports);
        }
        NetworkResponse::TournamentsLoaded { result } => {
            let mut guard = app.lock().await;
            if let Some(snapshot) = guard.on_tournaments_loaded(result) {
                storage::save_tournaments(guard.store(), snapshot);
            }
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = match tokio::task::spawn_blocking(crossterm_event::read).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                log::error!("terminal read failed: {e}");
                continue;
            }
            Err(_) => break,
        };

        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
