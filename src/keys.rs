use crate::app::{App, MenuItem};
use crate::state::app_state::Focus;
use crate::state::messages::{NetworkRequest, UiEvent};
use crate::state::storage;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tourcal_api::pagination::LoadToken;

/// How long a load-more request takes to settle before the page grows.
pub const LOAD_MORE_SETTLE: Duration = Duration::from_millis(300);

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    ui_events: &mpsc::Sender<UiEvent>,
) {
    let mut guard = app.lock().await;

    if (key_event.code, key_event.modifiers) == (Char('c'), KeyModifiers::CONTROL) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Text entry swallows every other key.
    if guard.state.focus == Focus::Search {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc => guard.end_search(),
            KeyCode::Backspace => guard.search_pop(),
            Char(c) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    if guard.state.focus == Focus::SportPicker {
        match key_event.code {
            Char('j') | KeyCode::Down => guard.move_sport_cursor(1),
            Char('k') | KeyCode::Up => guard.move_sport_cursor(-1),
            KeyCode::Enter => guard.confirm_sport(),
            KeyCode::Esc | Char('s') => guard.close_sport_picker(),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, guard.state.focus, key_event.code) {
        (_, _, Char('q')) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, _, Char('1')) => guard.update_tab(MenuItem::Calendar),
        (_, _, Char('?')) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, _, KeyCode::Esc) => guard.exit_help(),
        (MenuItem::Help, _, _) => {}

        // Filters
        (_, _, Char('/')) => guard.begin_search(),
        (_, _, Char('s')) => guard.open_sport_picker(),
        (_, _, KeyCode::Tab) => guard.cycle_focus(),
        (_, _, Char('[') | Char('<')) => guard.change_month(-1),
        (_, _, Char(']') | Char('>')) => guard.change_month(1),
        (_, _, Char('r') | Char('R')) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadTournaments).await;
            return;
        }

        // Calendar navigation
        (_, Focus::Calendar, Char('h') | KeyCode::Left) => guard.move_day_cursor(-1),
        (_, Focus::Calendar, Char('l') | KeyCode::Right) => guard.move_day_cursor(1),
        (_, Focus::Calendar, Char('k') | KeyCode::Up) => guard.move_day_cursor(-7),
        (_, Focus::Calendar, Char('j') | KeyCode::Down) => guard.move_day_cursor(7),
        (_, Focus::Calendar, KeyCode::Enter) => guard.select_day_at_cursor(),
        (_, Focus::Calendar, Char('x') | KeyCode::Esc) => guard.clear_day(),

        // Tournament list
        (_, Focus::List, Char('j') | KeyCode::Down) => {
            if let Some(token) = guard.list_down() {
                drop(guard);
                spawn_load_more_settle(ui_events.clone(), token);
                return;
            }
        }
        (_, Focus::List, Char('k') | KeyCode::Up) => guard.list_up(),
        (_, Focus::List, KeyCode::Enter) => guard.toggle_expanded(),
        (_, Focus::List, Char('l')) => {
            if let Some(liked) = guard.toggle_liked() {
                storage::save_liked(guard.store(), liked);
            }
        }
        (_, Focus::List, KeyCode::Esc) => guard.cycle_focus(),

        // Global
        (_, _, Char('f')) => guard.toggle_full_screen(),
        (_, _, Char('"')) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn spawn_load_more_settle(ui_events: mpsc::Sender<UiEvent>, token: LoadToken) {
    tokio::spawn(async move {
        tokio::time::sleep(LOAD_MORE_SETTLE).await;
        let _ = ui_events.send(UiEvent::LoadMoreSettled(token)).await;
    });
}
