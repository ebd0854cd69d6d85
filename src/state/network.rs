use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tourcal_api::client::TournamentApi;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves fetch requests one at a time and animates the spinner while a
/// request is running.
pub struct NetworkWorker {
    client: TournamentApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: TournamentApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let (response, is_ok) = match request {
                NetworkRequest::LoadSports => {
                    debug!("loading sports list");
                    let sports = self.client.fetch_sports().await;
                    (NetworkResponse::SportsLoaded { sports }, true)
                }
                NetworkRequest::LoadTournaments => {
                    debug!("loading tournaments");
                    let result = self.client.fetch_tournaments().await;
                    let is_ok = result.is_ok();
                    (NetworkResponse::TournamentsLoaded { result }, is_ok)
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_fetch_ends_with_error_spinner() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let client = TournamentApi::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_millis(200));
        let worker = tokio::spawn(NetworkWorker::new(client, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadTournaments).await.unwrap();

        let mut last_loading = None;
        let result = loop {
            match resp_rx.recv().await.unwrap() {
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    last_loading = Some(loading_state)
                }
                NetworkResponse::TournamentsLoaded { result } => break result,
                other => panic!("unexpected response {other:?}"),
            }
        };

        assert!(result.is_err());
        let last = last_loading.unwrap();
        assert!(!last.is_loading);
        assert_eq!(last.spinner_char, ERROR_CHAR);
        worker.abort();
    }

    #[tokio::test]
    async fn sports_request_always_answers() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let client = TournamentApi::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_millis(200));
        let worker = tokio::spawn(NetworkWorker::new(client, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadSports).await.unwrap();
        let sports = loop {
            if let NetworkResponse::SportsLoaded { sports } = resp_rx.recv().await.unwrap() {
                break sports;
            }
        };
        assert_eq!(sports, vec![tourcal_api::Sport::sentinel()]);
        worker.abort();
    }
}
