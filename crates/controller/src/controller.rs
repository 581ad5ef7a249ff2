use crate::error::{UNSUCCESSFUL_MESSAGE, ValidationError, user_message};
use crate::history::HistoryStore;
use crate::poll::{PollIntervals, Pollers, spawn_poller};
use crate::state::{
    ControllerState, Lookup, RESULT_COUNT_CHOICES, SearchResults, SearchState,
};
use api::{
    DocumentDetail, HealthStatus, SearchMode, SearchQuery, SearchResponse, SearchService,
    StatsReport,
};
use chrono::Local;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

pub const LAST_SEARCH_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Called after every event is queued, typically to wake the UI
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Completion of a background task, applied with [`Controller::apply`]
#[derive(Debug)]
pub enum ControllerEvent {
    SearchFinished {
        seq: u64,
        query: SearchQuery,
        outcome: api::Result<SearchResponse>,
    },
    Health(api::Result<HealthStatus>),
    Stats(api::Result<StatsReport>),
    Document {
        id: String,
        outcome: api::Result<DocumentDetail>,
    },
    Related {
        ids: Vec<String>,
        outcome: api::Result<Vec<Value>>,
    },
}

/// Owns the client state and runs every backend call on `runtime`.
///
/// Calls never block: each one becomes a task whose result comes back as a
/// [`ControllerEvent`]. The owner drains them with [`Controller::pump`] (or
/// [`Controller::next_event`] and [`Controller::apply`]), which is the only
/// place state changes after a call returns.
pub struct Controller {
    service: Arc<dyn SearchService>,
    runtime: Handle,
    tx: UnboundedSender<ControllerEvent>,
    rx: UnboundedReceiver<ControllerEvent>,
    notify: Notifier,
    store: HistoryStore,
    intervals: PollIntervals,
    pollers: Option<Pollers>,
    /// Last sequence number handed out to a search
    latest_seq: u64,
    state: ControllerState,
}

impl Controller {
    /// Loads the search history from `store`
    pub fn new(
        service: Arc<dyn SearchService>,
        runtime: Handle,
        store: HistoryStore,
        notify: Notifier,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let history = store.load();

        Self {
            service,
            runtime,
            tx,
            rx,
            notify,
            store,
            intervals: PollIntervals::default(),
            pollers: None,
            latest_seq: 0,
            state: ControllerState::new(history),
        }
    }

    pub fn with_poll_intervals(mut self, intervals: PollIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    // ===== Polling =====

    /// Starts the health and stats checks. The first of each runs right away.
    pub fn start_polling(&mut self) {
        if self.pollers.is_some() {
            return;
        }

        let health = {
            let service = self.service.clone();
            let tx = self.tx.clone();
            let notify = self.notify.clone();
            spawn_poller(&self.runtime, self.intervals.health, move || {
                let service = service.clone();
                let tx = tx.clone();
                let notify = notify.clone();
                async move {
                    let event = ControllerEvent::Health(service.check_health().await);
                    let delivered = tx.send(event).is_ok();
                    notify();
                    delivered
                }
            })
        };

        let stats = {
            let service = self.service.clone();
            let tx = self.tx.clone();
            let notify = self.notify.clone();
            spawn_poller(&self.runtime, self.intervals.stats, move || {
                let service = service.clone();
                let tx = tx.clone();
                let notify = notify.clone();
                async move {
                    let event = ControllerEvent::Stats(service.fetch_stats().await);
                    let delivered = tx.send(event).is_ok();
                    notify();
                    delivered
                }
            })
        };

        info!(
            health_secs = self.intervals.health.as_secs(),
            stats_secs = self.intervals.stats.as_secs(),
            "status polling started"
        );
        self.pollers = Some(Pollers::new(vec![health, stats]));
    }

    pub fn stop_polling(&mut self) {
        if self.pollers.take().is_some() {
            info!("status polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.pollers.is_some()
    }

    // ===== Options =====

    /// The search box text to edit in place, next to the history it offers
    pub fn search_input(&mut self) -> (&mut String, &[String]) {
        (&mut self.state.query_text, self.state.history.entries())
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.state.mode = mode;
    }

    /// Only the values of [`RESULT_COUNT_CHOICES`] are accepted
    pub fn set_result_count(&mut self, count: u32) -> bool {
        if !RESULT_COUNT_CHOICES.contains(&count) {
            warn!(count, "ignoring unsupported result count");
            return false;
        }
        self.state.result_count = count;
        true
    }

    pub fn set_generated_answer(&mut self, enabled: bool) {
        self.state.use_generated_answer = enabled;
    }

    /// Adds `doc_type` to the filter, or removes it when already present
    pub fn toggle_doc_type(&mut self, doc_type: &str) {
        let filter = &mut self.state.doc_type_filter;
        match filter.iter().position(|t| t == doc_type) {
            Some(pos) => {
                filter.remove(pos);
            }
            None => filter.push(doc_type.to_string()),
        }
    }

    // ===== Search =====

    /// Submits `text` with the current options and returns the sequence
    /// number of the submission. Blank input is rejected without a call.
    pub fn submit_search(&mut self, text: &str) -> Result<u64, ValidationError> {
        text.clone_into(&mut self.state.query_text);
        if text.trim().is_empty() {
            debug!("rejecting empty query");
            self.state.error = Some(ValidationError::EmptyQuery.to_string());
            return Err(ValidationError::EmptyQuery);
        }

        self.latest_seq += 1;
        let seq = self.latest_seq;
        let query = self.state.build_query(text);
        info!(seq, query = %query.text, mode = %query.mode, top_k = query.result_count, "search submitted");

        self.state.search = SearchState::Submitting {
            seq,
            mode: query.mode,
        };
        self.state.error = None;
        self.state.results = None;
        self.state.last_search_time = Some(Local::now().format(LAST_SEARCH_TIME_FORMAT).to_string());

        let service = self.service.clone();
        self.spawn_task(async move {
            let outcome = service.submit_query(&query).await;
            ControllerEvent::SearchFinished {
                seq,
                query,
                outcome,
            }
        });

        Ok(seq)
    }

    /// Submits the text currently in the search box
    pub fn submit(&mut self) -> Result<u64, ValidationError> {
        let text = self.state.query_text.clone();
        self.submit_search(&text)
    }

    pub fn select_history(&mut self, query: &str) -> Result<u64, ValidationError> {
        self.submit_search(query)
    }

    /// Back to a blank search box. A search still in flight is ignored when it
    /// completes.
    pub fn clear(&mut self) {
        self.state.query_text.clear();
        self.state.results = None;
        self.state.error = None;
        self.state.search = SearchState::Idle;
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    // ===== Documents =====

    pub fn request_document(&mut self, id: &str) {
        let id = id.to_string();
        debug!(id = %id, "document requested");
        self.state.document = Some(Lookup::Loading(id.clone()));

        let service = self.service.clone();
        self.spawn_task(async move {
            let outcome = service.fetch_document(&id).await;
            ControllerEvent::Document { id, outcome }
        });
    }

    pub fn request_related(&mut self, ids: Vec<String>) {
        debug!(count = ids.len(), "related documents requested");
        self.state.related = Some(Lookup::Loading(ids.clone()));

        let service = self.service.clone();
        self.spawn_task(async move {
            let outcome = service.fetch_documents(&ids).await;
            ControllerEvent::Related { ids, outcome }
        });
    }

    pub fn close_document(&mut self) {
        self.state.document = None;
        self.state.related = None;
    }

    // ===== Events =====

    fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = ControllerEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        self.runtime.spawn(async move {
            if tx.send(task.await).is_ok() {
                notify();
            }
        });
    }

    /// Applies every event that is already queued. Returns how many there were.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next event without applying it
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        self.rx.recv().await
    }

    pub fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::SearchFinished {
                seq,
                query,
                outcome,
            } => self.finish_search(seq, query, outcome),
            ControllerEvent::Health(Ok(health)) => {
                debug!(status = %health.status, "health updated");
                self.state.health = Some(health);
            }
            ControllerEvent::Health(Err(e)) => {
                warn!("Health check failed: {e}");
                self.state.health = Some(HealthStatus::unreachable());
            }
            ControllerEvent::Stats(Ok(stats)) => {
                if !stats.is_success() {
                    debug!("stats endpoint did not report success");
                }
                self.state.stats = Some(stats);
            }
            ControllerEvent::Stats(Err(e)) => {
                warn!("Fetching stats failed: {e}");
            }
            ControllerEvent::Document { id, outcome } => {
                if !matches!(&self.state.document, Some(Lookup::Loading(current)) if *current == id) {
                    debug!(id = %id, "dropping stale document lookup");
                    return;
                }
                self.state.document = Some(match outcome {
                    Ok(detail) => Lookup::Loaded(id, detail),
                    Err(e) => {
                        warn!(id = %id, "Document lookup failed: {e}");
                        Lookup::Failed(id, e.to_string())
                    }
                });
            }
            ControllerEvent::Related { ids, outcome } => {
                if !matches!(&self.state.related, Some(Lookup::Loading(current)) if *current == ids) {
                    debug!("dropping stale related documents lookup");
                    return;
                }
                self.state.related = Some(match outcome {
                    Ok(documents) => Lookup::Loaded(ids, documents),
                    Err(e) => {
                        warn!("Related documents lookup failed: {e}");
                        Lookup::Failed(ids, e.to_string())
                    }
                });
            }
        }
    }

    fn finish_search(&mut self, seq: u64, query: SearchQuery, outcome: api::Result<SearchResponse>) {
        if !matches!(self.state.search, SearchState::Submitting { seq: current, .. } if current == seq) {
            debug!(seq, latest = self.latest_seq, "dropping superseded search response");
            return;
        }

        let message = match outcome {
            Ok(response) if response.success => {
                info!(
                    seq,
                    total_hits = response.total_hits,
                    returned = response.sources.len(),
                    "search succeeded"
                );
                if self.state.history.push(&query.text) {
                    if let Err(e) = self.store.save(&self.state.history) {
                        warn!("Saving search history failed: {e}");
                    }
                }
                self.state.search = SearchState::Succeeded { seq };
                self.state.results = Some(SearchResults {
                    seq,
                    query,
                    response,
                });
                return;
            }
            Ok(_) => {
                warn!(seq, "backend reported an unsuccessful search");
                UNSUCCESSFUL_MESSAGE.to_string()
            }
            Err(e) => {
                warn!(seq, "Search failed: {e}");
                user_message(&e)
            }
        };

        self.state.search = SearchState::Failed;
        self.state.results = None;
        self.state.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{INTERNAL_ERROR_MESSAGE, NETWORK_MESSAGE, UNAVAILABLE_MESSAGE};
    use crate::history::SearchHistory;
    use api::{ApiError, RequestFailure, ServiceStatus, SourceDocument};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeService {
        queries: Mutex<Vec<SearchQuery>>,
        health_calls: AtomicUsize,
        stats_calls: AtomicUsize,
        health_down: AtomicBool,
    }

    fn failure(status: u16) -> ApiError {
        ApiError::Request(RequestFailure {
            method: "POST".into(),
            path: "/query".into(),
            status,
            reason: String::new(),
            detail: None,
        })
    }

    #[async_trait]
    impl SearchService for FakeService {
        async fn check_health(&self) -> api::Result<HealthStatus> {
            self.health_calls.fetch_add(1, Ordering::SeqCst);
            if self.health_down.load(Ordering::SeqCst) {
                return Err(ApiError::Network {
                    method: "GET".into(),
                    path: "/health".into(),
                    message: "connection refused".into(),
                });
            }
            Ok(HealthStatus {
                elasticsearch_up: true,
                mysql_up: true,
                openai_up: true,
                status: ServiceStatus::Ok,
                ..Default::default()
            })
        }

        async fn fetch_stats(&self) -> api::Result<StatsReport> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            Ok(StatsReport::Raw(json!({"success": false})))
        }

        async fn submit_query(&self, query: &SearchQuery) -> api::Result<SearchResponse> {
            self.queries.lock().unwrap().push(query.clone());
            if query.text.starts_with("slow") {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }

            let ok = |sources: Vec<SourceDocument>| SearchResponse {
                success: true,
                query: query.text.clone(),
                mode: query.mode.to_string(),
                total_hits: sources.len() as u64,
                sources,
                ..Default::default()
            };
            match query.text.as_str() {
                "down" => Err(ApiError::Network {
                    method: "POST".into(),
                    path: "/query".into(),
                    message: "connection refused".into(),
                }),
                "boom" => Err(failure(500)),
                "busy" => Err(failure(503)),
                "nope" => Ok(SearchResponse::default()),
                "empty" => Ok(ok(Vec::new())),
                text => Ok(ok(vec![SourceDocument {
                    id: format!("id-{text}"),
                    ..Default::default()
                }])),
            }
        }

        async fn fetch_document(&self, id: &str) -> api::Result<DocumentDetail> {
            if id == "missing" {
                return Err(failure(404));
            }
            Ok(DocumentDetail::Found {
                document: json!({"doc_id": id}),
                related_documents: vec![],
            })
        }
    }

    struct Fixture {
        service: Arc<FakeService>,
        repaints: Arc<AtomicUsize>,
        controller: Controller,
        dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(FakeService::default());
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = repaints.clone();
        let controller = Controller::new(
            service.clone(),
            Handle::current(),
            HistoryStore::new(dir.path().join("history.json")),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        Fixture {
            service,
            repaints,
            controller,
            dir,
        }
    }

    async fn apply_next(controller: &mut Controller) {
        let event = controller.next_event().await.expect("channel open");
        controller.apply(event);
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    // ==================== search ====================

    #[rstest]
    #[case("")]
    #[case("   \t")]
    #[tokio::test]
    async fn test_blank_query_never_hits_network(#[case] text: &str) {
        let mut f = fixture();
        assert_eq!(f.controller.submit_search(text), Err(ValidationError::EmptyQuery));

        settle().await;
        let state = f.controller.state();
        assert_eq!(state.error.as_deref(), Some("請輸入搜尋內容"));
        assert_eq!(state.search, SearchState::Idle);
        assert!(f.service.queries.lock().unwrap().is_empty());
        assert_eq!(f.controller.pump(), 0);
    }

    #[tokio::test]
    async fn test_successful_search() {
        let mut f = fixture();
        f.controller.set_mode(SearchMode::Keyword);
        let seq = f.controller.submit_search(" 馬達 ").unwrap();
        assert_eq!(seq, 1);
        assert!(f.controller.state().is_loading());
        assert!(f.controller.state().last_search_time.is_some());

        apply_next(&mut f.controller).await;

        let state = f.controller.state();
        assert_eq!(state.search, SearchState::Succeeded { seq: 1 });
        assert_eq!(state.error, None);
        let results = state.results.as_ref().unwrap();
        assert_eq!(results.seq, 1);
        assert_eq!(results.query.text, "馬達");
        assert_eq!(results.response.sources[0].id, "id-馬達");
        assert_eq!(state.history.entries(), ["馬達"]);
        assert!(f.repaints.load(Ordering::SeqCst) >= 1);

        let saved = HistoryStore::new(f.dir.path().join("history.json")).load();
        assert_eq!(saved, state.history);

        let sent = f.service.queries.lock().unwrap();
        assert_eq!(sent[0].mode, SearchMode::Keyword);
    }

    #[tokio::test]
    async fn test_last_search_time_format() {
        let mut f = fixture();
        f.controller.submit_search("x").unwrap();
        let time = f.controller.state().last_search_time.clone().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&time, LAST_SEARCH_TIME_FORMAT).is_ok());
    }

    #[tokio::test]
    async fn test_empty_result_set_succeeds() {
        let mut f = fixture();
        f.controller.submit_search("empty").unwrap();
        apply_next(&mut f.controller).await;

        let results = f.controller.state().results.as_ref().unwrap();
        assert!(results.response.has_no_results());
        assert_eq!(results.response.total_hits, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_response_is_dropped() {
        let mut f = fixture();
        let first = f.controller.submit_search("slow 馬達").unwrap();
        let second = f.controller.submit_search("閥門").unwrap();
        assert!(second > first);

        apply_next(&mut f.controller).await;
        apply_next(&mut f.controller).await;

        let state = f.controller.state();
        assert_eq!(state.search, SearchState::Succeeded { seq: second });
        assert_eq!(state.results.as_ref().unwrap().query.text, "閥門");
        assert_eq!(state.history.entries(), ["閥門"]);
    }

    #[rstest]
    #[case("down", NETWORK_MESSAGE)]
    #[case("boom", INTERNAL_ERROR_MESSAGE)]
    #[case("busy", UNAVAILABLE_MESSAGE)]
    #[case("nope", UNSUCCESSFUL_MESSAGE)]
    #[tokio::test]
    async fn test_failed_search(#[case] text: &str, #[case] message: &str) {
        let mut f = fixture();
        f.controller.submit_search(text).unwrap();
        apply_next(&mut f.controller).await;

        let state = f.controller.state();
        assert_eq!(state.search, SearchState::Failed);
        assert_eq!(state.error.as_deref(), Some(message));
        assert!(state.results.is_none());
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_new_search_replaces_results_and_error() {
        let mut f = fixture();
        f.controller.submit_search("first").unwrap();
        apply_next(&mut f.controller).await;
        f.controller.submit_search("down").unwrap();
        apply_next(&mut f.controller).await;
        assert!(f.controller.state().error.is_some());

        f.controller.submit_search("second").unwrap();
        assert!(f.controller.state().error.is_none());
        assert!(f.controller.state().results.is_none());
        apply_next(&mut f.controller).await;

        let state = f.controller.state();
        assert_eq!(state.results.as_ref().unwrap().query.text, "second");
        assert_eq!(state.history.entries(), ["second", "first"]);
    }

    #[tokio::test]
    async fn test_clear_ignores_in_flight_search() {
        let mut f = fixture();
        f.controller.submit_search("馬達").unwrap();
        f.controller.clear();
        apply_next(&mut f.controller).await;

        let state = f.controller.state();
        assert_eq!(state.search, SearchState::Idle);
        assert_eq!(state.query_text, "");
        assert!(state.results.is_none());
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_error_keeps_everything_else() {
        let mut f = fixture();
        f.controller.submit_search("ok").unwrap();
        apply_next(&mut f.controller).await;
        let _ = f.controller.submit_search(" ");

        f.controller.dismiss_error();
        let state = f.controller.state();
        assert!(state.error.is_none());
        assert!(state.results.is_some());
    }

    #[tokio::test]
    async fn test_select_history_sets_text_and_submits() {
        let mut f = fixture();
        let seq = f.controller.select_history("FMEA").unwrap();
        assert_eq!(f.controller.state().query_text, "FMEA");
        apply_next(&mut f.controller).await;
        assert_eq!(f.controller.state().search, SearchState::Succeeded { seq });
    }

    #[tokio::test]
    async fn test_submit_sends_edited_search_text() {
        let mut f = fixture();
        f.controller.submit_search("舊").unwrap();
        apply_next(&mut f.controller).await;

        let (text, history) = f.controller.search_input();
        assert_eq!(history, ["舊"]);
        text.clear();
        text.push_str("新查詢");

        let seq = f.controller.submit().unwrap();
        apply_next(&mut f.controller).await;
        let state = f.controller.state();
        assert_eq!(state.search, SearchState::Succeeded { seq });
        assert_eq!(state.results.as_ref().unwrap().query.text, "新查詢");
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_search_text() {
        let mut f = fixture();
        f.controller.search_input().0.push_str("   ");
        assert_eq!(f.controller.submit(), Err(ValidationError::EmptyQuery));
        assert!(f.controller.state().error.is_some());
    }

    #[tokio::test]
    async fn test_history_loaded_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store
            .save(&SearchHistory::from_entries(vec!["舊查詢".into()]))
            .unwrap();

        let controller = Controller::new(
            Arc::new(FakeService::default()),
            Handle::current(),
            store,
            Arc::new(|| {}),
        );
        assert_eq!(controller.state().history.entries(), ["舊查詢"]);
    }

    // ==================== options ====================

    #[tokio::test]
    async fn test_options() {
        let mut f = fixture();
        assert!(f.controller.set_result_count(30));
        assert!(!f.controller.set_result_count(7));
        assert_eq!(f.controller.state().result_count, 30);

        f.controller.toggle_doc_type("FMEA");
        f.controller.toggle_doc_type("COMPLAINT");
        f.controller.toggle_doc_type("FMEA");
        assert_eq!(f.controller.state().doc_type_filter, vec!["COMPLAINT"]);

        f.controller.set_generated_answer(false);
        f.controller.submit_search("x").unwrap();
        settle().await;

        let sent = f.service.queries.lock().unwrap();
        assert_eq!(sent[0].result_count, 30);
        assert!(!sent[0].use_generated_answer);
        assert_eq!(sent[0].doc_type_filter, vec!["COMPLAINT"]);
    }

    // ==================== polling ====================

    #[tokio::test(start_paused = true)]
    async fn test_polling_runs_immediately_and_periodically() {
        let mut f = fixture();
        f.controller.start_polling();
        assert!(f.controller.is_polling());

        apply_next(&mut f.controller).await;
        apply_next(&mut f.controller).await;
        assert_eq!(f.service.health_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.service.stats_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.controller.state().health.as_ref().unwrap().status, ServiceStatus::Ok);
        assert!(f.controller.state().stats.is_some());

        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(f.service.health_calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.service.stats_calls.load(Ordering::SeqCst), 1);

        f.controller.stop_polling();
        tokio::time::advance(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(f.service.health_calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.service.stats_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_health_reports_error() {
        let mut f = fixture();
        f.service.health_down.store(true, Ordering::SeqCst);
        assert!(f.controller.state().health.is_none());

        f.controller.start_polling();
        settle().await;
        f.controller.pump();

        let health = f.controller.state().health.clone().unwrap();
        assert_eq!(health, HealthStatus::unreachable());
        assert_eq!(health.status, ServiceStatus::Error);
    }

    // ==================== documents ====================

    #[tokio::test]
    async fn test_document_lookup() {
        let mut f = fixture();
        f.controller.request_document("ECN-1");
        assert_eq!(f.controller.state().document, Some(Lookup::Loading("ECN-1".into())));
        apply_next(&mut f.controller).await;

        match f.controller.state().document.as_ref().unwrap() {
            Lookup::Loaded(id, detail) => {
                assert_eq!(id, "ECN-1");
                assert_eq!(detail.document(), Some(&json!({"doc_id": "ECN-1"})));
            }
            other => panic!("unexpected lookup {other:?}"),
        }

        f.controller.request_document("missing");
        apply_next(&mut f.controller).await;
        assert!(matches!(f.controller.state().document, Some(Lookup::Failed(..))));
    }

    #[tokio::test]
    async fn test_stale_document_lookup_dropped() {
        let mut f = fixture();
        f.controller.request_document("a");
        f.controller.request_document("b");
        apply_next(&mut f.controller).await;
        apply_next(&mut f.controller).await;

        let lookup = f.controller.state().document.as_ref().unwrap();
        assert_eq!(lookup.key(), "b");
        assert!(matches!(lookup, Lookup::Loaded(..)));
    }

    #[tokio::test]
    async fn test_related_lookup_drops_failures() {
        let mut f = fixture();
        let ids = vec!["a".to_string(), "missing".to_string()];
        f.controller.request_related(ids.clone());
        apply_next(&mut f.controller).await;

        assert_eq!(
            f.controller.state().related,
            Some(Lookup::Loaded(ids, vec![json!({"doc_id": "a"})]))
        );

        f.controller.close_document();
        assert!(f.controller.state().related.is_none());
    }
}
