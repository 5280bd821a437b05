//! Back-navigation delegation
//!
//! On a back press the hosted application gets the first say: a query
//! script checks whether its detail view is open and, if so, cancels the
//! player's fullscreen (best effort), closes the view, and answers
//! `"closed"`. Any other answer, including null, errors, garbage, or no
//! answer before the deadline, falls through to history navigation and
//! then to the host's default back action. The back button is never left
//! dead.

use std::time::Instant;

use veil_platform::{ContentEngine, SystemChrome};

use crate::config::BackConfig;
use crate::queue::{ControllerEvent, UiSender};

/// Marker returned by the query when the app closed its detail view
pub const CLOSED_MARKER: &str = "closed";

/// Marker returned by the query when no detail view was open
pub const NONE_MARKER: &str = "none";

/// Decoded answer of the in-page query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailViewStatus {
    /// The app handled back by closing its detail view
    Closed,
    /// No detail view was open
    NotOpen,
    /// Null, malformed, or unknown answer
    Unrecognized,
}

/// What the delegate did for a back press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackOutcome {
    /// Handled in-page; native side does nothing more
    Handled,
    /// Hosted content went back one history entry
    NavigatedBack,
    /// The host's default back action ran
    DefaultAction,
    /// Waiting for the in-page answer
    Pending,
    /// Duplicate press or stale answer, nothing done
    Ignored,
}

/// Decode the engine's answer
///
/// Engines return script results JSON-encoded (`"\"closed\""`), but raw
/// markers are accepted too.
pub fn parse_query_result(raw: Option<&str>) -> DetailViewStatus {
    let Some(raw) = raw else {
        return DetailViewStatus::Unrecognized;
    };

    let decoded = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(_) => return DetailViewStatus::Unrecognized,
        Err(_) => raw.trim().trim_matches('"').to_string(),
    };

    match decoded.as_str() {
        CLOSED_MARKER => DetailViewStatus::Closed,
        NONE_MARKER => DetailViewStatus::NotOpen,
        _ => DetailViewStatus::Unrecognized,
    }
}

/// Build the in-page query script for the configured app contract
pub fn build_query_script(config: &BackConfig) -> String {
    format!(
        "(function() {{\
           var app = window.{app};\
           if (app && app.{flag}) {{\
             if (app.{player} && app.{player}.fullScreen) {{\
               try {{ app.{player}.fullScreen.cancel('web'); }} catch (e) {{}}\
             }}\
             app.{close}();\
             return '{closed}';\
           }}\
           return '{none}';\
         }})()",
        app = config.app_global,
        flag = config.detail_flag,
        player = config.player_field,
        close = config.close_method,
        closed = CLOSED_MARKER,
        none = NONE_MARKER,
    )
}

#[derive(Clone, Copy, Debug)]
struct PendingQuery {
    id: u64,
    deadline: Instant,
}

/// Back-navigation delegate
pub struct BackDelegate {
    config: BackConfig,
    script: String,
    pending: Option<PendingQuery>,
    next_query_id: u64,
}

impl BackDelegate {
    /// Create a delegate for the configured app contract
    pub fn new(config: BackConfig) -> Self {
        let script = build_query_script(&config);
        Self {
            config,
            script,
            pending: None,
            next_query_id: 1,
        }
    }

    /// Whether a query is waiting for its answer
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending query times out, if one is pending
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    /// Handle a back press
    ///
    /// Starts the in-page query; its answer comes back as a
    /// [`ControllerEvent::BackQueryResult`] through `sender`. Without a
    /// content engine, or if the query cannot be started, falls back
    /// immediately.
    pub fn on_back_pressed<E, C, S>(
        &mut self,
        content: Option<&E>,
        chrome: &C,
        sender: &UiSender<S>,
        now: Instant,
    ) -> BackOutcome
    where
        E: ContentEngine + ?Sized,
        C: SystemChrome + ?Sized,
        S: Send + 'static,
    {
        // An expired query still owes its press a fallback; this press gets its own query
        if let Some(outcome) = self.poll_timeout(now, content, chrome) {
            tracing::debug!("Expired back query resolved before new press: {:?}", outcome);
        }

        if self.pending.is_some() {
            tracing::debug!("Back query already pending, ignoring back press");
            return BackOutcome::Ignored;
        }

        let Some(engine) = content else {
            tracing::warn!("Content engine unavailable, using default back action");
            return fall_back(content, chrome);
        };

        let query_id = self.next_query_id;
        self.next_query_id += 1;

        let reply = sender.clone();
        let callback = Box::new(move |result: Option<String>| {
            reply.send(ControllerEvent::BackQueryResult { query_id, result });
        });

        match engine.evaluate_script(&self.script, callback) {
            Ok(()) => {
                self.pending = Some(PendingQuery {
                    id: query_id,
                    deadline: now + self.config.query_timeout(),
                });
                tracing::debug!("Back query {} sent", query_id);
                BackOutcome::Pending
            }
            Err(e) => {
                tracing::warn!("Back query failed to start: {}", e);
                fall_back(content, chrome)
            }
        }
    }

    /// Handle the answer to a back query
    pub fn on_query_result<E, C>(
        &mut self,
        query_id: u64,
        result: Option<&str>,
        content: Option<&E>,
        chrome: &C,
    ) -> BackOutcome
    where
        E: ContentEngine + ?Sized,
        C: SystemChrome + ?Sized,
    {
        match self.pending {
            Some(pending) if pending.id == query_id => self.pending = None,
            _ => {
                tracing::debug!("Ignoring stale back query result {}", query_id);
                return BackOutcome::Ignored;
            }
        }

        match parse_query_result(result) {
            DetailViewStatus::Closed => {
                tracing::debug!("Back handled in page");
                BackOutcome::Handled
            }
            DetailViewStatus::NotOpen => fall_back(content, chrome),
            DetailViewStatus::Unrecognized => {
                tracing::warn!("Unrecognized back query result {:?}, falling back", result);
                fall_back(content, chrome)
            }
        }
    }

    /// Resolve a query whose deadline has passed
    ///
    /// Returns the fallback outcome if a pending query timed out. Its late
    /// answer, if any, is ignored afterwards.
    pub fn poll_timeout<E, C>(
        &mut self,
        now: Instant,
        content: Option<&E>,
        chrome: &C,
    ) -> Option<BackOutcome>
    where
        E: ContentEngine + ?Sized,
        C: SystemChrome + ?Sized,
    {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }

        self.pending = None;
        tracing::warn!("Back query {} timed out, falling back", pending.id);
        Some(fall_back(content, chrome))
    }
}

fn fall_back<E, C>(content: Option<&E>, chrome: &C) -> BackOutcome
where
    E: ContentEngine + ?Sized,
    C: SystemChrome + ?Sized,
{
    if let Some(engine) = content {
        match engine.can_go_back() {
            Ok(true) => match engine.go_back() {
                Ok(()) => return BackOutcome::NavigatedBack,
                Err(e) => tracing::warn!("Failed to go back in content history: {}", e),
            },
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to query content history: {}", e),
        }
    }

    if let Err(e) = chrome.default_back() {
        tracing::error!("Default back action failed: {}", e);
    }
    BackOutcome::DefaultAction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::UiQueue;
    use crate::testing::{Call, FakeChrome, FakeEngine, FakeSurface, Recorder};
    use std::sync::Arc;
    use std::time::Duration;
    use veil_platform::NoopWaker;

    struct Harness {
        log: Recorder,
        chrome: FakeChrome,
        engine: FakeEngine,
        queue: UiQueue<FakeSurface>,
        delegate: BackDelegate,
    }

    impl Harness {
        fn new(history: bool) -> Self {
            let log = Recorder::default();
            Self {
                chrome: FakeChrome::new(&log),
                engine: FakeEngine::new(&log, history),
                queue: UiQueue::new(Arc::new(NoopWaker)),
                delegate: BackDelegate::new(BackConfig::default()),
                log,
            }
        }

        fn press(&mut self, now: Instant) -> BackOutcome {
            let sender = self.queue.sender();
            self.delegate
                .on_back_pressed(Some(&self.engine), &self.chrome, &sender, now)
        }

        /// Answer the oldest query and feed the result back to the delegate
        fn answer(&mut self, raw: Option<&str>) -> BackOutcome {
            self.engine.respond(raw.map(str::to_string));
            let mut outcome = BackOutcome::Ignored;
            for event in self.queue.drain() {
                if let ControllerEvent::BackQueryResult { query_id, result } = event {
                    outcome = self.delegate.on_query_result(
                        query_id,
                        result.as_deref(),
                        Some(&self.engine),
                        &self.chrome,
                    );
                }
            }
            outcome
        }

        fn go_backs(&self) -> usize {
            self.log.count(|c| *c == Call::GoBack)
        }

        fn default_backs(&self) -> usize {
            self.log.count(|c| *c == Call::DefaultBack)
        }
    }

    #[test]
    fn test_parse_query_result() {
        assert_eq!(parse_query_result(Some("\"closed\"")), DetailViewStatus::Closed);
        assert_eq!(parse_query_result(Some("closed")), DetailViewStatus::Closed);
        assert_eq!(parse_query_result(Some("\"none\"")), DetailViewStatus::NotOpen);
        assert_eq!(parse_query_result(Some(" none ")), DetailViewStatus::NotOpen);
        assert_eq!(parse_query_result(Some("null")), DetailViewStatus::Unrecognized);
        assert_eq!(parse_query_result(Some("42")), DetailViewStatus::Unrecognized);
        assert_eq!(parse_query_result(Some("{\"a\"")), DetailViewStatus::Unrecognized);
        assert_eq!(parse_query_result(None), DetailViewStatus::Unrecognized);
    }

    #[test]
    fn test_query_script_uses_config() {
        let script = build_query_script(&BackConfig::default());
        assert!(script.contains("window.vueApp"));
        assert!(script.contains("app.showDetail"));
        assert!(script.contains("app.dp.fullScreen.cancel('web')"));
        assert!(script.contains("app.closeDetail()"));
        assert!(script.contains("return 'closed'"));
        assert!(script.contains("return 'none'"));
    }

    #[test]
    fn test_closed_does_not_navigate() {
        let mut h = Harness::new(true);
        assert_eq!(h.press(Instant::now()), BackOutcome::Pending);
        assert_eq!(h.answer(Some("\"closed\"")), BackOutcome::Handled);
        assert_eq!(h.go_backs(), 0);
        assert_eq!(h.default_backs(), 0);
        assert!(!h.delegate.is_pending());
    }

    #[test]
    fn test_none_with_history_goes_back_once() {
        let mut h = Harness::new(true);
        h.press(Instant::now());
        assert_eq!(h.answer(Some("\"none\"")), BackOutcome::NavigatedBack);
        assert_eq!(h.go_backs(), 1);
        assert_eq!(h.default_backs(), 0);
    }

    #[test]
    fn test_none_without_history_uses_default() {
        let mut h = Harness::new(false);
        h.press(Instant::now());
        assert_eq!(h.answer(Some("\"none\"")), BackOutcome::DefaultAction);
        assert_eq!(h.go_backs(), 0);
        assert_eq!(h.default_backs(), 1);
    }

    #[test]
    fn test_malformed_result_behaves_like_none() {
        for raw in [None, Some("garbage"), Some("null"), Some("{")] {
            let mut h = Harness::new(true);
            h.press(Instant::now());
            assert_eq!(h.answer(raw), BackOutcome::NavigatedBack);
            assert_eq!(h.go_backs(), 1);

            let mut h = Harness::new(false);
            h.press(Instant::now());
            assert_eq!(h.answer(raw), BackOutcome::DefaultAction);
            assert_eq!(h.default_backs(), 1);
        }
    }

    #[test]
    fn test_eval_error_falls_back() {
        let log = Recorder::default();
        let chrome = FakeChrome::new(&log);
        let engine = FakeEngine::failing(&log, false);
        let queue: UiQueue<FakeSurface> = UiQueue::new(Arc::new(NoopWaker));
        let mut delegate = BackDelegate::new(BackConfig::default());

        let outcome =
            delegate.on_back_pressed(Some(&engine), &chrome, &queue.sender(), Instant::now());
        assert_eq!(outcome, BackOutcome::DefaultAction);
        assert_eq!(log.count(|c| *c == Call::DefaultBack), 1);
        assert!(!delegate.is_pending());
    }

    #[test]
    fn test_no_engine_uses_default() {
        let log = Recorder::default();
        let chrome = FakeChrome::new(&log);
        let queue: UiQueue<FakeSurface> = UiQueue::new(Arc::new(NoopWaker));
        let mut delegate = BackDelegate::new(BackConfig::default());

        let outcome = delegate.on_back_pressed::<FakeEngine, _, _>(
            None,
            &chrome,
            &queue.sender(),
            Instant::now(),
        );
        assert_eq!(outcome, BackOutcome::DefaultAction);
        assert_eq!(log.count(|c| *c == Call::DefaultBack), 1);
    }

    #[test]
    fn test_second_press_while_pending_is_ignored() {
        let mut h = Harness::new(true);
        let now = Instant::now();
        assert_eq!(h.press(now), BackOutcome::Pending);
        assert_eq!(h.press(now), BackOutcome::Ignored);
        assert_eq!(h.log.count(|c| *c == Call::EvaluateScript), 1);
    }

    #[test]
    fn test_timeout_falls_back_once_and_ignores_late_answer() {
        let mut h = Harness::new(false);
        let start = Instant::now();
        h.press(start);

        let early = h
            .delegate
            .poll_timeout(start + Duration::from_millis(100), Some(&h.engine), &h.chrome);
        assert_eq!(early, None);

        let late = start + Duration::from_millis(1500);
        let outcome = h.delegate.poll_timeout(late, Some(&h.engine), &h.chrome);
        assert_eq!(outcome, Some(BackOutcome::DefaultAction));
        assert_eq!(h.delegate.poll_timeout(late, Some(&h.engine), &h.chrome), None);

        assert_eq!(h.answer(Some("\"none\"")), BackOutcome::Ignored);
        assert_eq!(h.default_backs(), 1);
    }

    #[test]
    fn test_press_after_expired_query_starts_new_query() {
        let mut h = Harness::new(true);
        let start = Instant::now();
        assert_eq!(h.press(start), BackOutcome::Pending);

        // No drain polled the first deadline
        let later = start + Duration::from_secs(5);
        assert_eq!(h.press(later), BackOutcome::Pending);
        assert_eq!(h.log.count(|c| *c == Call::EvaluateScript), 2);
        assert_eq!(h.go_backs(), 1);
        assert_eq!(h.delegate.deadline(), Some(later + BackConfig::default().query_timeout()));

        // The first answer is stale, the second one is honoured
        assert_eq!(h.answer(Some("\"closed\"")), BackOutcome::Ignored);
        assert_eq!(h.answer(Some("\"closed\"")), BackOutcome::Handled);
        assert_eq!(h.go_backs(), 1);
    }
}
