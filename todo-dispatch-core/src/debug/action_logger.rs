//! Action logging with pattern-based filtering and in-memory storage
//!
//! Every action passes through [`ActionLoggerMiddleware`] on its way into
//! the store. Names accepted by the [`ActionLoggerConfig`] filter are traced
//! and, when a log is attached, appended to an [`ActionLog`] for the UI.
//!
//! ```ignore
//! use todo_dispatch_core::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
//! use todo_dispatch_core::Store;
//!
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::new(
//!     50,
//!     ActionLoggerConfig::new(Some("Toggle*,Add*"), None),
//! ));
//! let store = Store::with_middleware(AppState::default(), reducer, middleware);
//!
//! store.inspect_middleware(|m| {
//!     for entry in m.log().into_iter().flat_map(|log| log.recent(10)) {
//!         println!("#{} {}", entry.sequence, entry.summary);
//!     }
//! });
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::action::ActionSummary;
use crate::store::Middleware;

/// Which action names get logged
///
/// Patterns are globs over [`Action::name`](crate::Action::name): `*` is any
/// run of characters and `?` is one character. An empty include list
/// accepts every name; excludes win over includes.
///
/// - `Toggle*` matches `ToggleTodo`
/// - `*Todo` matches `AddTodo` and `ToggleTodo`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLoggerConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ActionLoggerConfig {
    /// Build from comma-separated lists, as given on the command line
    ///
    /// ```
    /// use todo_dispatch_core::debug::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("*Todo"), Some("Toggle*"));
    /// assert!(config.should_log("AddTodo"));
    /// assert!(!config.should_log("ToggleTodo"));
    /// assert!(!config.should_log("SetVisibilityFilter"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        let parse = |list: Option<&str>| -> Vec<String> {
            list.into_iter()
                .flat_map(|list| list.split(','))
                .map(str::trim)
                .filter(|pattern| !pattern.is_empty())
                .map(String::from)
                .collect()
        };
        Self {
            include: parse(include),
            exclude: parse(exclude),
        }
    }

    pub fn should_log(&self, action_name: &str) -> bool {
        let matches = |patterns: &[String]| patterns.iter().any(|p| glob_match(p, action_name));
        (self.include.is_empty() || matches(&self.include)) && !matches(&self.exclude)
    }
}

// ============================================================================
// In-Memory Action Log
// ============================================================================

/// One logged action
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    pub name: &'static str,
    /// From [`ActionSummary::summary`]
    pub summary: String,
    /// Position among all logged actions, starting at 0
    pub sequence: u64,
    pub logged_at: Instant,
    /// `None` until the reducer has run
    pub state_changed: Option<bool>,
}

impl ActionLogEntry {
    /// `*` changed the state, `-` left it equal, `?` still being applied
    pub fn change_marker(&self) -> char {
        match self.state_changed {
            Some(true) => '*',
            Some(false) => '-',
            None => '?',
        }
    }

    /// Age of the entry, e.g. `150ms` or `2.3s`
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.logged_at.elapsed())
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    match elapsed.as_millis() {
        ms @ 0..=999 => format!("{}ms", ms),
        _ => format!("{:.1}s", elapsed.as_secs_f64()),
    }
}

/// Size and filter of an [`ActionLog`]
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Entries kept before the oldest is dropped
    pub capacity: usize,
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self::new(100, ActionLoggerConfig::default())
    }
}

impl ActionLogConfig {
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// Bounded history of recent actions, oldest first
///
/// Sequence numbers only count stored entries, and keep counting after the
/// oldest entries are evicted.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl ActionLog {
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Append `action` unless the filter rejects it
    ///
    /// Returns the sequence number of the new entry.
    pub fn log<A: ActionSummary>(&mut self, action: &A) -> Option<u64> {
        let name = action.name();
        if self.config.capacity == 0 || !self.config.filter.should_log(name) {
            return None;
        }

        if self.entries.len() == self.config.capacity {
            self.entries.pop_front();
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push_back(ActionLogEntry {
            name,
            summary: action.summary(),
            sequence,
            logged_at: Instant::now(),
            state_changed: None,
        });
        Some(sequence)
    }

    /// Record the reducer outcome for the entry with `sequence`
    ///
    /// Does nothing if that entry was already evicted.
    pub fn mark_applied(&mut self, sequence: u64, changed: bool) {
        if let Some(entry) = self.entries.iter_mut().rev().find(|e| e.sequence == sequence) {
            entry.state_changed = Some(changed);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Up to `count` entries, newest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Traces accepted actions at `debug`, and optionally keeps an [`ActionLog`]
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    filter: ActionLoggerConfig,
    log: Option<ActionLog>,
    /// Sequence of the entry stored for the action being dispatched
    in_flight: Option<u64>,
}

impl ActionLoggerMiddleware {
    /// Tracing only, nothing stored
    pub fn new(filter: ActionLoggerConfig) -> Self {
        Self {
            filter,
            log: None,
            in_flight: None,
        }
    }

    /// Tracing plus an in-memory log, both filtered by `config.filter`
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            filter: config.filter.clone(),
            log: Some(ActionLog::new(config)),
            in_flight: None,
        }
    }

    /// Unfiltered, with a 100-entry log
    pub fn with_default_log() -> Self {
        Self::with_log(ActionLogConfig::default())
    }

    pub fn log(&self) -> Option<&ActionLog> {
        self.log.as_ref()
    }

    pub fn config(&self) -> &ActionLoggerConfig {
        &self.filter
    }
}

impl<A: ActionSummary> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, action: &A) {
        if self.filter.should_log(action.name()) {
            tracing::debug!(action = %action.name(), summary = %action.summary(), "action");
        }
        self.in_flight = self.log.as_mut().and_then(|log| log.log(action));
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        let (Some(sequence), Some(log)) = (self.in_flight.take(), self.log.as_mut()) else {
            return;
        };
        log.mark_applied(sequence, state_changed);
        tracing::trace!(action = %action.name(), state_changed, "action applied");
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen, and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("AddTodo", "AddTodo"));
        assert!(!glob_match("AddTodo", "AddTodos"));
        assert!(!glob_match("AddTodo", "Add"));
    }

    #[test]
    fn test_glob_match_star() {
        assert!(glob_match("Toggle*", "ToggleTodo"));
        assert!(glob_match("Toggle*", "Toggle"));
        assert!(!glob_match("Toggle*", "AddToggle"));

        assert!(glob_match("*Todo", "AddTodo"));
        assert!(glob_match("*Todo", "ToggleTodo"));
        assert!(glob_match("*Visibility*", "SetVisibilityFilter"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn test_glob_match_question() {
        assert!(glob_match("Add?odo", "AddTodo"));
        assert!(!glob_match("AddTodo?", "AddTodo"));
    }

    #[test]
    fn test_glob_match_backtracks() {
        assert!(glob_match("*o*o", "ToggleTodo"));
        assert!(glob_match("S*Filter", "SetVisibilityFilter"));
        assert!(!glob_match("S*Filters", "SetVisibilityFilter"));
    }

    #[test]
    fn test_action_logger_config_include() {
        let config = ActionLoggerConfig::new(Some("Add*, Toggle*"), None);
        assert!(config.should_log("AddTodo"));
        assert!(config.should_log("ToggleTodo"));
        assert!(!config.should_log("SetVisibilityFilter"));
    }

    #[test]
    fn test_action_logger_config_exclude() {
        let config = ActionLoggerConfig::new(None, Some("Unrecognized"));
        assert!(!config.should_log("Unrecognized"));
        assert!(config.should_log("AddTodo"));
    }

    #[test]
    fn test_action_logger_config_default_logs_everything() {
        let config = ActionLoggerConfig::default();
        assert!(config.should_log("AddTodo"));
        assert!(config.should_log("Unrecognized"));
    }

    #[test]
    fn test_empty_pattern_list_is_ignored() {
        let config = ActionLoggerConfig::new(Some(" , "), Some(""));
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
        assert!(config.should_log("AddTodo"));
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Add,
        Toggle,
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Add => "Add",
                TestAction::Toggle => "Toggle",
            }
        }
    }

    impl ActionSummary for TestAction {}

    fn unfiltered(capacity: usize) -> ActionLog {
        ActionLog::new(ActionLogConfig::new(capacity, ActionLoggerConfig::default()))
    }

    #[test]
    fn test_action_log_basic() {
        let mut log = ActionLog::default();
        assert!(log.is_empty());

        log.log(&TestAction::Add);
        assert_eq!(log.len(), 1);

        let entry = log.entries().next().unwrap();
        assert_eq!(entry.name, "Add");
        assert_eq!(entry.summary, "Add");
        assert_eq!(entry.sequence, 0);
        assert_eq!(entry.change_marker(), '?');
    }

    #[test]
    fn test_action_log_filtering() {
        let mut log = ActionLog::new(ActionLogConfig::new(
            10,
            ActionLoggerConfig::new(None, Some("Toggle")),
        ));

        assert!(log.log(&TestAction::Toggle).is_none());
        assert!(log.is_empty());

        assert!(log.log(&TestAction::Add).is_some());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_action_log_capacity() {
        let mut log = unfiltered(3);
        for _ in 0..4 {
            log.log(&TestAction::Add);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries().next().unwrap().sequence, 1);
    }

    #[test]
    fn test_action_log_zero_capacity_stores_nothing() {
        let mut log = unfiltered(0);
        assert!(log.log(&TestAction::Add).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_action_log_recent_is_newest_first() {
        let mut log = unfiltered(10);
        for _ in 0..5 {
            log.log(&TestAction::Add);
        }

        let recent: Vec<u64> = log.recent(3).map(|e| e.sequence).collect();
        assert_eq!(recent, vec![4, 3, 2]);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_elapsed_display() {
        assert_eq!(format_elapsed(Duration::from_millis(150)), "150ms");
        assert_eq!(format_elapsed(Duration::from_millis(2300)), "2.3s");
    }

    #[test]
    fn test_middleware_records_state_changed() {
        let mut middleware = ActionLoggerMiddleware::with_default_log();

        middleware.before(&TestAction::Add);
        middleware.after(&TestAction::Add, true);
        middleware.before(&TestAction::Toggle);
        middleware.after(&TestAction::Toggle, false);

        let markers: Vec<char> = middleware
            .log()
            .unwrap()
            .entries()
            .map(|e| e.change_marker())
            .collect();
        assert_eq!(markers, vec!['*', '-']);
    }

    #[test]
    fn test_middleware_filtered_action_does_not_update_state_changed() {
        let mut middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::new(
            10,
            ActionLoggerConfig::new(None, Some("Toggle")),
        ));

        middleware.before(&TestAction::Add);
        middleware.after(&TestAction::Add, true);
        middleware.before(&TestAction::Toggle);
        middleware.after(&TestAction::Toggle, false);

        let log = middleware.log().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries().next().unwrap().state_changed, Some(true));
    }

    #[test]
    fn test_mark_applied_after_eviction_is_ignored() {
        let mut log = unfiltered(1);
        let first = log.log(&TestAction::Add).unwrap();
        let second = log.log(&TestAction::Toggle).unwrap();

        log.mark_applied(first, true);
        assert_eq!(log.entries().next().unwrap().state_changed, None);

        log.mark_applied(second, false);
        assert_eq!(log.entries().next().unwrap().change_marker(), '-');
    }

    #[test]
    fn test_tracing_only_middleware_stores_nothing() {
        let mut middleware = ActionLoggerMiddleware::new(ActionLoggerConfig::default());
        middleware.before(&TestAction::Add);
        middleware.after(&TestAction::Add, true);
        assert!(middleware.log().is_none());
    }
}
