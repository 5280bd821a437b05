//! Embedded content engine abstraction

use crate::error::Result;

/// Completion callback for a script evaluation
///
/// Receives the engine's string result, or `None` when the engine reported
/// null. May be invoked on any thread.
pub type ScriptCallback = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// Content engine capability
///
/// Wraps the component rendering the hosted content (a `WebView` on Android).
pub trait ContentEngine {
    /// Evaluate a script against the hosted content
    ///
    /// The result is delivered asynchronously through `callback`. An `Err`
    /// return means the evaluation could not be started and the callback
    /// will never run.
    fn evaluate_script(&self, script: &str, callback: ScriptCallback) -> Result<()>;

    /// Whether the hosted content has history to go back to
    fn can_go_back(&self) -> Result<bool>;

    /// Go back one entry in the hosted content's history
    fn go_back(&self) -> Result<()>;
}
