//! Recording fakes of the platform capabilities, for tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use veil_platform::{
    Argb, ContentContainer, ContentEngine, Orientation, Platform, PlatformError, Result,
    ScriptCallback, SystemChrome, SystemUiVisibility, WindowFlags,
};

/// A native call observed by a fake
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    StatusBarColor(Argb),
    WindowFlags { flags: WindowFlags, mask: WindowFlags },
    SystemUi(SystemUiVisibility),
    Orientation(Orientation),
    DefaultBack,
    TopPadding(i32),
    Background(Argb),
    AddSurface(u32),
    RemoveSurface(u32),
    ContentVisible(bool),
    EvaluateScript,
    GoBack,
    TokenReleased,
}

/// Shared call log, so ordering across fakes and tokens can be asserted
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Call>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, call: Call) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn last_matching(&self, pred: impl Fn(&Call) -> bool) -> Option<Call> {
        self.lock().iter().rev().find(|c| pred(c)).cloned()
    }

    /// Position of the first call matching `pred`
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.lock().iter().position(pred)
    }

    /// A completion token that logs [`Call::TokenReleased`] when released
    pub fn token(&self) -> crate::token::CompletionToken {
        let log = self.clone();
        crate::token::CompletionToken::new(move || log.push(Call::TokenReleased))
    }
}

/// Route tracing output to the test harness; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("veil_core=debug")
        .with_test_writer()
        .try_init();
}

fn failure(what: &str) -> PlatformError {
    PlatformError::Other(format!("{} failed", what))
}

/// Playback surface stand-in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FakeSurface(pub u32);

pub struct FakeChrome {
    log: Recorder,
    ui: Cell<SystemUiVisibility>,
    fail: bool,
}

impl FakeChrome {
    pub fn new(log: &Recorder) -> Self {
        Self {
            log: log.clone(),
            ui: Cell::new(SystemUiVisibility::LIGHT_STATUS_BAR),
            fail: false,
        }
    }

    pub fn failing(log: &Recorder) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    fn record(&self, what: &str, call: Call) -> Result<()> {
        if self.fail {
            return Err(failure(what));
        }
        self.log.push(call);
        Ok(())
    }
}

impl SystemChrome for FakeChrome {
    fn set_status_bar_color(&self, color: Argb) -> Result<()> {
        self.record("status bar color", Call::StatusBarColor(color))
    }

    fn set_window_flags(&self, flags: WindowFlags, mask: WindowFlags) -> Result<()> {
        self.record("window flags", Call::WindowFlags { flags, mask })
    }

    fn system_ui_visibility(&self) -> Result<SystemUiVisibility> {
        if self.fail {
            return Err(failure("system ui read"));
        }
        Ok(self.ui.get())
    }

    fn set_system_ui_visibility(&self, flags: SystemUiVisibility) -> Result<()> {
        self.record("system ui", Call::SystemUi(flags))?;
        self.ui.set(flags);
        Ok(())
    }

    fn set_requested_orientation(&self, orientation: Orientation) -> Result<()> {
        self.record("orientation", Call::Orientation(orientation))
    }

    fn default_back(&self) -> Result<()> {
        self.record("default back", Call::DefaultBack)
    }
}

pub struct FakeContainer {
    log: Recorder,
    fail: bool,
}

impl FakeContainer {
    pub fn new(log: &Recorder) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &Recorder) -> Self {
        Self {
            log: log.clone(),
            fail: true,
        }
    }

    fn record(&self, what: &str, call: Call) -> Result<()> {
        if self.fail {
            return Err(failure(what));
        }
        self.log.push(call);
        Ok(())
    }
}

impl ContentContainer for FakeContainer {
    type Surface = FakeSurface;

    fn set_top_padding(&self, px: i32) -> Result<()> {
        self.record("padding", Call::TopPadding(px))
    }

    fn set_background_color(&self, color: Argb) -> Result<()> {
        self.record("background", Call::Background(color))
    }

    fn add_surface(&self, surface: &FakeSurface) -> Result<()> {
        self.record("add surface", Call::AddSurface(surface.0))
    }

    fn remove_surface(&self, surface: &FakeSurface) -> Result<()> {
        self.record("remove surface", Call::RemoveSurface(surface.0))
    }

    fn set_content_visible(&self, visible: bool) -> Result<()> {
        self.record("visibility", Call::ContentVisible(visible))
    }
}

/// Content engine holding script callbacks until the test answers them
pub struct FakeEngine {
    log: Recorder,
    history: Cell<bool>,
    pending: RefCell<VecDeque<ScriptCallback>>,
    fail: bool,
}

impl FakeEngine {
    pub fn new(log: &Recorder, history: bool) -> Self {
        Self {
            log: log.clone(),
            history: Cell::new(history),
            pending: RefCell::new(VecDeque::new()),
            fail: false,
        }
    }

    pub fn failing(log: &Recorder, history: bool) -> Self {
        Self {
            fail: true,
            ..Self::new(log, history)
        }
    }

    pub fn set_history(&self, history: bool) {
        self.history.set(history);
    }

    /// Answer the oldest outstanding script evaluation
    pub fn respond(&self, result: Option<String>) -> bool {
        let callback = self.pending.borrow_mut().pop_front();
        match callback {
            Some(callback) => {
                callback(result);
                true
            }
            None => false,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl ContentEngine for FakeEngine {
    fn evaluate_script(&self, _script: &str, callback: ScriptCallback) -> Result<()> {
        if self.fail {
            return Err(PlatformError::ScriptEval("engine gone".to_string()));
        }
        self.log.push(Call::EvaluateScript);
        self.pending.borrow_mut().push_back(callback);
        Ok(())
    }

    fn can_go_back(&self) -> Result<bool> {
        Ok(self.history.get())
    }

    fn go_back(&self) -> Result<()> {
        self.log.push(Call::GoBack);
        Ok(())
    }
}

/// Platform wiring the fakes together
pub struct TestPlatform;

impl Platform for TestPlatform {
    type Chrome = FakeChrome;
    type Container = FakeContainer;
    type Content = FakeEngine;

    fn name() -> &'static str {
        "test"
    }
}
