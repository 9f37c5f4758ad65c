//! Display backends and the frame loop
//!
//! This module contains:
//! - The `DisplayBackend` contract implemented by each front end
//! - `BackendGuard`, which pairs startup with exactly one shutdown
//! - The frame loop (`step` / `run`)
//! - The front end this binary was built with

#[cfg(feature = "graphics")]
pub mod graphics;
#[cfg(feature = "terminal")]
pub mod terminal;

use crate::app::App;
use crate::error::FrameError;
use crate::types::{RunState, StopReason};
use anyhow::Result;
use std::ops::{Deref, DerefMut};
use tracing::{info, warn};

/// The two front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    #[cfg_attr(not(feature = "terminal"), allow(dead_code))]
    Terminal,
    #[cfg_attr(not(feature = "graphics"), allow(dead_code))]
    Graphics,
}

impl BackendKind {
    /// The front end compiled into this binary
    #[cfg(feature = "terminal")]
    pub const BUILT: BackendKind = BackendKind::Terminal;
    /// The front end compiled into this binary
    #[cfg(all(feature = "graphics", not(feature = "terminal")))]
    pub const BUILT: BackendKind = BackendKind::Graphics;

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Terminal => "terminal",
            BackendKind::Graphics => "graphics",
        }
    }
}

/// A front end that can drive one frame at a time
pub trait DisplayBackend {
    /// Whatever the backend needs to acquire its display
    type Options;

    /// Acquire the window or terminal screen
    fn startup(options: Self::Options) -> Result<Self>
    where
        Self: Sized;

    fn name(&self) -> &'static str;

    /// Pump pending input into the app. Returns true when the window (or
    /// terminal) asked to close.
    fn poll_events(&mut self, app: &mut App) -> Result<bool, FrameError>;

    /// Per-frame preparation before composition
    fn new_frame(&mut self, app: &mut App) -> Result<(), FrameError>;

    /// Declare the panels for this frame and present them
    fn render(&mut self, app: &mut App) -> Result<(), FrameError>;

    /// Release the display. Must be safe to call more than once.
    fn shutdown(&mut self) -> Result<()>;
}

/// Owns a started backend and shuts it down exactly once, on whichever
/// path leaves first
pub struct BackendGuard<B: DisplayBackend> {
    backend: B,
    released: bool,
}

impl<B: DisplayBackend> BackendGuard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            released: false,
        }
    }

    /// Shut down now and report the result
    pub fn shutdown(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        info!(backend = self.backend.name(), "shutting down display");
        self.backend.shutdown()
    }
}

impl<B: DisplayBackend> Deref for BackendGuard<B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.backend
    }
}

impl<B: DisplayBackend> DerefMut for BackendGuard<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: DisplayBackend> Drop for BackendGuard<B> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("display shutdown failed: {:#}", e);
        }
    }
}

/// Run one iteration: poll, begin frame, compose and render.
///
/// A close request stops the loop before anything is rendered. A navigation
/// panel that fails to begin stops the loop; any other frame error is
/// returned to the caller.
pub fn step<B: DisplayBackend + ?Sized>(backend: &mut B, app: &mut App) -> Result<RunState> {
    if !app.is_running() {
        return Ok(app.run_state());
    }

    if backend.poll_events(app)? {
        app.stop(StopReason::CloseRequested);
    }
    if !app.is_running() {
        return Ok(app.run_state());
    }

    backend.new_frame(app)?;

    match backend.render(app) {
        Ok(()) => app.count_frame(),
        Err(err) if !err.is_fatal() => {
            warn!("{}", err);
            app.stop(StopReason::PanelClosed);
        }
        Err(err) => {
            let frame = app.frames() + 1;
            return Err(anyhow::Error::new(err).context(format!("Frame {} failed", frame)));
        }
    }

    Ok(app.run_state())
}

/// Drive `backend` until the app stops. The backend is shut down on every
/// exit path, including errors.
pub fn run<B: DisplayBackend>(backend: B, app: &mut App) -> Result<()> {
    let mut guard = BackendGuard::new(backend);
    info!(backend = guard.name(), "frame loop started");

    while app.is_running() {
        step(&mut *guard, app)?;
    }

    guard.shutdown()
}

/// Start the front end this binary was built with and run the app on it
pub fn launch(app: App) -> Result<()> {
    info!(backend = BackendKind::BUILT.as_str(), "launching");
    launch_built(app)
}

#[cfg(feature = "terminal")]
fn launch_built(mut app: App) -> Result<()> {
    let backend = terminal::TerminalBackend::startup(app.config.clone())?;
    run(backend, &mut app)
}

#[cfg(all(feature = "graphics", not(feature = "terminal")))]
fn launch_built(app: App) -> Result<()> {
    graphics::run(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{MenuItem, Panel};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Counters {
        polls: u32,
        frames_begun: u32,
        renders: u32,
        shutdowns: u32,
    }

    /// Scripted backend: close requests and panel failures are keyed by the
    /// poll/render number they happen on
    struct MockBackend {
        close_on_poll: Option<u32>,
        quit_on_render: Option<u32>,
        failures: VecDeque<Option<Panel>>,
        counters: Rc<RefCell<Counters>>,
    }

    impl MockBackend {
        fn new(counters: &Rc<RefCell<Counters>>) -> Self {
            Self {
                close_on_poll: None,
                quit_on_render: None,
                failures: VecDeque::new(),
                counters: Rc::clone(counters),
            }
        }
    }

    impl DisplayBackend for MockBackend {
        type Options = Rc<RefCell<Counters>>;

        fn startup(counters: Self::Options) -> Result<Self> {
            Ok(Self::new(&counters))
        }

        fn name(&self) -> &'static str {
            "mock"
        }

        fn poll_events(&mut self, _app: &mut App) -> Result<bool, FrameError> {
            let mut counters = self.counters.borrow_mut();
            counters.polls += 1;
            Ok(self.close_on_poll == Some(counters.polls))
        }

        fn new_frame(&mut self, _app: &mut App) -> Result<(), FrameError> {
            self.counters.borrow_mut().frames_begun += 1;
            Ok(())
        }

        fn render(&mut self, app: &mut App) -> Result<(), FrameError> {
            if let Some(Some(panel)) = self.failures.pop_front() {
                return Err(FrameError::PanelBegin(panel));
            }
            let renders = {
                let mut counters = self.counters.borrow_mut();
                counters.renders += 1;
                counters.renders
            };
            if self.quit_on_render == Some(renders) {
                app.activate_menu(MenuItem::Quit);
            }
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.counters.borrow_mut().shutdowns += 1;
            Ok(())
        }
    }

    fn setup() -> (App, Rc<RefCell<Counters>>) {
        (App::new(Config::default()), Rc::new(RefCell::new(Counters::default())))
    }

    #[test]
    fn test_close_event_stops_without_rendering() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::startup(Rc::clone(&counters)).unwrap();
        backend.close_on_poll = Some(4);

        run(backend, &mut app).unwrap();

        let counters = counters.borrow();
        assert_eq!(counters.polls, 4);
        assert_eq!(counters.renders, 3);
        assert_eq!(counters.frames_begun, 3);
        assert_eq!(counters.shutdowns, 1);
        assert_eq!(app.run_state(), RunState::Stopped(StopReason::CloseRequested));
        assert_eq!(app.frames(), 3);
    }

    #[test]
    fn test_quit_action_ends_loop() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::new(&counters);
        backend.quit_on_render = Some(2);

        run(backend, &mut app).unwrap();

        let counters = counters.borrow();
        assert_eq!(counters.renders, 2);
        assert_eq!(counters.polls, 2);
        assert_eq!(counters.shutdowns, 1);
        assert_eq!(app.run_state(), RunState::Stopped(StopReason::QuitAction));
    }

    #[test]
    fn test_step_after_stop_does_nothing() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::new(&counters);
        app.stop(StopReason::QuitAction);

        let state = step(&mut backend, &mut app).unwrap();
        assert_eq!(state, RunState::Stopped(StopReason::QuitAction));
        assert_eq!(counters.borrow().polls, 0);
        assert_eq!(counters.borrow().renders, 0);
    }

    #[test]
    fn test_navigation_failure_is_clean_stop() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::new(&counters);
        backend.failures = VecDeque::from([None, Some(Panel::Navigation)]);

        run(backend, &mut app).unwrap();

        assert_eq!(app.run_state(), RunState::Stopped(StopReason::PanelClosed));
        assert_eq!(app.frames(), 1);
        assert_eq!(counters.borrow().shutdowns, 1);
    }

    #[test]
    fn test_timeline_failure_is_fatal_but_shuts_down() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::new(&counters);
        backend.failures = VecDeque::from([None, None, Some(Panel::Timeline)]);

        let err = run(backend, &mut app).unwrap_err();

        assert!(format!("{:#}", err).contains("Timeline panel could not begin"));
        assert!(app.is_running());
        assert_eq!(counters.borrow().shutdowns, 1);
    }

    #[test]
    fn test_login_failure_is_fatal() {
        let (mut app, counters) = setup();
        let mut backend = MockBackend::new(&counters);
        backend.failures = VecDeque::from([Some(Panel::Login)]);

        let err = step(&mut backend, &mut app).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FrameError>(),
            Some(FrameError::PanelBegin(Panel::Login))
        ));
    }

    #[test]
    fn test_guard_shuts_down_once() {
        let counters = Rc::new(RefCell::new(Counters::default()));

        {
            let _guard = BackendGuard::new(MockBackend::new(&counters));
        }
        assert_eq!(counters.borrow().shutdowns, 1);

        let guard = BackendGuard::new(MockBackend::new(&counters));
        guard.shutdown().unwrap();
        assert_eq!(counters.borrow().shutdowns, 2);
    }

    #[test]
    fn test_built_backend_is_compiled_in() {
        let compiled = match BackendKind::BUILT {
            BackendKind::Terminal => cfg!(feature = "terminal"),
            BackendKind::Graphics => cfg!(feature = "graphics"),
        };
        assert!(compiled);

        // Terminal wins when both front ends are compiled in
        if cfg!(feature = "terminal") {
            assert_eq!(BackendKind::BUILT, BackendKind::Terminal);
        } else {
            assert_eq!(BackendKind::BUILT, BackendKind::Graphics);
        }
    }
}
