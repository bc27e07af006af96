//! Lifecycle of one embedded game player.
//!
//! A mount walks `Idle -> Loading(progress) -> Ready | Failed(reason)` once:
//! inject the engine's bootstrap script, then call the engine factory with
//! the canvas config and a progress callback. Browser specifics sit behind
//! [`EngineRuntime`] and [`DisplayHost`] so the same controller runs against
//! test doubles.
//!
//! Everything is single-threaded; shared per-mount state lives in
//! `Rc<RefCell<..>>`. Unmounting clears a liveness flag that every async
//! continuation checks before touching state, since the engine factory
//! itself cannot be cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::catalog::GameDescriptor;
use crate::engine::{EngineConfig, loader_url, progress_percent};
use crate::layout::{SizeBounds, Viewport, ViewportDimensions, compute_dimensions};

/// Shown when the engine factory rejects without a usable message.
pub const INIT_FAILED_FALLBACK: &str = "Failed to load game";

/// Terminal player failures, rendered in place of the game surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("Failed to load loader")]
    ScriptLoad,
    #[error("{0}")]
    Initialization(String),
}

impl PlayerError {
    pub fn initialization(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => Self::Initialization(m),
            _ => Self::Initialization(INIT_FAILED_FALLBACK.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        progress: u8,
    },
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }

    /// Whether the loading overlay covers the surface.
    pub fn shows_loading(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading { .. })
    }

    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Loading { progress } => *progress,
            Self::Ready => 100,
            Self::Failed(_) => 0,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(m) => Some(m),
            _ => None,
        }
    }
}

/// Everything the view needs to render the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub load: LoadState,
    pub dimensions: ViewportDimensions,
    pub fullscreen: bool,
}

/// Receives fractional progress in `[0, 1]` from the engine factory.
pub type ProgressCallback = Box<dyn FnMut(f64)>;

/// Loads the engine's bootstrap script and calls its factory.
pub trait EngineRuntime {
    /// Handle to an injected script resource.
    type Script;

    /// Inject the script at `src`. The future resolves once it has loaded
    /// or failed; the error carries a diagnostic detail.
    fn load_script(
        &self,
        src: &str,
    ) -> (Self::Script, LocalBoxFuture<'static, Result<(), String>>);

    /// Detach the script if it is still attached to the document.
    fn remove_script(&self, script: &Self::Script);

    /// Call the engine factory. A rejection may carry a message.
    fn create_instance(
        &self,
        config: &EngineConfig,
        on_progress: ProgressCallback,
    ) -> LocalBoxFuture<'static, Result<(), Option<String>>>;
}

/// Viewport and fullscreen access of the page hosting the player.
pub trait DisplayHost {
    fn viewport(&self) -> Viewport;

    fn is_fullscreen(&self) -> bool;

    /// Ask for fullscreen on the player container. Completion does not imply
    /// the switch happened; that arrives as a fullscreen-change notification.
    fn request_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>>;

    fn exit_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>>;
}

type Observer = Box<dyn FnMut(&PlayerSnapshot)>;

struct Inner<S> {
    alive: bool,
    load: LoadState,
    dimensions: ViewportDimensions,
    fullscreen: bool,
    script: Option<S>,
    observers: Vec<Observer>,
    notifying: bool,
    pending: bool,
}

impl<S> Inner<S> {
    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            load: self.load.clone(),
            dimensions: self.dimensions,
            fullscreen: self.fullscreen,
        }
    }
}

type Shared<S> = Rc<RefCell<Inner<S>>>;

/// Apply `f` to a live mount and notify observers when it reports a change.
///
/// Changes made from inside an observer are folded into another round of
/// notifications carrying the latest snapshot.
fn update<S>(inner: &Shared<S>, f: impl FnOnce(&mut Inner<S>) -> bool) {
    {
        let mut st = inner.borrow_mut();
        if !st.alive || !f(&mut st) {
            return;
        }
        if st.notifying {
            st.pending = true;
            return;
        }
        st.notifying = true;
    }

    loop {
        let (snapshot, mut observers) = {
            let mut st = inner.borrow_mut();
            st.pending = false;
            (st.snapshot(), std::mem::take(&mut st.observers))
        };

        for observer in &mut observers {
            observer(&snapshot);
        }

        let mut st = inner.borrow_mut();
        if !st.alive {
            return;
        }
        // Keep any observers registered while notifying.
        observers.append(&mut st.observers);
        st.observers = observers;
        if !st.pending {
            st.notifying = false;
            return;
        }
    }
}

fn transition<S>(inner: &Shared<S>, next: LoadState) {
    update(inner, |st| {
        if st.load.is_terminal() || st.load == next {
            return false;
        }
        tracing::debug!(from = ?st.load, to = ?next, "player state transition");
        st.load = next;
        true
    });
}

fn is_alive<S>(inner: &Shared<S>) -> bool {
    inner.borrow().alive
}

/// Controller for one mounted player.
///
/// Dropping the controller unmounts it.
pub struct PlayerController<R: EngineRuntime, D: DisplayHost> {
    runtime: Rc<R>,
    display: Rc<D>,
    game: GameDescriptor,
    bounds: SizeBounds,
    inner: Shared<R::Script>,
}

impl<R, D> PlayerController<R, D>
where
    R: EngineRuntime + 'static,
    R::Script: 'static,
    D: DisplayHost + 'static,
{
    /// Mount a player for `game`.
    ///
    /// Returns the controller and the lifecycle future, which the caller
    /// spawns on its local executor. The engine factory is called at most
    /// once, and only after the bootstrap script has loaded.
    pub fn mount(
        runtime: Rc<R>,
        display: Rc<D>,
        game: GameDescriptor,
    ) -> (Self, LocalBoxFuture<'static, ()>) {
        let bounds = game.bounds();
        let fullscreen = display.is_fullscreen();
        let dimensions = compute_dimensions(display.viewport(), fullscreen, &bounds);
        let inner = Rc::new(RefCell::new(Inner {
            alive: true,
            load: LoadState::Idle,
            dimensions,
            fullscreen,
            script: None,
            observers: Vec::new(),
            notifying: false,
            pending: false,
        }));

        tracing::debug!(game = %game.id, ?dimensions, "player mounted");

        let lifecycle = run_lifecycle(Rc::clone(&runtime), Rc::clone(&inner), game.clone());
        let controller = Self {
            runtime,
            display,
            game,
            bounds,
            inner,
        };
        (controller, lifecycle.boxed_local())
    }

    pub fn game(&self) -> &GameDescriptor {
        &self.game
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.borrow().load.clone()
    }

    pub fn dimensions(&self) -> ViewportDimensions {
        self.inner.borrow().dimensions
    }

    pub fn is_fullscreen(&self) -> bool {
        self.inner.borrow().fullscreen
    }

    pub fn is_mounted(&self) -> bool {
        is_alive(&self.inner)
    }

    /// Register a callback run after every state, size or fullscreen change.
    pub fn subscribe(&self, observer: impl FnMut(&PlayerSnapshot) + 'static) {
        let mut st = self.inner.borrow_mut();
        if st.alive {
            st.observers.push(Box::new(observer));
        }
    }

    /// Host viewport was resized.
    pub fn on_resize(&self) {
        let viewport = self.display.viewport();
        let bounds = self.bounds;
        update(&self.inner, |st| {
            let next = compute_dimensions(viewport, st.fullscreen, &bounds);
            if next == st.dimensions {
                return false;
            }
            st.dimensions = next;
            true
        });
    }

    /// Host reported a fullscreen change.
    pub fn on_fullscreen_change(&self, fullscreen: bool) {
        let viewport = self.display.viewport();
        let bounds = self.bounds;
        update(&self.inner, |st| {
            let next = compute_dimensions(viewport, fullscreen, &bounds);
            if fullscreen == st.fullscreen && next == st.dimensions {
                return false;
            }
            st.fullscreen = fullscreen;
            st.dimensions = next;
            true
        });
    }

    /// Enter fullscreen if the host is windowed, otherwise leave it.
    pub fn toggle_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>> {
        if !self.is_mounted() {
            return future::ready(Ok(())).boxed_local();
        }
        if self.display.is_fullscreen() {
            self.display.exit_fullscreen()
        } else {
            self.display.request_fullscreen()
        }
    }

    /// Tear the mount down: later async results are ignored and the
    /// bootstrap script is detached if it is still in the document.
    pub fn unmount(&self) {
        let script = {
            let mut st = self.inner.borrow_mut();
            if !st.alive {
                return;
            }
            st.alive = false;
            st.observers.clear();
            st.script.take()
        };
        if let Some(script) = script {
            self.runtime.remove_script(&script);
        }
        tracing::debug!(game = %self.game.id, "player unmounted");
    }
}

impl<R: EngineRuntime, D: DisplayHost> Drop for PlayerController<R, D> {
    fn drop(&mut self) {
        let script = {
            let mut st = self.inner.borrow_mut();
            st.alive = false;
            st.observers.clear();
            st.script.take()
        };
        if let Some(script) = script {
            self.runtime.remove_script(&script);
        }
    }
}

async fn run_lifecycle<R>(runtime: Rc<R>, inner: Shared<R::Script>, game: GameDescriptor)
where
    R: EngineRuntime + 'static,
    R::Script: 'static,
{
    if !is_alive(&inner) {
        return;
    }

    let (script, loaded) = runtime.load_script(&loader_url(&game.path));
    inner.borrow_mut().script = Some(script);
    transition(&inner, LoadState::Loading { progress: 0 });

    if let Err(detail) = loaded.await {
        if is_alive(&inner) {
            tracing::warn!(game = %game.id, %detail, "engine loader failed to load");
        }
        transition(&inner, LoadState::Failed(PlayerError::ScriptLoad.to_string()));
        return;
    }

    if !is_alive(&inner) {
        return;
    }

    let progress_inner = Rc::clone(&inner);
    let on_progress: ProgressCallback = Box::new(move |p: f64| {
        let progress = progress_percent(p);
        update(&progress_inner, |st| {
            if !matches!(st.load, LoadState::Loading { .. }) {
                return false;
            }
            st.load = LoadState::Loading { progress };
            true
        });
    });

    let config = EngineConfig::for_game(&game);
    match runtime.create_instance(&config, on_progress).await {
        Ok(()) => {
            if is_alive(&inner) {
                tracing::info!(game = %game.id, "engine ready");
            }
            transition(&inner, LoadState::Ready);
        },
        Err(message) => {
            let err = PlayerError::initialization(message);
            if is_alive(&inner) {
                tracing::warn!(game = %game.id, error = %err, "engine initialization failed");
            }
            transition(&inner, LoadState::Failed(err.to_string()));
        },
    }
}
