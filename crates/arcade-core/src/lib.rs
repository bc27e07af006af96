pub mod catalog;
pub mod engine;
pub mod layout;
pub mod page;
pub mod player;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::{Cell, RefCell};

    use futures::channel::oneshot;
    use futures::future::{self, FutureExt, LocalBoxFuture};

    use crate::engine::EngineConfig;
    use crate::layout::Viewport;
    use crate::player::{DisplayHost, EngineRuntime, ProgressCallback};

    /// Engine runtime whose script load and factory call are resolved by
    /// the test, one step at a time.
    #[derive(Default)]
    pub struct ScriptedRuntime {
        injected: RefCell<Vec<String>>,
        removed: RefCell<Vec<String>>,
        instances: RefCell<Vec<EngineConfig>>,
        script_tx: RefCell<Option<oneshot::Sender<Result<(), String>>>>,
        init_tx: RefCell<Option<oneshot::Sender<Result<(), Option<String>>>>>,
        progress: RefCell<Option<ProgressCallback>>,
    }

    impl ScriptedRuntime {
        /// Script URLs injected so far, in order.
        pub fn injected(&self) -> Vec<String> {
            self.injected.borrow().clone()
        }

        /// Script URLs detached so far, in order.
        pub fn removed(&self) -> Vec<String> {
            self.removed.borrow().clone()
        }

        /// Configs passed to the engine factory, one per call.
        pub fn instances(&self) -> Vec<EngineConfig> {
            self.instances.borrow().clone()
        }

        pub fn finish_script(&self, result: Result<(), String>) {
            if let Some(tx) = self.script_tx.borrow_mut().take() {
                let _ = tx.send(result);
            }
        }

        pub fn report_progress(&self, progress: f64) {
            if let Some(cb) = self.progress.borrow_mut().as_mut() {
                cb(progress);
            }
        }

        pub fn finish_init(&self, result: Result<(), Option<String>>) {
            if let Some(tx) = self.init_tx.borrow_mut().take() {
                let _ = tx.send(result);
            }
        }
    }

    impl EngineRuntime for ScriptedRuntime {
        type Script = String;

        fn load_script(&self, src: &str) -> (String, LocalBoxFuture<'static, Result<(), String>>) {
            let (tx, rx) = oneshot::channel();
            *self.script_tx.borrow_mut() = Some(tx);
            self.injected.borrow_mut().push(src.to_string());
            let fut = async move {
                rx.await
                    .unwrap_or_else(|_| Err("script load abandoned".to_string()))
            };
            (src.to_string(), fut.boxed_local())
        }

        fn remove_script(&self, script: &String) {
            let attached = self.injected.borrow().contains(script)
                && !self.removed.borrow().contains(script);
            if attached {
                self.removed.borrow_mut().push(script.clone());
            }
        }

        fn create_instance(
            &self,
            config: &EngineConfig,
            on_progress: ProgressCallback,
        ) -> LocalBoxFuture<'static, Result<(), Option<String>>> {
            let (tx, rx) = oneshot::channel();
            *self.init_tx.borrow_mut() = Some(tx);
            *self.progress.borrow_mut() = Some(on_progress);
            self.instances.borrow_mut().push(config.clone());
            async move { rx.await.unwrap_or(Err(None)) }.boxed_local()
        }
    }

    /// Display host with a settable viewport. Fullscreen requests are only
    /// recorded; tests flip the state explicitly to mimic the browser.
    pub struct FakeDisplay {
        viewport: Cell<Viewport>,
        fullscreen: Cell<bool>,
        requests: RefCell<Vec<&'static str>>,
    }

    impl FakeDisplay {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                viewport: Cell::new(Viewport::new(width, height)),
                fullscreen: Cell::new(false),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn set_viewport(&self, width: f64, height: f64) {
            self.viewport.set(Viewport::new(width, height));
        }

        pub fn set_fullscreen(&self, fullscreen: bool) {
            self.fullscreen.set(fullscreen);
        }

        /// `"request"` / `"exit"` for each fullscreen call, in order.
        pub fn requests(&self) -> Vec<&'static str> {
            self.requests.borrow().clone()
        }
    }

    impl DisplayHost for FakeDisplay {
        fn viewport(&self) -> Viewport {
            self.viewport.get()
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }

        fn request_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>> {
            self.requests.borrow_mut().push("request");
            future::ready(Ok(())).boxed_local()
        }

        fn exit_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>> {
            self.requests.borrow_mut().push("exit");
            future::ready(Ok(())).boxed_local()
        }
    }
}
