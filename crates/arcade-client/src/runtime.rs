use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlCanvasElement, HtmlScriptElement};

use arcade_core::engine::EngineConfig;
use arcade_core::player::{EngineRuntime, ProgressCallback};

use crate::diag;

/// Global defined by the engine's loader script.
const FACTORY_NAME: &str = "createUnityInstance";

type LoadSender = Rc<RefCell<Option<oneshot::Sender<Result<(), String>>>>>;

/// Engine runtime backed by the page: injects `<script>` tags into the body
/// and calls the global engine factory with the player canvas.
pub struct WebEngine {
    document: Document,
    canvas: HtmlCanvasElement,
}

impl WebEngine {
    pub fn new(document: Document, canvas: HtmlCanvasElement) -> Self {
        Self { document, canvas }
    }

    fn inject(&self, src: &str, tx: &LoadSender) -> Result<InjectedScript, JsValue> {
        let element: HtmlScriptElement = self.document.create_element("script")?.dyn_into()?;
        element.set_src(src);
        element.set_async(true);

        let ok_tx = Rc::clone(tx);
        let onload = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = ok_tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        });
        let err_tx = Rc::clone(tx);
        let failed_src = src.to_string();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = err_tx.borrow_mut().take() {
                let _ = tx.send(Err(format!("could not load {failed_src}")));
            }
        });
        element.set_onload(Some(onload.as_ref().unchecked_ref()));
        element.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&element)?;

        Ok(InjectedScript {
            element: Some(element),
            _onload: Some(onload),
            _onerror: Some(onerror),
        })
    }
}

/// An injected loader `<script>` and the handlers it calls back into.
pub struct InjectedScript {
    element: Option<HtmlScriptElement>,
    _onload: Option<Closure<dyn FnMut()>>,
    _onerror: Option<Closure<dyn FnMut()>>,
}

impl Drop for InjectedScript {
    fn drop(&mut self) {
        // Handlers must not fire into dropped closures.
        if let Some(element) = &self.element {
            element.set_onload(None);
            element.set_onerror(None);
        }
    }
}

impl EngineRuntime for WebEngine {
    type Script = InjectedScript;

    fn load_script(
        &self,
        src: &str,
    ) -> (InjectedScript, LocalBoxFuture<'static, Result<(), String>>) {
        let (tx, rx) = oneshot::channel();
        let tx: LoadSender = Rc::new(RefCell::new(Some(tx)));

        let script = match self.inject(src, &tx) {
            Ok(script) => script,
            Err(e) => {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(format!("could not inject {src}: {e:?}")));
                }
                InjectedScript {
                    element: None,
                    _onload: None,
                    _onerror: None,
                }
            },
        };

        let loaded = async move {
            rx.await
                .unwrap_or_else(|_| Err("loader script was removed".to_string()))
        };
        (script, loaded.boxed_local())
    }

    fn remove_script(&self, script: &InjectedScript) {
        let Some(element) = &script.element else {
            return;
        };
        if let Some(body) = self.document.body()
            && body.contains(Some(element.as_ref()))
            && let Err(e) = body.remove_child(element)
        {
            diag::console_warn!("Failed to remove loader script: {e:?}");
        }
    }

    fn create_instance(
        &self,
        config: &EngineConfig,
        mut on_progress: ProgressCallback,
    ) -> LocalBoxFuture<'static, Result<(), Option<String>>> {
        let canvas = self.canvas.clone();
        let config_json = config.to_json();
        async move {
            let factory = engine_factory().map_err(Some)?;
            let config_json = config_json.map_err(|e| Some(e.to_string()))?;
            let config = js_sys::JSON::parse(&config_json).map_err(|e| error_message(&e))?;

            let progress = Closure::<dyn FnMut(f64)>::new(move |p: f64| on_progress(p));
            let returned = factory.call3(
                &JsValue::NULL,
                &canvas,
                &config,
                progress.as_ref(),
            );
            // The engine keeps the callback for as long as it likes.
            progress.forget();

            let promise: Promise = returned
                .map_err(|e| error_message(&e))?
                .dyn_into()
                .map_err(|_| Some(format!("{FACTORY_NAME} did not return a promise")))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| error_message(&e))
        }
        .boxed_local()
    }
}

fn engine_factory() -> Result<Function, String> {
    let global = js_sys::global();
    Reflect::get(&global, &JsValue::from_str(FACTORY_NAME))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| format!("{FACTORY_NAME} is not defined"))
}

/// Message of a rejected promise: an `Error`'s message or a thrown string.
fn error_message(value: &JsValue) -> Option<String> {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return Some(String::from(err.message()));
    }
    value.as_string()
}
