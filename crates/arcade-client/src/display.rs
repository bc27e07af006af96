use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Window};

use arcade_core::layout::Viewport;
use arcade_core::player::DisplayHost;

/// Browser window as seen by the player: viewport size and the
/// Fullscreen API on the player container.
pub struct BrowserDisplay {
    window: Window,
    document: Document,
    container: Element,
}

impl BrowserDisplay {
    pub fn new(window: Window, document: Document, container: Element) -> Self {
        Self {
            window,
            document,
            container,
        }
    }
}

impl DisplayHost for BrowserDisplay {
    fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(width, height)
    }

    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>> {
        let returned = call_method(&self.container, "requestFullscreen");
        settle(returned).boxed_local()
    }

    fn exit_fullscreen(&self) -> LocalBoxFuture<'static, Result<(), String>> {
        let returned = call_method(&self.document, "exitFullscreen");
        settle(returned).boxed_local()
    }
}

/// Call a zero-argument method by name, keeping whatever it returns.
fn call_method(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{name} is not supported")))?;
    method.call0(target)
}

/// Wait for a Fullscreen API result. Older engines return `undefined`
/// instead of a promise; that counts as success.
pub(crate) async fn settle(returned: Result<JsValue, JsValue>) -> Result<(), String> {
    let value = returned.map_err(|e| describe(&e))?;
    let Ok(promise) = value.dyn_into::<Promise>() else {
        return Ok(());
    };
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| describe(&e))
}

fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn rejected_request_reaches_caller() {
        let rejected = Promise::reject(&js_sys::Error::new("permission denied"));
        assert_eq!(
            settle(Ok(rejected.into())).await,
            Err("permission denied".to_string())
        );
    }

    #[wasm_bindgen_test]
    async fn thrown_call_reaches_caller() {
        let thrown = JsValue::from_str("not allowed");
        assert_eq!(settle(Err(thrown)).await, Err("not allowed".to_string()));
    }

    #[wasm_bindgen_test]
    async fn resolved_or_undefined_is_success() {
        let resolved = Promise::resolve(&JsValue::UNDEFINED);
        assert_eq!(settle(Ok(resolved.into())).await, Ok(()));
        assert_eq!(settle(Ok(JsValue::UNDEFINED)).await, Ok(()));
    }
}
