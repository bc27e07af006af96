use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::diag;

/// DOM event listener removed again when dropped.
pub struct EventListener {
    target: web_sys::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    pub fn new<F>(target: &web_sys::EventTarget, kind: &'static str, f: F) -> Self
    where
        F: 'static + FnMut(web_sys::Event),
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(f);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        {
            diag::console_warn!("Failed to add {kind} listener: {e:?}");
        }
        Self {
            target: target.clone(),
            kind,
            callback,
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            diag::console_warn!("Failed to remove {} listener: {e:?}", self.kind);
        }
    }
}
