use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use arcade_core::catalog::GameDescriptor;
use arcade_core::page;
use arcade_core::player::PlayerController;

use crate::diag;
use crate::display::BrowserDisplay;
use crate::listener::EventListener;
use crate::runtime::WebEngine;
use crate::view::PlayerView;
use crate::view_model::ViewModel;

type Controller = PlayerController<WebEngine, BrowserDisplay>;

/// A player mounted into the current page, together with the DOM listeners
/// that drive it.
pub struct MountedPlayer {
    controller: Rc<Controller>,
    _listeners: Vec<EventListener>,
}

impl MountedPlayer {
    pub fn unmount(self) {
        self.controller.unmount();
        diag::console_log!("Unmounted {}", self.controller.game().id);
    }
}

fn read_descriptor(document: &web_sys::Document) -> Result<Option<GameDescriptor>, JsValue> {
    let Some(element) = document.get_element_by_id(page::DESCRIPTOR_ID) else {
        return Ok(None);
    };
    let json = element.text_content().unwrap_or_default();
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("invalid game descriptor: {e}")))
}

/// Mount the player described by the page's descriptor block. Pages
/// without one (the catalog, error pages) yield `None`.
pub fn mount_from_document() -> Result<Option<MountedPlayer>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let Some(game) = read_descriptor(&document)? else {
        return Ok(None);
    };

    let view = PlayerView::from_document(&document)?;
    let runtime = Rc::new(WebEngine::new(document.clone(), view.canvas().clone()));
    let display = Rc::new(BrowserDisplay::new(
        window.clone(),
        document.clone(),
        view.container().clone().into(),
    ));

    let name = game.name.clone();
    let (controller, lifecycle) = PlayerController::mount(runtime, display, game);
    let controller = Rc::new(controller);

    view.render(&ViewModel::new(&name, &controller.snapshot()));
    let button = view.button().clone();
    controller.subscribe(move |snapshot| view.render(&ViewModel::new(&name, snapshot)));

    diag::console_log!("Mounting {}", controller.game().id);
    spawn_local(lifecycle);

    let weak: Weak<Controller> = Rc::downgrade(&controller);
    let on_resize = {
        let weak = Weak::clone(&weak);
        EventListener::new(&window, "resize", move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.on_resize();
            }
        })
    };
    let on_fullscreen = {
        let weak = Weak::clone(&weak);
        let doc = document.clone();
        EventListener::new(&document, "fullscreenchange", move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.on_fullscreen_change(doc.fullscreen_element().is_some());
            }
        })
    };
    let on_click = EventListener::new(&button, "click", move |_| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        let toggle = controller.toggle_fullscreen();
        spawn_local(async move {
            if let Err(e) = toggle.await {
                diag::console_warn!("Fullscreen toggle failed: {e}");
            }
        });
    });

    Ok(Some(MountedPlayer {
        controller,
        _listeners: vec![on_resize, on_fullscreen, on_click],
    }))
}
