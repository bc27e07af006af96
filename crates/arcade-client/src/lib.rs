mod diag;
pub mod view_model;

#[cfg(target_family = "wasm")]
mod display;
#[cfg(target_family = "wasm")]
mod listener;
#[cfg(target_family = "wasm")]
mod mount;
#[cfg(target_family = "wasm")]
mod runtime;
#[cfg(target_family = "wasm")]
mod view;

use wasm_bindgen::prelude::*;

#[cfg(target_family = "wasm")]
thread_local! {
    static PLAYER: std::cell::RefCell<Option<mount::MountedPlayer>> =
        const { std::cell::RefCell::new(None) };
    static PAGEHIDE: std::cell::RefCell<Option<listener::EventListener>> =
        const { std::cell::RefCell::new(None) };
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();

        if let Err(e) = mount_player() {
            diag::console_warn!("Failed to mount player: {e:?}");
        }

        if let Some(window) = web_sys::window() {
            let listener = listener::EventListener::new(&window, "pagehide", |event| {
                // A page kept in the back/forward cache comes back with the
                // player still running, so it stays mounted.
                if !leaves_for_good(&event) {
                    return;
                }
                if let Err(e) = unmount_player() {
                    diag::console_warn!("Failed to unmount player: {e:?}");
                }
            });
            PAGEHIDE.with(|slot| *slot.borrow_mut() = Some(listener));
        }
    }
}

/// Whether a `pagehide` event discards the page rather than caching it.
#[cfg(target_family = "wasm")]
fn leaves_for_good(event: &web_sys::Event) -> bool {
    use wasm_bindgen::JsCast;

    event
        .dyn_ref::<web_sys::PageTransitionEvent>()
        .is_none_or(|e| !e.persisted())
}

/// Mount the player for the current page, replacing any mounted one.
#[cfg(target_family = "wasm")]
#[wasm_bindgen(js_name = mountPlayer)]
pub fn mount_player() -> Result<(), JsValue> {
    unmount_player()?;
    let mounted = mount::mount_from_document()?;
    PLAYER.with(|slot| *slot.borrow_mut() = mounted);
    Ok(())
}

/// Tear down the mounted player, if any.
#[cfg(target_family = "wasm")]
#[wasm_bindgen(js_name = unmountPlayer)]
pub fn unmount_player() -> Result<(), JsValue> {
    if let Some(player) = PLAYER.with(|slot| slot.borrow_mut().take()) {
        player.unmount();
    }
    Ok(())
}

#[cfg(not(target_family = "wasm"))]
#[wasm_bindgen(js_name = mountPlayer)]
pub fn mount_player() -> Result<(), JsValue> {
    Ok(())
}

#[cfg(not(target_family = "wasm"))]
#[wasm_bindgen(js_name = unmountPlayer)]
pub fn unmount_player() -> Result<(), JsValue> {
    Ok(())
}
