//! Markup contract between the server-rendered game page and the browser
//! client that drives it.

/// `<script type="application/json">` holding the page's game descriptor.
pub const DESCRIPTOR_ID: &str = "game-descriptor";
/// Element that goes fullscreen and is sized to the player dimensions.
pub const CONTAINER_ID: &str = "player-container";
/// Rendering surface handed to the engine.
pub const CANVAS_ID: &str = "unity-canvas";
pub const LOADING_ID: &str = "player-loading";
pub const LOADING_LABEL_ID: &str = "player-loading-label";
pub const PROGRESS_BAR_ID: &str = "player-progress-bar";
pub const ERROR_ID: &str = "player-error";
pub const ERROR_MESSAGE_ID: &str = "player-error-message";
pub const FULLSCREEN_BUTTON_ID: &str = "player-fullscreen";

/// Path of the wasm-bindgen JS shim inside the web root.
pub const CLIENT_MODULE: &str = "/pkg/arcade_client.js";

/// Route of the page that plays `id`.
pub fn game_href(id: &str) -> String {
    format!("/games/{id}")
}

pub fn loading_label(game_name: &str, progress: u8) -> String {
    format!("Loading {game_name}... {progress}%")
}

pub fn fullscreen_button_title(fullscreen: bool) -> &'static str {
    if fullscreen {
        "Exit Fullscreen"
    } else {
        "Fullscreen"
    }
}

/// Top margin nudging the canvas flush with its container.
pub fn canvas_margin_top(fullscreen: bool) -> i32 {
    if fullscreen { -8 } else { -2 }
}
