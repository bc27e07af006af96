use arcade_core::page;
use arcade_core::player::PlayerSnapshot;

/// Size applied to the player container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSize {
    /// Fill the screen while fullscreen.
    Viewport,
    Pixels { width: u32, height: u32 },
}

impl ContainerSize {
    pub fn css(self) -> (String, String) {
        match self {
            Self::Viewport => ("100vw".to_string(), "100vh".to_string()),
            Self::Pixels { width, height } => (format!("{width}px"), format!("{height}px")),
        }
    }
}

/// Everything the DOM view writes for one player snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub loading_visible: bool,
    pub loading_label: String,
    pub progress_width: String,
    pub error: Option<String>,
    pub container: ContainerSize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub canvas_margin_top: i32,
    pub fullscreen: bool,
    pub button_title: &'static str,
}

impl ViewModel {
    pub fn new(game_name: &str, snapshot: &PlayerSnapshot) -> Self {
        let progress = snapshot.load.progress();
        let dims = snapshot.dimensions;
        let container = if snapshot.fullscreen {
            ContainerSize::Viewport
        } else {
            ContainerSize::Pixels {
                width: dims.width,
                height: dims.height,
            }
        };
        Self {
            loading_visible: snapshot.load.shows_loading(),
            loading_label: page::loading_label(game_name, progress),
            progress_width: format!("{progress}%"),
            error: snapshot.load.error_message().map(str::to_string),
            container,
            canvas_width: dims.width,
            canvas_height: dims.height,
            canvas_margin_top: page::canvas_margin_top(snapshot.fullscreen),
            fullscreen: snapshot.fullscreen,
            button_title: page::fullscreen_button_title(snapshot.fullscreen),
        }
    }
}

#[cfg(test)]
mod tests {
    use arcade_core::layout::ViewportDimensions;
    use arcade_core::player::LoadState;

    use super::*;

    fn snapshot(load: LoadState, fullscreen: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            load,
            dimensions: ViewportDimensions {
                width: 960,
                height: 540,
            },
            fullscreen,
        }
    }

    #[test]
    fn loading_shows_progress() {
        let vm = ViewModel::new("Essentials", &snapshot(LoadState::Loading { progress: 37 }, false));
        assert!(vm.loading_visible);
        assert_eq!(vm.loading_label, "Loading Essentials... 37%");
        assert_eq!(vm.progress_width, "37%");
        assert!(vm.error.is_none());
        assert_eq!(
            vm.container,
            ContainerSize::Pixels {
                width: 960,
                height: 540
            }
        );
        assert_eq!(vm.canvas_margin_top, -2);
    }

    #[test]
    fn failure_hides_loading_and_shows_message() {
        let vm = ViewModel::new(
            "Essentials",
            &snapshot(LoadState::Failed("Failed to load loader".to_string()), false),
        );
        assert!(!vm.loading_visible);
        assert_eq!(vm.error.as_deref(), Some("Failed to load loader"));
    }

    #[test]
    fn ready_hides_both_overlays() {
        let vm = ViewModel::new("Essentials", &snapshot(LoadState::Ready, false));
        assert!(!vm.loading_visible);
        assert!(vm.error.is_none());
    }

    #[test]
    fn fullscreen_fills_screen() {
        let vm = ViewModel::new("Essentials", &snapshot(LoadState::Ready, true));
        assert_eq!(vm.container, ContainerSize::Viewport);
        assert_eq!(
            vm.container.css(),
            ("100vw".to_string(), "100vh".to_string())
        );
        assert_eq!(vm.canvas_margin_top, -8);
        assert_eq!(vm.button_title, "Exit Fullscreen");
    }
}
