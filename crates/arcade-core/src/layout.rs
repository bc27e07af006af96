/// Target aspect ratio of the embedded player outside fullscreen.
pub const ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Horizontal page padding around the player, in CSS pixels.
pub const HORIZONTAL_PADDING: f64 = 32.0;

/// Viewports narrower than this use the mobile chrome.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Viewports at least this wide use the desktop chrome.
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

/// Host viewport size in CSS pixels (`window.innerWidth/innerHeight`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Computed player surface size in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportDimensions {
    pub width: u32,
    pub height: u32,
}

/// Configured size bounds of one game. `max_height` only seeds the
/// initial dimensions; growth is capped through `max_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_width: 480,
            min_height: 270,
            max_width: 1280,
            max_height: 720,
        }
    }
}

impl SizeBounds {
    /// Dimensions shown before the first layout pass.
    pub fn initial_dimensions(&self) -> ViewportDimensions {
        ViewportDimensions {
            width: self.max_width,
            height: self.max_height,
        }
    }
}

/// Page chrome variant selected by viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        if width < MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width >= DESKTOP_MIN_WIDTH {
            Self::Desktop
        } else {
            Self::Tablet
        }
    }

    /// Vertical space taken by nav, logo banner, footer, player controls,
    /// page padding and a small buffer.
    pub fn chrome_height(self) -> f64 {
        match self {
            // 32 + 60 + 32 + 28 + 16 + 32
            Self::Mobile => 200.0,
            // 64 + 104 + 64 + 32 + 32 + 32
            Self::Tablet => 328.0,
            // 64 + 136 + 64 + 32 + 32 + 32
            Self::Desktop => 360.0,
        }
    }
}

/// Size the player surface for the given viewport.
///
/// Fullscreen fills the viewport exactly. Otherwise the surface is the
/// largest 16:9 box that fits beside the page chrome and under
/// `max_width`, then grown to the minimum bounds even if that overflows.
pub fn compute_dimensions(
    viewport: Viewport,
    fullscreen: bool,
    bounds: &SizeBounds,
) -> ViewportDimensions {
    if fullscreen {
        return ViewportDimensions {
            width: to_pixels(viewport.width),
            height: to_pixels(viewport.height),
        };
    }

    let chrome = Breakpoint::from_width(viewport.width).chrome_height();
    let available_width = viewport.width - HORIZONTAL_PADDING;
    let available_height = viewport.height - chrome;

    let mut width = available_width.min(f64::from(bounds.max_width));
    let mut height = width / ASPECT_RATIO;

    if height > available_height {
        height = available_height;
        width = height * ASPECT_RATIO;
    }

    width = width.max(f64::from(bounds.min_width));
    height = height.max(f64::from(bounds.min_height));

    ViewportDimensions {
        width: to_pixels(width),
        height: to_pixels(height),
    }
}

fn to_pixels(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        // Saturating float-to-int cast floors the value.
        v.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn bounds() -> SizeBounds {
        SizeBounds::default()
    }

    #[test]
    fn breakpoint_steps() {
        assert_eq!(Breakpoint::from_width(375.0), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(767.9), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(768.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Desktop);
        assert!(Breakpoint::Mobile.chrome_height() < Breakpoint::Tablet.chrome_height());
        assert!(Breakpoint::Tablet.chrome_height() < Breakpoint::Desktop.chrome_height());
    }

    #[test]
    fn full_hd_desktop_caps_at_max_width() {
        // available 1888 x 720, width capped at 1280 -> 1280x720 fits
        let dims = compute_dimensions(Viewport::new(1920.0, 1080.0), false, &bounds());
        assert_eq!(
            dims,
            ViewportDimensions {
                width: 1280,
                height: 720
            }
        );
    }

    #[test]
    fn tablet_example_fits_under_reserved_chrome() {
        // 1000x1080 tablet: available 968 x 752 -> 968 x 544.5
        let dims = compute_dimensions(Viewport::new(1000.0, 1080.0), false, &bounds());
        assert_eq!(
            dims,
            ViewportDimensions {
                width: 968,
                height: 544
            }
        );
    }

    #[test]
    fn short_viewport_is_height_limited() {
        // Desktop 1920x900: available height 540 -> width 960
        let dims = compute_dimensions(Viewport::new(1920.0, 900.0), false, &bounds());
        assert_eq!(
            dims,
            ViewportDimensions {
                width: 960,
                height: 540
            }
        );
    }

    #[test]
    fn tiny_viewport_clamps_to_minimum() {
        let dims = compute_dimensions(Viewport::new(320.0, 480.0), false, &bounds());
        assert_eq!(
            dims,
            ViewportDimensions {
                width: 480,
                height: 270
            }
        );
    }

    #[test]
    fn viewport_smaller_than_chrome_still_meets_minimum() {
        let dims = compute_dimensions(Viewport::new(1200.0, 100.0), false, &bounds());
        assert_eq!(dims.width, 480);
        assert_eq!(dims.height, 270);
    }

    #[test]
    fn fullscreen_fills_viewport_ignoring_bounds() {
        let dims = compute_dimensions(Viewport::new(2560.0, 1080.0), true, &bounds());
        assert_eq!(
            dims,
            ViewportDimensions {
                width: 2560,
                height: 1080
            }
        );
        let small = compute_dimensions(Viewport::new(300.5, 200.9), true, &bounds());
        assert_eq!(
            small,
            ViewportDimensions {
                width: 300,
                height: 200
            }
        );
    }

    #[test]
    fn initial_dimensions_are_max_bounds() {
        assert_eq!(
            bounds().initial_dimensions(),
            ViewportDimensions {
                width: 1280,
                height: 720
            }
        );
    }

    fn arb_bounds() -> impl Strategy<Value = SizeBounds> {
        (1u32..800, 1u32..800, 0u32..2000, 0u32..2000).prop_map(|(min_w, min_h, dw, dh)| {
            SizeBounds {
                min_width: min_w,
                min_height: min_h,
                max_width: min_w + dw,
                max_height: min_h + dh,
            }
        })
    }

    proptest! {
        #[test]
        fn non_fullscreen_respects_minimums(
            w in 0.0f64..5000.0,
            h in 0.0f64..5000.0,
            b in arb_bounds(),
        ) {
            let dims = compute_dimensions(Viewport::new(w, h), false, &b);
            prop_assert!(dims.width >= b.min_width);
            prop_assert!(dims.height >= b.min_height);
        }

        #[test]
        fn roomy_viewport_yields_max_width_box(
            max_w in 480u32..2000,
            extra_w in 0.0f64..2000.0,
            extra_h in 1.0f64..2000.0,
        ) {
            let b = SizeBounds { max_width: max_w, ..SizeBounds::default() };
            let width = f64::from(max_w) + HORIZONTAL_PADDING + extra_w;
            let chrome = Breakpoint::from_width(width).chrome_height();
            let height = f64::from(max_w) * 9.0 / 16.0 + chrome + extra_h;
            let dims = compute_dimensions(Viewport::new(width, height), false, &b);
            prop_assert_eq!(dims.width, max_w);
            prop_assert_eq!(dims.height, (f64::from(max_w) / ASPECT_RATIO).floor() as u32);
        }

        #[test]
        fn fullscreen_round_trip_restores_layout(
            w in 1.0f64..5000.0,
            h in 1.0f64..5000.0,
            b in arb_bounds(),
        ) {
            let before = compute_dimensions(Viewport::new(w, h), false, &b);
            let _full = compute_dimensions(Viewport::new(w, h), true, &b);
            let after = compute_dimensions(Viewport::new(w, h), false, &b);
            prop_assert_eq!(before, after);
        }
    }
}
