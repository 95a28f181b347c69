//! Screen orientation detection.
//!
//! Hosts may expose a platform orientation signal (a type string such as
//! `"landscape-primary"` plus an angle). When they do not, orientation falls
//! back to comparing viewport width and height.

use motionflow_model::ScreenOrientationInfo;
use serde::{Deserialize, Serialize};

/// Platform orientation descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOrientation {
    /// Orientation type string (e.g. `"portrait-primary"`).
    #[serde(rename = "type")]
    pub orientation_type: String,
    /// Rotation angle in degrees.
    pub angle: f64,
}

impl ScreenOrientation {
    pub fn new(orientation_type: impl Into<String>, angle: f64) -> Self {
        Self {
            orientation_type: orientation_type.into(),
            angle,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation_type.contains("landscape")
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fallback heuristic used when no orientation signal exists.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// Host screen descriptor.
pub trait ScreenDescriptor {
    /// Current platform orientation, `None` if the platform API is absent.
    fn orientation(&self) -> Option<ScreenOrientation>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;
}

/// In-memory screen descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticScreen {
    orientation: Option<ScreenOrientation>,
    viewport: Viewport,
}

impl StaticScreen {
    /// A screen that reports a platform orientation.
    pub fn with_orientation(orientation: ScreenOrientation, viewport: Viewport) -> Self {
        Self {
            orientation: Some(orientation),
            viewport,
        }
    }

    /// A screen without an orientation API; only the viewport is known.
    pub fn viewport_only(viewport: Viewport) -> Self {
        Self {
            orientation: None,
            viewport,
        }
    }

    pub fn portrait() -> Self {
        Self::with_orientation(
            ScreenOrientation::new("portrait-primary", 0.0),
            Viewport::new(390, 844),
        )
    }

    pub fn landscape() -> Self {
        Self::with_orientation(
            ScreenOrientation::new("landscape-primary", 90.0),
            Viewport::new(844, 390),
        )
    }

    /// Change the reported orientation. Hosts follow up with a screen-change event.
    pub fn set_orientation(&mut self, orientation: Option<ScreenOrientation>) {
        self.orientation = orientation;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl ScreenDescriptor for StaticScreen {
    fn orientation(&self) -> Option<ScreenOrientation> {
        self.orientation.clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Resolves landscape/portrait state from a screen descriptor.
///
/// The platform orientation is cached and only re-read on [`refresh`]
/// (driven by screen-change events). The viewport fallback is read live.
///
/// [`refresh`]: OrientationResolver::refresh
#[derive(Debug)]
pub struct OrientationResolver<D> {
    screen: D,
    cached: Option<ScreenOrientation>,
}

impl<D: ScreenDescriptor> OrientationResolver<D> {
    pub fn new(screen: D) -> Self {
        let cached = screen.orientation();
        Self { screen, cached }
    }

    /// Re-read the platform orientation descriptor.
    pub fn refresh(&mut self) {
        self.cached = self.screen.orientation();
        tracing::debug!(
            orientation = ?self.cached.as_ref().map(|o| o.orientation_type.as_str()),
            "Screen orientation refreshed"
        );
    }

    /// Whether the screen is currently landscape.
    pub fn is_landscape(&self) -> bool {
        match &self.cached {
            Some(orientation) => orientation.is_landscape(),
            None => self.screen.viewport().is_landscape(),
        }
    }

    pub fn is_portrait(&self) -> bool {
        !self.is_landscape()
    }

    /// Compose the current orientation info.
    ///
    /// Without a platform signal the type string is derived from the
    /// viewport heuristic and the angle is 0.
    pub fn orientation_info(&self) -> ScreenOrientationInfo {
        let landscape = self.is_landscape();
        match &self.cached {
            Some(orientation) => ScreenOrientationInfo::new(
                orientation.orientation_type.clone(),
                landscape,
                orientation.angle,
            ),
            None => {
                let derived = if landscape {
                    "landscape-primary"
                } else {
                    "portrait-primary"
                };
                ScreenOrientationInfo::new(derived, landscape, 0.0)
            }
        }
    }

    /// Whether the host exposes a platform orientation signal.
    pub fn has_orientation_api(&self) -> bool {
        self.screen.orientation().is_some()
    }

    pub fn screen(&self) -> &D {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut D {
        &mut self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_type_decides_orientation() {
        // Viewport disagrees on purpose: the platform signal wins.
        let screen = StaticScreen::with_orientation(
            ScreenOrientation::new("landscape-secondary", 270.0),
            Viewport::new(390, 844),
        );
        let resolver = OrientationResolver::new(screen);
        assert!(resolver.is_landscape());

        let info = resolver.orientation_info();
        assert_eq!(info.orientation_type(), "landscape-secondary");
        assert_eq!(info.angle(), 270.0);
        assert!(info.is_landscape() && !info.is_portrait());
    }

    #[test]
    fn viewport_fallback_without_orientation_api() {
        let mut resolver = OrientationResolver::new(StaticScreen::viewport_only(Viewport::new(
            1280, 720,
        )));
        assert!(resolver.is_landscape());
        assert!(!resolver.has_orientation_api());

        let info = resolver.orientation_info();
        assert_eq!(info.orientation_type(), "landscape-primary");
        assert_eq!(info.angle(), 0.0);

        // Viewport is read live, no refresh needed.
        resolver.screen_mut().set_viewport(Viewport::new(720, 1280));
        assert!(resolver.is_portrait());
        assert_eq!(resolver.orientation_info().orientation_type(), "portrait-primary");
    }

    #[test]
    fn square_viewport_is_portrait() {
        let resolver = OrientationResolver::new(StaticScreen::viewport_only(Viewport::new(
            500, 500,
        )));
        assert!(resolver.is_portrait());
    }

    #[test]
    fn cached_orientation_updates_on_refresh() {
        let mut resolver = OrientationResolver::new(StaticScreen::portrait());
        resolver
            .screen_mut()
            .set_orientation(Some(ScreenOrientation::new("landscape-primary", 90.0)));
        assert!(resolver.is_portrait());

        resolver.refresh();
        assert!(resolver.is_landscape());
        assert_eq!(resolver.orientation_info().angle(), 90.0);
    }
}
