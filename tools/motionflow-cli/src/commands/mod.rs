pub mod check;
pub mod normalize;
pub mod replay;

use motionflow_common::config::ScreenDefaults;
use motionflow_platform_core::{ScreenOrientation, StaticScreen, Viewport};

/// Screen overrides shared by host-facing commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScreenArgs {
    /// Platform orientation type (e.g. landscape-primary). Omit to use the viewport heuristic
    #[arg(long)]
    pub orientation: Option<String>,

    /// Platform orientation angle in degrees
    #[arg(long)]
    pub angle: Option<f64>,

    /// Viewport width
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height
    #[arg(long)]
    pub height: Option<u32>,
}

impl ScreenArgs {
    /// Build the screen descriptor from config defaults plus overrides.
    pub fn to_screen(&self, defaults: &ScreenDefaults) -> StaticScreen {
        let viewport = Viewport::new(
            self.width.unwrap_or(defaults.width),
            self.height.unwrap_or(defaults.height),
        );
        let angle = self.angle.unwrap_or(defaults.angle);
        match self
            .orientation
            .clone()
            .or_else(|| defaults.orientation_type.clone())
        {
            Some(orientation_type) => StaticScreen::with_orientation(
                ScreenOrientation::new(orientation_type, angle),
                viewport,
            ),
            None => StaticScreen::viewport_only(viewport),
        }
    }
}
