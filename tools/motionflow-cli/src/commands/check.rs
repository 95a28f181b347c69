//! Check host capabilities for a recorded stream.

use std::path::PathBuf;

use motionflow_common::config::AppConfig;
use motionflow_platform_core::{render_capability_report, HostCapabilities, OrientationResolver};
use motionflow_tracker::backends::ReplaySource;
use motionflow_tracker::SensorEventSource;

use super::ScreenArgs;

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    screen: ScreenArgs,
    gated: bool,
) -> anyhow::Result<()> {
    println!("Motionflow Host Check");
    println!("{}", "=".repeat(50));

    let source = ReplaySource::open(&path)?;
    println!("[OK] Source: {} ({} events)", source.name(), source.remaining());

    let resolver = OrientationResolver::new(screen.to_screen(&config.screen));
    let info = resolver.orientation_info();
    println!(
        "[OK] Screen: {} at {}° ({})",
        info.orientation_type(),
        info.angle(),
        if info.is_landscape() { "landscape" } else { "portrait" }
    );

    let capabilities =
        HostCapabilities::probe(|kind| source.supports(kind), gated, resolver.screen());
    println!();
    print!("{}", render_capability_report(&capabilities));

    println!();
    if capabilities.is_supported() {
        println!("Sensor events are available. Motionflow is ready.");
    } else {
        println!("No sensor events available. See above for fixes.");
    }

    Ok(())
}
