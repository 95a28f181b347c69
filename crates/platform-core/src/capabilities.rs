//! Host capability probing.
//!
//! The host is probed once at initialization. Later logic consults the
//! resulting [`HostCapabilities`] instead of repeating presence checks.

use motionflow_model::EventKind;
use serde::Serialize;

use crate::screen::ScreenDescriptor;

/// What the host offers, as observed at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HostCapabilities {
    /// Host delivers device motion events.
    pub motion_events: bool,
    /// Host delivers device orientation events.
    pub orientation_events: bool,
    /// Host requires explicit permission grants.
    pub permission_gated: bool,
    /// Host exposes a platform screen-orientation signal.
    pub screen_orientation_api: bool,
}

impl HostCapabilities {
    /// Probe a host.
    ///
    /// `supports` reports whether the sensor source can deliver a given event kind.
    pub fn probe<D>(
        supports: impl Fn(EventKind) -> bool,
        permission_gated: bool,
        screen: &D,
    ) -> Self
    where
        D: ScreenDescriptor + ?Sized,
    {
        let capabilities = Self {
            motion_events: supports(EventKind::Motion),
            orientation_events: supports(EventKind::Orientation),
            permission_gated,
            screen_orientation_api: screen.orientation().is_some(),
        };
        tracing::debug!(?capabilities, "Host capabilities probed");
        capabilities
    }

    /// At least one sensor event type is available.
    pub fn is_supported(&self) -> bool {
        self.motion_events || self.orientation_events
    }

    /// Per-capability checklist for reporting.
    ///
    /// Motion and orientation are each optional, but at least one is
    /// required: when both are missing, both are reported as required.
    pub fn checklist(&self) -> Vec<Capability> {
        let sensors_required = !self.is_supported();
        vec![
            Capability {
                name: "Device Motion",
                description: "Acceleration and rotation-rate events",
                available: self.motion_events,
                required: sensors_required,
                fix_instructions: (!self.motion_events)
                    .then_some("Use a device with an accelerometer/gyroscope"),
            },
            Capability {
                name: "Device Orientation",
                description: "Alpha/beta/gamma orientation events",
                available: self.orientation_events,
                required: sensors_required,
                fix_instructions: (!self.orientation_events)
                    .then_some("Use a device with orientation sensors"),
            },
            Capability {
                name: "Permission Gate",
                description: "Host requires explicit sensor permission grants",
                available: self.permission_gated,
                required: false,
                fix_instructions: None,
            },
            Capability {
                name: "Screen Orientation API",
                description: "Platform orientation type and angle (viewport fallback otherwise)",
                available: self.screen_orientation_api,
                required: false,
                fix_instructions: None,
            },
        ]
    }
}

/// A single host capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<&'static str>,
}

/// Render a user-friendly capability report.
pub fn render_capability_report(capabilities: &HostCapabilities) -> String {
    let mut out = String::new();
    out.push_str("Motionflow Host Capabilities:\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for cap in capabilities.checklist() {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };
        out.push_str(&format!("  {} {}: {}\n", status, cap.name, cap.description));

        if let Some(fix) = cap.fix_instructions {
            out.push_str(&format!("    Fix: {fix}\n"));
        }
    }

    if !capabilities.is_supported() {
        out.push_str("  Host exposes no motion or orientation events; sensors are unsupported.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{StaticScreen, Viewport};

    #[test]
    fn probe_reads_source_and_screen() {
        let caps = HostCapabilities::probe(
            |kind| kind == EventKind::Orientation,
            true,
            &StaticScreen::viewport_only(Viewport::new(800, 600)),
        );
        assert!(!caps.motion_events);
        assert!(caps.orientation_events);
        assert!(caps.permission_gated);
        assert!(!caps.screen_orientation_api);
        assert!(caps.is_supported());

        // One sensor type is enough; the missing one stays optional.
        let report = render_capability_report(&caps);
        assert!(report.contains("[MISSING - OPTIONAL] Device Motion"));
        assert!(report.contains("[OK] Device Orientation"));
    }

    #[test]
    fn no_sensor_events_is_unsupported() {
        let caps = HostCapabilities::probe(|_| false, false, &StaticScreen::portrait());
        assert!(!caps.is_supported());
        let report = render_capability_report(&caps);
        assert!(report.contains("[MISSING - REQUIRED] Device Motion"));
        assert!(report.contains("[MISSING - REQUIRED] Device Orientation"));
        assert!(report.contains("unsupported"));
        assert_eq!(caps.checklist().iter().filter(|c| c.required).count(), 2);
    }
}
