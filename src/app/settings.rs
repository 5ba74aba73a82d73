//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;
use crate::config::ThemeMode;
use crate::core::catalog::format_price;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }
}

/// Value after `current` in `steps`, wrapping.  Unknown values count
/// as `steps[fallback]`.
fn next_step(steps: &[f64], current: f64, fallback: usize) -> f64 {
    let idx = steps
        .iter()
        .position(|v| (v - current).abs() < 1e-9)
        .unwrap_or(fallback);
    steps[(idx + 1) % steps.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Light Theme",
        get: |s| s.config.theme == ThemeMode::Light,
        set: |s, v| {
            s.set_theme(if v { ThemeMode::Light } else { ThemeMode::Dark });
        },
    },
    SettingsItem::Cycle {
        label: "Magnetic Strength",
        value: |s| format!("{:.1}", s.config.magnetic.strength),
        cycle: |s| {
            const STRENGTHS: &[f64] = &[0.1, 0.2, 0.3, 0.4, 0.5];
            s.config.magnetic.strength = next_step(STRENGTHS, s.config.magnetic.strength, 2);
            s.apply_motion_config();
            s.persist_config();
            s.status_message = Some(format!("Magnetic strength: {:.1}", s.config.magnetic.strength));
        },
    },
    SettingsItem::Cycle {
        label: "Tilt Range",
        value: |s| format!("{}°", s.config.tilt.max_angle_deg),
        cycle: |s| {
            const RANGES: &[f64] = &[5.0, 10.0, 15.0, 20.0, 25.0];
            s.config.tilt.max_angle_deg = next_step(RANGES, s.config.tilt.max_angle_deg, 2);
            s.apply_motion_config();
            s.persist_config();
            s.status_message = Some(format!("Tilt range: {}°", s.config.tilt.max_angle_deg));
        },
    },
    SettingsItem::Cycle {
        label: "Reveal Threshold",
        value: |s| format!("{:.0}%", s.config.reveal_threshold * 100.0),
        cycle: |s| {
            const THRESHOLDS: &[f64] = &[0.1, 0.2, 0.3, 0.5];
            s.config.reveal_threshold = next_step(THRESHOLDS, s.config.reveal_threshold, 1);
            s.persist_config();
            s.status_message = Some(format!(
                "Reveal threshold: {:.0}%",
                s.config.reveal_threshold * 100.0
            ));
        },
    },
    SettingsItem::Cycle {
        label: "Free Shipping Over",
        value: |s| format_price(s.cart.policy().free_threshold),
        cycle: |s| {
            const THRESHOLDS: &[u64] = &[25_000, 50_000, 100_000];
            let current = s.config.shipping.free_threshold;
            let idx = THRESHOLDS.iter().position(|&t| t == current).unwrap_or(0);
            s.config.shipping.free_threshold = THRESHOLDS[(idx + 1) % THRESHOLDS.len()];
            s.cart.set_policy(s.config.shipping);
            s.persist_config();
            s.status_message = Some(format!(
                "Free shipping over {}",
                format_price(s.config.shipping.free_threshold)
            ));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_wrap_and_recover_from_unknown_values() {
        let steps = [1.0, 2.0, 3.0];
        assert_eq!(next_step(&steps, 1.0, 0), 2.0);
        assert_eq!(next_step(&steps, 3.0, 0), 1.0);
        assert_eq!(next_step(&steps, 7.5, 1), 3.0);
    }
}
