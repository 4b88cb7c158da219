//! Startup configuration for a desktop session.

use std::str::FromStr;

use thiserror::Error;

use crate::constants::DEFAULT_EDGE_SNAP_SENSITIVITY;
use crate::drag::DragController;
use crate::layout::snap::ScreenSize;
use crate::window::{FloatRect, WindowConfig, WindowId, WindowRegistry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window title must not be empty")]
    EmptyTitle,
    #[error("window group must not be empty in {0:?}")]
    EmptyGroup(String),
    #[error("edge sensitivity must be non-negative, got {0}")]
    NegativeSensitivity(i32),
}

/// A window to open at startup, written as `title` or `group/title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub group: Option<String>,
    pub title: String,
}

impl FromStr for WindowSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, title) = match s.split_once('/') {
            Some((group, title)) => {
                let group = group.trim();
                if group.is_empty() {
                    return Err(ConfigError::EmptyGroup(s.to_string()));
                }
                (Some(group.to_string()), title.trim())
            }
            None => (None, s.trim()),
        };
        if title.is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(Self {
            group,
            title: title.to_string(),
        })
    }
}

impl WindowSpec {
    pub fn to_config(&self, geometry: FloatRect) -> WindowConfig {
        let config = WindowConfig::new(self.title.clone()).with_geometry(geometry);
        match &self.group {
            Some(group) => config.with_group(group.clone()),
            None => config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub edge_sensitivity: i32,
    pub zone_snapping: bool,
    pub windows: Vec<WindowSpec>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            edge_sensitivity: DEFAULT_EDGE_SNAP_SENSITIVITY,
            zone_snapping: false,
            windows: Vec::new(),
        }
    }
}

impl DesktopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_sensitivity < 0 {
            return Err(ConfigError::NegativeSensitivity(self.edge_sensitivity));
        }
        Ok(())
    }

    pub fn drag_controller(&self) -> DragController {
        DragController::new(self.edge_sensitivity, self.zone_snapping)
    }

    /// Open every configured window, cascading from the top-left corner at
    /// 60% of the screen size. Returns ids in configuration order.
    pub fn open_windows(&self, registry: &mut WindowRegistry) -> Vec<WindowId> {
        let screen = registry.screen();
        self.windows
            .iter()
            .enumerate()
            .map(|(idx, spec)| registry.create_window(spec.to_config(cascade_slot(screen, idx))))
            .collect()
    }
}

fn cascade_slot(screen: ScreenSize, idx: usize) -> FloatRect {
    let width = (screen.width.max(0).saturating_mul(3) / 5).clamp(1, u16::MAX as i32);
    let height = (screen.height.max(0).saturating_mul(3) / 5).clamp(1, u16::MAX as i32);
    let step_x = (screen.width / 20).max(1);
    let step_y = (screen.height / 20).max(1);
    // wrap before the cascade walks off screen
    let slots = ((screen.width - width) / step_x)
        .min((screen.height - height) / step_y)
        .max(0) as usize
        + 1;
    let n = (idx % slots) as i32;
    FloatRect::new(n * step_x, n * step_y, width as u16, height as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_grouped_specs() {
        let plain: WindowSpec = "Notes".parse().unwrap();
        assert_eq!(plain.group, None);
        assert_eq!(plain.title, "Notes");
        let grouped: WindowSpec = "editor / main.rs".parse().unwrap();
        assert_eq!(grouped.group.as_deref(), Some("editor"));
        assert_eq!(grouped.title, "main.rs");
    }

    #[test]
    fn rejects_empty_parts() {
        assert_eq!("".parse::<WindowSpec>(), Err(ConfigError::EmptyTitle));
        assert_eq!("term/ ".parse::<WindowSpec>(), Err(ConfigError::EmptyTitle));
        assert!(matches!(
            "/title".parse::<WindowSpec>(),
            Err(ConfigError::EmptyGroup(_))
        ));
    }

    #[test]
    fn negative_sensitivity_fails_validation() {
        let config = DesktopConfig {
            edge_sensitivity: -1,
            ..DesktopConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeSensitivity(-1)));
        assert!(DesktopConfig::default().validate().is_ok());
    }

    #[test]
    fn open_windows_cascades_and_groups() {
        let config = DesktopConfig {
            windows: vec![
                "term/one".parse().unwrap(),
                "term/two".parse().unwrap(),
                "Notes".parse().unwrap(),
            ],
            ..DesktopConfig::default()
        };
        let mut reg = WindowRegistry::with_screen(ScreenSize::new(100, 40));
        let ids = config.open_windows(&mut reg);
        assert_eq!(ids.len(), 3);
        let first = reg.get(ids[0]).unwrap();
        let second = reg.get(ids[1]).unwrap();
        assert_eq!(first.geometry(), FloatRect::new(0, 0, 60, 24));
        assert_eq!(second.geometry(), FloatRect::new(5, 2, 60, 24));
        assert_eq!(first.group_key(), second.group_key());
        assert_eq!(reg.focused_id(), Some(ids[2]));
    }

    #[test]
    fn cascade_survives_huge_screens() {
        let screen = ScreenSize::new(i32::MAX, i32::MAX);
        let step = i32::MAX / 20;
        assert_eq!(
            cascade_slot(screen, 3),
            FloatRect::new(3 * step, 3 * step, u16::MAX, u16::MAX)
        );
    }
}
