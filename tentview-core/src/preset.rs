//! Viewer configuration and the shipped presets.
//!
//! Six named presets cover the illustration variants, differing only in
//! generation strategy and tuning constants; none of them is canonical.
use serde::{Deserialize, Serialize};

use crate::geometry::ShapeParameters;
use crate::render::Palette;
use crate::strategy::{TentStyle, WindowSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub style: TentStyle,
    pub shape: ShapeParameters,
    /// Perspective constant; must exceed the shape's envelope radius
    pub focal_length: f32,
    /// Tilt applied at startup and on reset
    pub initial_pitch: f32,
    /// Idle yaw advance per nominal frame
    pub auto_yaw_rate: f32,
    /// Radians of rotation per pointer unit dragged
    pub drag_sensitivity: f32,
    pub windows: Vec<WindowSpec>,
    pub palette: Palette,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl ViewerConfig {
    pub const PRESET_NAMES: [&'static str; 6] =
        ["classic", "compact", "lattice", "fan", "rings", "dome"];

    /// Look up a shipped preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "compact" => Some(Self::compact()),
            "lattice" => Some(Self::lattice()),
            "fan" => Some(Self::fan()),
            "rings" => Some(Self::rings()),
            "dome" => Some(Self::dome()),
            _ => None,
        }
    }

    /// The main production variant
    pub fn classic() -> Self {
        Self {
            style: TentStyle::RibbedArc {
                arcs: 13,
                panels: 30,
            },
            shape: ShapeParameters::canonical(13.0),
            focal_length: 650.0,
            initial_pitch: 0.3,
            auto_yaw_rate: 0.0005,
            drag_sensitivity: 0.01,
            windows: WindowSpec::default_layout(),
            palette: Palette::default(),
        }
    }

    /// Half-scale ribbed variant with a livelier spin
    pub fn compact() -> Self {
        Self {
            style: TentStyle::RibbedArc {
                arcs: 9,
                panels: 22,
            },
            shape: ShapeParameters::canonical(6.5),
            auto_yaw_rate: 0.002,
            ..Self::classic()
        }
    }

    pub fn lattice() -> Self {
        Self {
            style: TentStyle::EllipsoidLattice {
                stations: 16,
                slices: 12,
            },
            shape: ShapeParameters::canonical(10.0),
            focal_length: 600.0,
            auto_yaw_rate: 0.003,
            ..Self::classic()
        }
    }

    pub fn fan() -> Self {
        Self {
            style: TentStyle::FanRadial {
                stations: 9,
                blades: 6,
            },
            shape: ShapeParameters::canonical(11.0),
            focal_length: 500.0,
            auto_yaw_rate: 0.005,
            ..Self::classic()
        }
    }

    pub fn rings() -> Self {
        Self {
            style: TentStyle::ConcentricRing {
                rings: 6,
                segments: 36,
            },
            shape: ShapeParameters::canonical(12.0),
            focal_length: 550.0,
            auto_yaw_rate: 0.001,
            ..Self::classic()
        }
    }

    /// Coarse lattice with a slower hand feel
    pub fn dome() -> Self {
        Self {
            style: TentStyle::EllipsoidLattice {
                stations: 10,
                slices: 8,
            },
            shape: ShapeParameters::canonical(9.0),
            focal_length: 520.0,
            auto_yaw_rate: 0.004,
            drag_sensitivity: 0.008,
            ..Self::classic()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid viewer config: {e}"))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("could not serialize viewer config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projector;

    #[test]
    fn every_preset_resolves() {
        for name in ViewerConfig::PRESET_NAMES {
            assert!(ViewerConfig::preset(name).is_some(), "{name}");
        }
        assert!(ViewerConfig::preset("yurt").is_none());
    }

    #[test]
    fn every_preset_clears_the_focal_plane() {
        for name in ViewerConfig::PRESET_NAMES {
            let config = ViewerConfig::preset(name).unwrap();
            let projector = Projector::new(config.focal_length);
            assert!(
                projector.depth_margin(&config.shape) > 0.0,
                "{name} puts the shape through the focal plane"
            );
        }
    }

    #[test]
    fn json_round_trip() {
        let config = ViewerConfig::lattice();
        let text = config.to_json().unwrap();
        let back = ViewerConfig::from_json(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn sparse_config_files_fall_back_to_classic() {
        let config = ViewerConfig::from_json(r#"{ "focal_length": 620.0 }"#).unwrap();
        assert_eq!(config.focal_length, 620.0);
        assert_eq!(config.style, ViewerConfig::classic().style);
    }

    #[test]
    fn malformed_config_reports_an_error() {
        let err = ViewerConfig::from_json("{ not json").unwrap_err();
        assert!(err.contains("invalid viewer config"));
    }
}
