//! Procedural tent mesh generation strategies
use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::{Primitive, ShapeParameters};

mod ellipsoid;
mod fan;
mod ribbed_arc;
mod rings;

/// Angular samples per outlined cross-section
pub(crate) const OUTLINE_SEGMENTS: usize = 40;

/// Sample count around each window marker loop
const WINDOW_SAMPLES: usize = 12;

/// Marker silhouette for a window decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowShape {
    Circle,
    Ellipse,
}

/// Placement of one decorative window on the tent skin.
///
/// Sizes are in screen-tuned units, independent of the shape scale, matching
/// how the rest of the palette constants are tuned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Position around the cross-section half circle, as a fraction of pi
    pub angle_ratio: f32,
    /// Fraction of the local arc height at which the marker center sits
    pub height_offset: f32,
    pub width: f32,
    pub height: f32,
    pub shape: WindowShape,
}

impl WindowSpec {
    /// The six-window layout of the production illustration
    pub fn default_layout() -> Vec<WindowSpec> {
        use WindowShape::{Circle, Ellipse};
        let spec = |angle_ratio, height_offset, width, height, shape| WindowSpec {
            angle_ratio,
            height_offset,
            width,
            height,
            shape,
        };
        vec![
            spec(0.5, 0.95, 12.0, 12.0, Circle),
            spec(0.35, 0.8, 14.0, 28.0, Ellipse),
            spec(0.65, 0.8, 14.0, 28.0, Ellipse),
            spec(0.25, 0.5, 10.0, 10.0, Circle),
            spec(0.5, 0.5, 10.0, 10.0, Circle),
            spec(0.75, 0.5, 10.0, 10.0, Circle),
        ]
    }
}

/// Mesh generation strategy. Every variant covers the surface with shaded
/// panels, outlines each cross-section as a stand-alone polyline, and places
/// the configured window markers. Generation is pure with respect to the
/// rotation state: points stay in the object-local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TentStyle {
    /// Cross-sectional arcs with circular width taper, panelled in between
    RibbedArc { arcs: usize, panels: usize },
    /// Rectangular x/z lattice over the lower-hemisphere ellipsoid
    EllipsoidLattice { stations: usize, slices: usize },
    /// Radial fans of half-circle arcs at each longitudinal station
    FanRadial { stations: usize, blades: usize },
    /// Horizontal bands at increasing height fractions with a sinusoidal puff
    ConcentricRing { rings: usize, segments: usize },
}

impl TentStyle {
    /// Generate one frame's primitives in draw order
    pub fn generate(&self, params: &ShapeParameters, windows: &[WindowSpec]) -> Vec<Primitive> {
        match *self {
            TentStyle::RibbedArc { arcs, panels } => {
                ribbed_arc::generate(params, windows, arcs, panels)
            }
            TentStyle::EllipsoidLattice { stations, slices } => {
                ellipsoid::generate(params, windows, stations, slices)
            }
            TentStyle::FanRadial { stations, blades } => {
                fan::generate(params, windows, stations, blades)
            }
            TentStyle::ConcentricRing { rings, segments } => {
                rings::generate(params, windows, rings, segments)
            }
        }
    }
}

/// Circular taper: cross-section scale at a normalized longitudinal
/// position. Clamped so stations at or beyond the ends collapse to zero
/// instead of producing NaN.
pub(crate) fn circular_taper(x_norm: f32) -> f32 {
    (1.0 - x_norm * x_norm).max(0.0).sqrt()
}

/// Point on the cross-section arc at `angle` in [0, pi], scaled by `taper`
pub(crate) fn arc_point(params: &ShapeParameters, x: f32, angle: f32, taper: f32) -> Point3<f32> {
    Point3::new(
        x,
        -angle.sin() * params.peak_height() * taper,
        angle.cos() * params.half_width() * taper,
    )
}

/// Window markers at section midpoints along the length.
///
/// Each marker is a closed loop sampled around an ellipse in the tangent
/// frame of its cross-section, pulled slightly inside the skin so it reads
/// as part of the surface.
pub(crate) fn window_markers(
    params: &ShapeParameters,
    windows: &[WindowSpec],
    station_count: usize,
) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(station_count * windows.len());
    let half_length = params.half_length();

    for section in 0..station_count {
        let t = (section as f32 + 0.5) / station_count as f32;
        let x_norm = t * 2.0 - 1.0;
        let x_mid = x_norm * half_length;
        let taper = circular_taper(x_norm);

        for win in windows {
            let angle = PI * win.angle_ratio;
            let center = Point3::new(
                x_mid,
                -angle.sin() * params.peak_height() * taper * win.height_offset,
                angle.cos() * params.half_width() * taper * 0.98,
            );
            let along = Vector3::new(1.0, 0.0, 0.0);
            let around = Vector3::new(0.0, -angle.cos(), -angle.sin());
            let (rx, ry) = match win.shape {
                WindowShape::Circle => {
                    let r = win.width.min(win.height) / 2.0;
                    (r, r)
                }
                WindowShape::Ellipse => (win.width / 2.0, win.height / 2.0),
            };

            let points = (0..WINDOW_SAMPLES)
                .map(|i| {
                    let theta = i as f32 / WINDOW_SAMPLES as f32 * TAU;
                    center + along * (theta.cos() * rx) + around * (theta.sin() * ry)
                })
                .collect();
            out.push(Primitive::Window { points });
        }
    }
    out
}
