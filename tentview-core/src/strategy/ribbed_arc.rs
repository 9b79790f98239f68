//! Ribbed-arc strategy: evenly spaced cross-sectional arcs with a circular
//! width taper, quad panels between consecutive arcs, and a door opening on
//! the end arc.
use std::f32::consts::PI;

use nalgebra::Point3;

use crate::geometry::{Primitive, ShapeParameters};

use super::{arc_point, circular_taper, window_markers, WindowSpec, OUTLINE_SEGMENTS};

/// Fraction of the half circle swept by the entrance opening
const ENTRANCE_WIDTH_RATIO: f32 = 0.6;
/// Entrance height relative to the local arc height
const ENTRANCE_HEIGHT_RATIO: f32 = 0.85;
const ENTRANCE_SEGMENTS: usize = 30;

pub(super) fn generate(
    params: &ShapeParameters,
    windows: &[WindowSpec],
    arcs: usize,
    panels: usize,
) -> Vec<Primitive> {
    let arcs = arcs.max(2);
    let panels = panels.max(1);
    let half_length = params.half_length();

    let station = |i: usize| -> (f32, f32) {
        let t = i as f32 / (arcs - 1) as f32;
        let x_norm = t * 2.0 - 1.0;
        (x_norm * half_length, circular_taper(x_norm))
    };

    let mut out = Vec::with_capacity((arcs - 1) * panels + arcs);

    // Skin panels between consecutive arcs
    for i in 0..arcs - 1 {
        let (x1, taper1) = station(i);
        let (x2, taper2) = station(i + 1);
        for j in 0..panels {
            let a1 = j as f32 / panels as f32 * PI;
            let a2 = (j + 1) as f32 / panels as f32 * PI;
            let corners = [
                arc_point(params, x1, a1, taper1),
                arc_point(params, x1, a2, taper1),
                arc_point(params, x2, a2, taper2),
                arc_point(params, x2, a1, taper2),
            ];
            let height_factor = (a1.sin() + a2.sin()) / 2.0;
            out.push(Primitive::Panel {
                corners,
                height_factor,
            });
        }
    }

    // Rib wireframe, one stand-alone polyline per arc
    for i in 0..arcs {
        let (x, taper) = station(i);
        let points = (0..=OUTLINE_SEGMENTS)
            .map(|s| {
                let angle = s as f32 / OUTLINE_SEGMENTS as f32 * PI;
                arc_point(params, x, angle, taper)
            })
            .collect();
        out.push(Primitive::Outline {
            points,
            closed: false,
        });
    }

    out.extend(window_markers(params, windows, arcs - 1));
    out.push(entrance(params));
    out
}

/// Door opening on the end arc. The circular taper is zero at the very end,
/// so the loop collapses to zero area there and the renderer drops it.
fn entrance(params: &ShapeParameters) -> Primitive {
    let x = params.half_length();
    let taper = circular_taper(1.0);
    let mut points = Vec::with_capacity(ENTRANCE_SEGMENTS + 1);
    for i in 0..=ENTRANCE_SEGMENTS {
        let t = i as f32 / ENTRANCE_SEGMENTS as f32;
        let angle = PI * (0.5 - ENTRANCE_WIDTH_RATIO / 2.0) + PI * ENTRANCE_WIDTH_RATIO * t;
        let y = if i == 0 || i == ENTRANCE_SEGMENTS {
            0.0
        } else {
            -angle.sin() * params.peak_height() * taper * ENTRANCE_HEIGHT_RATIO
        };
        points.push(Point3::new(
            x,
            y,
            angle.cos() * params.half_width() * taper,
        ));
    }
    Primitive::Entrance { points }
}
