//! Interaction state machine driving the illustration.
//!
//! Exactly one logical thread of control touches this state: the host's
//! frame callback and pointer handlers never interleave, so the viewer is
//! plain `&mut self` with no interior locking.
use crate::preset::ViewerConfig;
use crate::projection::{Projector, PITCH_LIMIT};
use crate::render::draw_frame;
use crate::surface::DrawSurface;

/// Rotation angles in radians. Pitch is clamped to the interaction limit;
/// yaw is unbounded and wraps through trigonometric periodicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub pitch: f32,
    pub yaw: f32,
}

pub struct TentViewer {
    config: ViewerConfig,
    rotation: RotationState,
    auto_rotating: bool,
    dragging: bool,
    last_pointer: (f32, f32),
}

impl TentViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let rotation = RotationState {
            pitch: config.initial_pitch,
            yaw: 0.0,
        };
        Self {
            config,
            rotation,
            auto_rotating: true,
            dragging: false,
            last_pointer: (0.0, 0.0),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotating
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Begin a drag. Grabbing the tent always pauses the idle spin.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.auto_rotating = false;
        self.last_pointer = (x, y);
    }

    /// Apply a drag delta. Deltas accumulate linearly, so any split of the
    /// same total movement lands on the same angles. Ignored outside a drag.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let (last_x, last_y) = self.last_pointer;
        let sensitivity = self.config.drag_sensitivity;
        self.rotation.yaw += (x - last_x) * sensitivity;
        self.rotation.pitch =
            (self.rotation.pitch + (y - last_y) * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.last_pointer = (x, y);
    }

    /// End a drag. The idle spin stays wherever the user last set it.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotating = !self.auto_rotating;
    }

    pub fn reset_view(&mut self) {
        self.rotation = RotationState {
            pitch: self.config.initial_pitch,
            yaw: 0.0,
        };
        self.auto_rotating = true;
    }

    /// Advance the idle spin. `dt` is in nominal-frame units (1.0 = one
    /// 60 Hz frame) so spin speed is refresh-rate independent. Hosts redraw
    /// after every tick whether or not anything changed.
    pub fn tick(&mut self, dt: f32) {
        if self.auto_rotating && !self.dragging {
            self.rotation.yaw += self.config.auto_yaw_rate * dt;
        }
    }

    /// Generate, project and paint one frame onto `surface`
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let primitives = self
            .config
            .style
            .generate(&self.config.shape, &self.config.windows);
        let projector = Projector::new(self.config.focal_length);
        draw_frame(
            &primitives,
            &projector,
            self.rotation.pitch,
            self.rotation.yaw,
            &self.config.palette,
            surface,
        );
    }
}
