pub const SIM_HZ: f32 = 60.0;
pub const RENDER_HZ: f32 = 30.0;
pub const DT: f32 = 1.0 / SIM_HZ;

/// Pointer proximity within this many logical units perturbs velocity.
pub const ATTRACTION_RADIUS: f32 = 150.0;
pub const ATTRACTION_IMPULSE: f32 = 0.05;

pub const ALPHA_STEP: f32 = 0.01;

pub const SIZE_MIN: u32 = 1;
pub const SIZE_MAX: u32 = 2;

pub const TARGET_ALPHA_MIN: f32 = 0.1;
pub const TARGET_ALPHA_MAX: f32 = 0.7;

pub const DRIFT_MAX: f32 = 0.05;

pub const MAGNETISM_MIN: f32 = 0.1;
pub const MAGNETISM_MAX: f32 = 4.1;

// Terminal cells map 1:1 onto logical units; a finer backing store would
// raise this.
pub const SURFACE_SCALE: f32 = 1.0;

pub const DEFAULT_QUANTITY: usize = 100;
pub const DEFAULT_STATICITY: f32 = 50.0;
pub const DEFAULT_EASE: f32 = 50.0;
pub const DEFAULT_COLOR: &str = "#ffffff";

pub const QUANTITY_STEP: usize = 25;
pub const QUANTITY_MIN: usize = 25;
pub const QUANTITY_MAX: usize = 500;
