use std::ops::{Add, AddAssign, Mul, Sub};

use crate::config;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A resolved color channel triple. Opacity is carried per particle, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One fading dot. `size`, `target_alpha` and `magnetism` are fixed at
/// creation; the rest evolves every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub target_alpha: f32,
    pub magnetism: f32,
}

/// Declarative configuration supplied once at engine construction.
#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Number of particles maintained in the field.
    pub quantity: usize,
    /// Accepted for the configuration surface; damping is driven by `ease`
    /// alone, matching the observed behavior this engine reproduces.
    pub staticity: f32,
    /// Per-tick velocity damping: each axis is scaled by `(100 - ease) / 100`.
    pub ease: f32,
    /// Hex (`#rgb` / `#rrggbb`) or `hsl(h s% l%)` string, resolved once.
    pub color: String,
    /// Constant directional bias added to every particle. Reserved, default 0.
    pub vx: f32,
    pub vy: f32,
    /// When set, the field is fully re-seeded on the next tick after mount.
    pub refresh: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            quantity: config::DEFAULT_QUANTITY,
            staticity: config::DEFAULT_STATICITY,
            ease: config::DEFAULT_EASE,
            color: config::DEFAULT_COLOR.to_string(),
            vx: 0.0,
            vy: 0.0,
            refresh: false,
        }
    }
}
