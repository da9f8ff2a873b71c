use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    color, config,
    render::Surface,
    types::{EngineOptions, Particle, Rgb, Vec2},
};

/// Samples fresh particle state bounded by the current surface size. Owns the
/// random source so deterministic tests can substitute a seeded one.
pub struct ParticleFactory {
    rng: StdRng,
}

impl ParticleFactory {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn create(&mut self, width: f32, height: f32) -> Particle {
        Particle {
            pos: Vec2::new(
                self.rng.gen_range(0.0..width),
                self.rng.gen_range(0.0..height),
            ),
            vel: Vec2::new(
                self.rng.gen_range(-config::DRIFT_MAX..config::DRIFT_MAX),
                self.rng.gen_range(-config::DRIFT_MAX..config::DRIFT_MAX),
            ),
            size: self.rng.gen_range(config::SIZE_MIN..=config::SIZE_MAX) as f32,
            alpha: 0.0,
            target_alpha: self
                .rng
                .gen_range(config::TARGET_ALPHA_MIN..config::TARGET_ALPHA_MAX),
            magnetism: self
                .rng
                .gen_range(config::MAGNETISM_MIN..config::MAGNETISM_MAX),
        }
    }
}

impl Default for ParticleFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Last-write-wins record of the most recent pointer position in surface-local
/// logical coordinates. `None` until the first sample arrives.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
}

impl PointerTracker {
    pub fn record(&mut self, pos: Vec2) {
        self.last = Some(pos);
    }

    pub fn get(&self) -> Option<Vec2> {
        self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Mounted,
    Unmounted,
}

/// Composition root: wires surface, pointer, factory and field together and
/// owns the mount/resize/unmount lifecycle.
pub struct Engine {
    state: EngineState,
    options: EngineOptions,
    color: Rgb,
    factory: ParticleFactory,
    particles: Vec<Particle>,
    pointer: PointerTracker,
    surface: Surface,
    pending_reseed: bool,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_factory(options, ParticleFactory::new())
    }

    pub fn with_factory(options: EngineOptions, factory: ParticleFactory) -> Self {
        let color = color::resolve(&options.color);
        let pending_reseed = options.refresh;
        Self {
            state: EngineState::Uninitialized,
            options,
            color,
            factory,
            particles: Vec::new(),
            pointer: PointerTracker::default(),
            surface: Surface::new(config::SURFACE_SCALE),
            pending_reseed,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Sizes the surface and seeds the field. Only valid from Uninitialized.
    pub fn mount(&mut self, cols: u16, rows: u16) {
        if self.state != EngineState::Uninitialized {
            return;
        }
        self.state = EngineState::Mounted;
        if self.surface.resize(cols, rows) {
            self.reseed();
        }
        self.pending_reseed = false;
    }

    /// Re-measures the surface and discards the whole particle generation.
    /// Positions are relative to the old dimensions, so resizing invalidates
    /// the field rather than rescaling it. Zero dimensions are a no-op.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.state != EngineState::Mounted {
            return;
        }
        if self.surface.resize(cols, rows) {
            self.reseed();
        }
    }

    /// Schedules a full re-seed at the top of the next tick, so the swap is
    /// atomic from the render loop's perspective.
    pub fn request_refresh(&mut self) {
        self.pending_reseed = true;
    }

    pub fn set_quantity(&mut self, quantity: usize) {
        self.options.quantity = quantity.max(1);
        self.request_refresh();
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.record(Vec2::new(x, y));
    }

    /// Terminal: after this no tick runs and particle state is frozen.
    pub fn unmount(&mut self) {
        self.state = EngineState::Unmounted;
    }

    /// One simulation tick: clear the surface, advance every particle, paint
    /// it. Runs only while mounted; an unsized surface draws nothing.
    pub fn tick(&mut self) {
        if self.state != EngineState::Mounted || !self.surface.is_sized() {
            return;
        }
        if self.pending_reseed {
            self.reseed();
            self.pending_reseed = false;
        }

        self.surface.clear();
        let bounds = Vec2::new(self.surface.width(), self.surface.height());
        let damping = (100.0 - self.options.ease) / 100.0;
        let bias = Vec2::new(self.options.vx, self.options.vy);
        let pointer = self.pointer.get();

        for particle in &mut self.particles {
            step_particle(particle, pointer, bounds, damping, bias);
            self.surface
                .fill_circle(particle.pos, particle.size, self.color, particle.alpha);
        }
    }

    fn reseed(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.particles.clear();
        for _ in 0..self.options.quantity {
            self.particles.push(self.factory.create(width, height));
        }
    }
}

/// Advances one particle's physical state by one tick.
fn step_particle(
    particle: &mut Particle,
    pointer: Option<Vec2>,
    bounds: Vec2,
    damping: f32,
    bias: Vec2,
) {
    // Additive attraction impulse with linear falloff inside the radius
    if let Some(pointer) = pointer {
        let delta = pointer - particle.pos;
        let distance = delta.length();
        if distance < config::ATTRACTION_RADIUS {
            let falloff = (config::ATTRACTION_RADIUS - distance) / config::ATTRACTION_RADIUS;
            let impulse = falloff * config::ATTRACTION_IMPULSE * particle.magnetism;
            particle.vel += delta.normalize() * impulse;
        }
    }

    particle.vel = particle.vel * damping;
    particle.pos += particle.vel + bias;

    // Bounce: flip velocity, don't clamp. The particle may sit outside the
    // bounds for one frame before the flip brings it back.
    if particle.pos.x < 0.0 || particle.pos.x > bounds.x {
        particle.vel.x = -particle.vel.x;
    }
    if particle.pos.y < 0.0 || particle.pos.y > bounds.y {
        particle.vel.y = -particle.vel.y;
    }

    // Fade in toward the ceiling; there is no decay path
    if particle.alpha < particle.target_alpha {
        particle.alpha = (particle.alpha + config::ALPHA_STEP).min(particle.target_alpha);
    }
}
