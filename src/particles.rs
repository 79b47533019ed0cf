//! Decorative particle field: a fixed set of slowly drifting, pulsing dots
//! bouncing inside the viewport.
//!
//! Everything here is plain arithmetic so it can be exercised on the host;
//! the canvas loop in `wasm::render` only feeds it a clock and a viewport.

use rand::Rng;

/// Number of particles created at start-up.
pub const PARTICLE_COUNT: usize = 100;

/// Fill hue shared by the dot and its glow.
pub const PARTICLE_RGB: (u8, u8, u8) = (167, 139, 250);
/// Shadow blur radius of the glow, in CSS pixels.
pub const GLOW_BLUR: f64 = 10.0;
/// Alpha of the glow color.
pub const GLOW_ALPHA: f64 = 0.8;

/// Visible drawing area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Axes whose velocity component was inverted during one advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub opacity: f64,
}

impl Particle {
    /// Random particle anywhere inside `viewport`.
    ///
    /// Size is in `[1, 4)`, each velocity component in `[-0.25, 0.25)` and the
    /// starting opacity in `[0.3, 0.8)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            x: rng.gen::<f64>() * viewport.width,
            y: rng.gen::<f64>() * viewport.height,
            size: rng.gen::<f64>() * 3.0 + 1.0,
            speed_x: rng.gen::<f64>() * 0.5 - 0.25,
            speed_y: rng.gen::<f64>() * 0.5 - 0.25,
            opacity: rng.gen::<f64>() * 0.5 + 0.3,
        }
    }

    /// Move one frame, refresh the pulse and reflect off the viewport edges.
    ///
    /// A component only flips while the particle is outside on that axis and
    /// still heading away, so a particle left outside by a shrinking viewport
    /// turns around once and drifts back in.
    pub fn advance(&mut self, now_ms: f64, viewport: Viewport) -> Bounce {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.opacity = pulse_opacity(now_ms, self.x);

        let bounce = Bounce {
            x: leaving(self.x, self.speed_x, viewport.width),
            y: leaving(self.y, self.speed_y, viewport.height),
        };
        if bounce.x {
            self.speed_x = -self.speed_x;
        }
        if bounce.y {
            self.speed_y = -self.speed_y;
        }
        bounce
    }

    /// CSS fill color for the current opacity.
    pub fn fill_style(&self) -> String {
        rgba(self.opacity)
    }
}

fn leaving(pos: f64, speed: f64, extent: f64) -> bool {
    (pos < 0.0 && speed < 0.0) || (pos > extent && speed > 0.0)
}

/// Opacity of a particle at horizontal position `x` at wall-clock `now_ms`.
pub fn pulse_opacity(now_ms: f64, x: f64) -> f64 {
    0.5 + 0.3 * (now_ms * 0.001 + x).sin()
}

/// CSS color of the glow around every particle.
pub fn glow_style() -> String {
    rgba(GLOW_ALPHA)
}

fn rgba(alpha: f64) -> String {
    let (r, g, b) = PARTICLE_RGB;
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// The whole animated set plus the viewport it bounces in.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
}

impl ParticleField {
    /// Populate [`PARTICLE_COUNT`] random particles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self::with_count(rng, viewport, PARTICLE_COUNT)
    }

    pub fn with_count<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, count: usize) -> Self {
        let particles = (0..count).map(|_| Particle::random(rng, viewport)).collect();
        Self { particles, viewport }
    }

    pub fn from_particles(particles: Vec<Particle>, viewport: Viewport) -> Self {
        Self { particles, viewport }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advance every particle by one frame.
    pub fn advance(&mut self, now_ms: f64) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.advance(now_ms, viewport);
        }
    }

    /// Adopt a new viewport. Particles keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
        Particle {
            x,
            y,
            size: 2.0,
            speed_x,
            speed_y,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_field_has_fixed_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let field = ParticleField::new(&mut rng, Viewport::new(800.0, 600.0));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::new(&mut rng, Viewport::new(0.0, 0.0));
        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut p = particle(10.0, 20.0, 0.2, -0.1);
        let bounce = p.advance(0.0, Viewport::new(100.0, 100.0));
        assert!((p.x - 10.2).abs() < 1e-12);
        assert!((p.y - 19.9).abs() < 1e-12);
        assert_eq!(bounce, Bounce::default());
    }

    #[test]
    fn test_opacity_formula() {
        let mut p = particle(10.0, 20.0, 0.25, 0.0);
        p.advance(1500.0, Viewport::new(100.0, 100.0));
        let expected = 0.5 + 0.3 * (1500.0_f64 * 0.001 + 10.25).sin();
        assert!((p.opacity - expected).abs() < 1e-12);
    }

    #[test]
    fn test_left_edge_reflects() {
        let mut p = particle(0.1, 50.0, -0.2, 0.0);
        let bounce = p.advance(0.0, Viewport::new(100.0, 100.0));
        assert!(bounce.x);
        assert!(!bounce.y);
        assert!(p.x < 0.0, "position overshoots before reflecting");
        assert_eq!(p.speed_x, 0.2);

        let bounce = p.advance(0.0, Viewport::new(100.0, 100.0));
        assert!(!bounce.x);
        assert!(p.x >= 0.0);
    }

    #[test]
    fn test_bottom_edge_reflects() {
        let mut p = particle(50.0, 99.9, 0.0, 0.2);
        let bounce = p.advance(0.0, Viewport::new(100.0, 100.0));
        assert!(bounce.y);
        assert_eq!(p.speed_y, -0.2);
    }

    #[test]
    fn test_outside_after_shrink_turns_back_once() {
        let mut p = particle(500.0, 50.0, 0.1, 0.0);
        let small = Viewport::new(100.0, 100.0);
        let first = p.advance(0.0, small);
        assert!(first.x);
        for _ in 0..10 {
            assert!(!p.advance(0.0, small).x);
        }
        assert!(p.x < 500.0);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = ParticleField::new(&mut rng, Viewport::new(800.0, 600.0));
        let before = field.particles().to_vec();
        field.resize(Viewport::new(320.0, 240.0));
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.viewport(), Viewport::new(320.0, 240.0));
    }

    #[test]
    fn test_styles() {
        let p = particle(0.0, 0.0, 0.0, 0.0);
        assert_eq!(p.fill_style(), "rgba(167, 139, 250, 0.5)");
        assert_eq!(glow_style(), "rgba(167, 139, 250, 0.8)");
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_random_particle_in_ranges(seed in any::<u64>(), w in 1.0f64..4000.0, h in 1.0f64..4000.0) {
                let mut rng = SmallRng::seed_from_u64(seed);
                let viewport = Viewport::new(w, h);
                let p = Particle::random(&mut rng, viewport);
                prop_assert!(viewport.contains(p.x, p.y));
                prop_assert!((1.0..4.0).contains(&p.size));
                prop_assert!((-0.25..0.25).contains(&p.speed_x));
                prop_assert!((-0.25..0.25).contains(&p.speed_y));
                prop_assert!((0.3..=0.8).contains(&p.opacity));
            }

            #[test]
            fn prop_pulse_stays_in_band(now in 0.0f64..1.0e13, x in -100.0f64..5000.0) {
                let o = pulse_opacity(now, x);
                prop_assert!((0.2..=0.8).contains(&o));
            }

            #[test]
            fn prop_particles_stay_near_viewport(seed in any::<u64>(), frames in 1usize..2000) {
                let mut rng = SmallRng::seed_from_u64(seed);
                let viewport = Viewport::new(200.0, 150.0);
                let mut field = ParticleField::with_count(&mut rng, viewport, 10);
                for frame in 0..frames {
                    field.advance(frame as f64 * 16.0);
                }
                for p in field.particles() {
                    prop_assert!(p.x >= -0.25 && p.x <= viewport.width + 0.25);
                    prop_assert!(p.y >= -0.25 && p.y <= viewport.height + 0.25);
                }
            }
        }
    }
}
