//! Falling-confetti particle animation.
//!
//! A mounted animation owns a fixed field of particles and one outstanding
//! frame request. Each serviced frame clears the surface, strokes every
//! particle as a short twisting strip, advances the simulation and requests
//! the next frame. Particles that fall past the bottom keep falling; nothing
//! is recycled.

mod frame;

pub use frame::{FrameLoop, FrameRequest};

use std::ops::Range;

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::params::{ConfettiParams, Rgba};

/// Something the animation can draw onto
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;

    fn clear(&mut self);

    /// Stroke a straight segment `width` pixels thick
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// One confetti strip
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Pixels, origin top-left, y down
    pub position: Vec2,
    pub radius: f32,
    /// Cosine input for the fall speed, not a physical density
    pub density: f32,
    pub color: Rgba,
    /// Horizontal skew of the strip (pixels)
    pub tilt: f32,
    pub tilt_angle: f32,
    pub tilt_angle_increment: f32,
}

impl Particle {
    /// Vertical distance covered per frame
    pub fn fall_speed(&self) -> f32 {
        (self.density.cos() + 3.0 + self.radius / 2.0) / 2.0
    }

    /// Endpoints of the strip as drawn this frame
    pub fn segment(&self) -> (Vec2, Vec2) {
        let quarter = self.radius / 4.0;
        let from = Vec2::new(self.position.x + self.tilt + quarter, self.position.y);
        let to = Vec2::new(
            self.position.x + self.tilt,
            self.position.y + self.tilt + quarter,
        );
        (from, to)
    }
}

/// Confetti field bound to one mount of the overlay
pub struct ConfettiAnimation {
    particles: Vec<Particle>,
    surface_size: Vec2,
    tilt_sway_px: f32,
    sway_phase_divisor: f32,
    offscreen_margin_px: f32,
    frames: FrameLoop,
    frames_drawn: u64,
    on_screen: usize,
}

impl ConfettiAnimation {
    /// Measure the surface, scatter particles above it and request the
    /// first frame
    pub fn mount<R: Rng>(surface: &impl Surface, params: &ConfettiParams, rng: &mut R) -> Self {
        let size = surface.size();

        let particles: Vec<Particle> = (0..params.particle_count)
            .map(|_| Particle {
                position: Vec2::new(
                    sample(rng, 0.0..size.x),
                    sample(rng, -size.y..0.0),
                ),
                radius: sample(rng, params.radius_px.clone()),
                density: sample(rng, params.density.clone()),
                color: pick_color(rng, &params.palette),
                tilt: sample(rng, params.initial_tilt_px.clone()).floor(),
                tilt_angle: 0.0,
                tilt_angle_increment: sample(rng, params.tilt_angle_increment.clone()),
            })
            .collect();

        let mut frames = FrameLoop::new();
        frames.request();

        debug!(
            particles = particles.len(),
            width = size.x,
            height = size.y,
            "Confetti mounted"
        );

        Self {
            on_screen: particles.len(),
            particles,
            surface_size: size,
            tilt_sway_px: params.tilt_sway_px,
            sway_phase_divisor: params.sway_phase_divisor,
            offscreen_margin_px: params.offscreen_margin_px,
            frames,
            frames_drawn: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Whether a frame request is outstanding
    pub fn wants_frame(&self) -> bool {
        self.frames.pending().is_some()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Particles above `height + margin` after the last update
    pub fn on_screen_count(&self) -> usize {
        self.on_screen
    }

    /// Service the outstanding frame request
    ///
    /// Returns `false` and leaves the surface untouched when no frame is
    /// pending, which is always the case after `unmount`.
    pub fn render_frame(&mut self, surface: &mut impl Surface) -> bool {
        if self.frames.take().is_none() {
            return false;
        }

        surface.clear();
        for particle in &self.particles {
            let (from, to) = particle.segment();
            surface.stroke_line(from, to, particle.radius / 2.0, particle.color);
        }

        self.update();
        self.frames_drawn += 1;
        self.frames.request();
        true
    }

    /// Cancel the frame chain; no frame is serviced afterwards
    pub fn unmount(&mut self) {
        if self.frames.cancel().is_some() {
            debug!(frames = self.frames_drawn, "Confetti unmounted");
        }
    }

    fn update(&mut self) {
        let bottom = self.surface_size.y + self.offscreen_margin_px;
        let mut on_screen = 0;

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.tilt_angle += p.tilt_angle_increment;
            p.position.y += p.fall_speed();
            p.tilt = (p.tilt_angle - i as f32 / self.sway_phase_divisor).sin() * self.tilt_sway_px;

            if p.position.y <= bottom {
                on_screen += 1;
            }
        }

        self.on_screen = on_screen;
    }
}

impl Drop for ConfettiAnimation {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Uniform sample that tolerates an empty range (e.g. a minimized window)
fn sample<R: Rng>(rng: &mut R, range: Range<f32>) -> f32 {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range)
    }
}

fn pick_color<R: Rng>(rng: &mut R, palette: &[Rgba]) -> Rgba {
    if palette.is_empty() {
        return Rgba::from_hex(0xFFFFFF);
    }
    palette[rng.random_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CONFETTI_PALETTE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingSurface {
        size: Vec2,
        clears: usize,
        lines: Vec<(Vec2, Vec2, f32, Rgba)>,
    }

    impl RecordingSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                size: Vec2::new(width, height),
                ..Default::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            self.size
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.lines.clear();
        }
        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
            self.lines.push((from, to, width, color));
        }
    }

    fn mounted(seed: u64, surface: &RecordingSurface) -> ConfettiAnimation {
        let mut rng = StdRng::seed_from_u64(seed);
        ConfettiAnimation::mount(surface, &ConfettiParams::default(), &mut rng)
    }

    #[test]
    fn test_mount_allocates_configured_count() {
        let surface = RecordingSurface::new(800.0, 600.0);
        let confetti = mounted(1, &surface);
        assert_eq!(confetti.particles().len(), 150);
        assert!(confetti.wants_frame());
        assert_eq!(surface.clears, 0);
    }

    #[test]
    fn test_initial_state_ranges() {
        let surface = RecordingSurface::new(800.0, 600.0);
        let confetti = mounted(2, &surface);

        for p in confetti.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((-600.0..0.0).contains(&p.position.y));
            assert!((5.0..15.0).contains(&p.radius));
            assert!((10.0..160.0).contains(&p.density));
            assert!((-10.0..0.0).contains(&p.tilt));
            assert_eq!(p.tilt, p.tilt.floor());
            assert!((0.05..0.12).contains(&p.tilt_angle_increment));
            assert_eq!(p.tilt_angle, 0.0);
            assert!(CONFETTI_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_frame_draws_every_particle_then_advances() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut confetti = mounted(3, &surface);
        let before: Vec<Particle> = confetti.particles().to_vec();

        assert!(confetti.render_frame(&mut surface));
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.lines.len(), 150);

        // Strips are drawn from the state before the update
        let (from, to, width, color) = surface.lines[0];
        let p = &before[0];
        assert_eq!(from, Vec2::new(p.position.x + p.tilt + p.radius / 4.0, p.position.y));
        assert_eq!(
            to,
            Vec2::new(p.position.x + p.tilt, p.position.y + p.tilt + p.radius / 4.0)
        );
        assert_eq!(width, p.radius / 2.0);
        assert_eq!(color, p.color);

        for (i, (old, new)) in before.iter().zip(confetti.particles()).enumerate() {
            let angle = old.tilt_angle_increment;
            let dy = (old.density.cos() + 3.0 + old.radius / 2.0) / 2.0;
            assert!((new.tilt_angle - angle).abs() < 1e-6);
            assert!((new.position.y - (old.position.y + dy)).abs() < 1e-4);
            assert_eq!(new.position.x, old.position.x);
            let tilt = (angle - i as f32 / 3.0).sin() * 15.0;
            assert!((new.tilt - tilt).abs() < 1e-4);
        }

        assert!(confetti.wants_frame());
        assert_eq!(confetti.frames_drawn(), 1);
    }

    #[test]
    fn test_unmount_stops_surface_mutation() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let mut confetti = mounted(4, &surface);
        confetti.render_frame(&mut surface);
        confetti.render_frame(&mut surface);

        confetti.unmount();
        let clears = surface.clears;
        let snapshot: Vec<Particle> = confetti.particles().to_vec();

        for _ in 0..5 {
            assert!(!confetti.render_frame(&mut surface));
        }
        assert!(!confetti.wants_frame());
        assert_eq!(surface.clears, clears);
        assert_eq!(confetti.particles(), snapshot.as_slice());
        assert_eq!(confetti.frames_drawn(), 2);
    }

    #[test]
    fn test_drop_mid_run_leaves_surface_alone() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let mut confetti = mounted(8, &surface);
        confetti.render_frame(&mut surface);
        let lines = surface.lines.clone();

        drop(confetti);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.lines, lines);

        // A fresh mount starts its own frame chain
        let mut confetti = mounted(8, &surface);
        assert!(confetti.render_frame(&mut surface));
        assert_eq!(surface.clears, 2);
    }

    #[test]
    fn test_particles_fall_off_without_recycling() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let mut confetti = mounted(5, &surface);

        for _ in 0..200 {
            confetti.render_frame(&mut surface);
        }

        assert_eq!(confetti.on_screen_count(), 0);
        assert!(confetti.particles().iter().all(|p| p.position.y > 120.0));
        assert!(confetti.wants_frame());
    }

    #[test]
    fn test_zero_sized_surface_mounts() {
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let mut confetti = mounted(6, &surface);

        assert!(confetti
            .particles()
            .iter()
            .all(|p| p.position == Vec2::ZERO));
        assert!(confetti.render_frame(&mut surface));
    }

    #[test]
    fn test_fall_speed_is_always_positive() {
        let surface = RecordingSurface::new(800.0, 600.0);
        let confetti = mounted(7, &surface);
        assert!(confetti.particles().iter().all(|p| p.fall_speed() >= 2.25));
    }
}
