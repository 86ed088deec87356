//! Particle morph core
//!
//! Owns the three particle buffers and advances them once per frame:
//! gesture -> interaction parameters -> target -> smoothed current.

use rand::rngs::StdRng;
use rand::Rng;

use crate::geometry::{centered, ShapeGenerator, ShapeKind};
use crate::gesture::GestureState;
use crate::render::{ParticleUniforms, Rgb, Rotation};
use crate::config::ConfigError;
use crate::scene_limits::{is_valid_point_size, DEFAULT_POINT_SIZE, DEFAULT_SMOOTHING};

/// Half-extent of the cube the cloud starts scattered in
pub const SCATTER_EXTENT: f32 = 25.0;
/// Rotation speed with no hands steering
pub const IDLE_ROTATION_SPEED: f32 = 0.001;
/// Explosion strength below which targets are left undisturbed
const EXPLOSION_THRESHOLD: f32 = 0.1;

/// The three parallel `3 * N` buffers of the cloud
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffers {
    /// Shape as generated, unscaled
    pub original: Vec<f32>,
    /// Where each point is heading this tick
    pub target: Vec<f32>,
    /// What gets drawn
    pub current: Vec<f32>,
}

impl ParticleBuffers {
    /// Fresh buffers for `original`; `current` starts scattered
    pub fn scattered<R: Rng>(original: Vec<f32>, rng: &mut R) -> Self {
        let current = (0..original.len())
            .map(|_| centered(rng) * 2.0 * SCATTER_EXTENT)
            .collect();
        Self {
            target: original.clone(),
            original,
            current,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.current.len() / 3
    }
}

/// Per-tick parameters derived from a gesture snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionParams {
    pub scale: f32,
    pub explosion: f32,
    pub rotation_speed: f32,
}

impl Default for InteractionParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            explosion: 0.0,
            rotation_speed: IDLE_ROTATION_SPEED,
        }
    }
}

impl InteractionParams {
    /// Map a gesture snapshot to interaction parameters.
    ///
    /// Without tracking the cloud breathes slowly with `time` (seconds).
    /// One hand zooms and spins with the pinch; two hands push the cloud
    /// apart with their spread.
    pub fn from_gesture(gesture: &GestureState, time: f32) -> Self {
        let idle = Self::default();
        if !gesture.is_tracking {
            return Self {
                scale: 1.0 + 0.1 * time.sin(),
                ..idle
            };
        }
        match gesture.hands_detected {
            1 => {
                let pinch = gesture.pinch_distance.clamp(0.0, 1.0);
                Self {
                    scale: 0.5 + 1.5 * pinch,
                    rotation_speed: 0.002 + 0.01 * pinch,
                    ..idle
                }
            }
            2 => Self {
                scale: 1.0 + 0.5 * gesture.hand_distance,
                explosion: gesture.hand_distance * 30.0,
                ..idle
            },
            _ => idle,
        }
    }
}

/// Smoothly morphing point cloud
pub struct MorphCore {
    buffers: ParticleBuffers,
    shape: ShapeKind,
    generator: ShapeGenerator,
    rng: StdRng,
    smoothing: f32,
    color: Rgb,
    point_size: f32,
    rotation: Rotation,
    params: InteractionParams,
    time: f32,
}

impl MorphCore {
    /// Generate `shape` with `count` particles and scatter the cloud
    pub fn new(shape: ShapeKind, count: usize, mut generator: ShapeGenerator, mut rng: StdRng) -> Self {
        let original = generator.generate(&shape, count, &mut rng);
        let buffers = ParticleBuffers::scattered(original, &mut rng);
        Self {
            buffers,
            shape,
            generator,
            rng,
            smoothing: DEFAULT_SMOOTHING,
            color: Rgb::default(),
            point_size: DEFAULT_POINT_SIZE,
            rotation: Rotation::default(),
            params: InteractionParams::default(),
            time: 0.0,
        }
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_point_size(mut self, point_size: f32) -> Self {
        self.point_size = point_size;
        self
    }

    /// Advance one frame
    pub fn tick(&mut self, gesture: &GestureState, time: f32) {
        self.time = time;
        self.params = InteractionParams::from_gesture(gesture, time);
        self.recompute_target();

        let alpha = self.smoothing;
        for (current, target) in self.buffers.current.iter_mut().zip(&self.buffers.target) {
            *current += (target - *current) * alpha;
        }

        self.rotation.advance(self.params.rotation_speed);
    }

    /// Swap the shape; the target follows immediately so the next tick
    /// never morphs toward the old shape.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        let count = self.particle_count();
        self.buffers.original = self.generator.generate(&shape, count, &mut self.rng);
        self.shape = shape;
        self.recompute_target();
        log::info!("shape set to {}", self.shape.name());
    }

    /// Resize the cloud, keeping the positions of surviving particles
    pub fn set_particle_count(&mut self, count: usize) {
        let previous = self.particle_count();
        self.buffers.original = self.generator.generate(&self.shape, count, &mut self.rng);

        let len = count * 3;
        self.buffers.current.truncate(len);
        while self.buffers.current.len() < len {
            let value = centered(&mut self.rng) * 2.0 * SCATTER_EXTENT;
            self.buffers.current.push(value);
        }
        self.recompute_target();
        log::info!("particle count {} -> {}", previous, count);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Rejects the same sizes a scene config would
    pub fn set_point_size(&mut self, point_size: f32) -> Result<(), ConfigError> {
        if !is_valid_point_size(point_size) {
            return Err(ConfigError::PointSize(point_size));
        }
        self.point_size = point_size;
        Ok(())
    }

    fn recompute_target(&mut self) {
        let InteractionParams { scale, explosion, .. } = self.params;
        let burst = self.shape.is_explosive();
        let time = self.time;
        let rng = &mut self.rng;

        self.buffers.target.resize(self.buffers.original.len(), 0.0);
        for (i, (target, original)) in self
            .buffers
            .target
            .chunks_exact_mut(3)
            .zip(self.buffers.original.chunks_exact(3))
            .enumerate()
        {
            let pulse = if burst {
                1.0 + 0.5 * (2.0 * time + i as f32).sin()
            } else {
                1.0
            };
            for axis in 0..3 {
                let mut value = original[axis] * scale;
                if explosion > EXPLOSION_THRESHOLD {
                    value += original[axis] * explosion * 0.1 + centered(rng) * explosion;
                }
                target[axis] = value * pulse;
            }
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.buffers.current
    }

    pub fn buffers(&self) -> &ParticleBuffers {
        &self.buffers
    }

    pub fn particle_count(&self) -> usize {
        self.buffers.particle_count()
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Parameters used by the most recent target computation
    pub fn params(&self) -> InteractionParams {
        self.params
    }

    pub fn uniforms(&self) -> ParticleUniforms {
        ParticleUniforms::new(self.rotation, self.color, self.point_size)
    }
}

// App methods for the render side
#[cfg(target_arch = "wasm32")]
use crate::state::App;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl App {
    /// Switch to a built-in shape by name
    pub fn set_shape(&mut self, name: &str) -> Result<(), JsValue> {
        let shape = ShapeKind::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown shape: {}", name)))?;
        self.state.morph.set_shape(shape);
        Ok(())
    }

    /// Morph into arbitrary text
    pub fn set_text_shape(&mut self, text: &str) {
        self.state.morph.set_shape(ShapeKind::Text(text.to_string()));
    }

    /// Set the particle color from a `#rrggbb` string
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = Rgb::from_hex(hex)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid color: {}", hex)))?;
        self.state.morph.set_color(color);
        log::info!("color set to {}", color.to_hex());
        Ok(())
    }

    pub fn set_point_size(&mut self, size: f32) -> Result<(), JsValue> {
        self.state
            .morph
            .set_point_size(size)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_particle_count(&mut self, count: usize) -> Result<(), JsValue> {
        if !crate::scene_limits::is_valid_particle_count(count) {
            return Err(JsValue::from_str(&format!("Invalid particle count: {}", count)));
        }
        self.state.morph.set_particle_count(count);
        Ok(())
    }

    /// Copy of the current `3 * N` position buffer
    pub fn positions(&self) -> Vec<f32> {
        self.state.morph.positions().to_vec()
    }

    /// `[x, y]` accumulated rotation in radians
    pub fn rotation(&self) -> Vec<f32> {
        let rotation = self.state.morph.rotation();
        vec![rotation.x, rotation.y]
    }

    /// `[r, g, b]` in 0..1
    pub fn color(&self) -> Vec<f32> {
        self.state.morph.color().to_array().to_vec()
    }

    pub fn point_size(&self) -> f32 {
        self.state.morph.point_size()
    }

    pub fn particle_count(&self) -> usize {
        self.state.morph.particle_count()
    }

    /// Uniform block bytes, ready for `queue.writeBuffer`
    pub fn uniforms(&self) -> Vec<u8> {
        self.state.morph.uniforms().as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureFlag;
    use rand::SeedableRng;

    fn core(shape: ShapeKind, count: usize) -> MorphCore {
        MorphCore::new(
            shape,
            count,
            ShapeGenerator::default(),
            StdRng::seed_from_u64(99),
        )
    }

    fn one_hand(pinch: f32) -> GestureState {
        GestureState {
            is_tracking: true,
            hands_detected: 1,
            pinch_distance: pinch,
            ..GestureState::neutral()
        }
    }

    fn two_hands(spread: f32) -> GestureState {
        GestureState {
            is_tracking: true,
            hands_detected: 2,
            hand_distance: spread,
            ..GestureState::neutral()
        }
    }

    #[test]
    fn test_params_without_tracking_breathe() {
        let neutral = GestureState::neutral();
        let p = InteractionParams::from_gesture(&neutral, std::f32::consts::FRAC_PI_2);
        assert!((p.scale - 1.1).abs() < 1e-6);
        assert_eq!(p.explosion, 0.0);
        assert_eq!(p.rotation_speed, IDLE_ROTATION_SPEED);
    }

    #[test]
    fn test_params_one_hand_follow_pinch() {
        let closed = InteractionParams::from_gesture(&one_hand(0.0), 0.0);
        assert_eq!(closed.scale, 0.5);
        assert_eq!(closed.rotation_speed, 0.002);

        let open = InteractionParams::from_gesture(&one_hand(1.0), 0.0);
        assert_eq!(open.scale, 2.0);
        assert!((open.rotation_speed - 0.012).abs() < 1e-7);
        assert_eq!(open.explosion, 0.0);
    }

    #[test]
    fn test_params_two_hands_explode() {
        let p = InteractionParams::from_gesture(&two_hands(0.5), 3.0);
        assert_eq!(p.explosion, 15.0);
        assert_eq!(p.scale, 1.25);
        assert_eq!(p.rotation_speed, IDLE_ROTATION_SPEED);
    }

    #[test]
    fn test_params_tracking_without_hands_is_neutral() {
        let gesture = GestureState {
            is_tracking: true,
            ..GestureState::neutral()
        };
        assert_eq!(
            InteractionParams::from_gesture(&gesture, 1.0),
            InteractionParams::default()
        );
    }

    #[test]
    fn test_buffers_share_length() {
        let mut core = core(ShapeKind::Saturn, 321);
        let check = |core: &MorphCore| {
            let b = core.buffers();
            assert_eq!(b.original.len(), 321 * 3);
            assert_eq!(b.target.len(), b.original.len());
            assert_eq!(b.current.len(), b.original.len());
        };
        check(&core);
        core.tick(&two_hands(0.8), 0.5);
        check(&core);
        core.set_shape(ShapeKind::LoveText);
        check(&core);
    }

    #[test]
    fn test_initial_scatter_is_bounded() {
        let core = core(ShapeKind::Heart, 2000);
        assert!(core
            .positions()
            .iter()
            .all(|v| v.abs() <= SCATTER_EXTENT));
        // Not collapsed onto the shape
        assert_ne!(core.buffers().current, core.buffers().target);
    }

    #[test]
    fn test_smoothing_converges_in_83_ticks() {
        let mut core = core(ShapeKind::Sphere, 50);
        core.buffers.original.fill(0.0);
        core.buffers.current.fill(1.0);

        let neutral = GestureState::neutral();
        for _ in 0..82 {
            core.tick(&neutral, 0.0);
        }
        assert!(core.positions().iter().all(|v| *v > 1e-3));

        core.tick(&neutral, 0.0);
        assert!(core.positions().iter().all(|v| v.abs() < 1e-3));
    }

    #[test]
    fn test_shape_change_recomputes_target_immediately() {
        let mut core = core(ShapeKind::Sphere, 400);
        let pinch = one_hand(1.0);
        core.tick(&pinch, 0.0);

        core.set_shape(ShapeKind::Heart);
        let b = core.buffers();
        let scale = core.params().scale;
        for (t, o) in b.target.iter().zip(&b.original) {
            assert!((t - o * scale).abs() < 1e-5);
        }

        // The next tick heads toward the heart, not the sphere
        let before = core.positions().to_vec();
        core.tick(&pinch, 0.0);
        let b = core.buffers();
        for i in 0..before.len() {
            let expected = before[i] + (b.target[i] - before[i]) * core.smoothing();
            assert!((b.current[i] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_color_change_leaves_geometry_alone() {
        let mut core = core(ShapeKind::Flower, 100);
        core.tick(&one_hand(0.3), 1.0);
        let before = core.buffers().clone();

        core.set_color(Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(core.buffers(), &before);
        assert_eq!(core.color(), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(core.uniforms().color, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_explosion_spreads_target() {
        let mut core = core(ShapeKind::Sphere, 1000);
        core.tick(&two_hands(1.0), 0.0);

        let b = core.buffers();
        let spread: f32 = b.target.iter().map(|v| v.abs()).sum::<f32>() / b.target.len() as f32;
        let calm: f32 = b.original.iter().map(|v| v.abs()).sum::<f32>() / b.original.len() as f32;
        assert!(spread > calm * 3.0, "spread {} vs calm {}", spread, calm);
    }

    #[test]
    fn test_fireworks_pulse_per_particle() {
        let mut core = core(ShapeKind::Fireworks, 4);
        core.tick(&GestureState::neutral(), 0.0);

        let b = core.buffers();
        for i in 0..4 {
            let pulse = 1.0 + 0.5 * (i as f32).sin();
            for axis in 0..3 {
                let k = i * 3 + axis;
                assert!((b.target[k] - b.original[k] * pulse).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_rotation_speeds_up_with_pinch() {
        let mut idle = core(ShapeKind::Heart, 10);
        let mut pinched = core(ShapeKind::Heart, 10);
        for _ in 0..100 {
            idle.tick(&GestureState::neutral(), 0.0);
            pinched.tick(&one_hand(1.0), 0.0);
        }
        assert!((idle.rotation().y - 0.1).abs() < 1e-4);
        assert!((pinched.rotation().y - 1.2).abs() < 1e-3);
        assert!((pinched.rotation().x - 0.6).abs() < 1e-3);
    }

    #[test]
    fn test_resize_keeps_surviving_particles() {
        let mut core = core(ShapeKind::Heart, 100);
        core.tick(&GestureState::neutral(), 0.0);
        let before = core.positions()[..150].to_vec();

        core.set_particle_count(50);
        assert_eq!(core.positions(), &before[..]);
        assert_eq!(core.buffers().target.len(), 150);

        core.set_particle_count(80);
        assert_eq!(core.particle_count(), 80);
        assert_eq!(core.buffers().original.len(), 240);
    }

    #[test]
    fn test_flags_alone_do_not_move_the_cloud() {
        // Only tracking, hand count, pinch and spread steer the morph
        let gesture = one_hand(0.5).with_flag(GestureFlag::Fist, true);
        assert_eq!(
            InteractionParams::from_gesture(&gesture, 0.0),
            InteractionParams::from_gesture(&one_hand(0.5), 0.0)
        );
    }

    #[test]
    fn test_point_size_rejects_what_config_rejects() {
        let mut core = core(ShapeKind::Heart, 10);
        assert!(core.set_point_size(0.3).is_ok());

        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                core.set_point_size(bad),
                Err(ConfigError::PointSize(_))
            ));
        }
        assert_eq!(core.point_size(), 0.3);
        assert_eq!(core.uniforms().point[0], 0.3);
    }
}
