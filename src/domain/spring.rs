//! Damped spring integrator driving card settle and fly-off motion.

use std::time::Duration;

/// Largest step between overshoot and rest checks. Each step is solved
/// exactly, so this bounds how far past the target a clamped spring can be
/// observed before it snaps, not the accuracy of the motion.
const MAX_STEP_SECS: f32 = 1.0 / 240.0;

/// Damping ratios this close to 1 use the critically damped solution.
const CRITICAL_BAND: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Stop at the target instead of oscillating past it.
    pub overshoot_clamping: bool,
    /// Distance from the target under which the spring may settle.
    pub rest_displacement: f32,
    /// Speed under which the spring may settle.
    pub rest_speed: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
    approach_from_below: bool,
    at_rest: bool,
}

impl Spring {
    pub fn new(from: f32, to: f32, params: SpringParams) -> Self {
        let mut spring = Self {
            value: from,
            velocity: 0.0,
            target: to,
            params,
            approach_from_below: from < to,
            at_rest: false,
        };
        spring.settle_if_resting();
        spring
    }

    /// A spring already resting at `value`.
    pub fn hold(value: f32) -> Self {
        Self::new(value, value, SpringParams::default())
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Moves the target, keeping current position and velocity.
    pub fn retarget(&mut self, to: f32) {
        self.target = to;
        self.approach_from_below = self.value < to;
        self.at_rest = false;
        self.settle_if_resting();
    }

    /// Advances the simulation by `dt`. Returns `true` once the spring has
    /// settled exactly on its target.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return true;
        }

        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 && !self.at_rest {
            let h = remaining.min(MAX_STEP_SECS);
            remaining -= h;
            self.integrate(h);
        }

        self.at_rest
    }

    fn integrate(&mut self, h: f32) {
        let (displacement, velocity) =
            solve(self.value - self.target, self.velocity, &self.params, h);
        self.value = self.target + displacement;
        self.velocity = velocity;

        if self.params.overshoot_clamping && self.has_crossed_target() {
            self.snap_to_target();
            return;
        }

        self.settle_if_resting();
    }

    fn has_crossed_target(&self) -> bool {
        if self.approach_from_below {
            self.value >= self.target
        } else {
            self.value <= self.target
        }
    }

    fn settle_if_resting(&mut self) {
        let near = (self.value - self.target).abs() <= self.params.rest_displacement;
        let slow = self.velocity.abs() <= self.params.rest_speed;
        if near && slow {
            self.snap_to_target();
        }
    }

    fn snap_to_target(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }
}

/// Position and velocity, relative to the target, after `t` seconds of
/// `m·x'' + c·x' + k·x = 0` starting from `(x0, v0)`.
fn solve(x0: f32, v0: f32, params: &SpringParams, t: f32) -> (f32, f32) {
    let (x0, v0, t) = (x0 as f64, v0 as f64, t as f64);
    let k = params.stiffness as f64;
    let c = params.damping as f64;
    let m = params.mass as f64;

    let omega = (k / m).sqrt();
    let zeta = c / (2.0 * (k * m).sqrt());

    let (x, v) = if zeta < 1.0 - CRITICAL_BAND {
        // Underdamped
        let decay = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-decay * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let b = (v0 + decay * x0) / omega_d;
        (
            envelope * (x0 * cos + b * sin),
            envelope * (v0 * cos - (decay * b + omega_d * x0) * sin),
        )
    } else if zeta > 1.0 + CRITICAL_BAND {
        // Overdamped
        let root = (zeta * zeta - 1.0).sqrt();
        let slow = -omega * (zeta - root);
        let fast = -omega * (zeta + root);
        let c_fast = (v0 - slow * x0) / (fast - slow);
        let c_slow = x0 - c_fast;
        let (e_slow, e_fast) = ((slow * t).exp(), (fast * t).exp());
        (
            c_slow * e_slow + c_fast * e_fast,
            slow * c_slow * e_slow + fast * c_fast * e_fast,
        )
    } else {
        let b = v0 + omega * x0;
        let envelope = (-omega * t).exp();
        (envelope * (x0 + b * t), envelope * (v0 - omega * b * t))
    };

    (x as f32, v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_rest(spring: &mut Spring, frame: Duration, max_frames: usize) -> Vec<f32> {
        let mut samples = vec![spring.value()];
        for _ in 0..max_frames {
            let done = spring.step(frame);
            samples.push(spring.value());
            if done {
                break;
            }
        }
        samples
    }

    #[test]
    fn test_spring_converges_exactly_to_zero() {
        let mut spring = Spring::new(42.0, 0.0, SpringParams::default());
        run_until_rest(&mut spring, Duration::from_millis(16), 2000);

        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_spring_hold_is_at_rest() {
        let mut spring = Spring::hold(3.5);
        assert!(spring.is_at_rest());
        assert!(spring.step(Duration::from_millis(16)));
        assert_eq!(spring.value(), 3.5);
    }

    #[test]
    fn test_clamped_spring_is_monotonic_and_never_passes_target() {
        let params = SpringParams {
            damping: 15.0,
            overshoot_clamping: true,
            ..SpringParams::default()
        };
        let mut spring = Spring::new(30.0, 150.0, params);
        let samples = run_until_rest(&mut spring, Duration::from_millis(16), 2000);

        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 150.0);
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0]);
            assert!(pair[1] <= 150.0);
        }
    }

    #[test]
    fn test_clamped_spring_moving_down() {
        let params = SpringParams {
            damping: 15.0,
            overshoot_clamping: true,
            ..SpringParams::default()
        };
        let mut spring = Spring::new(0.0, -120.0, params);
        let samples = run_until_rest(&mut spring, Duration::from_millis(16), 2000);

        assert_eq!(spring.value(), -120.0);
        assert!(samples.iter().all(|v| *v >= -120.0 && *v <= 0.0));
    }

    #[test]
    fn test_long_frame_is_subdivided() {
        let mut spring = Spring::new(10.0, 0.0, SpringParams::default());
        spring.step(Duration::from_secs(10));

        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_zero_step_does_nothing() {
        let mut spring = Spring::new(10.0, 0.0, SpringParams::default());
        assert!(!spring.step(Duration::ZERO));
        assert_eq!(spring.value(), 10.0);
    }

    #[test]
    fn test_heavily_damped_spring_never_reverses() {
        for damping in [1.0, 20.0, 200.0, 1_000.0, 10_000.0] {
            let params = SpringParams {
                damping,
                overshoot_clamping: true,
                ..SpringParams::default()
            };
            let mut spring = Spring::new(0.0, 600.0, params);
            let samples = run_until_rest(&mut spring, Duration::from_millis(16), 600);

            for pair in samples.windows(2) {
                assert!(pair[1] >= pair[0], "damping {} moved backwards", damping);
                assert!(pair[1] <= 600.0);
            }
        }
    }

    #[test]
    fn test_critically_damped_spring_settles_without_overshoot() {
        let params = SpringParams {
            damping: 20.0,
            ..SpringParams::default()
        };
        let mut spring = Spring::new(50.0, 0.0, params);
        let samples = run_until_rest(&mut spring, Duration::from_millis(16), 2000);

        assert!(spring.is_at_rest());
        assert!(samples.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_solve_matches_undamped_oscillation() {
        let params = SpringParams {
            stiffness: 1.0,
            damping: 0.0,
            ..SpringParams::default()
        };
        let (x, v) = solve(1.0, 0.0, &params, std::f32::consts::PI);

        assert!((x + 1.0).abs() < 1e-4);
        assert!(v.abs() < 1e-4);
    }

    #[test]
    fn test_retarget_keeps_position() {
        let params = SpringParams {
            overshoot_clamping: true,
            ..SpringParams::default()
        };
        let mut spring = Spring::new(0.0, 100.0, params);
        spring.step(Duration::from_millis(50));
        let position = spring.value();

        spring.retarget(200.0);
        assert_eq!(spring.value(), position);
        assert_eq!(spring.target(), 200.0);
        assert!(!spring.is_at_rest());
    }
}
