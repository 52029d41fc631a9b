//! Per-frame animation attached to scene nodes
//!
//! Rates are written per reference frame at [`REFERENCE_FPS`] and integrated
//! over real elapsed time, so a slow or fast display animates at the same
//! speed.

use cosmic_core::Vector3f;

/// Frame rate the per-frame rates are expressed against
pub const REFERENCE_FPS: f32 = 60.0;

/// Rotation axis of a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behaviour {
    /// Constant rotation about one local axis
    Spin {
        axis: Axis,
        radians_per_frame: f32,
        /// Stops while solar-system playback is paused
        gated: bool,
    },
    /// Uniform scale oscillation `1 + sin(t * angular_frequency) * amplitude`
    Pulse {
        amplitude: f32,
        angular_frequency: f32,
    },
}

impl Behaviour {
    pub fn spin(axis: Axis, radians_per_frame: f32) -> Self {
        Behaviour::Spin { axis, radians_per_frame, gated: false }
    }

    /// Spin about Y
    pub fn spin_y(radians_per_frame: f32) -> Self {
        Self::spin(Axis::Y, radians_per_frame)
    }

    /// Spin about Y that halts while playback is paused
    pub fn gated_spin_y(radians_per_frame: f32) -> Self {
        Behaviour::Spin { axis: Axis::Y, radians_per_frame, gated: true }
    }

    pub fn pulse(amplitude: f32, angular_frequency: f32) -> Self {
        Behaviour::Pulse { amplitude, angular_frequency }
    }

    /// Advance `rotation`/`scale` by `dt` seconds. `elapsed` is the absolute
    /// animation clock in seconds.
    pub fn apply(&self, rotation: &mut Vector3f, scale: &mut Vector3f, dt: f32, elapsed: f32, playing: bool) {
        match *self {
            Behaviour::Spin { axis, radians_per_frame, gated } => {
                if gated && !playing {
                    return;
                }
                let delta = radians_per_frame * dt * REFERENCE_FPS;
                match axis {
                    Axis::X => rotation.x += delta,
                    Axis::Y => rotation.y += delta,
                    Axis::Z => rotation.z += delta,
                }
            }
            Behaviour::Pulse { amplitude, angular_frequency } => {
                let s = 1.0 + (elapsed * angular_frequency).sin() * amplitude;
                *scale = Vector3f::new(s, s, s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_second_of_spin_is_sixty_frames() {
        let mut rotation = Vector3f::zeros();
        let mut scale = Vector3f::new(1.0, 1.0, 1.0);
        Behaviour::spin_y(0.005).apply(&mut rotation, &mut scale, 1.0, 0.0, true);
        assert_relative_eq!(rotation.y, 0.3, epsilon = 1e-6);
        assert_eq!(rotation.x, 0.0);
    }

    #[test]
    fn test_gated_spin_halts_when_paused() {
        let mut rotation = Vector3f::zeros();
        let mut scale = Vector3f::new(1.0, 1.0, 1.0);
        let spin = Behaviour::gated_spin_y(0.01);
        spin.apply(&mut rotation, &mut scale, 0.5, 0.0, false);
        assert_eq!(rotation.y, 0.0);
        spin.apply(&mut rotation, &mut scale, 0.5, 0.0, true);
        assert_relative_eq!(rotation.y, 0.3, epsilon = 1e-6);

        // Ungated spins ignore playback
        Behaviour::spin(Axis::X, 0.01).apply(&mut rotation, &mut scale, 0.5, 0.0, false);
        assert_relative_eq!(rotation.x, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_pulse_oscillates_around_one() {
        let mut rotation = Vector3f::zeros();
        let mut scale = Vector3f::new(1.0, 1.0, 1.0);
        let pulse = Behaviour::pulse(0.01, 1.0);

        pulse.apply(&mut rotation, &mut scale, 0.016, std::f32::consts::FRAC_PI_2, true);
        assert_relative_eq!(scale.x, 1.01, epsilon = 1e-6);

        pulse.apply(&mut rotation, &mut scale, 0.016, 3.0 * std::f32::consts::FRAC_PI_2, true);
        assert_relative_eq!(scale.z, 0.99, epsilon = 1e-6);
    }
}
