//! Parameters for the procedural fields
//!
//! All parameter structs deserialize with `#[serde(default)]`, so a config
//! file only has to name the values it changes.

use cosmic_core::{Error, Result, Rgb};
use serde::{Deserialize, Serialize};

/// Spiral-arm star distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub count: usize,
    pub arms: u32,
    /// Multiplier on the logarithmic winding of each arm
    pub spin_factor: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Full width of the random angular scatter around an arm, in radians
    pub angle_jitter: f32,
    /// Full width of the positional scatter as a fraction of the radius
    pub arm_spread: f32,
    /// Full disk height at the center; thins linearly to zero at the rim
    pub disk_thickness: f32,
    /// Particles inside this radius use the core color and larger sprites
    pub core_radius: f32,
    /// Particles inside this radius (and outside the core) use the arm color
    pub arm_radius: f32,
    pub core_color: Rgb,
    pub arm_color: Rgb,
    pub halo_color: Rgb,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            count: 500_000,
            arms: 4,
            spin_factor: 4.0,
            inner_radius: 5.0,
            outer_radius: 150.0,
            angle_jitter: 0.4,
            arm_spread: 0.3,
            disk_thickness: 8.0,
            core_radius: 8.0,
            arm_radius: 40.0,
            core_color: Rgb::new(0.95, 0.9, 0.75),
            arm_color: Rgb::new(0.4, 0.5, 0.9),
            halo_color: Rgb::new(0.15, 0.2, 0.3),
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> Result<()> {
        if self.arms == 0 {
            return Err(Error::InvalidParameter("galaxy needs at least one arm".to_string()));
        }
        if !(self.inner_radius > 0.0 && self.inner_radius.is_finite()) {
            return Err(Error::InvalidParameter("inner_radius must be positive".to_string()));
        }
        // Negated so that NaN fails too
        if !(self.outer_radius > self.inner_radius && self.outer_radius.is_finite()) {
            return Err(Error::InvalidParameter(
                "outer_radius must be greater than inner_radius".to_string(),
            ));
        }
        let shape = [
            self.spin_factor,
            self.angle_jitter,
            self.arm_spread,
            self.disk_thickness,
            self.core_radius,
            self.arm_radius,
        ];
        if !shape.iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidParameter("spiral shape parameters must be finite".to_string()));
        }
        Ok(())
    }
}

/// Diffuse glow particles spread uniformly over an annulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowParams {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub thickness: f32,
    pub color: Rgb,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            min_radius: 10.0,
            max_radius: 150.0,
            thickness: 15.0,
            color: Rgb::new(0.4, 0.45, 0.8),
        }
    }
}

/// Dark dust grains spread uniformly over an annulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustParams {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub thickness: f32,
    pub color: Rgb,
}

impl Default for DustParams {
    fn default() -> Self {
        Self {
            count: 200_000,
            min_radius: 5.0,
            max_radius: 150.0,
            thickness: 10.0,
            color: Rgb::new(0.2, 0.15, 0.1),
        }
    }
}

fn validate_annulus(min_radius: f32, max_radius: f32, thickness: f32) -> Result<()> {
    if !(min_radius >= 0.0 && max_radius >= min_radius && max_radius.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "annulus radii must satisfy 0 <= min <= max (got {} and {})",
            min_radius, max_radius
        )));
    }
    if !(thickness >= 0.0 && thickness.is_finite()) {
        return Err(Error::InvalidParameter(format!("annulus thickness must be non-negative (got {})", thickness)));
    }
    Ok(())
}

impl GlowParams {
    pub fn validate(&self) -> Result<()> {
        validate_annulus(self.min_radius, self.max_radius, self.thickness)
    }
}

impl DustParams {
    pub fn validate(&self) -> Result<()> {
        validate_annulus(self.min_radius, self.max_radius, self.thickness)
    }
}

/// A spherical shell of background stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarShellParams {
    /// Inner radius of the shell
    pub radius: f32,
    /// Shell thickness; stars start at `radius + depth` and creep inward
    pub depth: f32,
    pub count: usize,
    /// Sprite size multiplier
    pub factor: f32,
    /// HSL saturation; 0 yields white stars
    pub saturation: f32,
}

impl StarShellParams {
    /// Nearer background shell in the galaxy view
    pub fn near() -> Self {
        Self { radius: 300.0, depth: 60.0, count: 2000, factor: 4.0, saturation: 0.0 }
    }

    /// Farther background shell in the galaxy view
    pub fn far() -> Self {
        Self { radius: 500.0, depth: 100.0, count: 1000, factor: 6.0, saturation: 0.0 }
    }

    /// Star shell surrounding the solar system
    pub fn solar() -> Self {
        Self { radius: 100.0, depth: 50.0, count: 5000, factor: 4.0, saturation: 0.0 }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius >= 0.0 && self.depth >= 0.0 && (self.radius + self.depth).is_finite()) {
            return Err(Error::InvalidParameter("star shell radius and depth must be non-negative".to_string()));
        }
        Ok(())
    }
}

impl Default for StarShellParams {
    fn default() -> Self {
        Self::near()
    }
}

/// All three galaxy layers together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyFieldParams {
    pub spiral: SpiralParams,
    pub glow: GlowParams,
    pub dust: DustParams,
}

impl GalaxyFieldParams {
    /// Scale every layer's particle count; negative factors clamp to zero
    pub fn scaled(&self, factor: f32) -> Self {
        let factor = factor.max(0.0);
        let scale = |count: usize| (count as f64 * factor as f64).round() as usize;

        let mut scaled = self.clone();
        scaled.spiral.count = scale(self.spiral.count);
        scaled.glow.count = scale(self.glow.count);
        scaled.dust.count = scale(self.dust.count);
        scaled
    }

    pub fn total_count(&self) -> usize {
        self.spiral.count + self.glow.count + self.dust.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let params = GalaxyFieldParams::default();
        assert_eq!(params.total_count(), 800_000);
    }

    #[test]
    fn test_scaled_counts() {
        let params = GalaxyFieldParams::default().scaled(0.1);
        assert_eq!(params.spiral.count, 50_000);
        assert_eq!(params.glow.count, 10_000);
        assert_eq!(params.dust.count, 20_000);
        // Shape parameters are untouched
        assert_eq!(params.spiral.arms, 4);

        assert_eq!(GalaxyFieldParams::default().scaled(-3.0).total_count(), 0);
    }

    #[test]
    fn test_spiral_validation() {
        assert!(SpiralParams::default().validate().is_ok());
        assert!(SpiralParams { arms: 0, ..SpiralParams::default() }.validate().is_err());
        assert!(SpiralParams { inner_radius: 0.0, ..SpiralParams::default() }.validate().is_err());
        assert!(SpiralParams { outer_radius: 4.0, ..SpiralParams::default() }.validate().is_err());
    }

    #[test]
    fn test_nan_and_infinite_radii_are_rejected() {
        assert!(SpiralParams { inner_radius: f32::NAN, ..SpiralParams::default() }.validate().is_err());
        assert!(SpiralParams { outer_radius: f32::NAN, ..SpiralParams::default() }.validate().is_err());
        assert!(SpiralParams { outer_radius: f32::INFINITY, ..SpiralParams::default() }.validate().is_err());

        assert!(GlowParams { min_radius: f32::NAN, ..GlowParams::default() }.validate().is_err());
        assert!(DustParams { max_radius: f32::NAN, ..DustParams::default() }.validate().is_err());
        assert!(DustParams { thickness: f32::NAN, ..DustParams::default() }.validate().is_err());
        assert!(SpiralParams { arm_spread: f32::NAN, ..SpiralParams::default() }.validate().is_err());
        assert!(SpiralParams { angle_jitter: f32::INFINITY, ..SpiralParams::default() }.validate().is_err());

        assert!(StarShellParams { radius: f32::NAN, ..StarShellParams::near() }.validate().is_err());
        assert!(StarShellParams { depth: f32::NAN, ..StarShellParams::near() }.validate().is_err());
        assert!(StarShellParams { depth: 0.0, ..StarShellParams::near() }.validate().is_ok());
    }

    #[test]
    fn test_shell_presets() {
        assert_eq!(StarShellParams::near().count, 2000);
        assert_eq!(StarShellParams::far().radius, 500.0);
        assert_eq!(StarShellParams::solar().depth, 50.0);
    }
}
