/// Linear straight-alpha RGBA color.
///
/// Channels are in `[0, 1]`. Conversion from 8-bit channels is linear (`c / 255`);
/// no gamma curve is applied. The surface format decides how the result is
/// encoded on screen.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates an opaque color from 8-bit RGB channels (`0`–`255`).
    ///
    /// Alpha is fixed at `1.0`.
    #[inline]
    pub fn from_rgb_u8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb;
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_red_maps_to_unit_red() {
        assert_eq!(Color::from_rgb_u8([255, 0, 0]), Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn black_keeps_opaque_alpha() {
        assert_eq!(Color::from_rgb_u8([0, 0, 0]), Color::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn mapping_is_linear() {
        let c = Color::from_rgb_u8([51, 102, 204]);
        approx::assert_relative_eq!(c.r, 0.2);
        approx::assert_relative_eq!(c.g, 0.4);
        approx::assert_relative_eq!(c.b, 0.8);
    }
}
