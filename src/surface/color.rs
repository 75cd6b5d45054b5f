//! RGB colour shared by samples and surfaces.

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unweighted mean of the three channels, `(r + g + b) / 3`.
    pub fn brightness(self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self { r, g, b }
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_is_plain_mean() {
        assert_eq!(Color::new(30, 30, 30).brightness(), 30.0);
        assert_eq!(Color::new(255, 0, 0).brightness(), 85.0);
        assert_eq!(Color::BLACK.brightness(), 0.0);
    }

    #[test]
    fn test_image_conversion() {
        let c = Color::new(1, 2, 3);
        let px: image::Rgb<u8> = c.into();
        assert_eq!(px.0, [1, 2, 3]);
        assert_eq!(Color::from(px), c);
    }
}
