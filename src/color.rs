/// Represents a color in RGBA format.
///
/// Each channel is an 8-bit unsigned integer. Colors are straight (not
/// premultiplied); conversion to the rasterizer's representation happens at the
/// canvas boundary.
///
/// # Examples
///
/// ```
/// use clip_draw_match::Color;
///
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red, Color::RED);
/// assert!(red.is_opaque());
///
/// let semi_blue = Color::rgba(0, 0, 255, 128);
/// assert_eq!(semi_blue.to_array(), [0, 0, 255, 128]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// An opaque black color.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// An opaque white color.
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    /// An opaque red color. Used for the clip-through fill.
    pub const RED: Self = Self([255, 0, 0, 255]);

    /// Creates a new color with the specified RGB values and full opacity.
    ///
    /// ```
    /// use clip_draw_match::Color;
    ///
    /// let green = Color::rgb(0, 255, 0);
    /// assert_eq!(green, Color([0, 255, 0, 255]));
    /// ```
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Creates a new color with the specified RGBA values.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// True if the alpha channel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a() == u8::MAX
    }

    /// Returns the color as an array of 4 `u8` values.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }

    /// Packs the color as `0xAARRGGBB`, the layout softbuffer presents.
    ///
    /// ```
    /// use clip_draw_match::Color;
    ///
    /// assert_eq!(Color::RED.to_argb32(), 0xFFFF_0000);
    /// ```
    pub fn to_argb32(&self) -> u32 {
        u32::from_be_bytes([self.a(), self.r(), self.g(), self.b()])
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r(), self.g(), self.b(), self.a())
    }
}

impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl From<tiny_skia::PremultipliedColorU8> for Color {
    fn from(value: tiny_skia::PremultipliedColorU8) -> Self {
        let straight = value.demultiply();
        Self([
            straight.red(),
            straight.green(),
            straight.blue(),
            straight.alpha(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_puts_alpha_in_high_byte() {
        assert_eq!(Color::rgba(1, 2, 3, 4).to_argb32(), 0x0401_0203);
        assert_eq!(Color::WHITE.to_argb32(), 0xFFFF_FFFF);
        assert_eq!(Color::TRANSPARENT.to_argb32(), 0);
    }

    #[test]
    fn premultiplied_round_trip_for_opaque_colors() {
        let premultiplied = tiny_skia::PremultipliedColorU8::from_rgba(10, 20, 30, 255)
            .expect("opaque color is always valid");
        assert_eq!(Color::from(premultiplied), Color::rgb(10, 20, 30));
    }
}
