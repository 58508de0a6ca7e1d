/// 0xRRGGBB to normalized sRGB components
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn rgb_to_hex(rgb: [u8; 3]) -> u32 {
    (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// 0xRRGGBB to linear RGB, the space the shaders light in
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_rgb(hex).map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_white() {
        let rgb = hex_to_rgb(0xffffff);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!((rgb[1] - 1.0).abs() < 0.01);
        assert!((rgb[2] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_hex_to_rgb_channels() {
        let rgb = hex_to_rgb(0xff8000);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!((rgb[1] - 0.502).abs() < 0.01);
        assert!(rgb[2].abs() < 0.01);
    }

    #[test]
    fn test_rgb_to_hex_inverts() {
        assert_eq!(rgb_to_hex([0xa0, 0x12, 0x03]), 0xa01203);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // Mid grey is darker in linear space
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn test_hex_to_linear_background() {
        let rgb = hex_to_linear(0xa0a0a0);
        assert!((rgb[0] - 0.3515).abs() < 0.01);
        assert_eq!(rgb[0], rgb[1]);
    }
}
