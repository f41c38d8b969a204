//! QR code rasterisation and corner rounding.

use crate::error::{RenderError, Result};
use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};

/// Light modules around the symbol, in modules.
pub const QUIET_ZONE: u32 = 1;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A rasterised QR code and the pixel size of one module.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub image: RgbaImage,
    pub module_scale: u32,
}

/// Rasterises `data` at the smallest whole module scale whose output is at
/// least `target_size` pixels wide, so the result is only ever downsized.
pub fn render_qr(data: &str, target_size: u32) -> Result<QrImage> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| RenderError::Encode(e.to_string()))?;
    let modules = code.width() as u32;
    let span = modules + 2 * QUIET_ZONE;
    let module_scale = target_size.div_ceil(span).max(1);
    let side = span * module_scale;

    let mut image = RgbaImage::from_pixel(side, side, LIGHT);
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let i = i as u32;
        let left = (i % modules + QUIET_ZONE) * module_scale;
        let top = (i / modules + QUIET_ZONE) * module_scale;
        for dy in 0..module_scale {
            for dx in 0..module_scale {
                image.put_pixel(left + dx, top + dy, DARK);
            }
        }
    }

    Ok(QrImage {
        image,
        module_scale,
    })
}

/// Makes everything outside a quarter circle of `radius` in each corner
/// transparent.
pub fn round_corners(image: &mut RgbaImage, radius: u32) {
    let (width, height) = image.dimensions();
    let radius = radius.min(width / 2).min(height / 2);
    if radius == 0 {
        return;
    }

    let r = radius as f32;
    for py in 0..radius {
        for px in 0..radius {
            // distance from the circle centre to the pixel centre
            let dx = r - (px as f32 + 0.5);
            let dy = r - (py as f32 + 0.5);
            if dx * dx + dy * dy <= r * r {
                continue;
            }
            image.put_pixel(px, py, TRANSPARENT);
            image.put_pixel(width - 1 - px, py, TRANSPARENT);
            image.put_pixel(px, height - 1 - py, TRANSPARENT);
            image.put_pixel(width - 1 - px, height - 1 - py, TRANSPARENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_square_and_at_least_target() {
        let qr = render_qr("sermire.com/AbCdEfGhIj1", 300).unwrap();

        assert_eq!(qr.image.width(), qr.image.height());
        assert!(qr.image.width() >= 300);
        assert_eq!(qr.image.width() % qr.module_scale, 0);
    }

    #[test]
    fn quiet_zone_is_light_and_finder_is_dark() {
        let qr = render_qr("sermire.com/x", 100).unwrap();
        let s = qr.module_scale;

        assert_eq!(*qr.image.get_pixel(0, 0), LIGHT);
        assert_eq!(*qr.image.get_pixel(s - 1, s - 1), LIGHT);
        // top-left module of the finder pattern sits right inside the quiet zone
        assert_eq!(*qr.image.get_pixel(s, s), DARK);
    }

    #[test]
    fn tiny_target_still_uses_one_pixel_modules() {
        let qr = render_qr("x", 1).unwrap();
        assert_eq!(qr.module_scale, 1);
    }

    #[test]
    fn rounding_clears_corners_only() {
        let mut image = RgbaImage::from_pixel(40, 40, LIGHT);
        round_corners(&mut image, 8);

        for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39)] {
            assert_eq!(image.get_pixel(x, y)[3], 0, "corner ({x}, {y})");
        }
        assert_eq!(*image.get_pixel(20, 20), LIGHT);
        assert_eq!(*image.get_pixel(20, 0), LIGHT);
        assert_eq!(*image.get_pixel(7, 7), LIGHT);
    }

    #[test]
    fn zero_radius_is_a_no_op() {
        let mut image = RgbaImage::from_pixel(4, 4, LIGHT);
        round_corners(&mut image, 0);
        assert!(image.pixels().all(|p| *p == LIGHT));
    }
}
