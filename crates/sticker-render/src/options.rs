use crate::error::{RenderError, Result};
use image::Rgba;
use typed_builder::TypedBuilder;

/// Every recognised rendering option. Offsets and scales are fractions of
/// the base image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct RenderOptions {
    /// QR side length as a fraction of `min(width, height)`.
    #[builder(default = 0.55)]
    pub qr_scale: f32,
    /// Shift of the centred QR code, as `(dx, dy)` fractions of `(width, height)`.
    #[builder(default = (0.0, 0.04))]
    pub qr_offset: (f32, f32),
    /// Round the QR code's corners with a radius of one module.
    #[builder(default = true)]
    pub qr_rounding: bool,
    /// Shift of the link text below the QR code, as fractions of `(width, height)`.
    #[builder(default = (0.0, 0.02))]
    pub text_offset: (f32, f32),
    #[builder(default = Rgba([0, 0, 0, 255]))]
    pub text_color: Rgba<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RenderOptions {
    /// Checks the options once, before any sticker is rendered.
    pub fn validate(self) -> Result<Self> {
        if !(self.qr_scale.is_finite() && self.qr_scale > 0.0 && self.qr_scale <= 1.0) {
            return Err(RenderError::InvalidOptions(format!(
                "qr scale must be in (0, 1], got {}",
                self.qr_scale
            )));
        }

        let offsets = [
            ("qr offset", self.qr_offset),
            ("text offset", self.text_offset),
        ];
        for (name, (dx, dy)) in offsets {
            if !(dx.is_finite() && dy.is_finite()) {
                return Err(RenderError::InvalidOptions(format!(
                    "{name} must be finite, got ({dx}, {dy})"
                )));
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_sticker() {
        let options = RenderOptions::default();

        assert_eq!(options.qr_scale, 0.55);
        assert_eq!(options.qr_offset, (0.0, 0.04));
        assert!(options.qr_rounding);
        assert_eq!(options.text_offset, (0.0, 0.02));
        assert_eq!(options.text_color, Rgba([0, 0, 0, 255]));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn qr_scale_out_of_range_is_rejected() {
        for scale in [0.0, -0.5, 1.5, f32::NAN] {
            let options = RenderOptions::builder().qr_scale(scale).build();
            assert!(matches!(
                options.validate(),
                Err(RenderError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn non_finite_offsets_are_rejected() {
        let options = RenderOptions::builder()
            .text_offset((f32::INFINITY, 0.0))
            .build();
        assert!(options.validate().is_err());

        let options = RenderOptions::builder().qr_offset((0.0, f32::NAN)).build();
        assert!(options.validate().is_err());
    }

    #[test]
    fn negative_offsets_are_allowed() {
        let options = RenderOptions::builder()
            .qr_offset((-0.1, -0.2))
            .text_offset((0.05, -0.01))
            .build();
        assert!(options.validate().is_ok());
    }
}
