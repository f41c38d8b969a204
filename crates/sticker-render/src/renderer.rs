use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::qr::{render_qr, round_corners};
use ab_glyph::{Font, FontVec, PxScale};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

/// Where the QR code lands on a base image of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Side length of the pasted QR code.
    pub qr_size: u32,
    /// Top-left corner of the pasted QR code.
    pub qr_origin: (i64, i64),
}

impl Layout {
    /// Centres the QR code on the base image, then applies the offset.
    pub fn compute(width: u32, height: u32, options: &RenderOptions) -> Self {
        let (w, h) = (width as f32, height as f32);
        let qr_size = (options.qr_scale * width.min(height) as f32) as u32;
        let half = qr_size as f32 / 2.0;

        let x = (options.qr_offset.0 * w) as i64 + (w / 2.0 - half) as i64;
        let y = (options.qr_offset.1 * h) as i64 + (h / 2.0 - half) as i64;

        Self {
            qr_size,
            qr_origin: (x, y),
        }
    }

    /// Top-left corner of text `text_width` pixels wide, centred under the
    /// QR code and shifted by the text offset.
    pub fn text_origin(
        &self,
        text_width: u32,
        width: u32,
        height: u32,
        options: &RenderOptions,
    ) -> (i64, i64) {
        let (qr_x, qr_y) = self.qr_origin;
        let x = qr_x + i64::from(self.qr_size / 2) - i64::from(text_width / 2)
            + (options.text_offset.0 * width as f32) as i64;
        let y = qr_y + i64::from(self.qr_size) + (options.text_offset.1 * height as f32) as i64;
        (x, y)
    }
}

/// Composes stickers from a base image, a font and [`RenderOptions`].
///
/// The base image is never modified; every sticker is drawn on a copy.
pub struct StickerRenderer {
    base: RgbaImage,
    font: FontVec,
    scale: PxScale,
    options: RenderOptions,
}

impl std::fmt::Debug for StickerRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerRenderer")
            .field("base", &self.base.dimensions())
            .field("scale", &self.scale)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl StickerRenderer {
    /// Validates `options` and prepares the font at `font_size` pixels per em.
    pub fn new(
        base: RgbaImage,
        font: FontVec,
        font_size: f32,
        options: RenderOptions,
    ) -> Result<Self> {
        let options = options.validate()?;
        if !(font_size.is_finite() && font_size > 0.0) {
            return Err(RenderError::InvalidOptions(format!(
                "font size must be positive, got {font_size}"
            )));
        }
        if Layout::compute(base.width(), base.height(), &options).qr_size == 0 {
            return Err(RenderError::InvalidOptions(format!(
                "base image {}x{} leaves no room for a qr code",
                base.width(),
                base.height()
            )));
        }

        let scale = font
            .pt_to_px_scale(font_size)
            .unwrap_or_else(|| PxScale::from(font_size));

        Ok(Self {
            base,
            font,
            scale,
            options,
        })
    }

    /// Loads the base image and the TrueType/OpenType font from disk.
    pub fn from_files(
        base_path: impl AsRef<Path>,
        font_path: impl AsRef<Path>,
        font_size: f32,
        options: RenderOptions,
    ) -> Result<Self> {
        let base_path = base_path.as_ref();
        let font_path = font_path.as_ref();

        let base = image::open(base_path)
            .map_err(|e| RenderError::Image(format!("{}: {e}", base_path.display())))?
            .to_rgba8();
        let bytes = std::fs::read(font_path)
            .map_err(|e| RenderError::Font(format!("{}: {e}", font_path.display())))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| RenderError::Font(format!("{}: {e}", font_path.display())))?;

        Self::new(base, font, font_size, options)
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders the sticker for `link`.
    pub fn render(&self, link: &str) -> Result<RgbaImage> {
        let mut canvas = self.base.clone();
        let layout = paste_qr(&mut canvas, link, &self.options)?;

        let (width, height) = canvas.dimensions();
        let (text_width, _) = text_size(self.scale, &self.font, link);
        let (x, y) = layout.text_origin(text_width, width, height, &self.options);
        draw_text_mut(
            &mut canvas,
            self.options.text_color,
            saturate(x),
            saturate(y),
            self.scale,
            &self.font,
            link,
        );

        Ok(canvas)
    }

    /// Renders a throwaway sticker for a code of `code_length` characters so
    /// an oversized link fails before any code is reserved.
    pub fn check_capacity(&self, link_base: &str, code_length: usize) -> Result<()> {
        // lowercase keeps the whole code in byte mode, the densest encoding it can need
        let sample = format!("{link_base}{}", "a".repeat(code_length));
        self.render(&sample).map(|_| ())
    }
}

/// Pastes the QR code for `link` onto `canvas` and returns where it went.
pub fn paste_qr(canvas: &mut RgbaImage, link: &str, options: &RenderOptions) -> Result<Layout> {
    let layout = Layout::compute(canvas.width(), canvas.height(), options);
    let size = layout.qr_size;
    if size == 0 {
        return Err(RenderError::InvalidOptions(
            "qr code would be zero pixels wide".to_string(),
        ));
    }

    let qr = render_qr(link, size)?;
    let mut code = qr.image;
    if options.qr_rounding {
        round_corners(&mut code, qr.module_scale);
    }
    let code = imageops::resize(&code, size, size, FilterType::CatmullRom);

    let (x, y) = layout.qr_origin;
    imageops::overlay(canvas, &code, x, y);
    Ok(layout)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
