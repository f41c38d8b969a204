use crate::options::RenderOptions;
use crate::renderer::StickerRenderer;
use ab_glyph::FontVec;
use image::{Rgba, RgbaImage};

pub const FIXTURE_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/DejaVuSansMono.ttf"
);

pub const PAPER: Rgba<u8> = Rgba([200, 220, 240, 255]);

pub fn fixture_font() -> FontVec {
    FontVec::try_from_vec(std::fs::read(FIXTURE_FONT).unwrap()).unwrap()
}

/// QR code centred on the base, spanning the middle half of each axis.
pub fn centred_options() -> RenderOptions {
    RenderOptions::builder()
        .qr_scale(0.5)
        .qr_offset((0.0, 0.0))
        .text_offset((0.0, 0.02))
        .build()
}

pub fn renderer(width: u32, height: u32) -> StickerRenderer {
    StickerRenderer::new(
        RgbaImage::from_pixel(width, height, PAPER),
        fixture_font(),
        20.0,
        centred_options(),
    )
    .unwrap()
}
