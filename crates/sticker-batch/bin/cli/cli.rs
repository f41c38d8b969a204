use clap::{ArgAction, Parser};
use image::Rgba;
use std::path::PathBuf;
use std::time::Duration;
use sticker_batch::error::{BatchError, Result};
use sticker_batch::BatchPlan;
use sticker_core::CodeLength;
use sticker_render::RenderOptions;
use sticker_storage::RegistrySettings;

pub const REGISTRY_URL_ENV: &str = "STICKERGEN_REGISTRY_URL";

pub const DEFAULT_STICKER_BASE: &str = "StickerBases/bw/whitebase7.png";
pub const DEFAULT_LINK_BASE: &str = "sermire.com/";
pub const DEFAULT_FONT: &str = "Fonts/cour.ttf";
pub const DEFAULT_STICKER_DIRECTORY: &str = "Stickers/";
pub const DEFAULT_REGISTRY_URL: &str = "mysql://localhost:3306";
pub const DEFAULT_DATABASE: &str = "Books";
pub const DEFAULT_COLLECTION: &str = "Stickers";

#[derive(Debug, Parser)]
#[command(name = "stickergen", about = "Generate QR code stickers with unique short links")]
pub struct Cli {
    /// Number of stickers to generate.
    pub number: u64,

    #[arg(short = 's', long, default_value = DEFAULT_STICKER_BASE)]
    pub sticker_base: PathBuf,

    /// Prefix of every link; the code is appended verbatim.
    #[arg(short = 'l', long, default_value = DEFAULT_LINK_BASE)]
    pub link_base: String,

    #[arg(short = 'L', long, default_value_t = 11)]
    pub code_length: usize,

    #[arg(short = 'f', long, default_value_t = 50.0)]
    pub font_size: f32,

    #[arg(short = 'F', long, default_value = DEFAULT_FONT)]
    pub font: PathBuf,

    #[arg(short = 'S', long, default_value = DEFAULT_STICKER_DIRECTORY)]
    pub sticker_directory: PathBuf,

    #[arg(
        short = 'r',
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub round_qr: bool,

    /// QR side as a fraction of the base image's shorter side.
    #[arg(short = 'q', long, default_value_t = 0.55)]
    pub qr_scale: f32,

    /// QR shift as fractions of width and height.
    #[arg(
        long,
        num_args = 0..,
        allow_negative_numbers = true,
        default_values_t = [0.0, 0.04]
    )]
    pub qr_offset: Vec<f32>,

    /// Text shift as fractions of width and height.
    #[arg(
        long,
        num_args = 0..,
        allow_negative_numbers = true,
        default_values_t = [0.0, 0.02]
    )]
    pub text_offset: Vec<f32>,

    /// RGBA text colour.
    #[arg(long, num_args = 0.., default_values_t = [0, 0, 0, 255])]
    pub text_color: Vec<u8>,

    /// Log every generated sticker.
    #[arg(
        short = 'p',
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub print_info: bool,

    #[arg(long, env = REGISTRY_URL_ENV, default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    #[arg(long, default_value_t = 5000)]
    pub registry_timeout_ms: u64,

    /// Newline-separated word list replacing the built-in one.
    #[arg(long)]
    pub blocklist: Option<PathBuf>,

    /// Seed for reproducible codes.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Rendering options; extra offset or colour values are ignored.
    pub fn render_options(&self) -> Result<RenderOptions> {
        let qr_offset = pair("qr-offset", &self.qr_offset)?;
        let text_offset = pair("text-offset", &self.text_offset)?;
        let text_color = match self.text_color.as_slice() {
            [r, g, b, a, ..] => Rgba([*r, *g, *b, *a]),
            values => {
                return Err(BatchError::Configuration(format!(
                    "text-color needs 4 values, got {}",
                    values.len()
                )))
            }
        };

        Ok(RenderOptions::builder()
            .qr_scale(self.qr_scale)
            .qr_offset(qr_offset)
            .qr_rounding(self.round_qr)
            .text_offset(text_offset)
            .text_color(text_color)
            .build())
    }

    pub fn plan(&self) -> Result<BatchPlan> {
        Ok(BatchPlan::builder()
            .target_count(self.number)
            .code_length(CodeLength::new(self.code_length)?)
            .build())
    }

    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings::builder()
            .url(self.registry_url.clone())
            .database(self.database.clone())
            .collection(self.collection.clone())
            .timeout(Duration::from_millis(self.registry_timeout_ms))
            .build()
    }
}

fn pair(name: &str, values: &[f32]) -> Result<(f32, f32)> {
    match values {
        [x, y, ..] => Ok((*x, *y)),
        _ => Err(BatchError::Configuration(format!(
            "{name} needs 2 values, got {}",
            values.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stickergen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&["3"]);

        assert_eq!(cli.number, 3);
        assert_eq!(cli.sticker_base, PathBuf::from(DEFAULT_STICKER_BASE));
        assert_eq!(cli.link_base, "sermire.com/");
        assert_eq!(cli.code_length, 11);
        assert_eq!(cli.font_size, 50.0);
        assert_eq!(cli.sticker_directory, PathBuf::from("Stickers/"));
        assert!(cli.round_qr);
        assert!(cli.print_info);
        assert_eq!(cli.qr_offset, vec![0.0, 0.04]);
        assert_eq!(cli.text_offset, vec![0.0, 0.02]);
        assert_eq!(cli.text_color, vec![0, 0, 0, 255]);
        assert_eq!(cli.database, "Books");
        assert_eq!(cli.collection, "Stickers");
        assert_eq!(cli.seed, None);

        assert_eq!(cli.render_options().unwrap(), RenderOptions::default());
        assert_eq!(cli.plan().unwrap(), BatchPlan::builder().target_count(3).build());
    }

    #[test]
    fn number_is_required() {
        assert!(Cli::try_parse_from(["stickergen"]).is_err());
    }

    #[test]
    fn boolean_flags_take_values() {
        let cli = parse(&["1", "-r", "false", "--print-info", "false"]);
        assert!(!cli.round_qr);
        assert!(!cli.print_info);
        assert!(!cli.render_options().unwrap().qr_rounding);

        let cli = parse(&["1", "-r"]);
        assert!(cli.round_qr);
    }

    #[test]
    fn offsets_accept_negative_values() {
        let cli = parse(&["1", "--qr-offset", "-0.1", "0.2", "--text-offset", "0.05", "-0.01"]);
        let options = cli.render_options().unwrap();

        assert_eq!(options.qr_offset, (-0.1, 0.2));
        assert_eq!(options.text_offset, (0.05, -0.01));
    }

    #[test]
    fn short_offset_is_a_configuration_error() {
        let cli = parse(&["1", "--qr-offset", "0.1"]);
        assert!(cli.render_options().unwrap_err().is_configuration());
    }

    #[test]
    fn short_color_is_a_configuration_error() {
        let cli = parse(&["1", "--text-color", "1", "2", "3"]);
        assert!(cli.render_options().unwrap_err().is_configuration());

        let cli = parse(&["1", "--text-color", "10", "20", "30", "40"]);
        assert_eq!(cli.render_options().unwrap().text_color, Rgba([10, 20, 30, 40]));
    }

    #[test]
    fn bad_code_length_is_a_configuration_error() {
        assert!(parse(&["1", "-L", "0"]).plan().unwrap_err().is_configuration());
        assert!(parse(&["1", "-L", "65"]).plan().unwrap_err().is_configuration());
        assert_eq!(parse(&["1", "-L", "6"]).plan().unwrap().code_length.get(), 6);
    }

    #[test]
    fn registry_settings_follow_flags() {
        let cli = parse(&[
            "1",
            "--registry-url",
            "mysql://db:3306",
            "--database",
            "Library",
            "--collection",
            "Issued",
            "--registry-timeout-ms",
            "250",
        ]);
        let settings = cli.registry_settings();

        assert_eq!(settings.url, "mysql://db:3306");
        assert_eq!(settings.database, "Library");
        assert_eq!(settings.collection, "Issued");
        assert_eq!(settings.timeout, Duration::from_millis(250));
    }
}
