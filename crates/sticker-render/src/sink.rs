use crate::renderer::StickerRenderer;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use sticker_core::{Code, SinkError, StickerJob, StickerSink};
use tracing::debug;

/// Renders each job and writes it to `<directory>/<code>.png`.
///
/// Codes are unique once reserved, so concurrent writers never share a file.
#[derive(Debug)]
pub struct PngDirectorySink {
    renderer: StickerRenderer,
    directory: PathBuf,
}

impl PngDirectorySink {
    pub fn new(renderer: StickerRenderer, directory: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, code: &Code) -> PathBuf {
        self.directory.join(format!("{code}.png"))
    }
}

impl StickerSink for PngDirectorySink {
    fn emit(&self, job: &StickerJob) -> Result<PathBuf, SinkError> {
        let sticker = self
            .renderer
            .render(&job.link)
            .map_err(|e| SinkError::Render(e.to_string()))?;

        let path = self.path_for(&job.code);
        sticker
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| SinkError::Io(format!("{}: {e}", path.display())))?;

        debug!(code = %job.code, path = %path.display(), "wrote sticker");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::renderer;

    fn job(code: &str) -> StickerJob {
        StickerJob::new(Code::new(code).unwrap(), "sermire.com/")
    }

    #[test]
    fn writes_one_png_named_after_the_code() {
        let dir = tempfile::tempdir().unwrap();
        let sink = PngDirectorySink::new(renderer(300, 200), dir.path());

        let path = sink.emit(&job("AbC-d_E9")).unwrap();

        assert_eq!(path, dir.path().join("AbC-d_E9.png"));
        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (300, 200));
    }

    #[test]
    fn codes_differing_only_in_case_get_their_own_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = PngDirectorySink::new(renderer(200, 200), dir.path());

        let lower = sink.emit(&job("abc1")).unwrap();
        let upper = sink.emit(&job("ABC1")).unwrap();

        assert_ne!(lower, upper);
        assert_eq!(sink.path_for(&Code::new("ABC1").unwrap()), upper);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-created");
        let sink = PngDirectorySink::new(renderer(200, 200), &missing);

        let err = sink.emit(&job("AbC1")).unwrap_err();

        assert!(matches!(err, SinkError::Io(_)), "{err:?}");
        assert!(!missing.exists());
    }
}
