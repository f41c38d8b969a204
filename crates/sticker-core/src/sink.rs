use crate::code::Code;
use crate::error::SinkError;
use std::path::PathBuf;

/// One requested sticker: the reserved code and the link printed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerJob {
    pub code: Code,
    pub link: String,
}

impl StickerJob {
    /// Builds the job for `code`, with the link formed as `link_base + code`.
    pub fn new(code: Code, link_base: &str) -> Self {
        let link = code.link(link_base);
        Self { code, link }
    }
}

/// Destination for stickers whose code has been durably reserved.
///
/// Implementations render the job and persist the result. They are only
/// ever called after a successful reservation, so a failure here leaves an
/// orphaned reservation behind.
pub trait StickerSink: Send + Sync + 'static {
    /// Produces the artifact for `job` and returns where it was written.
    fn emit(&self, job: &StickerJob) -> Result<PathBuf, SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_link_is_base_followed_by_code() {
        let job = StickerJob::new(Code::new("Ab3-x_9").unwrap(), "sermire.com/");
        assert_eq!(job.link, "sermire.com/Ab3-x_9");
        assert_eq!(job.code.as_str(), "Ab3-x_9");
    }
}
