use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::month::TargetMonth;
use crate::core::portal::{Session, PAYSLIP_ENDPOINT};
use crate::utils::error::{AppError, Result};

/// `%PDF`
pub const PDF_MAGIC: [u8; 4] = [0x25, 0x50, 0x44, 0x46];

pub fn is_pdf(content: &[u8]) -> bool {
    content.starts_with(&PDF_MAGIC)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    /// The portal answered with something other than a PDF, typically an HTML
    /// error page for an expired session. Nothing is written.
    InvalidPdf,
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }

    pub fn message(&self) -> String {
        match self {
            DownloadOutcome::Saved(path) => format!("Saved payslip to {}", path.display()),
            DownloadOutcome::InvalidPdf => "Could not download a valid PDF file".to_string(),
        }
    }
}

/// Applies the strftime `pattern` to the month's first day and places the
/// result under `folder`.
pub fn payslip_path(folder: &Path, pattern: &str, month: TargetMonth) -> Result<PathBuf> {
    let mut file_name = String::new();
    write!(file_name, "{}", month.first_day().format(pattern)).map_err(|_| AppError::Format {
        pattern: pattern.to_string(),
    })?;

    Ok(folder.join(file_name))
}

pub struct PayslipDownloader {
    folder: PathBuf,
    pattern: String,
}

impl PayslipDownloader {
    pub fn new(folder: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            pattern: pattern.into(),
        }
    }

    pub async fn download(&self, session: &Session, month: TargetMonth) -> Result<DownloadOutcome> {
        let path = payslip_path(&self.folder, &self.pattern, month)?;

        let mut url = session.client().endpoint(PAYSLIP_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("Date", &month.payslip_date())
            .append_pair("UserId", &session.user_id());

        let content = session.client().get(url).await?.bytes().await?;
        debug!("Payslip response is {} bytes", content.len());

        if !is_pdf(&content) {
            warn!("Payslip response for {} is not a PDF", month);
            return Ok(DownloadOutcome::InvalidPdf);
        }

        tokio::fs::write(&path, &content).await?;
        info!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(DownloadOutcome::Saved(path))
    }
}
