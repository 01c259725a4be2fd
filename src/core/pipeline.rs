use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::config::PortalConfig;
use crate::core::authenticator::{Authenticator, Credentials, LoginStatus};
use crate::core::month::{MAX_LOOKBACK, TargetMonth};
use crate::core::org_resolver::{OrgIdLookup, OrgIdResolver};
use crate::core::payslip::{DownloadOutcome, PayslipDownloader};
use crate::core::portal::{PortalClient, Session};
use crate::core::salary_comparator::{Comparison, SalaryComparator, SalaryFormatter};
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Extra months to go back past last month.
    pub lookback: u32,
    /// Mask salary figures in console output.
    pub private: bool,
}

/// Where a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    OrgIdUnresolved(OrgIdLookup),
    LoginRefused(LoginStatus),
    PayslipInvalid,
    Completed {
        payslip: PathBuf,
        comparison: Comparison,
    },
}

/// One run: resolve the org id, log in, save the payslip, compare salaries.
/// Each step needs the previous one to succeed; business failures are printed
/// to `out` and end the run, transport and I/O errors are returned.
pub struct Pipeline {
    config: PortalConfig,
    options: RunOptions,
}

impl Pipeline {
    pub fn new(config: PortalConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    pub async fn run<W: Write>(&self, today: NaiveDate, out: &mut W) -> Result<RunOutcome> {
        let month = TargetMonth::from_lookback(today, self.options.lookback).ok_or(AppError::Lookback {
            lookback: self.options.lookback,
            max: MAX_LOOKBACK,
        })?;
        let client = PortalClient::new(self.config.portal_url()?)?;

        let org_id = match self.config.org_id {
            Some(id) => id,
            None => match OrgIdResolver::new().resolve(&client).await? {
                OrgIdLookup::Found(id) => id,
                lookup => {
                    writeln!(
                        out,
                        "Could not resolve the organization id for {}",
                        self.config.subdomain
                    )?;
                    return Ok(RunOutcome::OrgIdUnresolved(lookup));
                }
            },
        };

        let credentials = Credentials::from(&self.config);
        let status = Authenticator::new(&client).login(&credentials, org_id).await?;
        if !status.is_success() {
            for line in status.messages() {
                writeln!(out, "{}", line)?;
            }
            return Ok(RunOutcome::LoginRefused(status));
        }
        let session = Session::new(client, org_id, credentials.username);

        writeln!(out, "Getting salary for {}", month)?;

        let downloader = PayslipDownloader::new(&self.config.folder, &self.config.format);
        let download = downloader.download(&session, month).await?;
        writeln!(out, "{}", download.message())?;
        let payslip = match download {
            DownloadOutcome::Saved(path) => path,
            DownloadOutcome::InvalidPdf => return Ok(RunOutcome::PayslipInvalid),
        };

        let comparison = SalaryComparator::new().compare(&session, month).await?;
        let formatter = SalaryFormatter::new(self.options.private);
        for line in comparison.messages(&formatter) {
            writeln!(out, "{}", line)?;
        }

        info!("Run finished for {}", month);
        Ok(RunOutcome::Completed { payslip, comparison })
    }
}
