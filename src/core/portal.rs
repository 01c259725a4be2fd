use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::utils::error::Result;

pub const LOGIN_ENDPOINT: &str = "HilanCenter/Public/api/LoginApi/LoginRequest";
pub const PAYSLIP_ENDPOINT: &str = "Hilannetv2/PersonalFile/PdfPaySlip.aspx";
pub const SUMMARY_ENDPOINT: &str = "Hilannetv2/PersonalFile/SalaryAllSummary.aspx";

/// HTTP access to one portal. Cookies set by the login response are kept in the
/// client's jar and sent with every later request.
#[derive(Clone)]
pub struct PortalClient {
    base_url: Url,
    client: Client,
}

impl PortalClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Public landing page, fetched without credentials.
    pub async fn landing_page(&self) -> Result<String> {
        debug!("Fetching landing page {}", self.base_url);
        let body = self.client.get(self.base_url.clone()).send().await?.text().await?;
        Ok(body)
    }

    pub async fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        Ok(self.client.post(url).form(form).send().await?)
    }
}

/// An authenticated portal context. Built once login succeeds and borrowed by
/// every later step of the run.
#[derive(Clone)]
pub struct Session {
    client: PortalClient,
    org_id: u64,
    username: String,
}

impl Session {
    pub fn new(client: PortalClient, org_id: u64, username: impl Into<String>) -> Self {
        Self {
            client,
            org_id,
            username: username.into(),
        }
    }

    pub fn client(&self) -> &PortalClient {
        &self.client
    }

    pub fn org_id(&self) -> u64 {
        self.org_id
    }

    /// The portal identifies employees by org id and username run together.
    pub fn user_id(&self) -> String {
        format!("{}{}", self.org_id, self.username)
    }
}
