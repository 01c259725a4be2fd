use serde::Deserialize;
use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::core::portal::{PortalClient, LOGIN_ENDPOINT};
use crate::utils::error::Result;
use crate::utils::text::rtl;

/// Portal code for a transient login failure ("try again later").
pub const CODE_TEMPORARY_ERROR: i64 = 18;
/// Portal code for an expired password.
pub const CODE_CHANGE_PASSWORD: i64 = 6;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl From<&PortalConfig> for Credentials {
    fn from(config: &PortalConfig) -> Self {
        Credentials {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

/// Body of the login endpoint's JSON reply. Absent and `null` fields read as
/// false, zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(rename = "IsFail")]
    pub is_fail: Option<bool>,
    #[serde(rename = "IsShowCaptcha")]
    pub is_show_captcha: Option<bool>,
    #[serde(rename = "Code")]
    pub code: Option<i64>,
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    CaptchaRequired,
    TemporaryError,
    PasswordChangeRequired,
    Failed { message: String },
}

impl LoginStatus {
    /// Classifies a reply. Captcha wins over the numeric codes, which win over
    /// the generic failure.
    pub fn classify(response: &LoginResponse) -> Self {
        if !response.is_fail.unwrap_or(false) {
            LoginStatus::Success
        } else if response.is_show_captcha.unwrap_or(false) {
            LoginStatus::CaptchaRequired
        } else if response.code == Some(CODE_TEMPORARY_ERROR) {
            LoginStatus::TemporaryError
        } else if response.code == Some(CODE_CHANGE_PASSWORD) {
            LoginStatus::PasswordChangeRequired
        } else {
            LoginStatus::Failed {
                message: response.error_message.clone().unwrap_or_default(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginStatus::Success)
    }

    /// Console lines explaining a refused login; empty on success.
    pub fn messages(&self) -> Vec<String> {
        match self {
            LoginStatus::Success => Vec::new(),
            LoginStatus::CaptchaRequired => vec![
                "Login failed. You need to go to the Hilan website and solve a captcha challenge before trying again.".to_string(),
            ],
            LoginStatus::TemporaryError => vec![
                "There was a temporary login error. Please try again in a few minutes.".to_string(),
            ],
            LoginStatus::PasswordChangeRequired => vec![
                "You need to change your password. Please do so on the Hilan website.".to_string(),
            ],
            LoginStatus::Failed { message } => vec![
                "Login failed. Please make sure the credentials in conf.yaml are correct and try again.".to_string(),
                "Hilan Message:".to_string(),
                rtl(message),
            ],
        }
    }
}

pub struct Authenticator<'a> {
    client: &'a PortalClient,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a PortalClient) -> Self {
        Self { client }
    }

    /// Posts the credentials. On success the client's cookie jar holds the
    /// authenticated session.
    pub async fn login(&self, credentials: &Credentials, org_id: u64) -> Result<LoginStatus> {
        let org_id = org_id.to_string();
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("orgId", org_id.as_str()),
        ];

        let response: LoginResponse = self
            .client
            .post_form(LOGIN_ENDPOINT, &form)
            .await?
            .json()
            .await?;

        let status = LoginStatus::classify(&response);
        if status.is_success() {
            info!("Logged in as {}", credentials.username);
        } else {
            warn!("Login refused: {:?} (code {:?})", status, response.code);
        }

        Ok(status)
    }
}
