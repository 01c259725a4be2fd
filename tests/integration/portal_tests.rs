use super::*;
use hilan_payslip::core::{
    authenticator::{Authenticator, Credentials, LoginStatus},
    month::TargetMonth,
    org_resolver::{OrgIdLookup, OrgIdResolver},
    payslip::{DownloadOutcome, PayslipDownloader},
    salary_comparator::{Comparison, SalaryComparator, SalaryFormatter},
};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, query_param};

fn credentials() -> Credentials {
    Credentials {
        username: USERNAME.to_string(),
        password: "xyz".to_string(),
    }
}

fn september() -> TargetMonth {
    TargetMonth::from_lookback(today(), 0).unwrap()
}

#[tokio::test]
async fn test_resolve_org_id() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_landing_page(&server, LANDING_PAGE).await;

    let lookup = OrgIdResolver::new().resolve(&test_client(&server)).await?;
    assert_eq!(lookup, OrgIdLookup::Found(12345));
    Ok(())
}

#[tokio::test]
async fn test_resolve_org_id_missing() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_landing_page(&server, r#""initialData\":{\"IsShowOrganizationSelection\":false,"#).await;

    let lookup = OrgIdResolver::new().resolve(&test_client(&server)).await?;
    assert_eq!(lookup, OrgIdLookup::Missing);
    assert_eq!(lookup.org_id(), None);
    Ok(())
}

#[tokio::test]
async fn test_login_success_posts_form() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint(LOGIN_ENDPOINT)))
        .and(body_string("username=abc&password=xyz&orgId=12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"IsFail": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let status = Authenticator::new(&client).login(&credentials(), ORG_ID).await?;

    assert_eq!(status, LoginStatus::Success);
    Ok(())
}

#[rstest]
#[case(json!({"IsFail": true, "IsShowCaptcha": true}),
       "Login failed. You need to go to the Hilan website and solve a captcha challenge before trying again.")]
#[case(json!({"IsFail": true, "Code": 18}),
       "There was a temporary login error. Please try again in a few minutes.")]
#[case(json!({"IsFail": true, "Code": 6}),
       "You need to change your password. Please do so on the Hilan website.")]
#[case(json!({"IsFail": true}),
       "Login failed. Please make sure the credentials in conf.yaml are correct and try again.\nHilan Message:\n")]
#[tokio::test]
async fn test_login_refusals(#[case] reply: serde_json::Value, #[case] expected: &str) {
    let server = MockServer::start().await;
    mount_login(&server, reply).await;

    let client = test_client(&server);
    let status = Authenticator::new(&client)
        .login(&credentials(), ORG_ID)
        .await
        .unwrap();

    assert!(!status.is_success());
    assert_eq!(status.messages().join("\n"), expected);
}

#[tokio::test]
async fn test_login_cookie_is_reused() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint(LOGIN_ENDPOINT)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "h4=session-token; Path=/")
                .set_body_json(json!({"IsFail": false})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint(PAYSLIP_ENDPOINT)))
        .and(header("cookie", "h4=session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let status = Authenticator::new(&client).login(&credentials(), ORG_ID).await?;
    assert!(status.is_success());

    let folder = tempfile::tempdir()?;
    let session = Session::new(client, ORG_ID, USERNAME);
    let outcome = PayslipDownloader::new(folder.path(), "%Y-%m.pdf")
        .download(&session, september())
        .await?;

    assert!(outcome.is_saved());
    Ok(())
}

#[tokio::test]
async fn test_download_ok() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint(PAYSLIP_ENDPOINT)))
        .and(query_param("Date", "01/09/2026"))
        .and(query_param("UserId", "12345abc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let folder = tempfile::tempdir()?;
    let outcome = PayslipDownloader::new(folder.path(), "%Y-%m.pdf")
        .download(&test_session(&server), september())
        .await?;

    let expected = folder.path().join("2026-09.pdf");
    assert_eq!(outcome, DownloadOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::read(&expected)?, PDF_BYTES);
    Ok(())
}

#[tokio::test]
async fn test_download_rejects_non_pdf() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_payslip(&server, b"<html>Your session has expired</html>").await;

    let folder = tempfile::tempdir()?;
    let outcome = PayslipDownloader::new(folder.path(), "%Y-%m.pdf")
        .download(&test_session(&server), september())
        .await?;

    assert_eq!(outcome, DownloadOutcome::InvalidPdf);
    assert!(!folder.path().join("2026-09.pdf").exists());
    assert_eq!(std::fs::read_dir(folder.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_compare_months_large_gap() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_summary(&server, &summary_html("1", "2")).await;

    let comparison = SalaryComparator::new()
        .compare(&test_session(&server), september())
        .await?;

    assert_eq!(comparison.salary(), Some(2));
    assert!(!comparison.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_compare_months_ok() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_summary(&server, &summary_html("1", "1")).await;

    let comparison = SalaryComparator::new()
        .compare(&test_session(&server), september())
        .await?;

    assert_eq!(comparison.salary(), Some(1));
    assert!(comparison.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_compare_months_fail_fetch() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_summary(&server, "").await;

    let comparison = SalaryComparator::new()
        .compare(&test_session(&server), september())
        .await?;

    assert_eq!(comparison, Comparison::Unavailable);
    assert_eq!(
        comparison.messages(&SalaryFormatter::new(false)),
        vec!["Could not fetch the salary summary".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_compare_months_posts_date_range() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint(SUMMARY_ENDPOINT)))
        .and(body_string_contains(
            "__DatePicker_State=01%2F08%2F2026%2C0%2C30%2F09%2F2026%2C0",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(summary_html("15000", "15050")))
        .expect(1)
        .mount(&server)
        .await;

    let comparison = SalaryComparator::new()
        .compare(&test_session(&server), september())
        .await?;

    assert!(comparison.is_ok());
    assert_eq!(comparison.salary(), Some(15050));
    Ok(())
}
