//! Client for the form-relay service that turns contact-form submissions
//! into email.

use std::time::Duration;

use folio_core::inquiry::InquirySubmission;
use reqwest::{Client, header};
use tracing::{info, warn};

use crate::{Error, Result};

pub const DEFAULT_RELAY_ENDPOINT: &str =
  "https://formsubmit.co/ajax/liamvwoudenberg@gmail.com";

/// Posts [`InquirySubmission`]s as JSON to a single endpoint.
#[derive(Clone)]
pub struct InquiryRelay {
  client:   Client,
  endpoint: String,
}

impl InquiryRelay {
  pub fn new(endpoint: impl Into<String>) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, endpoint: endpoint.into() })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }

  /// `POST {endpoint}` with the submission as the JSON body.
  pub async fn submit(&self, submission: &InquirySubmission) -> Result<()> {
    let resp = self
      .client
      .post(&self.endpoint)
      .header(header::ACCEPT, "application/json")
      .json(submission)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      warn!(%status, "inquiry relay rejected submission");
      return Err(Error::Status(status));
    }
    info!(subject = %submission.subject, "inquiry relayed");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use httpmock::MockServer;
  use reqwest::StatusCode;
  use serde_json::json;

  use super::*;

  fn submission() -> InquirySubmission {
    InquirySubmission {
      name:     "Ana".into(),
      email:    "ana@example.com".into(),
      dates:    "June 2026".into(),
      message:  "Hello".into(),
      subject:  "Inquiry: Brand Film Package".into(),
      template: "table".into(),
    }
  }

  #[tokio::test]
  async fn submit_posts_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when
        .method("POST")
        .path("/ajax/studio")
        .header("accept", "application/json")
        .json_body(json!({
          "name": "Ana",
          "email": "ana@example.com",
          "dates": "June 2026",
          "message": "Hello",
          "_subject": "Inquiry: Brand Film Package",
          "_template": "table",
        }));
      then.status(200).json_body(json!({ "success": "true" }));
    });

    let relay = InquiryRelay::new(server.url("/ajax/studio")).unwrap();
    relay.submit(&submission()).await.unwrap();
    mock.assert();
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method("POST").path("/ajax/studio");
      then.status(422).json_body(json!({ "success": "false" }));
    });

    let relay = InquiryRelay::new(server.url("/ajax/studio")).unwrap();
    assert!(matches!(
      relay.submit(&submission()).await,
      Err(Error::Status(StatusCode::UNPROCESSABLE_ENTITY))
    ));
  }
}
