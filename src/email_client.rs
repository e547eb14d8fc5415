use crate::domain::EmailAddress;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Relays notifications through the mail provider's HTTP API.
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    authorization_token: SecretString,
}

/// Who a message is addressed to, who it claims to come from, and who
/// answers to it.
pub struct Envelope<'a> {
    pub to: &'a EmailAddress,
    pub from: &'a EmailAddress,
    pub reply_to: &'a EmailAddress,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        authorization_token: SecretString,
        timeout_duration: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Dispatch an email through the mail API",
        skip(self, envelope, html_content, text_content),
        fields(recipient = %envelope.to, reply_to = %envelope.reply_to)
    )]
    pub async fn send_email(
        &self,
        envelope: Envelope<'_>,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/api/send", self.base_url);
        let request_body = SendEmailRequest {
            from: EmailInfo {
                email: envelope.from.as_ref(),
                name: "",
            },
            to: vec![EmailInfo {
                email: envelope.to.as_ref(),
                name: "",
            }],
            reply_to: EmailInfo {
                email: envelope.reply_to.as_ref(),
                name: "",
            },
            subject: subject.into(),
            text: text_content.into(),
            html: html_content.into(),
            category: "intake".into(),
        };
        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.authorization_token.expose_secret()),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EmailInfo<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendEmailRequest<'a> {
    #[serde(borrow)]
    pub from: EmailInfo<'a>,
    #[serde(borrow)]
    pub to: Vec<EmailInfo<'a>>,
    #[serde(borrow)]
    pub reply_to: EmailInfo<'a>,
    #[serde(borrow)]
    pub subject: Cow<'a, str>,
    #[serde(borrow)]
    pub text: Cow<'a, str>,
    #[serde(borrow)]
    pub html: Cow<'a, str>,
    #[serde(borrow)]
    pub category: Cow<'a, str>,
}
