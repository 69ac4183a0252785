use crate::{domain::SubscriberEmail, email_client::EmailClient};
use anyhow::Context;
use askama::Template;
use axum::http::Uri;

/// Which confirmation message a mailing list change triggers.
#[derive(Clone, Copy, Debug)]
pub enum Confirmation {
    Subscribed,
    Unsubscribed,
}

impl Confirmation {
    pub fn subject(&self) -> &'static str {
        match self {
            Confirmation::Subscribed => "Thanks for Subscribing!",
            Confirmation::Unsubscribed => "Unsubscribe Confirmation",
        }
    }
}

/// Delivers the confirmation on a detached task. Delivery failures are
/// logged and swallowed; they must never alter the outcome of the request
/// that triggered them.
pub fn send_detached(
    email_client: EmailClient,
    base_url: Uri,
    recipient: SubscriberEmail,
    confirmation: Confirmation,
) {
    tokio::spawn(async move {
        if let Err(e) = send(&email_client, &base_url, &recipient, confirmation).await {
            tracing::warn!(
                error_cause_chain = ?e,
                error.message = %e,
                "Failed to deliver {confirmation:?} confirmation to {recipient}. Skipping."
            );
        }
    });
}

async fn send(
    email_client: &EmailClient,
    base_url: &Uri,
    recipient: &SubscriberEmail,
    confirmation: Confirmation,
) -> Result<(), anyhow::Error> {
    let (html_content, text_content) = match confirmation {
        Confirmation::Subscribed => {
            let unsubscribe_url = unsubscribe_url(base_url, recipient)?;
            let html = SubscribeHtml {
                recipient: recipient.as_ref(),
                unsubscribe_url: &unsubscribe_url,
            }
            .render();
            let text = SubscribeText {
                recipient: recipient.as_ref(),
                unsubscribe_url: &unsubscribe_url,
            }
            .render();

            (html, text)
        }
        Confirmation::Unsubscribed => {
            let html = UnsubscribeHtml {
                recipient: recipient.as_ref(),
            }
            .render();
            let text = UnsubscribeText {
                recipient: recipient.as_ref(),
            }
            .render();

            (html, text)
        }
    };

    let html_content = html_content.context("Failed to render confirmation html body")?;
    let text_content = text_content.context("Failed to render confirmation text body")?;

    email_client
        .send_email(
            recipient,
            confirmation.subject(),
            &html_content,
            &text_content,
        )
        .await
        .context("Failed to send confirmation email")
}

fn unsubscribe_url(base_url: &Uri, recipient: &SubscriberEmail) -> Result<String, anyhow::Error> {
    let query = serde_urlencoded::to_string([
        ("action", "unsubscribe"),
        ("email", recipient.as_ref()),
    ])
    .context("Failed to encode unsubscribe link query")?;

    Ok(format!(
        "{}/api/mailing-list?{query}",
        base_url.to_string().trim_end_matches('/'),
    ))
}

#[derive(Template)]
#[template(path = "email/subscribe.html")]
struct SubscribeHtml<'a> {
    recipient: &'a str,
    unsubscribe_url: &'a str,
}

#[derive(Template)]
#[template(path = "email/subscribe.txt")]
struct SubscribeText<'a> {
    recipient: &'a str,
    unsubscribe_url: &'a str,
}

#[derive(Template)]
#[template(path = "email/unsubscribe.html")]
struct UnsubscribeHtml<'a> {
    recipient: &'a str,
}

#[derive(Template)]
#[template(path = "email/unsubscribe.txt")]
struct UnsubscribeText<'a> {
    recipient: &'a str,
}
