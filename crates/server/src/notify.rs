//! Notification worker. Comment events arrive on a channel and leave as
//! email; a slow or failing mailer only ever costs log lines, never an HTTP
//! response.

use domain::NotificationEvent;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::SmtpSettings;

pub fn spawn(
    smtp: Option<SmtpSettings>,
    mut rx: mpsc::Receiver<NotificationEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mailer = match &smtp {
            Some(cfg) => match build_mailer(cfg) {
                Ok(m) => Some(m),
                Err(e) => {
                    tracing::error!("SMTP transport setup failed, notifications disabled: {e:#}");
                    None
                }
            },
            None => None,
        };

        while let Some(event) = rx.recv().await {
            let NotificationEvent::CommentPosted { page, comment } = event;
            let (Some(mailer), Some(cfg)) = (&mailer, &smtp) else {
                tracing::debug!(
                    comment_id = comment.id,
                    "notifications not configured, dropping event"
                );
                continue;
            };
            match build_message(cfg, &page, &comment) {
                Ok(message) => {
                    if let Err(e) = mailer.send(message).await {
                        tracing::warn!(comment_id = comment.id, "comment notification failed: {e}");
                    }
                }
                Err(e) => {
                    tracing::warn!(comment_id = comment.id, "bad notification message: {e:#}");
                }
            }
        }
    })
}

fn build_mailer(cfg: &SmtpSettings) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)?.port(cfg.port);
    if let (Some(user), Some(pass)) = (&cfg.username, &cfg.password) {
        builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
    }
    Ok(builder.build())
}

fn build_message(
    cfg: &SmtpSettings,
    page: &domain::Page,
    comment: &domain::Comment,
) -> anyhow::Result<Message> {
    let from: Mailbox = cfg.from.parse()?;
    let to: Mailbox = cfg.to.parse()?;
    let status = if comment.is_approved() {
        "approved"
    } else {
        "awaiting moderation"
    };
    let body = format!(
        "{author} <{email}> commented on {url} ({status}):\n\n{content}\n",
        author = comment.author,
        email = comment.author_email,
        url = page.url,
        status = status,
        content = comment.content,
    );
    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(format!("New comment on {}", page.title))
        .body(body)?)
}
