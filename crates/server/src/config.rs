use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub comments: CommentSettings,
    pub security: SecuritySettings,
    pub smtp: Option<SmtpSettings>,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentSettings {
    /// Comment POSTs target the page URL itself instead of `<url>comments`.
    pub post_to_page: bool,
    /// Moderation policy: persist new comments as already approved.
    pub auto_approve: bool,
    pub notification: bool,
    /// Also notify for submissions still awaiting moderation.
    pub notify_unapproved: bool,
    pub per_page: u32,
    /// Path segment between a page URL and the comment page number.
    pub pagination_segment: String,
    pub simple_spam_filter: bool,
    pub max_links: usize,
    pub spam_question: String,
    pub spam_answer: String,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    pub admin_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub to: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/comments.db")?
            .set_default("comments.post_to_page", false)?
            .set_default("comments.auto_approve", false)?
            .set_default("comments.notification", false)?
            .set_default("comments.notify_unapproved", false)?
            .set_default("comments.per_page", 10)?
            .set_default("comments.pagination_segment", "comments/page/")?
            .set_default("comments.simple_spam_filter", true)?
            .set_default("comments.max_links", 3)?
            .set_default("comments.spam_question", "What day comes after Monday?")?
            .set_default("comments.spam_answer", "Tuesday")?
            .set_default("security.admin_token", "admin_secret_123")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("COMMENTS_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("COMMENTS_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
