use chrono::NaiveDateTime;
use domain::{Comment, Page};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlPage {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub title: String,
    pub comments_enabled: bool,
}

impl From<SqlPage> for Page {
    fn from(sql: SqlPage) -> Self {
        Page {
            id: sql.id,
            slug: sql.slug,
            url: sql.url,
            title: sql.title,
            comments_enabled: sql.comments_enabled,
        }
    }
}

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub page_id: i64,
    pub author: String,
    pub author_email: String,
    pub author_url: Option<String>,
    pub content: String,
    pub content_html: String,
    pub filter_id: Option<String>,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            page_id: sql.page_id,
            author: sql.author,
            author_email: sql.author_email,
            author_url: sql.author_url,
            content: sql.content,
            content_html: sql.content_html,
            filter_id: sql.filter_id,
            approved: sql.approved,
            created_at: sql.created_at,
        }
    }
}

// Joined row for the recent-comments listing (comment plus owning page).
#[derive(FromRow)]
pub struct SqlRecentComment {
    pub id: i64,
    pub page_id: i64,
    pub author: String,
    pub author_email: String,
    pub author_url: Option<String>,
    pub content: String,
    pub content_html: String,
    pub filter_id: Option<String>,
    pub approved: bool,
    pub created_at: NaiveDateTime,
    pub page_slug: String,
    pub page_url: String,
    pub page_title: String,
    pub page_comments_enabled: bool,
}

impl From<SqlRecentComment> for (Comment, Page) {
    fn from(sql: SqlRecentComment) -> Self {
        (
            Comment {
                id: sql.id,
                page_id: sql.page_id,
                author: sql.author,
                author_email: sql.author_email,
                author_url: sql.author_url,
                content: sql.content,
                content_html: sql.content_html,
                filter_id: sql.filter_id,
                approved: sql.approved,
                created_at: sql.created_at,
            },
            Page {
                id: sql.page_id,
                slug: sql.page_slug,
                url: sql.page_url,
                title: sql.page_title,
                comments_enabled: sql.page_comments_enabled,
            },
        )
    }
}
