use crate::{
    models::{SqlComment, SqlRecentComment},
    Db,
};
use domain::{pagination::WindowSpec, Comment, NewComment, Page};

impl Db {
    /// Persist a validated comment. A single INSERT, so the record either
    /// exists with its assigned id or not at all.
    pub async fn insert_comment(&self, new: &NewComment) -> anyhow::Result<Comment> {
        let created_at = chrono::Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO comments (
                page_id, author, author_email, author_url,
                content, content_html, filter_id, approved, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.page_id)
        .bind(&new.author)
        .bind(&new.author_email)
        .bind(&new.author_url)
        .bind(&new.content)
        .bind(&new.content_html)
        .bind(&new.filter_id)
        .bind(new.approved)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            page_id: new.page_id,
            author: new.author.clone(),
            author_email: new.author_email.clone(),
            author_url: new.author_url.clone(),
            content: new.content.clone(),
            content_html: new.content_html.clone(),
            filter_id: new.filter_id.clone(),
            approved: new.approved,
            created_at,
        })
    }

    /// The slice of approved comments selected by a resolved window. The
    /// order column comes from the `Comment::FIELDS` whitelist; `id` breaks
    /// ties so equal timestamps still yield a total order.
    pub async fn approved_window(
        &self,
        page_id: i64,
        spec: &WindowSpec,
    ) -> anyhow::Result<Vec<Comment>> {
        if !Comment::FIELDS.contains(&spec.order_by.as_str()) {
            anyhow::bail!("unvalidated order_by column: {}", spec.order_by);
        }
        let sql = format!(
            r#"
            SELECT id, page_id, author, author_email, author_url,
                   content, content_html, filter_id, approved, created_at
            FROM comments
            WHERE page_id = ? AND approved = TRUE
            ORDER BY {col} {dir}, id {dir}
            LIMIT ? OFFSET ?
            "#,
            col = spec.order_by,
            dir = spec.direction.as_sql(),
        );
        let rows = sqlx::query_as::<_, SqlComment>(&sql)
            .bind(page_id)
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count_approved(&self, page_id: i64) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE page_id = ? AND approved = TRUE",
        )
        .bind(page_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Newest approved comments across every page, paired with the page
    /// that owns them.
    pub async fn recent_approved(&self, limit: i64) -> anyhow::Result<Vec<(Comment, Page)>> {
        let rows = sqlx::query_as::<_, SqlRecentComment>(
            r#"
            SELECT
                c.id, c.page_id, c.author, c.author_email, c.author_url,
                c.content, c.content_html, c.filter_id, c.approved, c.created_at,
                p.slug AS page_slug,
                p.url AS page_url,
                p.title AS page_title,
                p.comments_enabled AS page_comments_enabled
            FROM comments c
            JOIN pages p ON c.page_id = p.id
            WHERE c.approved = TRUE
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_comment(&self, comment_id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, page_id, author, author_email, author_url,
                   content, content_html, filter_id, approved, created_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Moderation toggle. Returns the updated comment, or None when the id
    /// is unknown.
    pub async fn set_approved(
        &self,
        comment_id: i64,
        approved: bool,
    ) -> anyhow::Result<Option<Comment>> {
        let result = sqlx::query("UPDATE comments SET approved = ? WHERE id = ?")
            .bind(approved)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_comment(comment_id).await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Basic duplicate probe for the garbage filter: same page, same
    /// submitter email, same content.
    pub async fn has_duplicate(
        &self,
        page_id: i64,
        author_email: &str,
        content: &str,
    ) -> anyhow::Result<bool> {
        let exists: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM comments
                WHERE page_id = ? AND author_email = ? AND content = ?
            )
            "#,
        )
        .bind(page_id)
        .bind(author_email)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::Db;
    use domain::pagination::{OrderDirection, WindowSpec};
    use domain::{NewComment, Page};

    async fn test_db() -> Db {
        Db::new("sqlite::memory:").await.unwrap()
    }

    async fn seed_page(db: &Db, slug: &str) -> Page {
        db.create_page(slug, &format!("/blog/{slug}/"), slug, true)
            .await
            .unwrap()
    }

    fn new_comment(page_id: i64, n: usize, approved: bool) -> NewComment {
        NewComment {
            page_id,
            author: format!("author-{n}"),
            author_email: format!("a{n}@example.com"),
            author_url: None,
            content: format!("comment {n}"),
            content_html: format!("<p>comment {n}</p>"),
            filter_id: Some("plain".into()),
            approved,
        }
    }

    fn window(page_number: u32, per_page: u32, direction: OrderDirection) -> WindowSpec {
        WindowSpec {
            page_number,
            per_page,
            order_by: "created_at".into(),
            direction,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let db = test_db().await;
        let page = seed_page(&db, "hello").await;

        let saved = db.insert_comment(&new_comment(page.id, 1, true)).await.unwrap();
        assert!(saved.id > 0);

        let loaded = db.get_comment(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.author, "author-1");
        assert!(loaded.is_approved());
        assert_eq!(loaded.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn window_partitions_approved_comments() {
        let db = test_db().await;
        let page = seed_page(&db, "hello").await;
        for n in 0..25 {
            db.insert_comment(&new_comment(page.id, n, true)).await.unwrap();
        }
        // unapproved comments never enter the window
        db.insert_comment(&new_comment(page.id, 99, false)).await.unwrap();

        assert_eq!(db.count_approved(page.id).await.unwrap(), 25);

        let mut seen = Vec::new();
        for k in 1..=4u32 {
            let slice = db
                .approved_window(page.id, &window(k, 10, OrderDirection::Desc))
                .await
                .unwrap();
            let expected = match k {
                1 | 2 => 10,
                3 => 5,
                _ => 0,
            };
            assert_eq!(slice.len(), expected, "page {k}");
            seen.extend(slice.iter().map(|c| c.id));
        }

        // no overlap, no gaps, newest first
        assert_eq!(seen.len(), 25);
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 25);
        assert!(seen.windows(2).all(|w| w[0] > w[1]));
    }

    #[tokio::test]
    async fn window_honors_order_direction() {
        let db = test_db().await;
        let page = seed_page(&db, "hello").await;
        for n in 0..3 {
            db.insert_comment(&new_comment(page.id, n, true)).await.unwrap();
        }

        let asc = db
            .approved_window(page.id, &window(1, 10, OrderDirection::Asc))
            .await
            .unwrap();
        assert!(asc.windows(2).all(|w| w[0].id < w[1].id));

        let desc = db
            .approved_window(page.id, &window(1, 10, OrderDirection::Desc))
            .await
            .unwrap();
        assert!(desc.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn deleting_a_page_cascades_to_its_comments() {
        let db = test_db().await;
        let page = seed_page(&db, "doomed").await;
        let other = seed_page(&db, "kept").await;
        let orphan = db.insert_comment(&new_comment(page.id, 1, true)).await.unwrap();
        let survivor = db.insert_comment(&new_comment(other.id, 2, true)).await.unwrap();

        assert!(db.delete_page(page.id).await.unwrap());
        assert!(db.get_comment(orphan.id).await.unwrap().is_none());
        assert!(db.get_comment(survivor.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn recent_spans_all_pages_newest_first() {
        let db = test_db().await;
        let first = seed_page(&db, "first").await;
        let second = seed_page(&db, "second").await;
        db.insert_comment(&new_comment(first.id, 1, true)).await.unwrap();
        db.insert_comment(&new_comment(second.id, 2, true)).await.unwrap();
        db.insert_comment(&new_comment(first.id, 3, false)).await.unwrap();

        let recent = db.recent_approved(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0.author, "author-2");
        assert_eq!(recent[0].1.slug, "second");
        assert_eq!(recent[1].1.slug, "first");
    }

    #[tokio::test]
    async fn moderation_toggle_and_duplicate_probe() {
        let db = test_db().await;
        let page = seed_page(&db, "hello").await;
        let saved = db.insert_comment(&new_comment(page.id, 1, false)).await.unwrap();

        assert_eq!(db.count_approved(page.id).await.unwrap(), 0);
        let approved = db.set_approved(saved.id, true).await.unwrap().unwrap();
        assert!(approved.is_approved());
        assert_eq!(db.count_approved(page.id).await.unwrap(), 1);
        assert!(db.set_approved(9999, true).await.unwrap().is_none());

        assert!(db
            .has_duplicate(page.id, "a1@example.com", "comment 1")
            .await
            .unwrap());
        assert!(!db
            .has_duplicate(page.id, "a1@example.com", "different")
            .await
            .unwrap());
    }
}
