use crate::{models::SqlPage, Db};
use domain::{pagination, Page};

impl Db {
    pub async fn create_page(
        &self,
        slug: &str,
        url: &str,
        title: &str,
        comments_enabled: bool,
    ) -> anyhow::Result<Page> {
        let result = sqlx::query(
            r#"
            INSERT INTO pages (slug, url, title, comments_enabled)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(slug)
        .bind(url)
        .bind(title)
        .bind(comments_enabled)
        .execute(&self.pool)
        .await?;

        Ok(Page {
            id: result.last_insert_rowid(),
            slug: slug.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            comments_enabled,
        })
    }

    pub async fn find_page_by_url(&self, url: &str) -> anyhow::Result<Option<Page>> {
        let row = sqlx::query_as::<_, SqlPage>(
            r#"
            SELECT id, slug, url, title, comments_enabled
            FROM pages
            WHERE url = ?
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Page identity for an inbound request path. The bare page URL and its
    /// paginated variant (`<url><segment><n>/`) address the same page.
    pub async fn find_page_by_request_path(
        &self,
        path: &str,
        pagination_segment: &str,
    ) -> anyhow::Result<Option<Page>> {
        if let Some(page) = self.find_page_by_url(path).await? {
            return Ok(Some(page));
        }
        if let Some((base, _)) = pagination::split_paginated_path(path, pagination_segment) {
            return self.find_page_by_url(&base).await;
        }
        Ok(None)
    }

    /// Flip the page's comment gate. None for an unknown page id.
    pub async fn set_comments_enabled(
        &self,
        page_id: i64,
        enabled: bool,
    ) -> anyhow::Result<Option<Page>> {
        let result = sqlx::query("UPDATE pages SET comments_enabled = ? WHERE id = ?")
            .bind(enabled)
            .bind(page_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, SqlPage>(
            r#"
            SELECT id, slug, url, title, comments_enabled
            FROM pages
            WHERE id = ?
            "#,
        )
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Removes the page and, through the foreign key cascade, every comment
    /// attached to it.
    pub async fn delete_page(&self, page_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(page_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::Db;

    #[tokio::test]
    async fn comments_enabled_toggle_persists() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let page = db.create_page("p", "/p/", "P", true).await.unwrap();

        let updated = db
            .set_comments_enabled(page.id, false)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.comments_enabled);

        let fetched = db.find_page_by_url("/p/").await.unwrap().unwrap();
        assert!(!fetched.comments_enabled);

        assert!(db.set_comments_enabled(999, true).await.unwrap().is_none());
    }
}
