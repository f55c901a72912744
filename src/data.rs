use sqlx::SqlitePool;

#[async_trait::async_trait]
pub trait Table {
    type Record<'a>;

    fn get_name(&self) -> &str;
    fn get_pool(&self) -> &SqlitePool;

    async fn create(&self) -> Result<(), sqlx::Error>;
    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<u64, sqlx::Error>;

    async fn is_exist(&self, job_url: &str) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT id FROM {} WHERE job_url = ?", self.get_name());
        Ok(sqlx::query(&query)
            .bind(job_url)
            .fetch_optional(self.get_pool())
            .await?
            .is_some())
    }
}
