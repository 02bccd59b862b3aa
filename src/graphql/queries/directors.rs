use super::prelude::*;

#[derive(Default)]
pub struct DirectorQueries;

#[Object]
impl DirectorQueries {
    /// Get every director
    async fn all_directors(&self, ctx: &Context<'_>) -> Result<Vec<Director>> {
        let db = ctx.database()?;

        let records = db.directors().list().await.api_err()?;

        Ok(records.into_iter().map(director_record_to_graphql).collect())
    }
}
