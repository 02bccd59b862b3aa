use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Get every movie
    async fn all_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let db = ctx.database()?;

        let records = db.movies().list().await.api_err()?;

        Ok(records.into_iter().map(movie_record_to_graphql).collect())
    }

    /// Look up a single movie by ID or exact title.
    ///
    /// `id` takes precedence when both are given. A missing movie, or a call
    /// with neither argument, yields `null` rather than an error.
    async fn movie(
        &self,
        ctx: &Context<'_>,
        id: Option<i64>,
        title: Option<String>,
    ) -> Result<Option<Movie>> {
        let db = ctx.database()?;

        if let Some(id) = id {
            let record = db.movies().find_by_id(id).await.api_err()?;
            return Ok(record.map(movie_record_to_graphql));
        }

        if let Some(title) = title {
            let mut records = db.movies().find_by_title(&title).await.api_err()?;
            if records.len() > 1 {
                tracing::warn!(title = %title, "Title lookup matched more than one movie");
                return Err(ApiError::MultipleObjectsReturned { entity: "Movie" }.extend());
            }
            return Ok(records.pop().map(movie_record_to_graphql));
        }

        Ok(None)
    }
}
