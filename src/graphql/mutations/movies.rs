use super::prelude::*;

/// How an update touches the movie's director
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DirectorChange {
    Keep,
    Existing(i64),
    Create { name: String, surname: String },
}

impl DirectorChange {
    /// `director_id` wins over a name; a new director needs both name and surname.
    pub(crate) fn from_args(
        director_id: Option<i64>,
        name: Option<String>,
        surname: Option<String>,
    ) -> Self {
        match (director_id, name, surname) {
            (Some(id), _, _) => Self::Existing(id),
            (None, Some(name), Some(surname)) => Self::Create { name, surname },
            _ => Self::Keep,
        }
    }
}

#[derive(Default)]
pub struct MovieMutations;

#[Object]
impl MovieMutations {
    /// Create a movie. New movies have no director.
    async fn create_movie(
        &self,
        ctx: &Context<'_>,
        title: String,
        year: i32,
    ) -> Result<MovieCreatePayload> {
        let db = ctx.database()?;

        let record = db
            .movies()
            .create(CreateMovie { title, year })
            .await
            .api_err()?;

        tracing::info!(
            movie_id = record.id,
            movie_title = %record.title,
            "Created movie: {}",
            record.title
        );

        Ok(MovieCreatePayload {
            movie: Some(movie_record_to_graphql(record)),
        })
    }

    /// Update a movie. Only the supplied fields change.
    ///
    /// `directorId` assigns an existing director. Otherwise `directorName`
    /// together with `directorSurname` creates a brand new director, even if one
    /// with the same name already exists.
    async fn update_movie(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        year: Option<i32>,
        director_id: Option<i64>,
        director_name: Option<String>,
        director_surname: Option<String>,
    ) -> Result<MovieUpdatePayload> {
        let db = ctx.database()?;
        let movie_id = parse_id("Movie", &id).api_err()?;

        let mut movie = db
            .movies()
            .find_by_id(movie_id)
            .await
            .api_err()?
            .ok_or_else(|| ApiError::not_found("Movie", movie_id))
            .api_err()?;

        if let Some(title) = title {
            movie.title = title;
        }

        if let Some(year) = year {
            movie.year = year;
        }

        match DirectorChange::from_args(director_id, director_name, director_surname) {
            DirectorChange::Keep => {}
            DirectorChange::Existing(director_id) => {
                let director = db
                    .directors()
                    .find_by_id(director_id)
                    .await
                    .api_err()?
                    .ok_or_else(|| ApiError::not_found("Director", director_id))
                    .api_err()?;
                movie.director_id = Some(director.id);
            }
            DirectorChange::Create { name, surname } => {
                // Committed on its own; it stays even if saving the movie fails
                let director = db
                    .directors()
                    .create(CreateDirector { name, surname })
                    .await
                    .api_err()?;
                tracing::info!(
                    director_id = director.id,
                    movie_id = movie.id,
                    "Created director {} {}",
                    director.name,
                    director.surname
                );
                movie.director_id = Some(director.id);
            }
        }

        let saved = db.movies().save(&movie).await.api_err()?;

        tracing::info!(movie_id = saved.id, movie_title = %saved.title, "Updated movie");

        Ok(MovieUpdatePayload {
            movie: Some(movie_record_to_graphql(saved)),
        })
    }

    /// Delete a movie. Its director is left in place.
    async fn delete_movie(&self, ctx: &Context<'_>, id: ID) -> Result<MovieDeletePayload> {
        let db = ctx.database()?;
        let movie_id = parse_id("Movie", &id).api_err()?;

        let movie = db
            .movies()
            .find_by_id(movie_id)
            .await
            .api_err()?
            .ok_or_else(|| ApiError::not_found("Movie", movie_id))
            .api_err()?;

        db.movies().delete(&movie).await.api_err()?;

        tracing::info!(movie_id = movie.id, movie_title = %movie.title, "Deleted movie");

        Ok(MovieDeletePayload {
            movie: None,
            success: Some(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_director_id_takes_precedence() {
        assert_matches!(
            DirectorChange::from_args(Some(4), s("Sofia"), s("Coppola")),
            DirectorChange::Existing(4)
        );
    }

    #[test]
    fn test_name_and_surname_create() {
        assert_eq!(
            DirectorChange::from_args(None, s("Sofia"), s("Coppola")),
            DirectorChange::Create {
                name: "Sofia".to_string(),
                surname: "Coppola".to_string(),
            }
        );
    }

    #[test]
    fn test_partial_name_keeps_director() {
        assert_matches!(
            DirectorChange::from_args(None, s("Sofia"), None),
            DirectorChange::Keep
        );
        assert_matches!(
            DirectorChange::from_args(None, None, s("Coppola")),
            DirectorChange::Keep
        );
        assert_matches!(DirectorChange::from_args(None, None, None), DirectorChange::Keep);
    }
}
