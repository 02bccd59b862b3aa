// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{Context, ID, Result};

use crate::db::{Database, DirectorRecord, MovieRecord};
use crate::graphql::error::ApiError;
use crate::graphql::types::{Director, Movie};

/// Movies released before this year are labelled old
const NEW_MOVIE_CUTOFF_YEAR: i32 = 2000;

/// Age label derived from the release year. Never stored.
pub fn movie_age(year: i32) -> &'static str {
    if year < NEW_MOVIE_CUTOFF_YEAR {
        "Old movie"
    } else {
        "New movie"
    }
}

/// Parse a GraphQL `ID` argument into a numeric primary key
pub fn parse_id(entity: &'static str, id: &ID) -> Result<i64, ApiError> {
    id.trim().parse().map_err(|_| ApiError::InvalidId {
        entity,
        value: id.0.clone(),
    })
}

/// Convert a MovieRecord from the database to a GraphQL Movie type
pub(crate) fn movie_record_to_graphql(r: MovieRecord) -> Movie {
    Movie {
        id: ID(r.id.to_string()),
        title: r.title,
        year: r.year,
        record_id: r.id,
        director_id: r.director_id,
    }
}

/// Convert a DirectorRecord from the database to a GraphQL Director type
pub(crate) fn director_record_to_graphql(r: DirectorRecord) -> Director {
    Director {
        id: ID(r.id.to_string()),
        name: r.name,
        surname: r.surname,
        record_id: r.id,
    }
}

/// Extension trait to get the database from GraphQL context
pub trait DatabaseExt {
    fn database(&self) -> Result<&Database>;
}

impl<'a> DatabaseExt for Context<'a> {
    fn database(&self) -> Result<&Database> {
        self.data::<Database>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_age_boundary() {
        assert_eq!(movie_age(1895), "Old movie");
        assert_eq!(movie_age(1999), "Old movie");
        assert_eq!(movie_age(2000), "New movie");
        assert_eq!(movie_age(2017), "New movie");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("Movie", &ID("42".to_string())).unwrap(), 42);
        assert_eq!(parse_id("Movie", &ID(" 7 ".to_string())).unwrap(), 7);
        assert!(matches!(
            parse_id("Movie", &ID("forty-two".to_string())),
            Err(ApiError::InvalidId { entity: "Movie", .. })
        ));
    }

    #[test]
    fn test_record_conversion() {
        let movie = movie_record_to_graphql(MovieRecord {
            id: 5,
            title: "Stalker".to_string(),
            year: 1979,
            director_id: Some(2),
        });
        assert_eq!(movie.id, ID("5".to_string()));
        assert_eq!(movie.record_id, 5);
        assert_eq!(movie.director_id, Some(2));

        let director = director_record_to_graphql(DirectorRecord {
            id: 2,
            name: "Andrei".to_string(),
            surname: "Tarkovsky".to_string(),
        });
        assert_eq!(director.id, ID("2".to_string()));
        assert_eq!(director.surname, "Tarkovsky");
    }
}
