pub mod directors;
pub mod movies;

pub use directors::DirectorQueries;
pub use movies::MovieQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result};

    pub(crate) use crate::graphql::error::{ApiError, ApiResultExt};
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
