pub mod movies;

pub use movies::MovieMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::error::{ApiError, ApiResultExt};
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
