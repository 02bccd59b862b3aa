//! Plain HTTP endpoints alongside GraphQL

pub mod health;
