//! Root GraphQL schema.
//!
//! Each entity contributes a query object and a mutation object; the roots
//! merge them. Adding an entity means adding its objects to the tuples below.

mod gender;
pub mod user;

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use usergraph_core::UserProps;
use usergraph_graph::Repository;

pub use gender::GenderType;
pub use user::{User, UserInput, UserMutation, UserQuery};

/// Repository handle placed in the schema context for User resolvers.
pub type UserRepository = Arc<dyn Repository<UserProps>>;

#[derive(MergedObject, Default)]
#[graphql(name = "Query")]
pub struct QueryRoot(UserQuery);

#[derive(MergedObject, Default)]
#[graphql(name = "Mutation")]
pub struct MutationRoot(UserMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with the user repository as context data.
pub fn build_schema(users: UserRepository) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(users)
    .finish()
}

/// Render the schema in SDL form. Needs no repository.
pub fn sdl() -> String {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .finish()
    .sdl()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_exposes_user_surface() {
        let sdl = sdl();
        for needle in [
            "type User",
            "id: ID!",
            "firstName: String",
            "enum Gender",
            "non_binary",
            "input UserInput",
            "user(id: ID): User",
            "updateUser(id: ID, props: UserInput): User",
            "users: [User]",
            "createUser(props: UserInput): User\n",
            "deleteUser(id: ID): String\n",
        ] {
            assert!(sdl.contains(needle), "SDL missing {needle:?}:\n{sdl}");
        }
        assert!(!sdl.contains("[User!]"), "users must allow null entries");
        assert!(!sdl.contains("User!\n"), "user-returning fields must be nullable");
        assert!(!sdl.contains("String!"), "deleteUser must be nullable");
    }
}
