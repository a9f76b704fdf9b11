//! User type, input, queries and mutations.

use async_graphql::{Context, Error, InputObject, Object, Result, SimpleObject, ID};
use usergraph_core::{NodeId, UserProps};
use usergraph_graph::Record;

use super::gender::GenderType;
use super::UserRepository;

/// A user node.
#[derive(SimpleObject, Debug, Clone)]
pub struct User {
    /// user identifier.
    pub id: ID,
    /// name of user.
    pub username: Option<String>,
    /// email of user.
    pub email: Option<String>,
    /// gender of user.
    pub gender: Option<GenderType>,
    /// firstName of user.
    pub first_name: Option<String>,
    /// lastName of user.
    pub last_name: Option<String>,
}

impl From<Record<UserProps>> for User {
    fn from(record: Record<UserProps>) -> Self {
        let props = record.entity;
        Self {
            id: ID(record.id.to_string()),
            username: props.username,
            email: props.email,
            gender: props.gender.map(GenderType::from),
            first_name: props.first_name,
            last_name: props.last_name,
        }
    }
}

/// Writable user fields. The id is always assigned by the store.
#[derive(InputObject, Debug, Clone, Default)]
pub struct UserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub gender: Option<GenderType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserInput> for UserProps {
    fn from(input: UserInput) -> Self {
        Self {
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender.map(Into::into),
        }
    }
}

fn repository<'a>(ctx: &Context<'a>) -> Result<&'a UserRepository> {
    ctx.data::<UserRepository>()
}

fn parse_id(id: Option<ID>) -> Result<NodeId> {
    let id = id.ok_or_else(|| Error::new("argument \"id\" is required"))?;
    Ok(id.parse::<NodeId>()?)
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Look up one user. Null when no user has this id.
    async fn user(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<User>> {
        let id = parse_id(id)?;
        let record = repository(ctx)?.get(id).await?;
        Ok(record.map(User::from))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<User>>>> {
        let records = repository(ctx)?.get_all().await?;
        Ok(Some(
            records.into_iter().map(|r| Some(User::from(r))).collect(),
        ))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        props: Option<UserInput>,
    ) -> Result<Option<User>> {
        let props = UserProps::from(props.unwrap_or_default());
        let record = repository(ctx)?.create(&props).await?;
        tracing::info!(id = %record.id, "User created");
        Ok(Some(record.into()))
    }

    /// Overwrite the supplied fields. Null when no user has this id.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        props: Option<UserInput>,
    ) -> Result<Option<User>> {
        let id = parse_id(id)?;
        let props = UserProps::from(props.unwrap_or_default());
        let record = repository(ctx)?.update(id, &props).await?;
        Ok(record.map(User::from))
    }

    /// Delete a user. Succeeds whether or not the user existed.
    async fn delete_user(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<String>> {
        let id = parse_id(id)?;
        let deleted = repository(ctx)?.delete(id).await?;
        tracing::info!(%id, deleted, "User delete requested");
        Ok(Some(format!(
            "Success message for delete procedure with id: {id}"
        )))
    }
}
