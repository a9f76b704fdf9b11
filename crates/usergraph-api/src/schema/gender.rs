use async_graphql::Enum;
use usergraph_core::Gender;

/// GraphQL face of [`Gender`]. Value names are the lowercase wire names
/// clients already send.
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "Gender")]
pub enum GenderType {
    #[graphql(name = "non_specified")]
    NonSpecified,
    #[graphql(name = "female")]
    Female,
    #[graphql(name = "male")]
    Male,
    #[graphql(name = "non_binary")]
    NonBinary,
}

impl From<Gender> for GenderType {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::NonSpecified => Self::NonSpecified,
            Gender::Female => Self::Female,
            Gender::Male => Self::Male,
            Gender::NonBinary => Self::NonBinary,
        }
    }
}

impl From<GenderType> for Gender {
    fn from(gender: GenderType) -> Self {
        match gender {
            GenderType::NonSpecified => Self::NonSpecified,
            GenderType::Female => Self::Female,
            GenderType::Male => Self::Male,
            GenderType::NonBinary => Self::NonBinary,
        }
    }
}
