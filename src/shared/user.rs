//! User profile types returned by the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile of the signed-in user, returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub profile_pic: String,
}

/// Entry in the contacts sidebar.
///
/// Serialized with an `_id` key, matching the shape the chat client reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub profile_pic: String,
}

impl From<PublicUser> for UserSummary {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            profile_pic: user.profile_pic,
        }
    }
}
