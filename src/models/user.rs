use serde::{Deserialize, Serialize};

/// Profile patch sent by the client; `photo` lands in the user's `image` field.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub email: String,
    pub name: String,
    pub photo: String,
}
