use poem_openapi::{ApiResponse, Object};

#[derive(Object, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Object, Debug)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Self-service password reset body. Deliberately carries no identity field:
/// the target is always the token subject.
#[derive(Object, Debug)]
pub struct ResetRequest {
    pub password: String,
}

/// Bootstrap outcome: the seed records were created
#[derive(ApiResponse, Debug)]
pub enum InitialResponse {
    #[oai(status = 201)]
    Created,
}
