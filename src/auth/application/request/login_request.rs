use serde::Serialize;

/// Body of `POST /v3/system/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
