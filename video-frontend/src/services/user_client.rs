use crate::error::ClientError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserEnvelope, UserProfile};
use crate::services::backend::ServiceHttp;

/// Client for the user service (registration, login, profiles).
pub struct UserClient {
    http: ServiceHttp,
}

impl UserClient {
    pub fn new(http: ServiceHttp) -> Self {
        Self { http }
    }

    /// `POST /api/users/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        let url = self.http.url(&["api", "users", "register"])?;
        self.http
            .send("register", self.http.post(&url).json(request))
            .await?;

        tracing::info!(username = %request.username, "User registered");
        Ok(())
    }

    /// `POST /api/users/login`, returning the issued bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ClientError> {
        let url = self.http.url(&["api", "users", "login"])?;
        let response: LoginResponse = self
            .http
            .send_json("login", self.http.post(&url).json(request))
            .await?;

        Ok(response.token)
    }

    /// `GET /api/users/user/{id}`
    pub async fn get_user(&self, user_id: &str, token: &str) -> Result<UserProfile, ClientError> {
        let url = self.http.url(&["api", "users", "user", user_id])?;
        let envelope: UserEnvelope = self
            .http
            .send_json("get_user", self.http.get(&url).bearer_auth(token))
            .await?;

        Ok(envelope.user)
    }
}
