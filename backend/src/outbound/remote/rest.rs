//! REST adapter for the hosted data service.
//!
//! Owns transport details only: URL construction, auth headers, status
//! mapping, and JSON decoding. Collection queries use the service's
//! PostgREST conventions (`select=`, `order=`, `column=eq.value`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use super::dto::{
    AuthErrorDto, AuthResponseDto, PasswordGrantDto, ProfileRowDto, SignupMetadataDto,
    SignupRequestDto,
};
use crate::domain::ports::{
    AuthGateway, AuthGatewayError, AuthenticatedIdentity, DirectoryError, RegistrationRepository,
    RegistrationStoreError, SignupProfile, UserDirectory,
};
use crate::domain::registration::{NewRegistration, RegistrationRow};
use crate::domain::{User, REGISTRATIONS_COLLECTION};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USERS_COLLECTION: &str = "users";

/// Client for the hosted service's REST and auth endpoints.
pub struct RemoteDataService {
    client: Client,
    base: Url,
    anon_key: String,
}

impl RemoteDataService {
    /// Build a service client.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(base: Url, anon_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base,
            anon_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, String> {
        self.base
            .join(path)
            .map_err(|error| format!("invalid endpoint path {path}: {error}"))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", &self.anon_key))
    }

    async fn rest_error(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        format!("status {status}: {body}")
    }

    /// Highest row id in the registration collection, for change polling.
    ///
    /// # Errors
    /// Transport and status failures.
    pub async fn registrations_head(&self) -> Result<Option<i64>, RegistrationStoreError> {
        #[derive(serde::Deserialize)]
        struct IdRow {
            id: i64,
        }
        let url = self
            .endpoint(&format!(
                "rest/v1/{REGISTRATIONS_COLLECTION}?select=id&order=id.desc&limit=1"
            ))
            .map_err(RegistrationStoreError::unreachable)?;
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .map_err(|e| RegistrationStoreError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RegistrationStoreError::rejected(
                Self::rest_error(response).await,
            ));
        }
        let rows: Vec<IdRow> = response
            .json()
            .await
            .map_err(|e| RegistrationStoreError::rejected(e.to_string()))?;
        Ok(rows.first().map(|row| row.id))
    }
}

#[async_trait]
impl RegistrationRepository for RemoteDataService {
    async fn list_all(&self) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
        let url = self
            .endpoint(&format!(
                "rest/v1/{REGISTRATIONS_COLLECTION}?select=*&order=created_at.desc"
            ))
            .map_err(RegistrationStoreError::unreachable)?;
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .map_err(|e| RegistrationStoreError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RegistrationStoreError::rejected(
                Self::rest_error(response).await,
            ));
        }
        response
            .json()
            .await
            .map_err(|e| RegistrationStoreError::rejected(e.to_string()))
    }

    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
        let mut url = self
            .endpoint(&format!("rest/v1/{REGISTRATIONS_COLLECTION}"))
            .map_err(RegistrationStoreError::unreachable)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc")
            .append_pair("email", &format!("eq.{}", email.trim().to_lowercase()));
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .map_err(|e| RegistrationStoreError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RegistrationStoreError::rejected(
                Self::rest_error(response).await,
            ));
        }
        response
            .json()
            .await
            .map_err(|e| RegistrationStoreError::rejected(e.to_string()))
    }

    async fn insert(&self, registration: NewRegistration) -> Result<(), RegistrationStoreError> {
        let url = self
            .endpoint(&format!("rest/v1/{REGISTRATIONS_COLLECTION}"))
            .map_err(RegistrationStoreError::unreachable)?;
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&registration)
            .send()
            .await
            .map_err(|e| RegistrationStoreError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RegistrationStoreError::rejected(
                Self::rest_error(response).await,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for RemoteDataService {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError> {
        let mut url = self
            .endpoint(&format!("rest/v1/{USERS_COLLECTION}"))
            .map_err(DirectoryError::unreachable)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("limit", "1");
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .map_err(|e| DirectoryError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DirectoryError::rejected(Self::rest_error(response).await));
        }
        let rows: Vec<ProfileRowDto> = response
            .json()
            .await
            .map_err(|e| DirectoryError::rejected(e.to_string()))?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn upsert(&self, user: &User) -> Result<(), DirectoryError> {
        let url = self
            .endpoint(&format!("rest/v1/{USERS_COLLECTION}"))
            .map_err(DirectoryError::unreachable)?;
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&ProfileRowDto::from(user))
            .send()
            .await
            .map_err(|e| DirectoryError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DirectoryError::rejected(Self::rest_error(response).await));
        }
        Ok(())
    }
}

async fn auth_failure(response: Response) -> AuthGatewayError {
    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        return AuthGatewayError::rate_limited();
    }
    let message = match response.json::<AuthErrorDto>().await {
        Ok(body) => body.message(),
        Err(error) => error.to_string(),
    };
    AuthGatewayError::rejected(message)
}

#[async_trait]
impl AuthGateway for RemoteDataService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: SignupProfile,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError> {
        let url = self
            .endpoint("auth/v1/signup")
            .map_err(AuthGatewayError::unreachable)?;
        let body = SignupRequestDto {
            email: email.to_owned(),
            password: password.to_owned(),
            data: SignupMetadataDto {
                name: profile.name,
                role: profile.role,
                department: profile.department,
                year: profile.year,
            },
        };
        let response = self
            .authed(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthGatewayError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(auth_failure(response).await);
        }
        let dto: AuthResponseDto = response
            .json()
            .await
            .map_err(|e| AuthGatewayError::unreachable(e.to_string()))?;
        dto.into_identity()
            .ok_or_else(|| AuthGatewayError::rejected("sign-up response carried no account"))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError> {
        let url = self
            .endpoint("auth/v1/token?grant_type=password")
            .map_err(AuthGatewayError::unreachable)?;
        let response = self
            .authed(self.client.post(url))
            .json(&PasswordGrantDto {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .send()
            .await
            .map_err(|e| AuthGatewayError::unreachable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(auth_failure(response).await);
        }
        let dto: AuthResponseDto = response
            .json()
            .await
            .map_err(|e| AuthGatewayError::unreachable(e.to_string()))?;
        dto.into_identity()
            .ok_or_else(|| AuthGatewayError::rejected("token response carried no account"))
    }
}
