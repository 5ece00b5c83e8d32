//! Google Drive client: OAuth2 grants plus the `files.list` calls the
//! asset sync is built on.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::{self, ConnectorError};
use crate::oauth::{self, TokenResponse};

const PROVIDER: &str = "Google Drive";

/// Scopes requested at consent time: read-only Drive listing plus the
/// account email shown on the integrations card.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/userinfo.email",
];

const DEFAULT_AUTH_BASE: &str = "https://accounts.google.com";
const DEFAULT_TOKEN_BASE: &str = "https://oauth2.googleapis.com";
const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// Fields requested per `files.list` page. Anything not named here comes
/// back as `null` regardless of what the file actually has.
const FILE_FIELDS: &str = "nextPageToken, files(id, name, mimeType, size, modifiedTime, \
     thumbnailLink, webViewLink, imageMediaMetadata(width, height))";

/// HTTP client for the Google OAuth2 and Drive v3 endpoints.
pub struct GoogleDriveClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    auth_base: String,
    token_base: String,
    api_base: String,
}

/// One file from a Drive `files.list` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Drive serializes sizes as decimal strings; folders and native
    /// Google docs have none.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail_link: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub image_media_metadata: Option<ImageMetadata>,
}

/// Pixel dimensions Drive reports for image files.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageMetadata {
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
}

impl DriveFile {
    /// Parsed `size`, defaulting to 0 where Drive reports none.
    pub fn size_bytes(&self) -> i64 {
        self.size
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListPage {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Account identity shown on the integrations card.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl GoogleDriveClient {
    /// Create a client for the real Google endpoints.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            auth_base: DEFAULT_AUTH_BASE.to_string(),
            token_base: DEFAULT_TOKEN_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the endpoint bases (tests point these at a stub server).
    pub fn with_bases(
        mut self,
        auth_base: String,
        token_base: String,
        api_base: String,
    ) -> Self {
        self.auth_base = auth_base;
        self.token_base = token_base;
        self.api_base = api_base;
        self
    }

    /// Consent-screen URL the dashboard opens in a popup.
    ///
    /// `access_type=offline` plus `prompt=consent` makes Google return a
    /// refresh token on every exchange, not only the first.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state)
            .finish();
        format!("{}/o/oauth2/v2/auth?{}", self.auth_base, query)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, ConnectorError> {
        oauth::post_token_form(
            PROVIDER,
            &self.client,
            &format!("{}/token", self.token_base),
            &[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ],
        )
        .await
    }

    /// Trade a refresh token for a fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ConnectorError> {
        oauth::post_token_form(
            PROVIDER,
            &self.client,
            &format!("{}/token", self.token_base),
            &[
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ],
        )
        .await
    }

    /// Revoke a token on disconnect. Google accepts either the access or
    /// the refresh token and revokes the whole grant.
    pub async fn revoke(&self, token: &str) -> Result<(), ConnectorError> {
        let response = self
            .client
            .post(format!("{}/revoke", self.token_base))
            .form(&[("token", token)])
            .send()
            .await?;

        client::ensure_success(PROVIDER, response).await?;
        Ok(())
    }

    /// Fetch the authenticated account's identity.
    pub async fn userinfo(&self, access_token: &str) -> Result<UserInfo, ConnectorError> {
        let response = self
            .client
            .get(format!("{}/oauth2/v2/userinfo", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?;

        client::parse_json(PROVIDER, response).await
    }

    /// List every non-trashed file directly inside `folder_id`, following
    /// `nextPageToken` until the listing is exhausted.
    pub async fn list_folder_files(
        &self,
        access_token: &str,
        folder_id: &str,
    ) -> Result<Vec<DriveFile>, ConnectorError> {
        let query = format!("'{}' in parents and trashed = false", folder_id);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/drive/v3/files", self.api_base))
                .bearer_auth(access_token)
                .query(&[
                    ("q", query.as_str()),
                    ("pageSize", "100"),
                    ("fields", FILE_FIELDS),
                ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: FileListPage =
                client::parse_json(PROVIDER, request.send().await?).await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleDriveClient {
        GoogleDriveClient::new("client-id".to_string(), "shh".to_string())
    }

    #[test]
    fn authorize_url_carries_state_and_scopes() {
        let url = test_client().authorize_url("https://app.example.com/cb", "state-token");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb"));
        assert!(url.contains("state=state-token"));
        assert!(url.contains("drive.readonly"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
    }

    #[test]
    fn file_list_page_decodes_drive_shapes() {
        let page: FileListPage = serde_json::from_str(
            r#"{
                "nextPageToken": "tok-2",
                "files": [
                    {
                        "id": "f1",
                        "name": "hero.png",
                        "mimeType": "image/png",
                        "size": "20480",
                        "modifiedTime": "2025-06-01T09:30:00.000Z",
                        "thumbnailLink": "https://lh3.example.com/t/f1",
                        "imageMediaMetadata": {"width": 1080, "height": 1920}
                    },
                    {
                        "id": "f2",
                        "name": "Brief",
                        "mimeType": "application/vnd.google-apps.document"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("tok-2"));
        assert_eq!(page.files.len(), 2);
        assert_eq!(page.files[0].size_bytes(), 20480);
        assert!(page.files[0].modified_time.is_some());
        assert_eq!(
            page.files[0].image_media_metadata.as_ref().unwrap().width,
            Some(1080)
        );
        // Native Google docs have no size.
        assert_eq!(page.files[1].size_bytes(), 0);
    }
}
