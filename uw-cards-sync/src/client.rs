use std::time::Duration;

use crate::error::SyncError;
use crate::settings::Settings;

/// Source of upstream card data and card images.
///
/// The pipeline only talks to the network through this trait, so tests can
/// count or fake requests.
pub trait UpstreamClient {
    /// Fetch every raw card record for `locale`.
    ///
    /// A non-success status is reported as [`SyncError::UpstreamStatus`].
    fn fetch_cards(&self, locale: &str) -> Result<Vec<serde_json::Value>, SyncError>;

    /// Download one card image.
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SyncError>;
}

/// Blocking HTTP client for the upstream card API.
pub struct HttpClient {
    http: reqwest::blocking::Client,
    settings: Settings,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> Result<Self, SyncError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("uw-cards/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            settings: settings.clone(),
        })
    }

    /// Query parameters for a locale's card listing. The default locale is
    /// requested without `lang`.
    pub fn cards_query(&self, locale: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ver", self.settings.api_version.to_string()),
            ("per_page", self.settings.page_size.to_string()),
        ];
        if !self.settings.is_default_locale(locale) {
            params.push(("lang", locale.to_string()));
        }
        params
    }
}

impl UpstreamClient for HttpClient {
    fn fetch_cards(&self, locale: &str) -> Result<Vec<serde_json::Value>, SyncError> {
        let request = self
            .http
            .get(&self.settings.endpoint)
            .query(&self.cards_query(locale))
            .build()?;
        let url = request.url().to_string();
        log::info!("{url}");

        let resp = self.http.execute(request)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}
