use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::LocationError;
use crate::model::Coordinates;

const DEFAULT_BASE_URL: &str = "https://ipapi.co";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the device's current fix.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_fix(&self) -> Result<Coordinates, LocationError>;
}

/// Approximate geolocation from the machine's public IP address.
///
/// The lookup sends this machine's address to a third party, so it is
/// consent-gated: without the grant it fails with `PermissionDenied`
/// before any request is built. The grant is re-checked on every fetch
/// attempt; a denial is never cached.
#[derive(Debug)]
pub struct IpLocationSource {
    allowed: bool,
    http: Client,
    base_url: String,
}

impl IpLocationSource {
    pub fn new(allowed: bool) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;

        Ok(Self { allowed, http, base_url: DEFAULT_BASE_URL.to_string() })
    }

    #[cfg(test)]
    pub fn with_base_url(allowed: bool, base_url: &str) -> Self {
        Self { allowed, http: Client::new(), base_url: base_url.to_string() }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
}

#[async_trait]
impl LocationSource for IpLocationSource {
    async fn current_fix(&self) -> Result<Coordinates, LocationError> {
        if !self.allowed {
            return Err(LocationError::PermissionDenied);
        }

        let url = format!("{}/json/", self.base_url);
        let res = self.http.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "ip geolocation lookup failed");
            return Err(LocationError::Unavailable(format!("lookup returned status {status}")));
        }

        let body: IpApiResponse = res.json().await?;
        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => {
                debug!(city = body.city.as_deref().unwrap_or("?"), "resolved fix from ip");
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(LocationError::Unavailable(
                "lookup response carried no coordinates".to_string(),
            )),
        }
    }
}
