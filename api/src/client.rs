use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::pois::Poi;
use crate::rows::{RouteID, RouteRow};
use crate::shapes::{self, ShapePath};
use crate::summaries::RouteSummary;

/// Where the backend lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Async client for the schedule backend. Cloning shares the underlying
/// connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(base: &str) -> ApiResult<Self> {
        Ok(Self {
            base: Url::parse(base)?,
            client: Client::new(),
        })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    async fn get_text(&self, url: &Url) -> ApiResult<String> {
        debug!("GET {url}");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                status,
                url: url.to_string(),
            });
        }
        let body = resp.text().await?;
        trace!("{url} returned {} bytes", body.len());
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let body = self.get_text(&url).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    /// All routes with a stop within walking distance of (lat, lon), each
    /// with per-schedule-type frequency flags. `distance` is feet,
    /// `frequency` is the highest acceptable minutes between trips.
    pub async fn nearby_schedules(
        &self,
        lat: f64,
        lon: f64,
        distance: f64,
        frequency: f64,
    ) -> ApiResult<Vec<RouteRow>> {
        let url = self.url(
            "/api/schedule/nearby",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("distance", distance.to_string()),
                ("frequency", frequency.to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    /// The geometry of one route (or one of its branches), grouped by
    /// shape_id.
    pub async fn route_shape(
        &self,
        route_id: &RouteID,
        branch_letter: Option<&str>,
    ) -> ApiResult<Vec<ShapePath>> {
        let mut query = vec![("route_id", route_id.0.clone())];
        if let Some(branch) = branch_letter {
            query.push(("branch_letter", branch.to_string()));
        }
        let url = self.url("/api/route_shape", &query)?;
        let body = self.get_text(&url).await?;
        shapes::decode_route_shape(url.as_str(), &body)
    }

    /// Points of interest within walking distance of the route, sorted by
    /// the backend however it likes.
    pub async fn pois_along_route(
        &self,
        route_id: &RouteID,
        branch_letter: Option<&str>,
        lat: f64,
        lon: f64,
        distance: f64,
    ) -> ApiResult<Vec<Poi>> {
        let mut query = vec![
            ("route_id", route_id.0.clone()),
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("distance", distance.to_string()),
        ];
        if let Some(branch) = branch_letter {
            query.push(("branch_letter", branch.to_string()));
        }
        let url = self.url("/api/pois_along_route", &query)?;
        self.get_json(url).await
    }

    /// Summaries of every route near (lat, lon), colored by the server.
    pub async fn routes_overview(
        &self,
        lat: f64,
        lon: f64,
        radius: f64,
        frequency: f64,
    ) -> ApiResult<Vec<RouteSummary>> {
        let url = self.url(
            "/api/routes",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("radius", radius.to_string()),
                ("frequency", frequency.to_string()),
            ],
        )?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let client = ApiClient::new(DEFAULT_BASE_URL).unwrap();
        let url = client
            .url(
                "/api/schedule/nearby",
                &[
                    ("lat", "44.9778".to_string()),
                    ("lon", "-93.265".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/schedule/nearby?lat=44.9778&lon=-93.265"
        );
    }

    #[test]
    fn test_base_url_variants() {
        // A trailing slash on the base doesn't double up
        let client = ApiClient::new("http://transit.example.com/").unwrap();
        let url = client.url("/api/routes", &[]).unwrap();
        assert_eq!(url.as_str(), "http://transit.example.com/api/routes");

        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_query_values_escaped() {
        let client = ApiClient::new(DEFAULT_BASE_URL).unwrap();
        let url = client
            .url("/api/route_shape", &[("route_id", "21 & 5".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/route_shape?route_id=21+%26+5"
        );
    }
}
