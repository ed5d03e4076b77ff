use std::time::Duration;

use anyhow::Context;
use pf_core::{
    entities::{Address, MapPoint},
    gateways::geocode::{GeocodeError, GeocodingGateway},
};
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "https://geocode-maps.yandex.ru/1.x";

/// Forward-geocoding client for the Yandex Maps HTTP API.
///
/// Issues one lookup per address and takes the most relevant (first)
/// candidate of the response.
#[derive(Debug, Clone)]
pub struct Yandex {
    api_key: String,
    api_base_url: String,
    client: reqwest::blocking::Client,
}

impl Yandex {
    /// All requests are bounded by the given timeout; a timed-out lookup
    /// is reported as an unavailable provider.
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_api_base_url(mut self, api_base_url: String) -> Self {
        self.api_base_url = api_base_url;
        self
    }
}

impl GeocodingGateway for Yandex {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<MapPoint, GeocodeError> {
        let response = self
            .client
            .get(&self.api_base_url)
            .query(&[
                ("geocode", addr.as_str()),
                ("apikey", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|err| GeocodeError::Unavailable(err.into()))?;
        let payload: GeocoderResponse = response
            .json()
            .map_err(|err| GeocodeError::Unavailable(err.into()))?;
        let Some(pos) = first_position(payload) else {
            log::debug!("No geocoding candidate for '{addr}'");
            return Err(GeocodeError::NotFound);
        };
        let point = parse_pos(&pos).map_err(GeocodeError::Unavailable)?;
        log::debug!("Resolved address location '{addr}': {point:?}");
        Ok(point)
    }
}

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    /// `"<lon> <lat>"`, longitude first.
    pos: String,
}

fn first_position(payload: GeocoderResponse) -> Option<String> {
    payload
        .response
        .collection
        .feature_member
        .into_iter()
        .next()
        .map(|member| member.geo_object.point.pos)
}

fn parse_pos(pos: &str) -> anyhow::Result<MapPoint> {
    let mut parts = pos.split_whitespace();
    let lng: f64 = parts
        .next()
        .context("Missing longitude")?
        .parse()
        .context("Malformed longitude")?;
    let lat: f64 = parts
        .next()
        .context("Missing latitude")?
        .parse()
        .context("Malformed latitude")?;
    MapPoint::try_from_lat_lng_deg(lat, lng).map_err(Into::into)
}
