//! Downloads daily rainfall series from the NASA POWER point API.
//!
//! One GET per location. A failure for one location is reported and skipped;
//! it never aborts the rest of the run.

use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use anyhow::Result;
use futures::future::join_all;
use serde::Deserialize;

use crate::{
    config::Period,
    error::TransportError,
    reading::{DailyObservation, API_DATE_FORMAT},
    registry::Location,
    report::Reporter,
};

pub const POWER_DAILY_POINT_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
pub const PRECIPITATION_PARAMETER: &str = "PRECTOTCORR";
pub const COMMUNITY: &str = "RE";

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: HashMap<String, BTreeMap<String, Option<f64>>>,
}

pub struct PowerClient {
    client: reqwest::Client,
    base_url: String,
}

impl PowerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(POWER_DAILY_POINT_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(PowerClient {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn build_request(
        &self,
        location: &Location,
        period: &Period,
    ) -> reqwest::Result<reqwest::Request> {
        self.client
            .get(&self.base_url)
            .query(&[
                ("parameters", PRECIPITATION_PARAMETER.to_string()),
                ("community", COMMUNITY.to_string()),
                ("longitude", location.longitude.to_string()),
                ("latitude", location.latitude.to_string()),
                ("start", period.start.format(API_DATE_FORMAT).to_string()),
                ("end", period.end.format(API_DATE_FORMAT).to_string()),
                ("format", "JSON".to_string()),
            ])
            .build()
    }

    /// Fetches one location, surfacing every failure to the caller.
    pub async fn try_fetch_series(
        &self,
        location: &Location,
        period: &Period,
    ) -> Result<Vec<DailyObservation>, TransportError> {
        let request_error = |source| TransportError::Request {
            location: location.name.to_string(),
            source,
        };

        let request = self.build_request(location, period).map_err(request_error)?;
        let response = self.client.execute(request).await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                location: location.name.to_string(),
                status: response.status(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        parse_response(location.name, &body)
    }

    /// Fetches one location. Failures are handed to the reporter and an
    /// empty series is returned in their place.
    pub async fn fetch_series(
        &self,
        location: &Location,
        period: &Period,
        reporter: &dyn Reporter,
    ) -> Vec<DailyObservation> {
        reporter.on_fetch_started(location.name);

        match self.try_fetch_series(location, period).await {
            Ok(observations) => {
                reporter.on_location_fetched(location.name, observations.len());
                observations
            }
            Err(e) => {
                reporter.on_location_failed(location.name, &e);
                Vec::new()
            }
        }
    }
}

/// Fetches every location and flattens the results in location order,
/// whatever order the responses arrive in.
pub async fn fetch_all(
    client: &PowerClient,
    locations: &[Location],
    period: &Period,
    concurrent: bool,
    reporter: &dyn Reporter,
) -> Vec<DailyObservation> {
    let per_location = if concurrent {
        join_all(
            locations
                .iter()
                .map(|location| client.fetch_series(location, period, reporter)),
        )
        .await
    } else {
        let mut results = Vec::with_capacity(locations.len());
        for location in locations {
            results.push(client.fetch_series(location, period, reporter).await);
        }
        results
    };

    per_location.into_iter().flatten().collect()
}

/// Parses a POWER JSON body into observations, dropping missing days.
pub fn parse_response(location: &str, body: &str) -> Result<Vec<DailyObservation>, TransportError> {
    let malformed = |reason: String| TransportError::Malformed {
        location: location.to_string(),
        reason,
    };

    let response: PowerResponse =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    let series = response
        .properties
        .parameter
        .get(PRECIPITATION_PARAMETER)
        .ok_or_else(|| malformed(format!("missing parameter {}", PRECIPITATION_PARAMETER)))?;

    let mut observations = Vec::with_capacity(series.len());
    for (date_key, value) in series {
        let Some(value) = value else { continue };
        let observation = DailyObservation::from_entry(location, date_key, *value)
            .map_err(|e| malformed(format!("bad date '{}': {}", date_key, e)))?;
        if let Some(observation) = observation {
            observations.push(observation);
        }
    }

    Ok(observations)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::{registry::lookup, report::testing::RecordingReporter};

    const BODY: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [74.2433, 16.705, 560.0]},
        "properties": {
            "parameter": {
                "PRECTOTCORR": {
                    "20060101": 0.0,
                    "20060102": -999.0,
                    "20060103": 12.34
                }
            }
        },
        "header": {"fill_value": -999.0}
    }"#;

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    // Serves canned responses chosen from the request line until the test ends.
    async fn serve(route: fn(&str) -> Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut stalled = Vec::new();
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();

                match route(&request) {
                    Some(response) => {
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    None => stalled.push(socket),
                }
            }
        });

        format!("http://{}/api/temporal/daily/point", addr)
    }

    fn client(base_url: &str) -> PowerClient {
        PowerClient::with_base_url(base_url, Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn should_build_request_query() {
        let client = PowerClient::new(Duration::from_secs(120)).unwrap();
        let karvir = lookup("Karvir").unwrap();
        let request = client.build_request(karvir, &Period::default()).unwrap();

        let pairs: HashMap<String, String> = request.url().query_pairs().into_owned().collect();

        assert!(request.url().as_str().starts_with(POWER_DAILY_POINT_URL));
        assert_eq!(pairs["parameters"], "PRECTOTCORR");
        assert_eq!(pairs["community"], "RE");
        assert_eq!(pairs["longitude"], "74.2433");
        assert_eq!(pairs["latitude"], "16.705");
        assert_eq!(pairs["start"], "20060101");
        assert_eq!(pairs["end"], "20251231");
        assert_eq!(pairs["format"], "JSON");
    }

    #[test]
    fn should_parse_response_and_skip_sentinel() {
        let observations = parse_response("Karvir", BODY).unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].date, NaiveDate::from_ymd_opt(2006, 1, 1).unwrap());
        assert_eq!(observations[0].rainfall_mm, 0.0);
        assert_eq!(observations[1].date, NaiveDate::from_ymd_opt(2006, 1, 3).unwrap());
        assert_eq!(observations[1].rainfall_mm, 12.34);
        assert!(observations.iter().all(|o| o.location == "Karvir"));
    }

    #[test]
    fn should_flag_missing_parameter() {
        let body = r#"{"properties": {"parameter": {"T2M": {"20060101": 20.1}}}}"#;
        let err = parse_response("Ajra", body).unwrap_err();

        match err {
            TransportError::Malformed { location, reason } => {
                assert_eq!(location, "Ajra");
                assert!(reason.contains("PRECTOTCORR"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn should_flag_invalid_json() {
        let err = parse_response("Ajra", "<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, TransportError::Malformed { .. }));
    }

    #[tokio::test]
    async fn should_fetch_series_over_http() {
        let url = serve(|_| Some(http_response("200 OK", BODY))).await;
        let karvir = lookup("Karvir").unwrap();

        let observations = client(&url)
            .try_fetch_series(karvir, &Period::default())
            .await
            .unwrap();

        assert_eq!(observations.len(), 2);
    }

    #[tokio::test]
    async fn should_report_status_error() {
        let url = serve(|_| Some(http_response("500 Internal Server Error", ""))).await;
        let karvir = lookup("Karvir").unwrap();

        let err = client(&url)
            .try_fetch_series(karvir, &Period::default())
            .await
            .unwrap_err();

        match err {
            TransportError::Status { location, status } => {
                assert_eq!(location, "Karvir");
                assert_eq!(status.as_u16(), 500);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_continue_after_failed_location() {
        // Karvir gets a 500, every other location succeeds.
        let url = serve(|request| {
            if request.contains("latitude=16.705&") {
                Some(http_response("500 Internal Server Error", ""))
            } else {
                Some(http_response("200 OK", BODY))
            }
        })
        .await;
        let reporter = RecordingReporter::default();
        let locations = &crate::registry::all_locations()[..3];

        let observations = fetch_all(&client(&url), locations, &Period::default(), false, &reporter).await;

        assert!(observations.iter().all(|o| o.location != "Karvir"));
        assert_eq!(observations.len(), 4);
        assert_eq!(*reporter.failed.lock().unwrap(), vec!["Karvir".to_string()]);
        assert_eq!(
            *reporter.fetched.lock().unwrap(),
            vec![("Panhala".to_string(), 2), ("Shahuwadi".to_string(), 2)]
        );
        assert_eq!(reporter.started.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_keep_location_order_when_concurrent() {
        let url = serve(|_| Some(http_response("200 OK", BODY))).await;
        let reporter = RecordingReporter::default();
        let locations = crate::registry::all_locations();

        let observations = fetch_all(&client(&url), locations, &Period::default(), true, &reporter).await;

        let order: Vec<&str> = observations
            .chunks(2)
            .map(|pair| pair[0].location.as_str())
            .collect();
        let expected: Vec<&str> = locations.iter().map(|l| l.name).collect();
        assert_eq!(order, expected);
    }

    #[tokio::test]
    async fn should_skip_location_on_timeout() {
        let url = serve(|_| None).await;
        let reporter = RecordingReporter::default();
        let ajra = lookup("Ajra").unwrap();

        let observations = client(&url)
            .fetch_series(ajra, &Period::default(), &reporter)
            .await;

        assert!(observations.is_empty());
        assert_eq!(*reporter.failed.lock().unwrap(), vec!["Ajra".to_string()]);
    }
}
