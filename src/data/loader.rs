use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

use super::geo::{self, CountryShape};
use super::model::Record;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the body of `source`: an `http(s)` URL, or a local file path
/// (used by tests and the sample-data generator output).
fn fetch_text(source: &str) -> Result<String, FetchError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(client.get(source).send()?.error_for_status()?.text()?)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

/// Load a CSV dataset into raw records (header row required, columns
/// referenced by name).
pub fn load_csv(source: &str) -> Result<Vec<Record>, FetchError> {
    let text = fetch_text(source)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let values = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| (h.clone(), cell.to_string()))
            .collect();
        records.push(Record::new(values));
    }
    Ok(records)
}

/// Load a CSV dataset and apply a per-row transform; rows the transform
/// rejects are dropped.
pub fn load_csv_rows<T>(
    source: &str,
    transform: impl Fn(&Record) -> Option<T>,
) -> Result<Vec<T>, FetchError> {
    Ok(load_csv(source)?.iter().filter_map(transform).collect())
}

/// Load a GeoJSON feature collection of country polygons.
pub fn load_countries(source: &str) -> Result<Vec<CountryShape>, FetchError> {
    let text = fetch_text(source)?;
    Ok(geo::parse_countries(&text)?)
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// Handle to an in-flight dataset load.
pub struct Fetch<T> {
    rx: Receiver<anyhow::Result<T>>,
}

impl<T> Fetch<T> {
    /// The load result, once; `None` while still in flight.
    pub fn try_take(&self) -> Option<anyhow::Result<T>> {
        self.rx.try_recv().ok()
    }
}

/// Run `job` on its own thread; independent datasets load concurrently and
/// resolve in whatever order the network produces.
pub fn spawn<T, F>(label: &'static str, job: F) -> Fetch<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, FetchError> + Send + 'static,
{
    let (tx, rx) = channel();
    thread::spawn(move || {
        let result = job().with_context(|| format!("loading {label}"));
        // The receiver disappearing just means the app shut down mid-load.
        let _ = tx.send(result);
    });
    Fetch { rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("heat-stories-test-{name}"));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_rows_are_keyed_by_header() {
        let path = write_temp(
            "basic.csv",
            "Entity,Code,Year,HeatDeathRate\nAustria,AUT,2030,4.5\nWorld,,2030,1.0\n",
        );
        let records = load_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("Entity"), Some("Austria"));
        assert_eq!(records[0].num("HeatDeathRate"), Some(4.5));
        assert_eq!(records[1].text("Code"), None);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn transform_drops_incomplete_rows() {
        let path = write_temp(
            "transform.csv",
            "Entity,Code,Year,HeatDeathRate\nAustria,AUT,2030,4.5\nNowhere,NWH,,9.9\n",
        );
        let rows = load_csv_rows(path.to_str().unwrap(), crate::data::model::TrendRow::from_record)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, "Austria");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_csv("/definitely/not/here.csv").is_err());
    }

    #[test]
    fn spawn_delivers_on_the_channel() {
        let fetch = spawn("test-jobs", || Ok(vec![1, 2, 3]));
        let mut result = None;
        for _ in 0..100 {
            if let Some(r) = fetch.try_take() {
                result = Some(r);
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(result.unwrap().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn spawn_carries_failures() {
        let fetch = spawn("test-failure", || {
            load_csv("/definitely/not/here.csv")
        });
        let mut result = None;
        for _ in 0..100 {
            if let Some(r) = fetch.try_take() {
                result = Some(r);
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        let err = result.unwrap().unwrap_err();
        assert!(format!("{err:#}").contains("test-failure"));
    }
}
