// ============================================================
// Layer 6 — Video Metadata Sources
// ============================================================
// Lists the videos to score, each with its human rating. Only
// metadata is fetched here; the videos themselves are pulled by
// the generation engine.
//
// The hosted source pages through the rows endpoint:
//
//   offset 0, 100, 200, ...   until a short or empty page, or
//                             until num_rows_total rows are read

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::domain::traits::VideoMetadataSource;
use crate::domain::video_sample::VideoSample;

/// Public datasets-server endpoint for hosted datasets
pub const ROWS_ENDPOINT: &str = "https://datasets-server.huggingface.co";

/// Largest page the rows endpoint serves
const PAGE_SIZE: usize = 100;

/// Columns read from each dataset row. `pc` is the physical-correctness rating.
#[derive(Debug, Deserialize)]
struct VideoRow {
    video_url: String,
    pc:        f64,
}

impl From<VideoRow> for VideoSample {
    fn from(row: VideoRow) -> Self {
        VideoSample::new(row.video_url, row.pc)
    }
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: VideoRow,
}

#[derive(Debug, Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
    #[serde(default)]
    num_rows_total: Option<usize>,
}

/// Pages through a hosted dataset split via the datasets-server rows API.
pub struct HubRowsSource {
    dataset: String,
    split:   String,
    config:  String,
    token:   Option<String>,
    client:  reqwest::blocking::Client,
}

impl HubRowsSource {
    pub fn new(dataset: impl Into<String>, split: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("vlm-dataset-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            dataset:  dataset.into(),
            split:    split.into(),
            config:   "default".to_string(),
            token:    resolve_token(),
            client,
        })
    }

    fn fetch_page(&self, offset: usize) -> Result<RowsPage> {
        let url    = format!("{}/rows", ROWS_ENDPOINT);
        let offset = offset.to_string();
        let length = PAGE_SIZE.to_string();

        let mut request = self.client.get(&url).query(&[
            ("dataset", self.dataset.as_str()),
            ("config", self.config.as_str()),
            ("split", self.split.as_str()),
            ("offset", offset.as_str()),
            ("length", length.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .with_context(|| format!("Rows request failed for {}", self.dataset))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Rows endpoint returned {status} for {} ({})", self.dataset, self.split);
        }

        let body = response.text().context("Failed to read rows response")?;
        parse_rows_page(&body)
    }
}

impl VideoMetadataSource for HubRowsSource {
    fn load(&self) -> Result<Vec<VideoSample>> {
        tracing::info!("Loading dataset: {}, split: {}", self.dataset, self.split);

        let samples = collect_pages(|offset| self.fetch_page(offset))?;

        log_loaded(&self.split, &samples);
        Ok(samples)
    }
}

/// Fetch pages starting at offset 0 until the dataset is exhausted.
fn collect_pages<F>(mut fetch_page: F) -> Result<Vec<VideoSample>>
where
    F: FnMut(usize) -> Result<RowsPage>,
{
    let mut samples = Vec::new();
    loop {
        let page  = fetch_page(samples.len())?;
        let total = page.num_rows_total;
        let count = page.rows.len();

        samples.extend(page.rows.into_iter().map(|entry| VideoSample::from(entry.row)));

        let exhausted = total.is_some_and(|t| samples.len() >= t);
        if count < PAGE_SIZE || exhausted {
            break;
        }
    }
    Ok(samples)
}

/// Reads `{"video_url": ..., "pc": ...}` objects, one per line.
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VideoMetadataSource for JsonlSource {
    fn load(&self) -> Result<Vec<VideoSample>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read manifest '{}'", self.path.display()))?;

        let samples = parse_jsonl(&text)
            .with_context(|| format!("Malformed manifest '{}'", self.path.display()))?;

        log_loaded(&self.path.display().to_string(), &samples);
        Ok(samples)
    }
}

fn parse_rows_page(body: &str) -> Result<RowsPage> {
    serde_json::from_str(body).context("Unexpected rows response shape")
}

fn parse_jsonl(text: &str) -> Result<Vec<VideoSample>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<VideoRow>(line)
                .map(VideoSample::from)
                .with_context(|| format!("line {}", i + 1))
        })
        .collect()
}

fn log_loaded(origin: &str, samples: &[VideoSample]) {
    tracing::info!("{} has {} examples", origin, samples.len());
    if let Some(first) = samples.first() {
        tracing::info!("Sample data: {:?}", first);
    }
}

/// `HF_TOKEN`, when set and non-empty
fn resolve_token() -> Option<String> {
    std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rows_page() {
        let body = r#"{
            "features": [],
            "rows": [
                {"row_idx": 0, "row": {"video_url": "https://h/a.mp4", "pc": 4, "caption": "x"}, "truncated_cells": []},
                {"row_idx": 1, "row": {"video_url": "https://h/b.mp4", "pc": 1.5}, "truncated_cells": []}
            ],
            "num_rows_total": 2
        }"#;

        let page = parse_rows_page(body).unwrap();
        assert_eq!(page.num_rows_total, Some(2));

        let samples: Vec<VideoSample> = page.rows.into_iter().map(|e| e.row.into()).collect();
        assert_eq!(samples[0], VideoSample::new("https://h/a.mp4", 4.0));
        assert_eq!(samples[1].ground_truth, 1.5);
    }

    /// Serves `total` synthetic rows in pages, recording requested offsets.
    fn paged(total: usize, report_total: bool) -> impl FnMut(usize) -> Result<RowsPage> {
        move |offset| {
            let end = (offset + PAGE_SIZE).min(total);
            let rows = (offset..end)
                .map(|i| RowEntry { row: VideoRow { video_url: format!("v{i}.mp4"), pc: 3.0 } })
                .collect();
            Ok(RowsPage { rows, num_rows_total: report_total.then_some(total) })
        }
    }

    #[test]
    fn test_pages_until_short_page() {
        let mut offsets = Vec::new();
        let mut inner = paged(137, true);
        let samples = collect_pages(|offset| {
            offsets.push(offset);
            inner(offset)
        })
        .unwrap();

        assert_eq!(samples.len(), 137);
        assert_eq!(offsets, vec![0, 100]);
        assert_eq!(samples[136].video_url, "v136.mp4");
    }

    #[test]
    fn test_exact_multiple_stops_at_reported_total() {
        let mut offsets = Vec::new();
        let mut inner = paged(200, true);
        let samples = collect_pages(|offset| {
            offsets.push(offset);
            inner(offset)
        })
        .unwrap();

        assert_eq!(samples.len(), 200);
        assert_eq!(offsets, vec![0, 100]);
    }

    #[test]
    fn test_exact_multiple_without_total_ends_on_empty_page() {
        let mut offsets = Vec::new();
        let mut inner = paged(200, false);
        let samples = collect_pages(|offset| {
            offsets.push(offset);
            inner(offset)
        })
        .unwrap();

        assert_eq!(samples.len(), 200);
        assert_eq!(offsets, vec![0, 100, 200]);
    }

    #[test]
    fn test_page_error_propagates() {
        let result = collect_pages(|offset| {
            if offset == 0 {
                paged(150, true)(offset)
            } else {
                bail!("rows endpoint returned 500")
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_rows_missing_column_is_error() {
        let body = r#"{"rows": [{"row": {"video_url": "u"}}]}"#;
        assert!(parse_rows_page(body).is_err());
    }

    #[test]
    fn test_jsonl_source_skips_blank_lines() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("videos.jsonl");
        fs::write(
            &path,
            "{\"video_url\": \"a.mp4\", \"pc\": 3}\n\n{\"video_url\": \"b.mp4\", \"pc\": 5}\n",
        )
        .unwrap();

        let samples = JsonlSource::new(&path).load().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], VideoSample::new("b.mp4", 5.0));
    }

    #[test]
    fn test_jsonl_reports_bad_line() {
        let err = parse_jsonl("{\"video_url\": \"a\", \"pc\": 1}\nnot json\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
