use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// What the result panel holds. Every transition replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Empty,
    Loading,
    Ready(Vec<String>),
    Failed(String),
}

/// How the result panel renders a `DisplayState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Single(&'a str),
    Grid(&'a [String]),
}

pub fn result_view(display: &DisplayState) -> ResultView<'_> {
    match display {
        DisplayState::Loading => ResultView::Loading,
        DisplayState::Failed(message) => ResultView::Error(message),
        DisplayState::Ready(images) => match images.as_slice() {
            [] => ResultView::Empty,
            [only] => ResultView::Single(only),
            _ => ResultView::Grid(images),
        },
        DisplayState::Empty => ResultView::Empty,
    }
}

/// `<img src>` for a base64 PNG result.
pub fn data_url(image: &str) -> String {
    format!("data:image/png;base64,{}", image)
}

/// Which result, if any, is shown enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomState {
    zoomed: Option<usize>,
}

impl ZoomState {
    pub fn zoomed(&self) -> Option<usize> {
        self.zoomed
    }

    /// Zoom into `index`, or back out if it is already zoomed.
    pub fn toggle(&mut self, index: usize) {
        self.zoomed = match self.zoomed {
            Some(current) if current == index => None,
            _ => Some(index),
        };
    }

    pub fn clear(&mut self) {
        self.zoomed = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Tidak ada gambar untuk diunduh.")]
    NothingToDownload,
    #[error("Data gambar tidak valid: {0}")]
    InvalidData(String),
}

pub fn download_file_name(at: DateTime<Utc>, index: usize) -> String {
    format!("ubah-foto-{}-{}.png", at.timestamp_millis(), index + 1)
}

pub fn download_file(image: &str, index: usize, at: DateTime<Utc>) -> Result<DownloadFile, DownloadError> {
    if image.is_empty() {
        return Err(DownloadError::NothingToDownload);
    }
    let bytes = BASE64
        .decode(image)
        .map_err(|e| DownloadError::InvalidData(e.to_string()))?;

    Ok(DownloadFile {
        file_name: download_file_name(at, index),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn view_follows_result_count() {
        assert_eq!(result_view(&DisplayState::Empty), ResultView::Empty);
        assert_eq!(result_view(&DisplayState::Loading), ResultView::Loading);
        assert_eq!(
            result_view(&DisplayState::Failed("boom".into())),
            ResultView::Error("boom")
        );
        assert_eq!(result_view(&DisplayState::Ready(vec![])), ResultView::Empty);

        let one = DisplayState::Ready(vec!["AAA".into()]);
        assert_eq!(result_view(&one), ResultView::Single("AAA"));

        let many = DisplayState::Ready(vec!["AAA".into(), "BBB".into()]);
        assert!(matches!(result_view(&many), ResultView::Grid(images) if images.len() == 2));
    }

    #[test]
    fn zoom_toggles_per_index() {
        let mut zoom = ZoomState::default();
        zoom.toggle(1);
        assert_eq!(zoom.zoomed(), Some(1));
        zoom.toggle(0);
        assert_eq!(zoom.zoomed(), Some(0));
        zoom.toggle(0);
        assert_eq!(zoom.zoomed(), None);
    }

    #[test]
    fn downloads_are_numbered_from_one() {
        let file = download_file("AQID", 0, at()).unwrap();
        assert_eq!(file.file_name, "ubah-foto-1700000000123-1.png");
        assert_eq!(file.bytes, vec![1, 2, 3]);
        assert_eq!(download_file_name(at(), 3), "ubah-foto-1700000000123-4.png");
    }

    #[test]
    fn bad_payloads_are_not_downloaded() {
        assert_eq!(download_file("", 0, at()), Err(DownloadError::NothingToDownload));
        assert!(matches!(
            download_file("not base64!", 0, at()),
            Err(DownloadError::InvalidData(_))
        ));
    }

    #[test]
    fn data_url_is_png() {
        assert_eq!(data_url("AQID"), "data:image/png;base64,AQID");
    }
}
