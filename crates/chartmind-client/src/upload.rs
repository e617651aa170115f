use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};

/// Chart formats the backend accepts.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Per-file upload ceiling (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// A chart image read from disk and ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ChartFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> ClientResult<Self> {
        let file_name = file_name.into();
        let mime = mime_for(&file_name)?;
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(ClientError::FileTooLarge {
                name: file_name,
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    /// Validate and read a chart. The size check uses file metadata so an
    /// oversized file is never read into memory.
    pub async fn load(path: &Path) -> ClientResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        mime_for(&file_name)?;

        let io_err = |source: std::io::Error| ClientError::Io {
            path: path.display().to_string(),
            source,
        };

        let size = tokio::fs::metadata(path).await.map_err(io_err)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(ClientError::FileTooLarge {
                name: file_name,
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(io_err)?;
        Self::new(file_name, bytes)
    }
}

fn mime_for(file_name: &str) -> ClientResult<&'static str> {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        _ => Err(ClientError::UnsupportedFormat(file_name.to_string())),
    }
}

/// Load every selected chart, failing on the first invalid one.
/// An empty selection is a user error.
pub async fn load_charts(paths: &[PathBuf]) -> ClientResult<Vec<ChartFile>> {
    if paths.is_empty() {
        return Err(ClientError::NoFileSelected);
    }

    let mut charts = Vec::with_capacity(paths.len());
    for path in paths {
        charts.push(ChartFile::load(path).await?);
    }
    tracing::debug!("Loaded {} chart(s) for upload", charts.len());
    Ok(charts)
}
