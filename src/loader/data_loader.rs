use crate::loader::error::LoadError;
use crate::types::columns::REPORT_COLUMNS;
use async_compression::tokio::bufread::{BzDecoder, GzipDecoder};
use futures_util::TryStreamExt;
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::{fs, task};
use tokio_util::io::StreamReader;

/// Compression of a storm data file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Bzip2,
    Gzip,
    Plain,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bz2") => Compression::Bzip2,
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}

pub struct StormDataLoader {
    download_client: Client,
}

impl Default for StormDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl StormDataLoader {
    pub fn new() -> StormDataLoader {
        StormDataLoader {
            download_client: Client::new(),
        }
    }

    /// Makes sure the storm data file exists locally, downloading it from `url` if not.
    pub async fn ensure_local(&self, path: &Path, url: &str) -> Result<(), LoadError> {
        if fs::metadata(path).await.is_ok() {
            info!("Using local storm data at {:?}", path);
            return Ok(());
        }
        warn!(
            "Storm data not found at {:?}. Downloading from {}",
            path, url
        );
        self.download(url, path).await
    }

    /// Reads the whole storm data file into memory and parses it as CSV.
    ///
    /// Every column is read as text; numeric casting happens during cleaning. Fails if any
    /// of the report columns is missing.
    pub async fn load_storm_data(&self, path: &Path) -> Result<DataFrame, LoadError> {
        let raw_bytes = Self::read_decompressed(path).await?;
        info!(
            "Read {} decompressed bytes of storm data from {:?}",
            raw_bytes.len(),
            path
        );
        let df = Self::csv_to_dataframe(raw_bytes, path).await?;
        info!(
            "Parsed {} storm records with {} columns",
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Streams the file through the decoder matching its extension.
    async fn read_decompressed(path: &Path) -> Result<Vec<u8>, LoadError> {
        let file = fs::File::open(path)
            .await
            .map_err(|e| LoadError::SourceOpen(path.to_path_buf(), e))?;
        let reader = BufReader::new(file);
        let mut decompressed = Vec::new();

        let read = match Compression::from_path(path) {
            Compression::Bzip2 => BzDecoder::new(reader).read_to_end(&mut decompressed).await,
            Compression::Gzip => GzipDecoder::new(reader).read_to_end(&mut decompressed).await,
            Compression::Plain => {
                let mut reader = reader;
                reader.read_to_end(&mut decompressed).await
            }
        };
        read.map_err(|e| LoadError::Decompress(path.to_path_buf(), e))?;
        Ok(decompressed)
    }

    /// Parses raw CSV bytes (with header) into a DataFrame using a blocking task.
    async fn csv_to_dataframe(bytes: Vec<u8>, path: &Path) -> Result<DataFrame, LoadError> {
        let path_owned = path.to_path_buf();

        task::spawn_blocking(move || {
            let df = CsvReadOptions::default()
                .with_has_header(true)
                // Read everything as text: the export mixes numbers and junk in several columns.
                .with_infer_schema_length(Some(0))
                .map_parse_options(|opts| opts.with_encoding(CsvEncoding::LossyUtf8))
                .into_reader_with_file_handle(Cursor::new(bytes))
                .finish()
                .map_err(|e| LoadError::CsvParse {
                    path: path_owned.clone(),
                    source: e,
                })?;

            for column in REPORT_COLUMNS {
                if df.column(column).is_err() {
                    warn!("Storm data {:?} lacks column {}", path_owned, column);
                    return Err(LoadError::MissingColumn {
                        path: path_owned,
                        column: column.to_string(),
                    });
                }
            }

            Ok(df)
        })
        .await?
    }

    /// Downloads `url` to `dest`, going through a `.part` file so an interrupted download
    /// never looks like a complete one.
    async fn download(&self, url: &str, dest: &Path) -> Result<(), LoadError> {
        info!("Downloading storm data from {}", url);

        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    LoadError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    LoadError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LoadError::DownloadWrite(parent.to_path_buf(), e))?;
        }

        let partial: PathBuf = dest.with_extension("part");
        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let mut stream_reader = StreamReader::new(stream);
        let mut file = fs::File::create(&partial)
            .await
            .map_err(|e| LoadError::DownloadWrite(partial.clone(), e))?;
        let written = tokio::io::copy(&mut stream_reader, &mut file)
            .await
            .map_err(|e| LoadError::DownloadWrite(partial.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| LoadError::DownloadWrite(partial.clone(), e))?;
        fs::rename(&partial, dest)
            .await
            .map_err(|e| LoadError::DownloadWrite(dest.to_path_buf(), e))?;

        info!("Downloaded {} bytes of storm data to {:?}", written, dest);
        Ok(())
    }
}
