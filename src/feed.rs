//! Locating the extracted feed on disk, downloading it first if needed.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::fetch::{HttpClient, fetch_bytes};

/// File name the downloaded archive is stored under.
pub const ARCHIVE_NAME: &str = "gtfs.zip";

/// Creates a new, empty directory under the system temp dir.
///
/// Directories are never reused and never cleaned up.
pub fn create_temp_dir(prefix: &str) -> Result<PathBuf> {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%f").to_string();
    let pid = std::process::id();

    let mut attempt = 0u32;
    loop {
        let dir = std::env::temp_dir().join(format!("{prefix}{stamp}_{pid}_{attempt}"));
        match fs::create_dir(&dir) {
            Ok(()) => {
                debug!(dir = %dir.display(), "Temp directory created");
                return Ok(dir);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to create temp directory {}", dir.display()));
            }
        }
    }
}

/// Extracts every member of the archive at `zip_path` into `dest`.
///
/// Returns the number of archive members.
pub fn extract_archive(zip_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(zip_path)
        .with_context(|| format!("failed to open archive {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("{} is not a valid zip archive", zip_path.display()))?;

    let members = archive.len();
    archive
        .extract(dest)
        .with_context(|| format!("failed to extract into {}", dest.display()))?;

    Ok(members)
}

/// Downloads the feed archive at `url` into `dest` and extracts it there.
#[tracing::instrument(skip_all, fields(url = %url))]
pub async fn download_feed<C: HttpClient>(client: &C, url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {url}...");
    let bytes = fetch_bytes(client, url)
        .await
        .with_context(|| format!("failed to download {url}"))?;
    info!(kb = bytes.len() / 1024, "Download complete");

    let zip_path = dest.join(ARCHIVE_NAME);
    fs::write(&zip_path, &bytes)
        .with_context(|| format!("failed to write {}", zip_path.display()))?;

    let members = extract_archive(&zip_path, dest)?;
    info!(members, "Extracted to {}", dest.display());

    Ok(())
}

/// Returns `dir` unchanged when given, otherwise downloads the feed into a
/// fresh temp directory and returns that.
pub async fn resolve_feed_dir<C: HttpClient>(
    dir: Option<PathBuf>,
    client: &C,
    url: &str,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        debug!(dir = %dir.display(), "Using existing feed directory");
        return Ok(dir);
    }

    let dir = create_temp_dir("gtfs_")?;
    download_feed(client, url, &dir).await?;
    Ok(dir)
}
