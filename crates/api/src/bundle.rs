//! Zip bundles of a generated campaign's assets for download.

use std::io::{Cursor, Write};
use std::path::Path;

use advocate_core::record::GeneratedCampaign;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::AppError;

/// Download file name for campaign number `n` (1-based).
pub fn bundle_file_name(n: usize) -> String {
    format!("campaign_{n}_assets.zip")
}

/// Build the zip archive for campaign number `n` (1-based).
///
/// The archive holds `campaign_{n}_image.{ext}`, `campaign_{n}_tagline.txt`
/// and `campaign_{n}_story.txt`. A missing image file is skipped; missing
/// text assets are an error.
pub async fn build_asset_bundle(
    n: usize,
    campaign: &GeneratedCampaign,
) -> Result<Vec<u8>, AppError> {
    let assets = &campaign.assets;

    let image = match tokio::fs::read(&assets.image).await {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %assets.image.display(), "Campaign image missing from bundle");
            None
        }
        Err(e) => return Err(read_error(&assets.image, e)),
    };
    let tagline = tokio::fs::read(&assets.tagline)
        .await
        .map_err(|e| read_error(&assets.tagline, e))?;
    let story = tokio::fs::read(&assets.story)
        .await
        .map_err(|e| read_error(&assets.story, e))?;

    let mut entries = Vec::with_capacity(3);
    if let Some(bytes) = image {
        entries.push((format!("campaign_{n}_image{}", dotted_extension(&assets.image)), bytes));
    }
    entries.push((format!("campaign_{n}_tagline.txt"), tagline));
    entries.push((format!("campaign_{n}_story.txt"), story));

    write_zip(&entries).map_err(|e| AppError::InternalError(format!("Failed to build zip: {e}")))
}

fn write_zip(entries: &[(String, Vec<u8>)]) -> zip::result::ZipResult<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }
    Ok(writer.finish()?.into_inner())
}

/// `.png` for `campaign_image.png`; empty when there is no extension.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn read_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::InternalError(format!("Failed to read {}: {e}", path.display()))
}
