//! Output naming conventions for campaign directories and records.

use crate::types::Timestamp;

/// Timestamp format used in generated directory and file names.
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name used when sanitizing leaves nothing behind.
const FALLBACK_NAME: &str = "campaign";

/// Make a name safe to use as a file or directory name on any OS.
///
/// Every non-alphanumeric character becomes `_`, then leading and
/// trailing underscores are stripped.
///
/// # Examples
///
/// ```
/// use advocate_core::naming::sanitize_filename;
///
/// assert_eq!(sanitize_filename("EcoTech: Go Green!"), "EcoTech__Go_Green");
/// assert_eq!(sanitize_filename("!!!"), "campaign");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Directory name for one campaign's assets: `{sanitized}_{timestamp}`.
pub fn campaign_dir_name(campaign_name: &str, at: Timestamp) -> String {
    format!(
        "{}_{}",
        sanitize_filename(campaign_name),
        at.format(NAME_TIMESTAMP_FORMAT)
    )
}

/// File name for a persisted campaign record:
/// `campaign_{sanitized company}_{timestamp}.json`.
pub fn record_file_name(company_name: &str, at: Timestamp) -> String {
    format!(
        "campaign_{}_{}.json",
        sanitize_filename(company_name),
        at.format(NAME_TIMESTAMP_FORMAT)
    )
}
