use crate::{UrlError, UrlResult};
use std::path::PathBuf;
use url::Url;

/// Where a downloaded file lives, relative to the storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    /// Host of the file link; becomes the directory name
    pub host: String,

    /// The link's path flattened into a single file name
    pub file_name: String,
}

impl StoragePath {
    /// Returns `<host>/<file_name>`
    pub fn relative(&self) -> PathBuf {
        PathBuf::from(&self.host).join(&self.file_name)
    }
}

/// Flattens a URL path into one file name component
///
/// Every `/` becomes `_`, then leading and trailing `_` are stripped.
///
/// ```
/// use bucket_trawler::url::flatten_path;
///
/// assert_eq!(flatten_path("/reports/2019/q1.xls"), "reports_2019_q1.xls");
/// ```
pub fn flatten_path(path: &str) -> String {
    path.replace('/', "_").trim_matches('_').to_string()
}

/// Derives the storage location of a file link
///
/// The path is taken as it appears in the URL (percent-encoding kept); query
/// and fragment are ignored.
///
/// # Returns
///
/// * `Ok(StoragePath)` - Host directory and flattened file name
/// * `Err(UrlError)` - The link has no host, or its path flattens to nothing
pub fn storage_path_for(link: &Url) -> UrlResult<StoragePath> {
    let host = link
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(link.to_string()))?
        .to_lowercase();

    let file_name = flatten_path(link.path());
    if file_name.is_empty() {
        return Err(UrlError::EmptyFileName(link.to_string()));
    }

    Ok(StoragePath { host, file_name })
}
