//! Release discovery and artifact acquisition.
//!
//! The reconciler only needs two things from a release host: the latest tag
//! and "these bytes now live at that path". [`ReleaseSource`] is that narrow
//! seam; [`GithubReleases`] implements it over the GitHub releases API.
//!
//! Artifacts are always written to a temporary sibling path and then renamed
//! into place, so a binary that is currently executing is never truncated
//! and a failed download never leaves a partial file at the final path.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SetupError};

/// Timeout for the release listing request.
const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for one artifact download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// A source of release artifacts.
pub trait ReleaseSource {
    /// The most recent release tag.
    fn latest_tag(&self) -> Result<String>;

    /// Fetch `asset` from release `tag` into `dest`, atomically.
    fn fetch(&self, tag: &str, asset: &str, dest: &Path, executable: bool) -> Result<()>;
}

/// GitHub releases implementation of [`ReleaseSource`].
#[derive(Debug)]
pub struct GithubReleases {
    repo: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

impl GithubReleases {
    /// Create a client for `owner/repo`.
    pub fn new(repo: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sift-setup/", env!("CARGO_PKG_VERSION")))
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| SetupError::network(e.to_string()))?;

        Ok(Self {
            repo: repo.into(),
            client,
        })
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_tag(&self) -> Result<String> {
        let url = format!("https://api.github.com/repos/{}/releases", self.repo);

        let releases: Vec<Release> = self
            .client
            .get(&url)
            .timeout(LIST_TIMEOUT)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| SetupError::network(format!("fetching releases: {}", e)))?
            .json()
            .map_err(|e| SetupError::network(format!("parsing releases: {}", e)))?;

        releases
            .into_iter()
            .next()
            .map(|r| r.tag_name)
            .ok_or(SetupError::NoRelease)
    }

    fn fetch(&self, tag: &str, asset: &str, dest: &Path, executable: bool) -> Result<()> {
        let url = format!(
            "https://github.com/{}/releases/download/{}/{}",
            self.repo, tag, asset
        );

        let mut resp = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| SetupError::network(format!("downloading {}: {}", asset, e)))?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| SetupError::storage(parent, e))?;
        }

        let temp = temp_path_for(dest)?;
        let write_result = (|| -> Result<()> {
            let mut file = fs::File::create(&temp).map_err(|e| SetupError::storage(&temp, e))?;
            resp.copy_to(&mut file)
                .map_err(|e| SetupError::network(format!("writing {}: {}", asset, e)))?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        promote(&temp, dest, executable)
    }
}

/// Temporary sibling path for an artifact destination.
pub(crate) fn temp_path_for(dest: &Path) -> Result<PathBuf> {
    let file_name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SetupError::config(format!("invalid artifact path: {}", dest.display())))?;
    Ok(dest.with_file_name(format!("{}.tmp", file_name)))
}

/// Promote a fully written temp file into its final location.
///
/// Sets the executable bit first when requested, removes any previous file
/// (which may be a running binary), then renames.
pub(crate) fn promote(temp: &Path, dest: &Path, executable: bool) -> Result<()> {
    #[cfg(unix)]
    if executable {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp, fs::Permissions::from_mode(0o755))
            .map_err(|e| SetupError::storage(temp, e))?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    if dest.exists() {
        fs::remove_file(dest).map_err(|e| SetupError::storage(dest, e))?;
    }
    fs::rename(temp, dest).map_err(|e| SetupError::storage(dest, e))?;

    Ok(())
}

#[cfg(test)]
pub mod testing {
    //! In-memory release source for command tests.

    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::Path;

    use super::{promote, temp_path_for, ReleaseSource};
    use crate::error::{Result, SetupError};

    /// A release source serving fixed bytes, with optional per-asset failure.
    #[derive(Debug, Default)]
    pub struct FixedSource {
        pub tag: Option<String>,
        pub assets: HashMap<String, Vec<u8>>,
        pub failing: HashSet<String>,
    }

    impl FixedSource {
        pub fn with_tag(tag: &str) -> Self {
            Self {
                tag: Some(tag.to_string()),
                ..Self::default()
            }
        }

        pub fn asset(mut self, name: &str, bytes: &[u8]) -> Self {
            self.assets.insert(name.to_string(), bytes.to_vec());
            self
        }

        pub fn failing_asset(mut self, name: &str) -> Self {
            self.failing.insert(name.to_string());
            self
        }
    }

    impl ReleaseSource for FixedSource {
        fn latest_tag(&self) -> Result<String> {
            self.tag.clone().ok_or(SetupError::NoRelease)
        }

        fn fetch(&self, _tag: &str, asset: &str, dest: &Path, executable: bool) -> Result<()> {
            if self.failing.contains(asset) {
                return Err(SetupError::network(format!("simulated failure: {}", asset)));
            }
            let bytes = self
                .assets
                .get(asset)
                .ok_or_else(|| SetupError::network(format!("no such asset: {}", asset)))?;

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| SetupError::storage(parent, e))?;
            }
            let temp = temp_path_for(dest)?;
            fs::write(&temp, bytes).map_err(|e| SetupError::storage(&temp, e))?;
            promote(&temp, dest, executable)
        }
    }
}
