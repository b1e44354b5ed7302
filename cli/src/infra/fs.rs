//! Filesystem infrastructure: implements `DescriptorStore` and `AgentPaths`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::ports::{AgentPaths, DescriptorStore};
use crate::domain::LaunchError;

/// Production filesystem implementation of `DescriptorStore`.
///
/// Blocking file operations run on tokio's blocking pool.
pub struct LocalFs;

async fn blocking<T, F>(path: &Path, op: F) -> Result<T, LaunchError>
where
    T: Send + 'static,
    F: FnOnce(PathBuf) -> std::io::Result<T> + Send + 'static,
{
    let owned = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || op(owned))
        .await
        .unwrap_or_else(|join| Err(std::io::Error::other(join)));
    result.map_err(|source| LaunchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DescriptorStore for LocalFs {
    async fn write(&self, path: &Path, contents: &str) -> Result<(), LaunchError> {
        let contents = contents.to_owned();
        blocking(path, move |path| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Temp file then rename, so launchd never sees a half-written plist.
            let temp_path = path.with_extension("plist.tmp");
            std::fs::write(&temp_path, contents)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o644))?;
            }
            std::fs::rename(&temp_path, &path)
        })
        .await
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, LaunchError> {
        blocking(path, |path| match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn remove(&self, path: &Path) -> Result<bool, LaunchError> {
        blocking(path, |path| match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        })
        .await
    }
}

/// Resolves `~/Library/LaunchAgents`, or an explicit override directory.
#[derive(Debug, Clone, Default)]
pub struct UserLaunchAgents {
    dir: Option<PathBuf>,
}

impl UserLaunchAgents {
    /// Use `dir` instead of the home-relative default when `Some`.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl AgentPaths for UserLaunchAgents {
    fn launch_agents_dir(&self) -> Result<PathBuf, LaunchError> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }
        dirs::home_dir()
            .map(|home| home.join("Library").join("LaunchAgents"))
            .ok_or_else(|| {
                LaunchError::DescriptorGeneration("cannot determine home directory".to_string())
            })
    }
}
