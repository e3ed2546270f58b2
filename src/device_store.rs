use std::{
    env, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use tracing::debug;

use crate::device::Device;

const STORE_FILE: &str = "devices.json";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("device \"{dev_id}\" not found in application \"{app_id}\"")]
    NotFound { app_id: String, dev_id: String },
    #[error("failed to read device store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid device store {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of device descriptors.
#[allow(async_fn_in_trait)]
pub trait DeviceManager {
    async fn get_device(&self, app_id: &str, dev_id: &str) -> Result<Device, LookupError>;
}

/// Device manager backed by a JSON array of device records on disk.
#[derive(Debug, Clone)]
pub struct DeviceStore {
    path: PathBuf,
}

impl DeviceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `devices.json` in the platform config dir, else in `./.lwctl`, else in the temp dir.
    pub fn default_path() -> PathBuf {
        let dir = ProjectDirs::from("org", "lorawan", "lwctl")
            .map(|proj| proj.config_dir().to_path_buf())
            .or_else(|| env::current_dir().ok().map(|cwd| cwd.join(".lwctl")))
            .unwrap_or_else(|| env::temp_dir().join("lwctl"));
        dir.join(STORE_FILE)
    }

    pub async fn load_devices(&self) -> Result<Vec<Device>, LookupError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "device store missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(LookupError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&data).map_err(|source| LookupError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn save_devices(&self, devices: &[Device]) -> Result<(), LookupError> {
        let io_err = |source| LookupError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let serialized = serde_json::to_string_pretty(devices).map_err(|source| {
            LookupError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(io_err)
    }

    /// Inserts `device`, replacing any record with the same app and device ID.
    pub async fn upsert_device(&self, device: Device) -> Result<(), LookupError> {
        let mut devices = self.load_devices().await?;
        if let Some(existing) = devices
            .iter_mut()
            .find(|entry| entry.app_id == device.app_id && entry.dev_id == device.dev_id)
        {
            *existing = device;
        } else {
            devices.push(device);
        }
        self.save_devices(&devices).await
    }
}

impl DeviceManager for DeviceStore {
    async fn get_device(&self, app_id: &str, dev_id: &str) -> Result<Device, LookupError> {
        let devices = self.load_devices().await?;
        debug!(path = %self.path.display(), count = devices.len(), "loaded device store");
        devices
            .into_iter()
            .find(|device| device.app_id == app_id && device.dev_id == dev_id)
            .ok_or_else(|| LookupError::NotFound {
                app_id: app_id.to_string(),
                dev_id: dev_id.to_string(),
            })
    }
}
