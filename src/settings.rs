use std::env;
use std::path::PathBuf;

use anyhow::{Context, anyhow};

use crate::byte_format::ByteFormat;
use crate::device_store::DeviceStore;

pub const ENV_APP_ID: &str = "LWCTL_APP_ID";
pub const ENV_DEVICE_STORE: &str = "LWCTL_DEVICE_STORE";
pub const ENV_FORMAT: &str = "LWCTL_FORMAT";

/// Values given explicitly on the command line; they take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub app_id: Option<String>,
    pub store_path: Option<PathBuf>,
    pub format: Option<ByteFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_id: String,
    pub store_path: PathBuf,
    pub format: ByteFormat,
}

impl Settings {
    pub fn resolve(overrides: &SettingsOverrides) -> anyhow::Result<Self> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Like [`Settings::resolve`], reading variables through `lookup` instead of the process environment.
    pub fn resolve_with<F>(overrides: &SettingsOverrides, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = overrides
            .app_id
            .clone()
            .or_else(|| lookup(ENV_APP_ID))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("Missing AppID. Set --app-id or {}", ENV_APP_ID))?;
        let store_path = overrides
            .store_path
            .clone()
            .or_else(|| lookup(ENV_DEVICE_STORE).map(PathBuf::from))
            .unwrap_or_else(DeviceStore::default_path);
        let format = match overrides.format {
            Some(format) => format,
            None => lookup(ENV_FORMAT)
                .map(|raw| raw.parse::<ByteFormat>())
                .transpose()
                .with_context(|| format!("invalid {} value", ENV_FORMAT))?
                .unwrap_or_default(),
        };
        Ok(Self {
            app_id,
            store_path,
            format,
        })
    }
}
