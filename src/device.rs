use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lorawan::{AppEui, AppKey, AppSKey, DevAddr, DevEui, NwkSKey};

/// A registered device as returned by the device manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub app_id: String,
    pub dev_id: String,
    #[serde(default)]
    pub lorawan: Option<LorawanDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorawanDevice {
    #[serde(default)]
    pub app_eui: AppEui,
    #[serde(default)]
    pub dev_eui: DevEui,
    #[serde(default)]
    pub dev_addr: DevAddr,
    #[serde(default)]
    pub app_key: Option<AppKey>,
    #[serde(default)]
    pub app_s_key: Option<AppSKey>,
    #[serde(default)]
    pub nwk_s_key: Option<NwkSKey>,
    #[serde(default)]
    pub f_cnt_up: u32,
    #[serde(default)]
    pub f_cnt_down: u32,
    #[serde(default)]
    pub disable_f_cnt_check: bool,
    #[serde(default)]
    pub uses_32_bit_f_cnt: bool,
    /// Nanoseconds since the Unix epoch; 0 when the device was never seen.
    #[serde(default)]
    pub last_seen: u64,
}

impl LorawanDevice {
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        if self.last_seen == 0 {
            return None;
        }
        let nanos = i64::try_from(self.last_seen).unwrap_or(i64::MAX);
        Some(DateTime::from_timestamp_nanos(nanos))
    }

    /// `never`, or the last-seen time in UTC, e.g. `2017-07-14 02:40:00 +0000 UTC`.
    pub fn last_seen_display(&self) -> String {
        self.last_seen_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S %z UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    }

    pub fn options(&self) -> Vec<&'static str> {
        let mut options = Vec::new();
        if self.disable_f_cnt_check {
            options.push("DisableFCntCheck");
        }
        if self.uses_32_bit_f_cnt {
            options.push("Uses32BitFCnt");
        }
        options
    }
}
