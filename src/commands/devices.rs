use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use tracing::{debug, info};

use crate::byte_format::{ByteFormat, format_bytes};
use crate::device::Device;
use crate::device_store::{DeviceManager, DeviceStore};
use crate::settings::{Settings, SettingsOverrides};
use crate::valid_id;

#[derive(Debug, Clone, Subcommand)]
pub enum DevicesCommand {
    /// Get information about a device.
    Info(InfoArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Device ID
    #[arg(value_name = "dev-id")]
    pub dev_id: String,
    /// Formatting for identifiers and keys [default: hex, or $LWCTL_FORMAT]
    #[arg(long, value_enum, value_name = "hex|msb|lsb")]
    pub format: Option<ByteFormat>,
    /// Application the device belongs to (falls back to $LWCTL_APP_ID).
    #[arg(long, value_name = "app-id")]
    pub app_id: Option<String>,
    /// Device store file (falls back to $LWCTL_DEVICE_STORE).
    #[arg(long, value_name = "path")]
    pub store: Option<PathBuf>,
}

impl InfoArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            app_id: self.app_id.clone(),
            store_path: self.store.clone(),
            format: self.format,
        }
    }
}

pub async fn run(cmd: DevicesCommand) -> Result<()> {
    match cmd {
        DevicesCommand::Info(args) => {
            if !valid_id(&args.dev_id) {
                bail!("Invalid Device ID \"{}\"", args.dev_id);
            }
            let settings = Settings::resolve(&args.overrides())?;
            debug!(
                app_id = %settings.app_id,
                store = %settings.store_path.display(),
                format = %settings.format,
                "resolved settings"
            );
            let store = DeviceStore::new(settings.store_path.clone());
            let output = info_with(&store, &settings, &args.dev_id).await?;
            print!("{}", output);
        }
    }
    Ok(())
}

/// Fetches `dev_id` through `manager` and renders it with the configured format.
pub async fn info_with<M: DeviceManager>(
    manager: &M,
    settings: &Settings,
    dev_id: &str,
) -> Result<String> {
    let device = manager
        .get_device(&settings.app_id, dev_id)
        .await
        .context("Could not get existing device")?;
    info!(app_id = %device.app_id, dev_id = %device.dev_id, "Found device");
    Ok(render_device(&device, settings.format))
}

/// Human-readable description of `device`, one field per line.
pub fn render_device(device: &Device, format: ByteFormat) -> String {
    let mut lines = vec![
        String::new(),
        format!("  Application ID: {}", device.app_id),
        format!("       Device ID: {}", device.dev_id),
    ];
    if let Some(lorawan) = &device.lorawan {
        lines.extend([
            format!("       Last Seen: {}", lorawan.last_seen_display()),
            String::new(),
            "    LoRaWAN Info:".to_string(),
            String::new(),
            format!("     AppEUI: {}", format_bytes(&lorawan.app_eui, format)),
            format!("     DevEUI: {}", format_bytes(&lorawan.dev_eui, format)),
            format!("    DevAddr: {}", format_bytes(&lorawan.dev_addr, format)),
            format!("     AppKey: {}", format_bytes(&lorawan.app_key, format)),
            format!("    AppSKey: {}", format_bytes(&lorawan.app_s_key, format)),
            format!("    NwkSKey: {}", format_bytes(&lorawan.nwk_s_key, format)),
            format!("     FCntUp: {}", lorawan.f_cnt_up),
            format!("   FCntDown: {}", lorawan.f_cnt_down),
            format!("    Options: {}", lorawan.options().join(", ")),
        ]);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::LorawanDevice;
    use crate::lorawan::{AppEui, AppKey, DevAddr, DevEui, NwkSKey};

    fn sample_device() -> Device {
        Device {
            app_id: "test-app".to_string(),
            dev_id: "sensor-1".to_string(),
            lorawan: Some(LorawanDevice {
                app_eui: AppEui([0x70, 0xB3, 0xD5, 0x7E, 0xF0, 0x00, 0x00, 0x01]),
                dev_eui: DevEui([0x00, 0x04, 0xA3, 0x0B, 0x00, 0x1C, 0x05, 0x30]),
                dev_addr: DevAddr([0x01, 0x02, 0x03, 0x04]),
                app_key: None,
                app_s_key: None,
                nwk_s_key: Some(NwkSKey([0xAB; 16])),
                f_cnt_up: 12,
                f_cnt_down: 3,
                disable_f_cnt_check: true,
                uses_32_bit_f_cnt: true,
                last_seen: 0,
            }),
        }
    }

    #[test]
    fn renders_lsb_scenario() {
        let text = render_device(&sample_device(), ByteFormat::Lsb);
        assert!(text.contains("     AppKey: <nil>\n"));
        assert!(text.contains("    DevAddr: {0x04, 0x03, 0x02, 0x01} (lsb first)\n"));
        assert!(text.contains("    AppSKey: <nil>\n"));
    }

    #[test]
    fn renders_full_hex_layout() {
        let text = render_device(&sample_device(), ByteFormat::Hex);
        let expected = "\n  Application ID: test-app\n       Device ID: sensor-1\n       Last Seen: never\n\n    LoRaWAN Info:\n\n     AppEUI: 70B3D57EF0000001\n     DevEUI: 0004A30B001C0530\n    DevAddr: 01020304\n     AppKey: <nil>\n    AppSKey: <nil>\n    NwkSKey: ABABABABABABABABABABABABABABABAB\n     FCntUp: 12\n   FCntDown: 3\n    Options: DisableFCntCheck, Uses32BitFCnt\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn zero_identifiers_render_nil() {
        let mut device = sample_device();
        if let Some(lorawan) = device.lorawan.as_mut() {
            lorawan.app_eui = AppEui::default();
            lorawan.app_key = Some(AppKey::default());
        }
        let text = render_device(&device, ByteFormat::Msb);
        assert!(text.contains("     AppEUI: <nil>\n"));
        assert!(text.contains("     AppKey: <nil>\n"));
        assert!(text.contains("    DevAddr: {0x01, 0x02, 0x03, 0x04} (msb first)\n"));
    }

    #[test]
    fn null_identifier_in_record_renders_nil() {
        let device: Device = serde_json::from_str(
            r#"{
                "app_id": "test-app",
                "dev_id": "sensor-1",
                "lorawan": { "app_eui": null, "dev_addr": "01020304" }
            }"#,
        )
        .unwrap();
        for format in [ByteFormat::Hex, ByteFormat::Msb, ByteFormat::Lsb] {
            let text = render_device(&device, format);
            assert!(text.contains("     AppEUI: <nil>\n"));
            assert!(text.contains("     DevEUI: <nil>\n"));
        }
        assert!(render_device(&device, ByteFormat::Hex).contains("    DevAddr: 01020304\n"));
    }

    #[test]
    fn device_without_lorawan_prints_ids_only() {
        let device = Device {
            lorawan: None,
            ..sample_device()
        };
        let text = render_device(&device, ByteFormat::Hex);
        assert_eq!(
            text,
            "\n  Application ID: test-app\n       Device ID: sensor-1\n"
        );
    }
}
