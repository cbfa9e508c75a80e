//! Versioned template fields, the `[versions]` section of config.toml.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Values substituted into catalog URL and filename templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Versions {
    pub debian_architecture: String,
    pub debian_version: String,
    pub debian_live_architecture: String,
    pub debian_live_desktop_environment: String,
    pub tails_architecture: String,
    pub tails_version: String,
    pub kali_architecture: String,
    pub kali_version: String,
    pub kali_flavour: String,
    pub proxmox_version: String,
    pub pfsense_version: String,
    /// `vga` or `serial`; checked when the pfSense recipe is resolved.
    pub pfsense_installer_type: String,
    pub freebsd_version: String,
    pub debian_live_config_version: String,
    pub fedora_version_major: String,
    pub fedora_version_minor: String,
    pub ubuntu_architecture: String,
    pub ubuntu_version: String,
    pub archlinux_version: String,
}

impl Default for Versions {
    fn default() -> Self {
        Self {
            debian_architecture: "amd64".into(),
            debian_version: "13.3.0".into(),
            debian_live_architecture: "amd64".into(),
            debian_live_desktop_environment: "xfce".into(),
            tails_architecture: "amd64".into(),
            tails_version: "7.1".into(),
            kali_architecture: "amd64".into(),
            kali_version: "2025.4".into(),
            kali_flavour: "installer".into(),
            proxmox_version: "8.4-1".into(),
            pfsense_version: "2.7.2".into(),
            pfsense_installer_type: "vga".into(),
            freebsd_version: "13.2".into(),
            debian_live_config_version: "4.2.0".into(),
            fedora_version_major: "41".into(),
            fedora_version_minor: "1.4".into(),
            ubuntu_architecture: "amd64".into(),
            ubuntu_version: "22.04.5".into(),
            archlinux_version: "2026.01.01".into(),
        }
    }
}

/// pfSense memstick console flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfsenseInstaller {
    Vga,
    Serial,
}

impl PfsenseInstaller {
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "vga" => Ok(PfsenseInstaller::Vga),
            "serial" => Ok(PfsenseInstaller::Serial),
            other => Err(Error::Config(format!(
                "invalid installer type for pfsense: '{}' (expected 'vga' or 'serial')",
                other
            ))),
        }
    }

    /// Token inserted into the image filename.
    pub fn filename_token(self) -> &'static str {
        match self {
            PfsenseInstaller::Vga => "",
            PfsenseInstaller::Serial => "serial-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installer_type_parsing() {
        assert_eq!(PfsenseInstaller::parse("vga").unwrap(), PfsenseInstaller::Vga);
        assert_eq!(
            PfsenseInstaller::parse("serial").unwrap().filename_token(),
            "serial-"
        );
        assert!(matches!(
            PfsenseInstaller::parse("hdmi"),
            Err(Error::Config(_))
        ));
    }
}
