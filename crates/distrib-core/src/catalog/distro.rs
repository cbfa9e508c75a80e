//! Supported distribution identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distro {
    Debian,
    DebianLive,
    Tails,
    Kali,
    Proxmox,
    Pfsense,
    Freebsd,
    DebianLiveConfig,
    Fedora,
    Ubuntu,
    Archlinux,
}

impl Distro {
    /// Every distribution, in the order `all` processes them.
    pub const ALL: [Distro; 11] = [
        Distro::Debian,
        Distro::DebianLive,
        Distro::Tails,
        Distro::Kali,
        Distro::Proxmox,
        Distro::Pfsense,
        Distro::Freebsd,
        Distro::DebianLiveConfig,
        Distro::Fedora,
        Distro::Ubuntu,
        Distro::Archlinux,
    ];

    /// Command-line identifier, also the output subdirectory name.
    pub fn name(self) -> &'static str {
        match self {
            Distro::Debian => "debian",
            Distro::DebianLive => "debian-live",
            Distro::Tails => "tails",
            Distro::Kali => "kali",
            Distro::Proxmox => "proxmox",
            Distro::Pfsense => "pfsense",
            Distro::Freebsd => "freebsd",
            Distro::DebianLiveConfig => "debian-live-config",
            Distro::Fedora => "fedora",
            Distro::Ubuntu => "ubuntu",
            Distro::Archlinux => "archlinux",
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distro {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distro::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| Error::UnknownDistribution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_round_trip() {
        for d in Distro::ALL {
            assert_eq!(d.name().parse::<Distro>().unwrap(), d);
        }
    }

    #[test]
    fn all_is_unique() {
        let set: HashSet<_> = Distro::ALL.iter().collect();
        assert_eq!(set.len(), Distro::ALL.len());
    }

    #[test]
    fn unknown_and_case_sensitive() {
        assert!(matches!(
            "gentoo".parse::<Distro>(),
            Err(Error::UnknownDistribution(n)) if n == "gentoo"
        ));
        assert!("Debian".parse::<Distro>().is_err());
        assert!("all".parse::<Distro>().is_err());
    }
}
