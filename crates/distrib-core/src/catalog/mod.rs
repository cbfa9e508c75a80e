//! Distribution catalog: one recipe per supported distribution.
//!
//! Each vendor lays out its mirror differently and signs different things.
//! All of that lives here as data; the orchestrator runs every recipe the
//! same way.

mod distro;
mod versions;

pub use distro::Distro;
pub use versions::{PfsenseInstaller, Versions};

use crate::digest::DigestAlgorithm;
use crate::error::Error;
use crate::recipe::{Artifact, ChecksumSource, KeySource, Recipe, SignatureScheme, SignedTarget};
use crate::signature::KeyLookup;

const UBUNTU_KEYSERVER: &str = "hkp://keyserver.ubuntu.com";
/// Debian CD signing key.
const DEBIAN_CD_KEY: &str = "DF9B9C49EAA9298432589D76DA87E80D6294BE9B";
/// Ubuntu CD image automatic signing key (2012).
const UBUNTU_CD_KEY: &str = "843938DF228D22F7B3742BC0D94AA3F0EFE21092";
const ARCHLINUX_RELEASE_SIGNER: &str = "pierre@archlinux.org";

/// Resolve the recipe for `distro` with concrete versions.
///
/// Fails with `Error::Config` on an invalid template value (e.g. an unknown
/// pfSense installer type) or a recipe that does not pass `Recipe::validate`.
pub fn recipe(distro: Distro, v: &Versions) -> Result<Recipe, Error> {
    let recipe = match distro {
        Distro::Debian => {
            let base = format!(
                "https://cdimage.debian.org/debian-cd/current/{}/iso-cd/",
                v.debian_architecture
            );
            let iso = format!(
                "debian-{}-{}-netinst.iso",
                v.debian_version, v.debian_architecture
            );
            debian_style(distro, &base, &iso, debian_cd_key())?
        }
        Distro::DebianLive => {
            let base = format!(
                "https://cdimage.debian.org/cdimage/release/current-live/{}/iso-hybrid/",
                v.debian_live_architecture
            );
            let iso = format!(
                "debian-live-{}-{}-{}.iso",
                v.debian_version, v.debian_live_architecture, v.debian_live_desktop_environment
            );
            debian_style(distro, &base, &iso, debian_cd_key())?
        }
        Distro::Tails => {
            let stem = format!("tails-{}-{}", v.tails_architecture, v.tails_version);
            Recipe {
                distro,
                image: Artifact::from_url(format!(
                    "https://mirrors.wikimedia.org/tails/stable/{stem}/{stem}.iso"
                ))?,
                checksum: ChecksumSource::None,
                signature: SignatureScheme::Detached {
                    artifact: Artifact::from_url(format!(
                        "https://tails.boum.org/torrents/files/{stem}.iso.sig"
                    ))?,
                    target: SignedTarget::Image,
                },
                key: KeySource::Url(Artifact::from_url(
                    "https://tails.boum.org/tails-signing.key",
                )?),
            }
        }
        Distro::Kali => {
            let base = format!("https://cdimage.kali.org/kali-{}/", v.kali_version);
            Recipe {
                distro,
                image: Artifact::in_dir(
                    &base,
                    &format!(
                        "kali-linux-{}-{}-{}.iso",
                        v.kali_version, v.kali_flavour, v.kali_architecture
                    ),
                )?,
                checksum: ChecksumSource::List {
                    artifact: Artifact::in_dir(&base, "SHA256SUMS")?,
                    algorithm: DigestAlgorithm::Sha256,
                },
                signature: SignatureScheme::Detached {
                    artifact: Artifact::in_dir(&base, "SHA256SUMS.gpg")?,
                    target: SignedTarget::ChecksumList,
                },
                key: KeySource::Url(Artifact::from_url(
                    "https://archive.kali.org/archive-key.asc",
                )?),
            }
        }
        Distro::Proxmox => Recipe {
            distro,
            image: Artifact::in_dir(
                "https://enterprise.proxmox.com/iso",
                &format!("proxmox-ve_{}.iso", v.proxmox_version),
            )?,
            checksum: ChecksumSource::None,
            signature: SignatureScheme::None,
            key: KeySource::None,
        },
        Distro::Pfsense => {
            let installer = PfsenseInstaller::parse(&v.pfsense_installer_type)?;
            let image = format!(
                "pfSense-CE-memstick-{}{}-RELEASE-amd64.img.gz",
                installer.filename_token(),
                v.pfsense_version
            );
            Recipe {
                distro,
                checksum: ChecksumSource::Sidecar {
                    artifact: Artifact::in_dir(
                        "https://www.pfsense.org/hashes",
                        &format!("{}.sha256", image),
                    )?,
                    algorithm: DigestAlgorithm::Sha256,
                },
                image: Artifact::in_dir("https://frafiles.pfsense.org/mirror/downloads", &image)?,
                signature: SignatureScheme::None,
                key: KeySource::None,
            }
        }
        Distro::Freebsd => {
            let base = format!(
                "https://download.freebsd.org/ftp/releases/amd64/amd64/ISO-IMAGES/{}",
                v.freebsd_version
            );
            Recipe {
                distro,
                image: Artifact::in_dir(
                    &base,
                    &format!("FreeBSD-{}-RELEASE-amd64-memstick.img", v.freebsd_version),
                )?,
                checksum: ChecksumSource::List {
                    artifact: Artifact::in_dir(
                        &base,
                        &format!("CHECKSUM.SHA512-FreeBSD-{}-RELEASE-amd64", v.freebsd_version),
                    )?,
                    algorithm: DigestAlgorithm::Sha512,
                },
                // Keyring is published for manual checks; the checksum file itself is unsigned.
                signature: SignatureScheme::None,
                key: KeySource::Url(Artifact::from_url(
                    "https://docs.freebsd.org/pgpkeys/pgpkeys.txt",
                )?),
            }
        }
        Distro::DebianLiveConfig => {
            let base = format!(
                "https://github.com/nodiscc/debian-live-config/releases/download/{}/",
                v.debian_live_config_version
            );
            let iso = format!(
                "debian-live-config-{}-debian-bookworm-amd64.iso",
                v.debian_live_config_version
            );
            let key = KeySource::Url(Artifact::in_dir(&base, "debian-live-config-release.key")?);
            debian_style(distro, &base, &iso, key)?
        }
        Distro::Fedora => {
            let base = format!(
                "https://download.fedoraproject.org/pub/fedora/linux/releases/{}/Workstation/x86_64/iso",
                v.fedora_version_major
            );
            Recipe {
                distro,
                image: Artifact::in_dir(
                    &base,
                    &format!(
                        "Fedora-Workstation-Live-x86_64-{}-{}.iso",
                        v.fedora_version_major, v.fedora_version_minor
                    ),
                )?,
                checksum: ChecksumSource::List {
                    artifact: Artifact::in_dir(
                        &base,
                        &format!(
                            "Fedora-Workstation-{}-{}-x86_64-CHECKSUM",
                            v.fedora_version_major, v.fedora_version_minor
                        ),
                    )?,
                    algorithm: DigestAlgorithm::Sha256,
                },
                signature: SignatureScheme::Clearsigned,
                key: KeySource::Url(Artifact::from_url("https://fedoraproject.org/fedora.gpg")?),
            }
        }
        Distro::Ubuntu => {
            let base = format!("https://releases.ubuntu.com/{}", v.ubuntu_version);
            Recipe {
                distro,
                image: Artifact::in_dir(
                    &base,
                    &format!(
                        "ubuntu-{}-desktop-{}.iso",
                        v.ubuntu_version, v.ubuntu_architecture
                    ),
                )?,
                checksum: ChecksumSource::List {
                    artifact: Artifact::in_dir(&base, "SHA256SUMS")?,
                    algorithm: DigestAlgorithm::Sha256,
                },
                signature: SignatureScheme::Detached {
                    artifact: Artifact::in_dir(&base, "SHA256SUMS.gpg")?,
                    target: SignedTarget::ChecksumList,
                },
                key: KeySource::Lookup(KeyLookup::Keyserver {
                    server: UBUNTU_KEYSERVER,
                    fingerprint: UBUNTU_CD_KEY,
                }),
            }
        }
        Distro::Archlinux => {
            let base = format!("https://geo.mirror.pkgbuild.com/iso/{}/", v.archlinux_version);
            Recipe {
                distro,
                image: Artifact::in_dir(&base, "archlinux-x86_64.iso")?,
                checksum: ChecksumSource::List {
                    artifact: Artifact::from_url(format!(
                        "https://archlinux.org/iso/{}/sha256sums.txt",
                        v.archlinux_version
                    ))?,
                    algorithm: DigestAlgorithm::Sha256,
                },
                signature: SignatureScheme::Detached {
                    artifact: Artifact::in_dir(&base, "archlinux-x86_64.iso.sig")?,
                    target: SignedTarget::Image,
                },
                key: KeySource::Lookup(KeyLookup::Wkd {
                    email: ARCHLINUX_RELEASE_SIGNER,
                }),
            }
        }
    };
    recipe.validate()?;
    Ok(recipe)
}

/// Resolve several recipes; the first invalid one aborts the lot.
pub fn recipes(distros: &[Distro], v: &Versions) -> Result<Vec<Recipe>, Error> {
    distros.iter().map(|d| recipe(*d, v)).collect()
}

fn debian_cd_key() -> KeySource {
    KeySource::Lookup(KeyLookup::Keyserver {
        server: UBUNTU_KEYSERVER,
        fingerprint: DEBIAN_CD_KEY,
    })
}

/// SHA512SUMS signed by SHA512SUMS.sign, as Debian and its derivatives publish.
fn debian_style(distro: Distro, base: &str, iso: &str, key: KeySource) -> Result<Recipe, Error> {
    Ok(Recipe {
        distro,
        image: Artifact::in_dir(base, iso)?,
        checksum: ChecksumSource::List {
            artifact: Artifact::in_dir(base, "SHA512SUMS")?,
            algorithm: DigestAlgorithm::Sha512,
        },
        signature: SignatureScheme::Detached {
            artifact: Artifact::in_dir(base, "SHA512SUMS.sign")?,
            target: SignedTarget::ChecksumList,
        },
        key,
    })
}
