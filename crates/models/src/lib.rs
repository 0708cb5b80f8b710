//! Shared models for the steamcrate API

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Name of the branch every Steam app publishes without a password.
pub const DEFAULT_BRANCH: &str = "public";

/// Transport protocol of an exposed port
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
}

/// A port the app listens on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PortSpec {
    pub port: u16,
    #[serde(default)]
    pub protocols: BTreeSet<Protocol>,
}

/// Installation and runtime specification of a Steam app, as stored by the
/// metadata API.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Validate,
)]
#[validate(schema(function = "validate_steamapp"))]
pub struct Steamapp {
    /// The Steam app ID
    #[validate(range(min = 1))]
    pub app_id: u32,
    /// Branch to install. Anything other than the default branch is a beta branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Password for the beta branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_password: Option<String>,
    /// Image the app is installed onto. Defaults to `debian:stable-slim`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    /// Debian packages to install onto the base image
    #[serde(default)]
    pub apt_packages: Vec<String>,
    #[serde(default)]
    pub launch_type: String,
    /// Platform to install, e.g. `linux` or `windows`
    #[serde(default)]
    pub platform_type: String,
    /// Additional shell commands run as root after package installation
    #[serde(default)]
    pub execs: Vec<String>,
    #[serde(default)]
    pub entrypoint: Vec<String>,
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default)]
    pub ports: Vec<PortSpec>,
}

fn validate_steamapp(steamapp: &Steamapp) -> Result<(), ValidationError> {
    if let Some(branch) = steamapp.branch.as_deref().filter(|branch| !branch.is_empty()) {
        validate_branch_name(branch)?;
    }

    if let Some(password) = steamapp.beta_password.as_deref() {
        validate_beta_password(password)?;
    }

    for pkg in &steamapp.apt_packages {
        validate_package_name(pkg)?;
    }

    Ok(())
}

/// Validate a branch name so it is safe to use as an image tag, a URL path
/// segment and an argument in a Dockerfile `RUN` command.
pub fn validate_branch_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("branch").with_message("branch must not be empty".into()));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(ValidationError::new("branch").with_message(
            format!(
                "branch '{name}' contains forbidden character {ch:?}, \
                 only alphanumerics and . - _ are allowed"
            )
            .into(),
        ));
    }

    Ok(())
}

/// Validate a beta password so it can be passed to `steamcmd` unquoted.
///
/// An empty password is accepted here; whether a branch needs one is decided
/// at synthesis time.
pub fn validate_beta_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| !is_safe_password_char(c)) {
        return Err(ValidationError::new("beta_password").with_message(
            "beta password may only contain alphanumerics and + - . _ , : = @ % ^ /".into(),
        ));
    }

    Ok(())
}

fn is_safe_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '+' | '-' | '.' | '_' | ',' | ':' | '=' | '@' | '%' | '^' | '/')
}

/// Validate a package name so it is safe to interpolate into an `apt-get install`
/// shell command.
///
/// Beyond alphanumerics, allows the characters Debian uses in package names
/// (`+`, `-`, `.`), architecture qualifiers (`:`), version pins (`=`, `~`) and
/// target releases (`/`).
pub fn validate_package_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("apt_packages")
            .with_message("package name must not be empty".into()));
    }

    if let Some(ch) = name.chars().find(|c| !is_safe_package_char(*c)) {
        return Err(ValidationError::new("apt_packages").with_message(
            format!(
                "package name '{name}' contains forbidden character {ch:?}, \
                 only alphanumerics and + - . : = ~ / are allowed"
            )
            .into(),
        ));
    }

    Ok(())
}

fn is_safe_package_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | ':' | '=' | '~' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valheim() -> Steamapp {
        Steamapp {
            app_id: 896660,
            platform_type: "linux".into(),
            ..Default::default()
        }
    }

    #[test]
    fn deserializes_with_defaults() {
        let steamapp: Steamapp = serde_json::from_str(
            r#"{"app_id": 896660, "name": "Valheim",
                "ports": [{"port": 2456, "protocols": ["UDP"]}]}"#,
        )
        .unwrap();

        assert_eq!(steamapp.app_id, 896660);
        assert_eq!(steamapp.branch, None);
        assert_eq!(steamapp.base_image, None);
        assert!(steamapp.apt_packages.is_empty());
        assert_eq!(steamapp.ports.len(), 1);
        assert!(steamapp.ports[0].protocols.contains(&Protocol::Udp));
    }

    #[test]
    fn accepts_branches() {
        for branch in [None, Some(""), Some("public"), Some("public-test"), Some("beta_2.1")] {
            let steamapp = Steamapp {
                branch: branch.map(str::to_owned),
                ..valheim()
            };
            assert!(steamapp.validate().is_ok(), "expected {branch:?} to be valid");
        }
    }

    #[test]
    fn rejects_unsafe_branch() {
        let steamapp = Steamapp {
            branch: Some("beta; reboot".into()),
            beta_password: Some("pwd".into()),
            ..valheim()
        };
        let err = steamapp.validate().unwrap_err();
        assert!(err.to_string().contains("forbidden character"), "{err}");
    }

    #[test]
    fn validates_beta_password() {
        for password in ["", "pwd", "Hunter2_beta", "a.b-c+d@e%f"] {
            let steamapp = Steamapp {
                branch: Some("beta".into()),
                beta_password: Some(password.into()),
                ..valheim()
            };
            assert!(steamapp.validate().is_ok(), "expected '{password}' to be valid");
        }

        for password in ["has space", "pwd; reboot", "$(evil)", "`evil`", "a'b", "a\nb"] {
            let steamapp = Steamapp {
                branch: Some("beta".into()),
                beta_password: Some(password.into()),
                ..valheim()
            };
            let err = steamapp.validate().unwrap_err();
            assert!(err.to_string().contains("beta password"), "{err}");
        }
    }

    #[test]
    fn rejects_unsafe_package() {
        let steamapp = Steamapp {
            apt_packages: vec!["curl".into(), "curl; reboot".into()],
            ..valheim()
        };
        assert!(steamapp.validate().is_err());
    }

    #[test]
    fn rejects_zero_app_id() {
        let steamapp = Steamapp {
            app_id: 0,
            ..valheim()
        };
        assert!(steamapp.validate().is_err());
    }

    #[test]
    fn accepts_valid_package_names() {
        let valid = [
            "ca-certificates",
            "libstdc++6",
            "lib32gcc-s1",
            "winehq-stable",
            "libc6:i386",
            "curl=7.88.1-10",
            "nginx/bookworm-backports",
        ];
        for name in valid {
            assert!(
                validate_package_name(name).is_ok(),
                "expected '{name}' to be valid"
            );
        }
    }

    #[test]
    fn rejects_shell_metacharacters() {
        let invalid = [
            "pkg; rm -rf /",
            "pkg && curl http://evil.com",
            "$(evil)",
            "`evil`",
            "pkg\nnewline",
            "has space",
            "",
        ];
        for name in invalid {
            assert!(
                validate_package_name(name).is_err(),
                "expected '{name}' to be rejected"
            );
        }

        for name in ["beta;reboot", "../etc", "a b", ""] {
            assert!(
                validate_branch_name(name).is_err(),
                "expected branch '{name}' to be rejected"
            );
        }
    }
}
