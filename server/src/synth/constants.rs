// Dockerfile constants
/// Dockerfile frontend pinned by the `# syntax=` directive
pub const DOCKERFILE_SYNTAX: &str = "docker/dockerfile:1";
/// Image providing `steamcmd`
pub const STEAMCMD_IMAGE: &str = "steamcmd/steamcmd";
/// Name of the stage that installs the app
pub const STEAMCMD_STAGE: &str = "steamcmd";
/// Directory the app is installed into in the `steamcmd` stage
pub const INSTALL_DIR: &str = "/mnt";
/// Unprivileged user (and group) the app runs as
pub const USER: &str = "steam";
/// Base image used when the steamapp does not specify one
pub const DEFAULT_BASE_IMAGE: &str = "debian:stable-slim";
/// Registry prefixes stripped from base images, longest first
pub const DEFAULT_REGISTRY_PREFIXES: [&str; 2] = ["docker.io/library/", "docker.io/"];

// Wine bootstrap
/// Packages that require the WineHQ apt repository
pub const WINEHQ_PACKAGES: [&str; 3] = ["winehq-stable", "winehq-devel", "winehq-staging"];
/// Name of the stage that prepares the WineHQ apt repository
pub const WINE_STAGE: &str = "wine";
/// Image the `wine` stage runs on
pub const WINE_STAGE_IMAGE: &str = "debian:stable-slim";
/// Staging tree in the `wine` stage, laid out like `/etc/apt`
pub const WINE_STAGING_DIR: &str = "/wine";
/// Base URL of the WineHQ builds
pub const WINEHQ_URL: &str = "https://dl.winehq.org/wine-builds";
/// Releases WineHQ publishes apt repositories for: distribution ID, release
/// codename and version number
pub const WINEHQ_RELEASES: [(&str, &str, &str); 8] = [
    ("debian", "trixie", "13"),
    ("debian", "bookworm", "12"),
    ("debian", "bullseye", "11"),
    ("ubuntu", "plucky", "25.04"),
    ("ubuntu", "oracular", "24.10"),
    ("ubuntu", "noble", "24.04"),
    ("ubuntu", "jammy", "22.04"),
    ("ubuntu", "focal", "20.04"),
];
