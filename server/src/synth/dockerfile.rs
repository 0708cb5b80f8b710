use steamcrate_models::Steamapp;

use super::{
    SynthOptions, SynthesisError,
    constants::{
        DEFAULT_BASE_IMAGE, DEFAULT_REGISTRY_PREFIXES, DOCKERFILE_SYNTAX, INSTALL_DIR,
        STEAMCMD_IMAGE, STEAMCMD_STAGE, USER, WINE_STAGE, WINE_STAGE_IMAGE, WINE_STAGING_DIR,
        WINEHQ_PACKAGES, WINEHQ_RELEASES, WINEHQ_URL,
    },
    directive::{Directive, Dockerfile, Instruction},
};

/// Build the multi-stage Dockerfile that installs the steamapp with `steamcmd`
/// and copies it onto the steamapp's base image.
///
/// Fails only when a beta branch is requested without a beta password.
pub fn synthesize(steamapp: &Steamapp, opts: &SynthOptions) -> Result<Dockerfile, SynthesisError> {
    let app_update = app_update(steamapp, opts)?;
    let needs_wine = needs_wine(steamapp);
    let base_image = normalize_base_image(steamapp.base_image.as_deref());

    let mut dockerfile = Dockerfile::default();
    dockerfile.push(Directive::new(Instruction::Syntax, [DOCKERFILE_SYNTAX]));

    // Install stage
    dockerfile.push(Directive::new(
        Instruction::From,
        [STEAMCMD_IMAGE, "AS", STEAMCMD_STAGE],
    ));
    dockerfile.push(Directive::new(
        Instruction::Run,
        [
            groupadd(),
            useradd(),
            steamcmd(&steamapp.platform_type, &app_update),
        ],
    ));

    if needs_wine {
        push_wine_stage(&mut dockerfile, wine_repository(base_image, opts));
    }

    // Final stage
    dockerfile.push(Directive::new(Instruction::From, [base_image]));

    if needs_wine {
        dockerfile.push(Directive::new(
            Instruction::Run,
            [
                "apt-get update -y",
                "apt-get install -y --no-install-recommends ca-certificates",
                "rm -rf /var/lib/apt/lists/*",
                "apt-get clean",
                "dpkg --add-architecture i386",
            ],
        ));
        dockerfile.push(Directive::new(
            Instruction::Copy,
            [format!("--from={WINE_STAGE}"), WINE_STAGING_DIR.to_owned(), "/etc/apt".to_owned()],
        ));
    }

    let mut setup = vec![groupadd(), useradd()];
    if !steamapp.apt_packages.is_empty() {
        setup.push("apt-get update -y".to_owned());
        setup.push(apt_install(&steamapp.apt_packages));
        setup.push("rm -rf /var/lib/apt/lists/*".to_owned());
        setup.push("apt-get clean".to_owned());
    }
    setup.extend(steamapp.execs.iter().cloned());
    dockerfile.push(Directive::new(Instruction::Run, setup));

    dockerfile.push(Directive::new(Instruction::User, [USER]));
    dockerfile.push(Directive::new(
        Instruction::Copy,
        [
            format!("--from={STEAMCMD_STAGE}"),
            format!("--chown={USER}:{USER}"),
            INSTALL_DIR.to_owned(),
            format!("/home/{USER}"),
        ],
    ));

    if !steamapp.entrypoint.is_empty() {
        dockerfile.push(Directive::new(Instruction::Entrypoint, &steamapp.entrypoint));
    }
    if !steamapp.cmd.is_empty() {
        dockerfile.push(Directive::new(Instruction::Cmd, &steamapp.cmd));
    }

    Ok(dockerfile)
}

/// Strip the default registry from a base image reference, defaulting to
/// `debian:stable-slim` when unset. References to other registries are kept as-is.
pub fn normalize_base_image(base_image: Option<&str>) -> &str {
    let Some(base_image) = base_image.filter(|image| !image.is_empty()) else {
        return DEFAULT_BASE_IMAGE;
    };

    DEFAULT_REGISTRY_PREFIXES
        .iter()
        .find_map(|prefix| base_image.strip_prefix(prefix))
        .unwrap_or(base_image)
}

fn app_update(steamapp: &Steamapp, opts: &SynthOptions) -> Result<String, SynthesisError> {
    let mut app_update = format!("+app_update {}", steamapp.app_id);

    if let Some(branch) = opts.beta_branch(steamapp.branch.as_deref()) {
        let password = steamapp
            .beta_password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(|| SynthesisError::MissingBetaPassword {
                branch: branch.to_owned(),
            })?;
        app_update.push_str(&format!(" -beta {branch} -betapassword {password}"));
    }

    Ok(app_update)
}

fn steamcmd(platform_type: &str, app_update: &str) -> String {
    [
        "steamcmd".to_owned(),
        format!("\t\t+force_install_dir {INSTALL_DIR}"),
        "\t\t+login anonymous".to_owned(),
        format!("\t\t@sSteamCmdForcePlatformType {platform_type}"),
        format!("\t\t{app_update}"),
        "\t\t+quit".to_owned(),
    ]
    .join(" \\\n")
}

fn needs_wine(steamapp: &Steamapp) -> bool {
    steamapp.platform_type == "windows"
        && steamapp
            .apt_packages
            .iter()
            .any(|pkg| WINEHQ_PACKAGES.contains(&pkg.as_str()))
}

/// Distribution ID and codename of the WineHQ repository matching the base
/// image's release, e.g. `ubuntu:noble` or `debian:12-slim`. Tags that name no
/// known release, like `stable`, fall back to the configured repository.
fn wine_repository<'a>(base_image: &'a str, opts: &'a SynthOptions) -> (&'a str, &'a str) {
    let name = base_image.split('@').next().unwrap_or(base_image);
    let (repository, tag) = match name.rsplit_once(':') {
        Some((repository, tag)) if !tag.contains('/') => (repository, tag),
        _ => (name, "latest"),
    };
    let repository = repository.rsplit('/').next().unwrap_or(repository);
    let release = tag.split('-').next().unwrap_or(tag);

    WINEHQ_RELEASES
        .iter()
        .find(|(distro, codename, version)| {
            release == *codename
                || (repository == *distro
                    && (release == *version
                        || release
                            .strip_prefix(*version)
                            .is_some_and(|point| point.starts_with('.'))))
        })
        .map(|(distro, codename, _)| (*distro, *codename))
        .unwrap_or((opts.wine_distro.as_str(), opts.wine_codename.as_str()))
}

/// Stage that downloads the WineHQ signing key and apt sources into
/// `/wine/keyrings` and `/wine/sources.list.d`.
fn push_wine_stage(dockerfile: &mut Dockerfile, (distro, codename): (&str, &str)) {
    let armored_key = format!("{WINE_STAGING_DIR}/winehq.key");
    let keyring = format!("{WINE_STAGING_DIR}/keyrings/winehq-archive.key");

    dockerfile.push(Directive::new(
        Instruction::From,
        [WINE_STAGE_IMAGE, "AS", WINE_STAGE],
    ));
    dockerfile.push(Directive::new(
        Instruction::Add,
        [format!("{WINEHQ_URL}/winehq.key"), armored_key.clone()],
    ));
    dockerfile.push(Directive::new(
        Instruction::Add,
        [
            format!("{WINEHQ_URL}/{distro}/dists/{codename}/winehq-{codename}.sources"),
            format!("{WINE_STAGING_DIR}/sources.list.d/winehq-{codename}.sources"),
        ],
    ));
    dockerfile.push(Directive::new(
        Instruction::Run,
        [
            "apt-get update -y".to_owned(),
            "apt-get install -y --no-install-recommends gnupg".to_owned(),
            format!("mkdir -p {WINE_STAGING_DIR}/keyrings"),
            format!("gpg --dearmor --output {keyring} {armored_key}"),
            format!("rm {armored_key}"),
        ],
    ));
}

fn groupadd() -> String {
    format!("groupadd --system {USER}")
}

fn useradd() -> String {
    format!("useradd --system --gid {USER} --shell /bin/bash --create-home {USER}")
}

fn apt_install(packages: &[String]) -> String {
    std::iter::once("apt-get install -y --no-install-recommends".to_owned())
        .chain(packages.iter().map(|pkg| format!("\t\t{pkg}")))
        .collect::<Vec<_>>()
        .join(" \\\n")
}
