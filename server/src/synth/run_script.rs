use steamcrate_models::Steamapp;
use url::Url;

use super::{SynthOptions, directive::Dockerfile};

/// Where the `run.sh` script gets the Dockerfile from
#[derive(Debug, Clone, Copy)]
pub enum BuildSource<'a> {
    /// Build from a Dockerfile served at this URL
    Remote(&'a Url),
    /// Build from the Dockerfile inlined into the script as a heredoc
    Inline(&'a Dockerfile),
}

/// `docker run` command for the image, publishing every declared port.
pub fn run_command(steamapp: &Steamapp, image_ref: &str) -> String {
    let mut command = String::from("docker run");
    for port in &steamapp.ports {
        command.push_str(&format!(" -p {0}:{0}", port.port));
    }
    command.push(' ');
    command.push_str(image_ref);
    command
}

/// Shell script that builds the image locally and runs it.
pub fn run_script(steamapp: &Steamapp, image_ref: &str, source: BuildSource<'_>) -> String {
    let mut lines = vec!["#!/bin/sh".to_owned()];
    match source {
        BuildSource::Remote(url) => {
            lines.push(format!("docker build --tag {image_ref} {url}"));
        }
        BuildSource::Inline(dockerfile) => {
            let dockerfile = dockerfile.to_string();
            let delimiter = heredoc_delimiter(&dockerfile);
            lines.push(format!("docker build --tag {image_ref} - <<'{delimiter}'"));
            lines.push(dockerfile);
            lines.push(delimiter);
        }
    }
    lines.push(run_command(steamapp, image_ref));

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// `EOF`, or `EOF_<n>` for the first `n` whose line does not occur in the body.
/// Dockerfile heredocs inside `RUN` may use `EOF` themselves.
fn heredoc_delimiter(body: &str) -> String {
    let taken = |delimiter: &str| body.lines().any(|line| line == delimiter);
    if !taken("EOF") {
        return "EOF".to_owned();
    }

    (1..)
        .map(|n| format!("EOF_{n}"))
        .find(|delimiter| !taken(delimiter))
        .unwrap_or_default()
}

/// One-liner that downloads and runs the steamapp's `run.sh`.
pub fn install_command(run_script_url: &Url) -> String {
    format!("curl -fsSL {run_script_url} | sh")
}

/// URL of a file served for the steamapp, e.g. `<base>/896660/beta/dockerfile`.
/// The branch segment is left out for the default branch.
pub fn artifact_url(
    base: &Url,
    app_id: u32,
    branch: Option<&str>,
    file: &str,
    opts: &SynthOptions,
) -> Result<Url, url::ParseError> {
    let path = match opts.beta_branch(branch) {
        Some(branch) => format!("/{app_id}/{branch}/{file}"),
        None => format!("/{app_id}/{file}"),
    };
    base.join(&path)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use steamcrate_models::{PortSpec, Protocol};

    use super::*;
    use crate::synth::{Directive, Instruction, synthesize};

    fn valheim() -> Steamapp {
        Steamapp {
            app_id: 896660,
            platform_type: "linux".into(),
            ports: vec![PortSpec {
                port: 2456,
                protocols: BTreeSet::from([Protocol::Udp]),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn run_command_publishes_ports() {
        assert_eq!(
            run_command(&valheim(), "registry.example/896660"),
            "docker run -p 2456:2456 registry.example/896660"
        );

        let mut steamapp = valheim();
        steamapp.ports.push(PortSpec {
            port: 2457,
            protocols: BTreeSet::from([Protocol::Tcp, Protocol::Udp]),
        });
        assert_eq!(
            run_command(&steamapp, "r/1:beta"),
            "docker run -p 2456:2456 -p 2457:2457 r/1:beta"
        );
    }

    #[test]
    fn run_command_without_ports() {
        let steamapp = Steamapp {
            ports: vec![],
            ..valheim()
        };
        assert_eq!(run_command(&steamapp, "r/896660"), "docker run r/896660");
    }

    #[test]
    fn remote_run_script() {
        let url = Url::parse("http://localhost:8080/896660/dockerfile").unwrap();
        let script = run_script(&valheim(), "localhost:5000/896660", BuildSource::Remote(&url));
        assert_eq!(
            script,
            concat!(
                "#!/bin/sh\n",
                "docker build --tag localhost:5000/896660 ",
                "http://localhost:8080/896660/dockerfile\n",
                "docker run -p 2456:2456 localhost:5000/896660\n",
            )
        );
    }

    #[test]
    fn inline_run_script() {
        let dockerfile = Dockerfile {
            directives: vec![
                Directive::new(Instruction::From, ["debian:stable-slim"]),
                Directive::new(Instruction::Run, ["echo $HOME"]),
            ],
        };
        let script = run_script(&valheim(), "r/896660", BuildSource::Inline(&dockerfile));
        assert_eq!(
            script,
            concat!(
                "#!/bin/sh\n",
                "docker build --tag r/896660 - <<'EOF'\n",
                "FROM debian:stable-slim\n",
                "RUN echo $HOME\n",
                "EOF\n",
                "docker run -p 2456:2456 r/896660\n",
            )
        );
        assert!(!script.ends_with("\n\n"));
    }

    #[test]
    fn inline_delimiter_avoids_heredocs_in_dockerfile() {
        let steamapp = Steamapp {
            execs: vec!["cat <<EOF > /etc/motd\nhello\nEOF".into()],
            ..valheim()
        };
        let dockerfile = synthesize(&steamapp, &SynthOptions::default()).unwrap();
        let script = run_script(&steamapp, "r/896660", BuildSource::Inline(&dockerfile));

        let lines = script.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], "docker build --tag r/896660 - <<'EOF_1'");
        let end = lines.iter().position(|line| *line == "EOF_1").unwrap();
        assert_eq!(lines[2..end].join("\n"), dockerfile.to_string());
        assert_eq!(lines[end + 1..], ["docker run -p 2456:2456 r/896660"]);

        assert_eq!(heredoc_delimiter("EOF\nEOF_1\n EOF_2"), "EOF_2");
        assert_eq!(heredoc_delimiter("RUN echo EOF"), "EOF");
    }

    #[test]
    fn artifact_urls() {
        let base = Url::parse("https://steamcrate.example").unwrap();
        let opts = SynthOptions::default();

        let url = artifact_url(&base, 896660, Some("public"), "dockerfile", &opts).unwrap();
        assert_eq!(url.as_str(), "https://steamcrate.example/896660/dockerfile");

        let url = artifact_url(&base, 896660, Some("beta"), "run.sh", &opts).unwrap();
        assert_eq!(url.as_str(), "https://steamcrate.example/896660/beta/run.sh");
        assert_eq!(
            install_command(&url),
            "curl -fsSL https://steamcrate.example/896660/beta/run.sh | sh"
        );
    }
}
