//! Dockerfile directive model and rendering

use std::fmt;

/// Dockerfile instructions emitted by the synthesizer. Parser directives
/// (`# syntax=`, `# escape=`) are modelled as instructions too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    From,
    Run,
    Copy,
    Add,
    User,
    Entrypoint,
    Cmd,
    Syntax,
    Escape,
}

/// A single instruction with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub instruction: Instruction,
    pub args: Vec<String>,
}

impl Directive {
    pub fn new<I, S>(instruction: Instruction, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instruction,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.args.join(" ");
        match self.instruction {
            Instruction::Syntax => write!(f, "# syntax={joined}"),
            Instruction::Escape => write!(f, "# escape={joined}"),
            Instruction::From => write!(f, "FROM {joined}"),
            Instruction::Run => write!(f, "RUN {}", self.args.join(" \\\n\t&& ")),
            Instruction::User => write!(f, "USER {joined}"),
            Instruction::Copy => write!(f, "COPY {joined}"),
            Instruction::Add => write!(f, "ADD {joined}"),
            Instruction::Entrypoint => write!(f, "ENTRYPOINT [{}]", exec_form(&self.args)),
            Instruction::Cmd => write!(f, "CMD [{}]", exec_form(&self.args)),
        }
    }
}

/// Quote each argument as a JSON string for the exec form of ENTRYPOINT/CMD.
fn exec_form(args: &[String]) -> String {
    args.iter()
        .map(|arg| serde_json::Value::from(arg.as_str()).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// An ordered list of directives spanning one or more build stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    pub directives: Vec<Directive>,
}

impl Dockerfile {
    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Names of the stages declared with `FROM ... AS <name>`
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.directives
            .iter()
            .filter(|d| d.instruction == Instruction::From)
            .filter_map(|d| match d.args.as_slice() {
                [_, as_kw, name] if as_kw.eq_ignore_ascii_case("AS") => Some(name.as_str()),
                _ => None,
            })
    }
}

impl fmt::Display for Dockerfile {
    /// Stages are separated by a blank line before every `FROM` except the first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen_from = false;
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            if directive.instruction == Instruction::From {
                if seen_from {
                    f.write_str("\n")?;
                }
                seen_from = true;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_instruction() {
        let cases: [(Instruction, &[&str], &str); 8] = [
            (Instruction::Syntax, &["docker/dockerfile:1"], "# syntax=docker/dockerfile:1"),
            (Instruction::Escape, &["`"], "# escape=`"),
            (Instruction::From, &["alpine", "AS", "base"], "FROM alpine AS base"),
            (Instruction::User, &["steam"], "USER steam"),
            (Instruction::Copy, &["--from=a", "/src", "/dst"], "COPY --from=a /src /dst"),
            (Instruction::Add, &["https://x/key", "/tmp/key"], "ADD https://x/key /tmp/key"),
            (Instruction::Entrypoint, &["a", "b"], r#"ENTRYPOINT ["a", "b"]"#),
            (Instruction::Cmd, &["-port", "2456"], r#"CMD ["-port", "2456"]"#),
        ];
        for (instruction, args, expected) in cases {
            assert_eq!(Directive::new(instruction, args.iter().copied()).to_string(), expected);
        }
    }

    #[test]
    fn run_joins_with_continuations() {
        let run = Directive::new(Instruction::Run, ["apt-get update -y", "apt-get clean"]);
        assert_eq!(run.to_string(), "RUN apt-get update -y \\\n\t&& apt-get clean");
    }

    #[test]
    fn exec_form_escapes_quotes() {
        let cmd = Directive::new(Instruction::Cmd, [r#"say "hi""#, r"C:\game"]);
        assert_eq!(cmd.to_string(), r#"CMD ["say \"hi\"", "C:\\game"]"#);
    }

    #[test]
    fn blank_line_before_every_stage_but_the_first() {
        let dockerfile = Dockerfile {
            directives: vec![
                Directive::new(Instruction::Syntax, ["docker/dockerfile:1"]),
                Directive::new(Instruction::From, ["a", "AS", "one"]),
                Directive::new(Instruction::Run, ["true"]),
                Directive::new(Instruction::From, ["b"]),
                Directive::new(Instruction::User, ["steam"]),
            ],
        };

        assert_eq!(
            dockerfile.to_string(),
            "# syntax=docker/dockerfile:1\nFROM a AS one\nRUN true\n\nFROM b\nUSER steam"
        );
        assert_eq!(dockerfile.stage_names().collect::<Vec<_>>(), ["one"]);
    }

    #[test]
    fn empty_dockerfile_renders_empty() {
        assert_eq!(Dockerfile::default().to_string(), "");
    }
}
