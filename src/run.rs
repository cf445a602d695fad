mod cli;

use anyhow::Result;
use std::path::PathBuf;

use budgetdesk::config::Overrides;

pub(crate) use cli::as_cli;

/// Command-line arguments split into positionals and the known flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) positional: Vec<String>,
    pub(crate) overrides: Overrides,
    pub(crate) filter: Option<String>,
    pub(crate) config_path: Option<PathBuf>,
}

impl Invocation {
    /// `args[0]` is the program name and is skipped.
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        let mut inv = Invocation::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--approaching" | "--over" | "--filter" | "--config" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("Missing value for {arg}"))?
                        .clone();
                    match arg.as_str() {
                        "--approaching" => inv.overrides.approaching = Some(value),
                        "--over" => inv.overrides.over = Some(value),
                        "--filter" => inv.filter = Some(value),
                        _ => inv.config_path = Some(PathBuf::from(shellexpand(&value))),
                    }
                }
                "--help" | "--version" => inv.positional.push(arg.clone()),
                flag if flag.starts_with("--") => anyhow::bail!("Unknown flag: {flag}"),
                _ => inv.positional.push(arg.clone()),
            }
        }
        Ok(inv)
    }

    pub(crate) fn command(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    pub(crate) fn command_args(&self) -> &[String] {
        self.positional.get(1..).unwrap_or(&[])
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
