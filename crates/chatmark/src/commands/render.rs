//! `chatmark render` command implementation.

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use chatmark_config::{CliSettings, Config};
use chatmark_markup::{Dialect, RuleKind, Transformer};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markup file to render (reads stdin when omitted or "-").
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Markup dialect: basic or extended (overrides config).
    #[arg(long, env = "CHATMARK_DIALECT")]
    dialect: Option<Dialect>,

    /// Switch off a rule; may be repeated.
    #[arg(long = "disable", value_name = "RULE")]
    disable: Vec<RuleKind>,

    /// Do not append a trailing newline to the output.
    #[arg(long)]
    no_trailing_newline: bool,

    /// Path to configuration file (default: auto-discover chatmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            dialect: self.dialect,
            disable: self.disable,
            trailing_newline: self.no_trailing_newline.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let transformer = config.render_resolved.transformer();
        let input = self.input.as_deref().filter(|p| *p != Path::new("-"));
        if input.is_none() && std::io::stdin().is_terminal() {
            output.info("Reading markup from stdin (Ctrl-D to finish)");
        }
        let markup = read_input(input)?;

        let html = render_markup(&transformer, &markup, config.output.trailing_newline);
        write_output(self.output.as_deref(), &html)?;

        if let Some(path) = &self.output {
            output.success(&format!("Rendered HTML written to {}", path.display()));
        }
        Ok(())
    }
}

/// Transform markup and apply output settings.
fn render_markup(transformer: &Transformer, markup: &str, trailing_newline: bool) -> String {
    let rendered = transformer.transform_with_stats(markup);
    for m in &rendered.matches {
        tracing::info!(rule = %m.rule, count = m.count, "Rule matches");
    }

    let mut html = rendered.html;
    if trailing_newline && !html.is_empty() && !html.ends_with('\n') {
        html.push('\n');
    }
    html
}

/// Read markup from `path`, or from stdin when `path` is `None`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut markup = String::new();
            std::io::stdin().read_to_string(&mut markup)?;
            Ok(markup)
        }
    }
}

/// Write HTML to `path`, or to stdout when `path` is `None`.
fn write_output(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_markup_appends_newline() {
        let html = render_markup(&Transformer::default(), "**hi**", true);
        assert_eq!(html, "<b>hi</b>\n");
    }

    #[test]
    fn test_render_markup_keeps_existing_newline() {
        let html = render_markup(&Transformer::default(), "|a|\n", true);
        assert_eq!(html, "<table><thead><tr><th>a</th></tr></thead></table>\n");
    }

    #[test]
    fn test_render_markup_without_newline() {
        let html = render_markup(&Transformer::default(), "_x_", false);
        assert_eq!(html, "<i>x</i>");
    }

    #[test]
    fn test_render_markup_empty_input_stays_empty() {
        assert_eq!(render_markup(&Transformer::default(), "", true), "");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        std::fs::write(&path, "```x```").unwrap();

        assert_eq!(read_input(Some(path.as_path())).unwrap(), "```x```");
    }

    #[test]
    fn test_read_input_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = read_input(Some(path.as_path())).unwrap_err();

        assert!(matches!(err, CliError::File { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");

        write_output(Some(path.as_path()), "<b>x</b>\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<b>x</b>\n");
    }

    #[test]
    fn test_write_output_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.html");

        let err = write_output(Some(path.as_path()), "x").unwrap_err();

        assert!(matches!(err, CliError::File { .. }));
    }
}
