//! `chatmark rules` command implementation.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use chatmark_config::{CliSettings, Config};
use chatmark_markup::{Dialect, RuleInfo, RuleKind};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the rules command.
#[derive(Args)]
pub(crate) struct RulesArgs {
    /// Markup dialect: basic or extended (overrides config).
    #[arg(long, env = "CHATMARK_DIALECT")]
    dialect: Option<Dialect>,

    /// Switch off a rule; may be repeated.
    #[arg(long = "disable", value_name = "RULE")]
    disable: Vec<RuleKind>,

    /// Print the rules as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover chatmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RulesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            dialect: self.dialect,
            disable: self.disable,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let transformer = config.render_resolved.transformer();
        let rules = transformer.rule_info();

        let listing = if self.json {
            let mut json = serde_json::to_string_pretty(&rules)?;
            json.push('\n');
            json
        } else {
            Output::new().highlight(&format!("Dialect: {}", transformer.dialect()));
            format_table(&rules)
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(listing.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Format rules as an aligned, numbered text table.
fn format_table(rules: &[RuleInfo]) -> String {
    const HEADER: [&str; 3] = ["RULE", "TOKEN", "OUTPUT"];

    let width = |column: usize, pick: fn(&RuleInfo) -> &str| {
        rules
            .iter()
            .map(|rule| pick(rule).chars().count())
            .chain(std::iter::once(HEADER[column].len()))
            .max()
            .unwrap_or(0)
    };
    let name_width = width(0, |rule| rule.name);
    let token_width = width(1, |rule| rule.token);

    let mut out = format!(
        "#  {:<name_width$}  {:<token_width$}  {}\n",
        HEADER[0], HEADER[1], HEADER[2]
    );
    for (index, rule) in rules.iter().enumerate() {
        writeln!(
            out,
            "{:<2} {:<name_width$}  {:<token_width$}  {}",
            index + 1,
            rule.name,
            rule.token,
            rule.output
        )
        .unwrap();
    }
    out
}
