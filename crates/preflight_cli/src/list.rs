//! `preflight list`: show the checks a selection resolves to.

use preflight_checks::Check;
use serde::Serialize;

use crate::{load_config, parse_category, GlobalArgs, ListArgs, ReportFormat};

#[derive(Serialize)]
struct CheckInfo<'a> {
    id: &'a str,
    name: &'a str,
    group: &'a str,
    description: &'a str,
    remediation: &'a str,
}

impl<'a> CheckInfo<'a> {
    fn from_check(check: &'a dyn Check) -> Self {
        Self {
            id: check.id(),
            name: check.name(),
            group: check.group().as_str(),
            description: check.description(),
            remediation: check.remediation(),
        }
    }
}

/// Runs the `preflight list` command.
///
/// Pattern and category default to the config's run defaults.
pub fn run(args: &ListArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let pattern = args.pattern.as_deref().unwrap_or(&config.run.pattern);
    let category = parse_category(args.category.as_deref().unwrap_or(&config.run.category))?;

    preflight_checks::global::register_builtins()?;
    let checks = preflight_checks::global::snapshot().list_by_pattern(pattern, &category)?;

    match args.format {
        ReportFormat::Text => {
            for check in &checks {
                println!("{}", format_line(check.as_ref()));
            }
            if !global.quiet {
                eprintln!("   {} check(s) selected by '{pattern}'", checks.len());
            }
        }
        ReportFormat::Json => {
            let infos: Vec<CheckInfo<'_>> =
                checks.iter().map(|c| CheckInfo::from_check(c.as_ref())).collect();
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
    }
    Ok(0)
}

fn format_line(check: &dyn Check) -> String {
    format!(
        "{:<40} {:<14} {}",
        check.id(),
        check.group().as_str(),
        check.name()
    )
}
