//! `preflight run`: select checks, execute them, and report.
//!
//! 1. Load config (`--config` or `preflight.toml` in the working directory)
//! 2. Merge CLI flags over config values
//! 3. Register the built-in checks and resolve the selection
//! 4. Drop checks matched by `checks.skip`
//! 5. Execute against the snapshot
//! 6. Render results and the summary

use std::sync::Arc;
use std::time::Duration;

use preflight_checks::{
    Check, CheckExecution, Executor, Pattern, RunContext, RunSummary, StaticAccessor, Target,
};
use preflight_common::Version;
use preflight_config::{ClusterConfig, ProjectConfig};
use preflight_diagnostics::{ResultRenderer, TerminalRenderer};
use serde::Serialize;
use tracing::{info, warn};

use crate::{load_config, parse_category, GlobalArgs, ReportFormat, RunArgs};

/// Settings for one run after merging flags over config.
#[derive(Debug)]
struct RunPlan {
    pattern: String,
    category: String,
    current: Option<Version>,
    target: Option<Version>,
    workers: usize,
    timeout: Option<Duration>,
    skip: Vec<String>,
}

impl RunPlan {
    /// CLI flags take precedence over config values. A missing target version
    /// means a lint-only run against the current version.
    fn merge(
        args: &RunArgs,
        mut config: ProjectConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let cluster = ClusterConfig {
            current_version: args.current_version.or(config.cluster.current_version),
            target_version: args.target_version.or(config.cluster.target_version),
        };
        let current = cluster.current_version;
        let target = cluster.effective_target();
        if let (Some(current), Some(target)) = (current, target) {
            if target < current {
                return Err(format!(
                    "target version {target} is older than current version {current}"
                )
                .into());
            }
        }

        let workers = args.workers.or(config.run.workers).unwrap_or(0);
        config.run.timeout_secs = args.timeout.or(config.run.timeout_secs);
        let timeout = config.run.timeout();
        if args.workers == Some(0) {
            return Err("--workers must be greater than 0".into());
        }
        if args.timeout == Some(0) {
            return Err("--timeout must be greater than 0".into());
        }

        let category = args.category.as_deref().unwrap_or(&config.run.category);
        Ok(Self {
            pattern: args.pattern.clone().unwrap_or(config.run.pattern),
            category: parse_category(category)?,
            current,
            target,
            workers,
            timeout,
            skip: config.checks.skip,
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    current_version: Option<Version>,
    target_version: Option<Version>,
    summary: RunSummary,
    executions: &'a [CheckExecution],
}

/// Runs the `preflight run` command.
///
/// Returns exit code 1 if any result blocks the upgrade, 0 otherwise.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let plan = RunPlan::merge(args, config)?;

    let accessor = match &args.snapshot {
        Some(path) => StaticAccessor::load(path)?,
        None => {
            warn!("no --snapshot given; checks will see an empty cluster");
            StaticAccessor::new()
        }
    };
    let target = Target::new(Arc::new(accessor))
        .with_versions(plan.current, plan.target)
        .with_debug(global.verbose);

    preflight_checks::global::register_builtins()?;
    let registry = preflight_checks::global::snapshot();
    let selected = registry.list_by_pattern(&plan.pattern, &plan.category)?;
    let checks = apply_skips(selected, &plan.skip)?;
    info!(
        selected = checks.len(),
        pattern = %plan.pattern,
        lint_only = target.is_lint_only(),
        "starting run"
    );

    let mut ctx = RunContext::new();
    if let Some(timeout) = plan.timeout {
        ctx = ctx.with_timeout(timeout);
    }

    let executor = Executor::with_workers(registry, plan.workers)?;
    let mut executions = executor.execute(&ctx, &target, &checks);
    sort_by_selection(&mut executions, &checks);
    let summary = RunSummary::from_executions(&executions);

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for execution in &executions {
                print!("{}", renderer.render(&execution.result));
            }
            if !global.quiet {
                eprintln!(
                    "   Result: {} check(s): {} passed, {} failed, {} error(s), {} blocking",
                    summary.total, summary.passed, summary.failed, summary.errored, summary.blocking
                );
            }
        }
        ReportFormat::Json => {
            let report = Report {
                current_version: plan.current,
                target_version: plan.target,
                summary,
                executions: &executions,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(summary.exit_code())
}

/// Removes every check matched by one of the skip patterns.
fn apply_skips(
    checks: Vec<Arc<dyn Check>>,
    skip: &[String],
) -> Result<Vec<Arc<dyn Check>>, preflight_checks::RegistryError> {
    let patterns = skip
        .iter()
        .map(|p| Pattern::parse(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(checks
        .into_iter()
        .filter(|c| !patterns.iter().any(|p| p.matches(c.as_ref())))
        .collect())
}

/// Orders executions like the selection they came from so reports are reproducible.
fn sort_by_selection(executions: &mut [CheckExecution], checks: &[Arc<dyn Check>]) {
    executions.sort_by_key(|e| {
        checks
            .iter()
            .position(|c| c.id() == e.check_id)
            .unwrap_or(usize::MAX)
    });
}
