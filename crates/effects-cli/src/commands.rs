use std::io::Write;

use anyhow::{Context, Result};
use effects_ingest::{load_document, save_document};
use effects_model::EffectsDocument;
use effects_normalize::{canonicalize, canonicalize_document, first_difference};
use effects_validate::{PassEvent, RuleSet, RunMode, run_passes, validate};
use tracing::debug;

use crate::cli::{DocumentArgs, ReportFormatArg, SortCli, ValidateCli};
use crate::report::{
    SORT_TAG, VALIDATION_TAG, all_passed_line, already_sorted_line, count_table, diagnostic_line,
    failure_line, issue_table, not_sorted_lines, pass_passed_line, pass_started_line, render_json,
    rewritten_line, starting_line, summary_line,
};

/// Exit code for unreadable documents and rule files.
pub const EXIT_ERROR: i32 = 2;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A rule was violated, or the document is not in canonical order.
    Violation,
    /// The document or the rules file could not be loaded.
    InputError,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Violation => 1,
            Self::InputError => EXIT_ERROR,
        }
    }
}

fn load_inputs(args: &DocumentArgs) -> Result<(RuleSet, EffectsDocument)> {
    let rules = args.rule_set().context("load rules")?;
    let document = load_document(&args.path).context("load effects document")?;
    Ok((rules, document))
}

/// Load rules and document, or report the failure on `err` under `tag`.
fn load_or_report<E: Write>(
    args: &DocumentArgs,
    tag: &str,
    err: &mut E,
) -> Result<Option<(RuleSet, EffectsDocument)>> {
    match load_inputs(args) {
        Ok(inputs) => Ok(Some(inputs)),
        Err(failure) => {
            debug!(path = %args.path.display(), "could not load inputs: {failure:#}");
            writeln!(err, "{}", failure_line(tag, &failure))?;
            Ok(None)
        }
    }
}

/// Validate the document. Progress and reports go to `out`; the fail-fast
/// diagnostic and load failures go to `err`.
pub fn run_validate<O, E>(cli: &ValidateCli, out: &mut O, err: &mut E) -> Result<Outcome>
where
    O: Write,
    E: Write,
{
    let Some((rules, document)) = load_or_report(&cli.document, VALIDATION_TAG, err)? else {
        return Ok(Outcome::InputError);
    };
    let records = &document.effects;
    let mode = if cli.collect_all {
        RunMode::CollectAll
    } else {
        RunMode::FailFast
    };

    if cli.format == ReportFormatArg::Json {
        let report = validate(records, &rules, mode);
        writeln!(out, "{}", render_json(&report).context("encode report")?)?;
        return Ok(outcome(report.is_clean()));
    }

    if mode == RunMode::CollectAll {
        let report = validate(records, &rules, mode);
        if report.is_clean() {
            writeln!(out, "{}", all_passed_line())?;
        } else {
            writeln!(out, "{}", issue_table(&report))?;
            writeln!(out, "{}", count_table(&report))?;
            writeln!(out, "{}", summary_line(&report))?;
        }
        return Ok(outcome(report.is_clean()));
    }

    writeln!(out, "{}", starting_line())?;
    let mut progress = Vec::new();
    let report = run_passes(records, &rules, mode, |event| match event {
        PassEvent::Started(pass) => progress.push(pass_started_line(pass)),
        PassEvent::Finished(pass, issues) if issues.is_empty() => {
            progress.push(pass_passed_line(pass));
        }
        PassEvent::Finished(..) => {}
    });
    for line in &progress {
        writeln!(out, "{line}")?;
    }

    match report.first() {
        Some(issue) => {
            writeln!(err, "{}", diagnostic_line(issue))?;
            Ok(Outcome::Violation)
        }
        None => {
            writeln!(out, "{}", all_passed_line())?;
            Ok(Outcome::Success)
        }
    }
}

/// Check or rewrite the document's canonical order. Load failures go to `err`.
pub fn run_sort<O, E>(cli: &SortCli, out: &mut O, err: &mut E) -> Result<Outcome>
where
    O: Write,
    E: Write,
{
    let Some((rules, mut document)) = load_or_report(&cli.document, SORT_TAG, err)? else {
        return Ok(Outcome::InputError);
    };
    let path = &cli.document.path;

    if cli.check {
        let canonical = canonicalize(&document.effects, &rules.privileged_mod);
        return match first_difference(&document.effects, &canonical) {
            None => {
                writeln!(out, "{}", already_sorted_line())?;
                Ok(Outcome::Success)
            }
            Some(divergence) => {
                writeln!(out, "{}", not_sorted_lines(&divergence))?;
                Ok(Outcome::Violation)
            }
        };
    }

    match canonicalize_document(&mut document, &rules.privileged_mod) {
        None => writeln!(out, "{}", already_sorted_line())?,
        Some(_) => {
            save_document(path, &document).context("save effects document")?;
            writeln!(out, "{}", rewritten_line(path))?;
        }
    }
    Ok(Outcome::Success)
}

fn outcome(clean: bool) -> Outcome {
    if clean {
        Outcome::Success
    } else {
        Outcome::Violation
    }
}
