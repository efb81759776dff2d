//! Reporting window derivation
//!
//! The window start is the instant the previous scheduled run fired. The
//! schedule evaluator only iterates forward, so the previous instant is
//! reflected through `now`: with `next` the first occurrence strictly after
//! `now`, the previous run is taken to be `now - (next - now)`. This is exact
//! for fixed-period schedules and an approximation for calendar-irregular
//! ones (a run near the end of a long month looks back one short-month
//! period).

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use cron::Schedule;
use miette::{Context as _, IntoDiagnostic as _};

// field positions after seconds normalization
const DOM_FIELD: usize = 3;
const DOW_FIELD: usize = 5;

/// Compute the instant of the previous scheduled run.
///
/// A malformed expression or one with no future occurrence is a fatal
/// configuration error.
pub fn previous_execution(expr: &str, now: DateTime<Utc>) -> miette::Result<DateTime<Utc>> {
    let next = next_occurrence(expr, now)?
        .ok_or_else(|| miette::miette!("cron expression {expr:?} has no upcoming occurrence"))?;

    Ok(now - (next - now))
}

/// First occurrence strictly after `now`.
///
/// Classic cron unions day-of-month and day-of-week when both are
/// restricted; the evaluator intersects them. Such expressions are split
/// into two sub-schedules, one per day field, and the earlier firing wins.
fn next_occurrence(expr: &str, now: DateTime<Utc>) -> miette::Result<Option<DateTime<Utc>>> {
    let normalized = normalize(expr);
    let fields: Vec<&str> = normalized.split_whitespace().collect();

    if day_fields_both_restricted(&fields) {
        let dom_only = replace_field(&fields, DOW_FIELD, "*");
        let dow_only = replace_field(&fields, DOM_FIELD, "*");

        let dom_next = parse_schedule(&dom_only, expr)?.after(&now).next();
        let dow_next = parse_schedule(&dow_only, expr)?.after(&now).next();

        return Ok(match (dom_next, dow_next) {
            (Some(dom), Some(dow)) => Some(dom.min(dow)),
            (next, None) | (None, next) => next,
        });
    }

    Ok(parse_schedule(&normalized, expr)?.after(&now).next())
}

fn day_fields_both_restricted(fields: &[&str]) -> bool {
    fields.len() > DOW_FIELD && is_restricted(fields[DOM_FIELD]) && is_restricted(fields[DOW_FIELD])
}

// vixie-cron rule: a day field beginning with `*` (step forms included) is
// unrestricted and does not trigger the union
fn is_restricted(field: &str) -> bool {
    !field.starts_with('*') && field != "?"
}

fn replace_field(fields: &[&str], index: usize, value: &str) -> String {
    fields
        .iter()
        .enumerate()
        .map(|(position, field)| if position == index { value } else { *field })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_schedule(normalized: &str, expr: &str) -> miette::Result<Schedule> {
    Schedule::from_str(normalized)
        .into_diagnostic()
        .with_context(|| format!("parsing cron expression {expr:?}"))
}

// Hosted-runner schedules use the classic 5-field form; the evaluator wants
// a leading seconds field.
fn normalize(expr: &str) -> String {
    let expr = expr.trim();

    if expr.split_whitespace().count() == 5 {
        format!("0 {expr}")
    } else {
        expr.to_string()
    }
}
