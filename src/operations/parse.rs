// src/operations/parse.rs

//! Textual gate instructions.
//!
//! ```text
//! instruction := gate "-" targets | "ctrl(" indices ")" "-" instruction
//! gate        := name | name "(" angles ")"
//! angle       := float | ["-"] [float "*"] "pi" ["/" float]
//! ```
//!
//! Examples: `h-0`, `cx-0,1`, `rx(pi/2)-3`, `rz(-0.25)-1`, `ctrl(0,1)-ry(pi)-2`.
//! The gate/targets separator is the first `-` outside parentheses, so negative
//! angles need no escaping.

use super::{GateKind, Operation};
use crate::core::{QuditError, QuditId, QuditResult};
use std::f64::consts::PI;
use std::str::FromStr;

impl FromStr for Operation {
    type Err = QuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instruction(s, s)
    }
}

fn malformed(instruction: &str, reason: impl Into<String>) -> QuditError {
    QuditError::MalformedInstruction {
        instruction: instruction.trim().to_string(),
        reason: reason.into(),
    }
}

fn parse_instruction(text: &str, whole: &str) -> QuditResult<Operation> {
    let text = text.trim();
    let (head, rest) =
        split_head(text).ok_or_else(|| malformed(whole, "expected '<gate>-<targets>'"))?;
    let (name, args) = split_args(head).map_err(|reason| malformed(whole, reason))?;
    let kind = GateKind::from_name(name)?;

    if kind == GateKind::Controlled {
        let args = args.ok_or_else(|| malformed(whole, "ctrl needs a control list, e.g. ctrl(0)-x-1"))?;
        let controls = parse_positions(args).map_err(|reason| malformed(whole, reason))?;
        let gate = parse_instruction(rest, whole)?;
        return Ok(Operation::Controlled {
            controls,
            gate: Box::new(gate),
        });
    }

    let params = match args {
        Some(list) => list
            .split(',')
            .map(|a| parse_angle(a).map_err(|_| malformed(whole, format!("bad angle '{}'", a.trim()))))
            .collect::<QuditResult<Vec<f64>>>()?,
        None => Vec::new(),
    };
    if params.len() != kind.num_params() {
        return Err(malformed(
            whole,
            format!("gate '{}' takes {} angle(s), got {}", kind, kind.num_params(), params.len()),
        ));
    }

    let targets = parse_positions(rest).map_err(|reason| malformed(whole, reason))?;
    let arity = kind.arity().unwrap_or(targets.len());
    if targets.len() != arity {
        return Err(malformed(
            whole,
            format!("gate '{}' takes {} target(s), got {}", kind, arity, targets.len()),
        ));
    }
    kind.build(&targets, &params)
        .ok_or_else(|| malformed(whole, format!("gate '{}' cannot be built from targets", kind)))
}

/// Splits at the first `-` that is not inside parentheses.
fn split_head(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '-' if depth == 0 => return Some((&text[..i], &text[i + 1..])),
            _ => {}
        }
    }
    None
}

/// `name(args)` → (`name`, `Some(args)`); `name` → (`name`, `None`).
fn split_args(head: &str) -> Result<(&str, Option<&str>), String> {
    let head = head.trim();
    let (name, args) = match head.find('(') {
        Some(open) => {
            let inner = head[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| format!("unbalanced parentheses in '{}'", head))?;
            (&head[..open], Some(inner))
        }
        None => (head, None),
    };
    if name.trim().is_empty() {
        return Err("missing gate name".to_string());
    }
    Ok((name.trim(), args))
}

fn parse_positions(text: &str) -> Result<Vec<QuditId>, String> {
    text.split(',')
        .map(|t| {
            t.trim()
                .parse::<usize>()
                .map(QuditId)
                .map_err(|_| format!("'{}' is not a qudit index", t.trim()))
        })
        .collect()
}

/// Parses an angle: a float literal or a multiple of pi such as `pi/2`, `-pi/4` or `2*pi/3`.
pub fn parse_angle(text: &str) -> QuditResult<f64> {
    let bad = || QuditError::MalformedInstruction {
        instruction: text.trim().to_string(),
        reason: "expected a number or a multiple of pi".to_string(),
    };
    let s = text.trim().to_ascii_lowercase();
    let Some(pi_at) = s.find("pi") else {
        return s.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(bad);
    };
    let (before, after) = (&s[..pi_at], &s[pi_at + 2..]);
    let coefficient = match before.trim().trim_end_matches('*').trim() {
        "" | "+" => 1.0,
        "-" => -1.0,
        c => c.parse::<f64>().ok().filter(|c| c.is_finite()).ok_or_else(bad)?,
    };
    let divisor = match after.trim() {
        "" => 1.0,
        d => d
            .strip_prefix('/')
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| *d != 0.0 && d.is_finite())
            .ok_or_else(bad)?,
    };
    let angle = coefficient * PI / divisor;
    if angle.is_finite() { Ok(angle) } else { Err(bad()) }
}
