use std::io::{BufRead, Write};

use log::warn;

use crate::data_structures::Clause;
use crate::error::SolverError;

/// The parsed body of a DIMACS CNF file: a variable count, a clause
/// count, and the clauses themselves. `num_vars`/`num_clauses` come from the `p cnf` header when
/// present; if the header is absent or disagrees with what was actually read, parsing still
/// succeeds and the discrepancy is logged rather than rejected, since the header line is purely
/// informational.
#[derive(Clone, Debug, PartialEq)]
pub struct Cnf {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

/*
Line-based DIMACS CNF reader. Comment lines start with `c` or `%`; the optional problem line
`p cnf <vars> <clauses>` declares expected sizes; clause literals may span multiple lines and are
terminated by a `0`; a `%`, `;`, or `*` mid-line truncates the rest of that line (a convention some
corpora use to append trailing metadata).
*/
pub fn parse<R: BufRead>(reader: R) -> Result<Cnf, SolverError> {
    let mut declared_vars: Option<usize> = None;
    let mut declared_clauses: Option<usize> = None;
    let mut clauses = Vec::new();
    let mut pending: Vec<i32> = Vec::new();
    let mut max_var = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(SolverError::Io)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        let truncated = trimmed
            .find(['%', ';', '*'])
            .map(|i| &trimmed[..i])
            .unwrap_or(trimmed);
        let truncated = truncated.trim();
        if truncated.is_empty() {
            continue;
        }
        if let Some(rest) = truncated.strip_prefix("p cnf") {
            let mut parts = rest.split_whitespace();
            let vars = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| SolverError::ParseError {
                    line: line_number,
                    message: "malformed problem line, expected 'p cnf <vars> <clauses>'".to_string(),
                })?;
            let n_clauses = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| SolverError::ParseError {
                    line: line_number,
                    message: "malformed problem line, expected 'p cnf <vars> <clauses>'".to_string(),
                })?;
            declared_vars = Some(vars);
            declared_clauses = Some(n_clauses);
            continue;
        }

        for token in truncated.split_whitespace() {
            let lit: i32 = token.parse().map_err(|_| SolverError::ParseError {
                line: line_number,
                message: format!("expected an integer literal, found '{token}'"),
            })?;
            if lit == 0 {
                let literals = std::mem::take(&mut pending);
                max_var = max_var.max(literals.iter().map(|l| l.unsigned_abs() as usize).max().unwrap_or(0));
                match Clause::new(literals) {
                    Some(clause) => clauses.push(clause),
                    None => continue, // tautological clause, dropped per the clause invariant
                }
            } else {
                max_var = max_var.max(lit.unsigned_abs() as usize);
                pending.push(lit);
            }
        }
    }

    if !pending.is_empty() {
        return Err(SolverError::ParseError {
            line: 0,
            message: "unterminated clause at end of file, missing trailing 0".to_string(),
        });
    }

    if let Some(declared) = declared_clauses {
        if declared != clauses.len() {
            warn!(
                "DIMACS header declared {} clauses but {} were read",
                declared,
                clauses.len()
            );
        }
    }
    let num_vars = match declared_vars {
        Some(declared) if declared >= max_var => declared,
        Some(declared) => {
            warn!("DIMACS header declared {declared} variables but variable {max_var} appears");
            max_var
        }
        None => max_var,
    };

    Ok(Cnf { num_vars, clauses })
}

/// Writes a CNF back out in DIMACS form (used by the property test that round-trips parse/write).
pub fn write<W: Write>(cnf: &Cnf, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "p cnf {} {}", cnf.num_vars, cnf.clauses.len())?;
    for clause in &cnf.clauses {
        let rendered = clause
            .literals
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{rendered} 0")?;
    }
    Ok(())
}

#[cfg(test)]
mod dimacs_tests;
