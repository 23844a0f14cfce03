use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self, ErrorKind},
};

use std::io::BufRead;

/// Details of a formula read by [read_dimacs](Context::read_dimacs).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    /// The count of variables given by the problem line, if any.
    pub expected_variables: Option<usize>,

    /// The count of clauses given by the problem line, if any.
    pub expected_clauses: Option<usize>,

    /// Clauses stored in the context, including units.
    pub added_clauses: usize,

    /// Clauses skipped as tautologies.
    pub tautologies: usize,
}

impl Context {
    /// Reads a DIMACS formula into the context.
    ///
    /// ```rust,ignore
    /// context.read_dimacs(BufReader::new(&file))?;
    /// ```
    ///
    /// Literals are imported by their external name, so the variables of the formula keep their names.
    /// Repeated literals of a clause are stored once, and a clause containing some literal and its negation is skipped.
    /// Reading stops at the end of input, or at a line beginning with `%`.
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, ErrorKind> {
        let mut info = ParserInfo::default();
        let mut buffer = String::with_capacity(1024);
        let mut clause_buffer: Vec<Literal> = Vec::default();

        let mut line_counter = 0;

        // first phase, read until the formula begins
        'preamble_loop: loop {
            match reader.read_line(&mut buffer) {
                Ok(0) => break 'preamble_loop,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ParseError::Line(line_counter).into()),
            }

            match buffer.trim_start().chars().next() {
                Some('c') | None => {
                    buffer.clear();
                }

                Some('p') => {
                    let mut problem_details = buffer.split_whitespace().skip(1);
                    if problem_details.next() != Some("cnf") {
                        return Err(err::ParseError::ProblemSpecification.into());
                    }
                    let mut count = || -> Result<usize, ErrorKind> {
                        match problem_details.next().map(|string| string.parse()) {
                            Some(Ok(count)) => Ok(count),
                            _ => Err(err::ParseError::ProblemSpecification.into()),
                        }
                    };
                    info.expected_variables = Some(count()?);
                    info.expected_clauses = Some(count()?);

                    log::info!(
                        target: targets::BUILDER,
                        "Expecting {} variables and {} clauses",
                        info.expected_variables.unwrap_or_default(),
                        info.expected_clauses.unwrap_or_default()
                    );
                    buffer.clear();
                    break 'preamble_loop;
                }

                // The line is kept in the buffer, as the first line of the formula.
                _ => break 'preamble_loop,
            }
        }

        // second phase, read until the formula ends
        'formula_loop: loop {
            match buffer.trim_start().chars().next() {
                Some('%') => break 'formula_loop,
                Some('c') | None => {}
                Some('p') => return Err(err::ParseError::ProblemSpecification.into()),

                _ => {
                    for item in buffer.split_whitespace() {
                        match item {
                            "0" => {
                                if self.read_clause(&clause_buffer)? {
                                    info.added_clauses += 1;
                                } else {
                                    info.tautologies += 1;
                                }
                                clause_buffer.clear();
                            }

                            _ => {
                                let int = match item.parse::<isize>() {
                                    Ok(int) => int,
                                    Err(_) => return Err(err::ParseError::Literal(line_counter).into()),
                                };
                                let literal = self.import_literal(int)?;
                                if !clause_buffer.contains(&literal) {
                                    clause_buffer.push(literal);
                                }
                            }
                        }
                    }
                }
            }

            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break 'formula_loop,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ParseError::Line(line_counter).into()),
            }
        }

        if !clause_buffer.is_empty() {
            log::warn!(target: targets::BUILDER, "Formula ends without terminating the final clause");
            if self.read_clause(&clause_buffer)? {
                info.added_clauses += 1;
            }
        }

        log::info!(
            target: targets::BUILDER,
            "Read {} clauses over {} variables, skipped {} tautologies",
            info.added_clauses,
            self.atom_db.count(),
            info.tautologies
        );
        Ok(info)
    }

    /// Stores `literals` as an original clause, unless a tautology.
    ///
    /// Returns true if the clause was stored.
    fn read_clause(&mut self, literals: &[Literal]) -> Result<bool, ErrorKind> {
        if literals.iter().any(|literal| literals.contains(&literal.negate())) {
            log::trace!(target: targets::BUILDER, "Skipped tautology");
            return Ok(false);
        }
        self.new_original_clause(literals)?;
        Ok(true)
    }
}
