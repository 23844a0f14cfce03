use std::{fs::File, io::BufReader, path::Path};

use otter_arena::{
    builder::ParserInfo,
    context::Context,
    db::{keys::Reason, watches::pool::Watch},
    structures::literal::Literal,
    types::err::ErrorKind,
};

use rand::Rng;

/// Why a formula could not be loaded.
#[derive(Debug)]
pub enum ReadError {
    FailedToOpen(std::io::Error),
    Parse(ErrorKind),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailedToOpen(e) => write!(f, "Failed to open CNF file: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

/// Reads the formula at `path` into `context`, decompressing if the extension of the path is `xz`.
pub fn load_dimacs(context: &mut Context, path: &Path) -> Result<ParserInfo, ReadError> {
    let file = File::open(path).map_err(ReadError::FailedToOpen)?;

    let info = match path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if extension == "xz" => {
            context.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(&file)))
        }
        _ => context.read_dimacs(BufReader::new(&file)),
    };
    info.map_err(ReadError::Parse)
}

/// Assigns pending units and every literal forced by some clause at the root, until nothing more is forced.
///
/// Returns false if some clause is falsified.
/// A scan of every clause, as no watch based propagation is available.
pub fn propagate_root(context: &mut Context) -> Result<bool, ErrorKind> {
    if !context.assign_pending_units()? {
        return Ok(false);
    }

    loop {
        let mut forced: Vec<Literal> = Vec::default();

        for index in 0..context.watches.literal_count() {
            let literal = Literal::from_index(index);
            if context.atom_db.value_of(literal) != Some(false) {
                continue;
            }
            for watch in context.watches.list(literal) {
                if let Watch::Binary { other, .. } = watch {
                    match context.atom_db.value_of(*other) {
                        None => forced.push(*other),
                        Some(true) => {}
                        Some(false) => return Ok(false),
                    }
                }
            }
        }

        for clause in context.arena.iter() {
            let mut open = None;
            let mut open_count = 0;
            let mut satisfied = false;
            for literal in context.arena.clause(clause).literals() {
                match context.atom_db.value_of(*literal) {
                    Some(true) => satisfied = true,
                    Some(false) => {}
                    None => {
                        open = Some(*literal);
                        open_count += 1;
                    }
                }
            }
            match (satisfied, open_count, open) {
                (true, _, _) => {}
                (false, 0, _) => return Ok(false),
                (false, 1, Some(literal)) => forced.push(literal),
                _ => {}
            }
        }

        if forced.is_empty() {
            break;
        }
        for literal in forced {
            match context.atom_db.value_of(literal) {
                None => context.assign(literal, Reason::Unit),
                Some(true) => {}
                Some(false) => return Ok(false),
            }
        }
    }

    context.mark_propagated();
    Ok(true)
}

/// Marks each large clause as garbage with probability `fraction`, and returns the count of clauses marked.
pub fn mark_random_garbage(context: &mut Context, rng: &mut impl Rng, fraction: f64) -> usize {
    let chosen: Vec<_> = context.arena.iter().filter(|_| rng.gen_bool(fraction)).collect();
    for clause in &chosen {
        context.mark_as_garbage(*clause);
    }
    chosen.len()
}

/// Eliminates each active, unassigned variable with probability `fraction`, and removes every clause containing an eliminated variable.
///
/// Returns the count of variables eliminated.
pub fn eliminate_random(context: &mut Context, rng: &mut impl Rng, fraction: f64) -> Result<usize, ErrorKind> {
    let mut eliminated = Vec::default();
    for variable in 0..context.variable_count() as u32 {
        let open = context.atom_db.flags(variable).active
            && context.atom_db.value_of(Literal::new(variable, true)).is_none();
        if open && rng.gen_bool(fraction) {
            context.eliminate_variable(variable)?;
            eliminated.push(variable);
        }
    }

    for variable in &eliminated {
        for literal in [Literal::new(*variable, true), Literal::new(*variable, false)] {
            let others: Vec<Literal> = context
                .watches
                .list(literal)
                .iter()
                .filter_map(|watch| match watch {
                    Watch::Binary { other, .. } => Some(*other),
                    Watch::Large { .. } => None,
                })
                .collect();
            for other in others {
                context.delete_binary_clause(literal, other);
            }
        }
    }

    let doomed: Vec<_> = context
        .arena
        .iter()
        .filter(|clause| {
            let literals = context.arena.clause(*clause).literals();
            literals.iter().any(|literal| context.atom_db.flags(literal.variable()).eliminated)
        })
        .collect();
    for clause in doomed {
        context.mark_as_garbage(clause);
    }

    Ok(eliminated.len())
}

/// Prints `c`-prefixed statistics of the context.
pub fn print_stats(context: &Context, heading: &str) {
    let counters = &context.counters;
    println!("c {heading}");
    println!(
        "c   variables       {} ({} active, {} fixed)",
        context.variable_count(),
        context.atom_db.active_count(),
        context.atom_db.fixed_count()
    );
    println!(
        "c   clauses         {} large ({} redundant), {} binary",
        counters.large_clauses(),
        counters.redundant_clauses,
        counters.binary_clauses()
    );
    println!(
        "c   arena bytes     {} ({} garbage, {} capacity)",
        context.arena.bytes(),
        context.arena.garbage_bytes(),
        context.arena.capacity_bytes()
    );
    println!(
        "c   watch slots     {} ({} tombstoned)",
        context.watches.pool().len(),
        context.watches.pool().tombstones()
    );
}

/// Prints `c`-prefixed totals over every pass.
pub fn print_totals(context: &Context) {
    let counters = &context.counters;
    println!("c totals");
    println!(
        "c   passes          {} sparse, {} dense, {} compaction, {} defragmentation",
        counters.sparse_collections, counters.dense_collections, counters.compactions, counters.defragmentations
    );
    println!("c   collected bytes {}", counters.collected_bytes);
    println!(
        "c   records         {} satisfied, {} demoted, {} literals flushed",
        counters.satisfied_clauses, counters.demoted_clauses, counters.flushed_literals
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_keeps_the_io_error() {
        let mut the_context = Context::default();
        let path = Path::new("no/such/formula.cnf");

        match load_dimacs(&mut the_context, path) {
            Err(ReadError::FailedToOpen(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected {other:?}"),
        }
    }
}
