#![allow(clippy::collapsible_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use otter_arena::{
    context::Context,
    types::err::{self, ErrorKind},
};

use rand::{rngs::StdRng, SeedableRng};

mod misc;
mod parse;

use parse::ConfigIO;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli().get_matches();

    let config = parse::config_from_args(&matches);
    let config_io = ConfigIO::from_args(&matches);

    let mut the_context = Context::from_config(config);

    match misc::load_dimacs(&mut the_context, &config_io.path) {
        Ok(info) => {
            if config_io.detail > 0 {
                println!(
                    "c Parsed {} clauses ({} tautologies skipped) from {}",
                    info.added_clauses,
                    info.tautologies,
                    config_io.path.display()
                );
            }
        }
        Err(misc::ReadError::Parse(ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause))) => {
            println!("s UNSATISFIABLE");
            std::process::exit(20);
        }
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    match exercise(&mut the_context, &config_io) {
        Ok(true) => {
            misc::print_totals(&the_context);
            std::process::exit(0)
        }
        Ok(false) => {
            println!("s UNSATISFIABLE");
            std::process::exit(20)
        }
        Err(e) => {
            println!("c Context error: {e}");
            std::process::exit(1)
        }
    }
}

/// Propagates at the root, then runs a sparse collection, a dense collection, and a compaction.
///
/// Returns false if the formula is found to be unsatisfiable at the root.
fn exercise(context: &mut Context, config_io: &ConfigIO) -> Result<bool, ErrorKind> {
    let mut rng = StdRng::seed_from_u64(config_io.seed);
    let detail = config_io.detail > 0;

    if !misc::propagate_root(context)? {
        return Ok(false);
    }
    if detail {
        misc::print_stats(context, "loaded");
    }

    let eliminated = misc::eliminate_random(context, &mut rng, config_io.eliminate)?;
    let marked = misc::mark_random_garbage(context, &mut rng, config_io.garbage);
    if detail {
        println!("c Eliminated {eliminated} variables, marked {marked} clauses as garbage");
    }

    context.run_sparse_collection(0)?;
    if detail {
        misc::print_stats(context, "after sparse collection");
    }

    context.enter_dense_mode();
    context.run_dense_collection()?;
    if detail {
        misc::print_stats(context, "after dense collection");
    }

    if context.config.compact.enabled.value {
        let remapping = context.compact_variables()?;
        if detail {
            println!("c Compacted {} to {} variables", remapping.old_count(), remapping.new_count());
        }
    }
    context.resume_sparse_mode()?;
    if detail {
        misc::print_stats(context, "after compaction");
    }

    Ok(true)
}
