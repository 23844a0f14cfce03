use otter_arena::{
    config::Config,
    context::Context,
    db::{
        atom::Import,
        keys::Reason,
        watches::pool::Watch,
    },
    procedures::schedule::Scheduled,
    structures::literal::Literal,
};

/// A context with ten variables, externals 3 and 7 eliminated and external 5 fixed true.
fn ten_variables() -> Context {
    let mut the_context = Context::from_config(Config::default());
    for int in 1..=10 {
        the_context.import_literal(int).unwrap();
    }

    let three = the_context.import_literal(3).unwrap().variable();
    let seven = the_context.import_literal(7).unwrap().variable();
    the_context.eliminate_variable(three).unwrap();
    the_context.eliminate_variable(seven).unwrap();

    let five = the_context.import_literal(5).unwrap();
    the_context.assign(five, Reason::Unit);
    the_context.mark_propagated();
    the_context
}

fn internal(context: &mut Context, ints: &[isize]) -> Vec<Literal> {
    ints.iter().map(|int| context.import_literal(*int).unwrap()).collect()
}

mod compaction {
    use super::*;

    #[test]
    fn fixed_and_eliminated_variables() {
        let mut the_context = ten_variables();
        assert_eq!(the_context.atom_db.reclaimable_count(), 2);

        the_context.enter_dense_mode();
        let remapping = the_context.compact_variables().unwrap();

        assert_eq!(remapping.old_count(), 10);
        assert_eq!(remapping.new_count(), 8);
        assert_eq!(the_context.variable_count(), 8);
        assert_eq!(the_context.atom_db.active_count(), 7);
        assert_eq!(the_context.atom_db.fixed_count(), 1);
        assert_eq!(the_context.atom_db.reclaimable_count(), 0);
        assert_eq!(the_context.watches.literal_count(), 16);
        assert_eq!(the_context.counters.compactions, 1);

        // Active variables are dense and in order, with the representative in place of the fixed variable.
        let externals: Vec<usize> = (0..8).map(|variable| the_context.atom_db.external(variable)).collect();
        assert_eq!(externals, vec![1, 2, 4, 5, 6, 8, 9, 10]);

        let representative = Literal::new(3, true);
        assert!(the_context.atom_db.flags(3).fixed);
        assert_eq!(the_context.atom_db.value_of(representative), Some(true));
        assert_eq!(the_context.literal_db.trail(), &[representative]);
        assert_eq!(the_context.atom_db.assignment(3).trail, 0);

        assert_eq!(the_context.atom_db.import(5), Import::Imported(representative));
        assert!(matches!(the_context.atom_db.import(3), Import::Eliminated(_)));
        assert!(matches!(the_context.atom_db.import(7), Import::Eliminated(_)));
        assert_eq!(the_context.atom_db.import(10), Import::Imported(Literal::new(7, true)));
    }

    #[test]
    fn map_is_injective_on_active_variables() {
        let the_context = ten_variables();
        let remapping = the_context.compaction_map();

        let mut seen = vec![false; remapping.new_count()];
        for (old, mapped) in remapping.iter() {
            let flags = the_context.atom_db.flags(old);
            match mapped {
                Some(literal) if flags.active => {
                    assert!(literal.polarity());
                    assert!(!seen[literal.variable() as usize]);
                    seen[literal.variable() as usize] = true;
                }
                Some(literal) => {
                    assert!(flags.fixed);
                    assert_eq!(literal.variable(), 3);
                }
                None => assert!(flags.eliminated),
            }
        }
    }

    #[test]
    fn several_fixed_variables_share_a_representative() {
        let mut the_context = Context::from_config(Config::default());
        let lits = internal(&mut the_context, &[1, 2, 3, 4]);

        the_context.assign(lits[0], Reason::Unit);
        the_context.assign(!lits[2], Reason::Unit);
        the_context.mark_propagated();

        let remapping = the_context.compaction_map();
        assert_eq!(remapping.new_count(), 3);
        assert_eq!(remapping.literal(lits[0]), Some(Literal::new(0, true)));
        assert_eq!(remapping.literal(lits[2]), Some(Literal::new(0, false)));
        assert_eq!(remapping.literal(lits[3]), Some(Literal::new(2, true)));

        the_context.enter_dense_mode();
        the_context.compact_variables().unwrap();

        // Both fixed literals keep their values through the representative.
        let representative = Literal::new(0, true);
        assert_eq!(the_context.atom_db.value_of(representative), Some(true));
        assert_eq!(the_context.atom_db.value_of(!representative), Some(false));
        assert_eq!(the_context.literal_db.trail(), &[representative]);
        assert_eq!(the_context.atom_db.fixed_count(), 1);
    }

    #[test]
    fn identity_is_a_fast_path() {
        let mut the_context = Context::from_config(Config::default());
        let lits = internal(&mut the_context, &[1, 2, 3]);
        the_context.new_original_clause(&lits).unwrap();

        the_context.enter_dense_mode();
        let remapping = the_context.compact_variables().unwrap();

        assert!(remapping.is_identity());
        assert_eq!(the_context.variable_count(), 3);
        assert_eq!(the_context.counters.compactions, 0);
        assert_eq!(the_context.counters.dense_collections, 0);
    }

    #[test]
    fn clauses_are_rewritten() {
        let mut the_context = Context::from_config(Config::default());
        for int in 1..=10 {
            the_context.import_literal(int).unwrap();
        }
        let large = internal(&mut the_context, &[1, 2, 4]);
        let falsified = internal(&mut the_context, &[-5, 8, 9]);
        let satisfied = internal(&mut the_context, &[5, 6]);
        let binary = internal(&mut the_context, &[6, -10]);

        the_context.new_original_clause(&large).unwrap();
        the_context.new_original_clause(&falsified).unwrap();
        the_context.new_original_clause(&satisfied).unwrap();
        the_context.new_original_clause(&binary).unwrap();
        assert_eq!(the_context.counters.binary_clauses(), 2);

        let three = the_context.import_literal(3).unwrap().variable();
        let seven = the_context.import_literal(7).unwrap().variable();
        the_context.eliminate_variable(three).unwrap();
        the_context.eliminate_variable(seven).unwrap();
        the_context.assign(falsified[0].negate(), Reason::Unit);
        the_context.mark_propagated();

        the_context.enter_dense_mode();
        the_context.compact_variables().unwrap();
        the_context.resume_sparse_mode().unwrap();

        // Externals 1 2 4 stand as 0 1 2.
        let keys: Vec<_> = the_context.arena.iter().collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(
            the_context.arena.clause(keys[0]).literals(),
            &[Literal::new(0, true), Literal::new(1, true), Literal::new(2, true)]
        );

        // The falsified literal was flushed, leaving externals 8 9 as 5 6.
        let eight = Literal::new(5, true);
        let nine = Literal::new(6, true);
        assert_eq!(the_context.counters.demoted_clauses, 1);
        assert!(the_context
            .watches
            .list(eight)
            .contains(&Watch::Binary { other: nine, redundant: false }));

        // The satisfied binary is gone, and externals 6 -10 stand as 4 -7.
        let six = Literal::new(4, true);
        let not_ten = Literal::new(7, false);
        assert_eq!(the_context.watches.list(six), &[Watch::Binary { other: not_ten, redundant: false }]);
        assert_eq!(the_context.counters.binary_clauses(), 2);
        assert!(the_context.watches.binaries_symmetric());

        for (variable, external) in [(4, 6), (5, 8), (6, 9), (7, 10)] {
            assert_eq!(the_context.atom_db.external(variable), external);
        }
    }

    #[test]
    fn pending_units_follow_the_renumbering() {
        let mut the_context = Context::from_config(Config::default());
        let lits = internal(&mut the_context, &[1, 2, 3, 4]);
        the_context.eliminate_variable(lits[1].variable()).unwrap();

        the_context.new_original_clause(&[!lits[3]]).unwrap();
        the_context.new_original_clause(&[lits[2]]).unwrap();

        the_context.enter_dense_mode();
        the_context.compact_variables().unwrap();

        assert_eq!(the_context.literal_db.units(), &[Literal::new(2, false), Literal::new(1, true)]);
        for unit in the_context.literal_db.units() {
            assert!(the_context.atom_db.flags(unit.variable()).active);
        }
        assert_eq!(the_context.atom_db.external_literal(the_context.literal_db.units()[0]), -4);
    }

    #[test]
    fn heap_and_queue_follow_the_renumbering() {
        let mut the_context = ten_variables();
        let ten = the_context.import_literal(10).unwrap().variable();
        the_context.atom_db.heap.revalue(ten as usize, 5.0);

        the_context.enter_dense_mode();
        the_context.compact_variables().unwrap();

        assert_eq!(*the_context.atom_db.heap.value_at(7), 5.0);
        assert_eq!(the_context.atom_db.heap.peek_max(), Some(7));
        assert_eq!(the_context.atom_db.heap.len(), 7);

        let queued: Vec<u32> = the_context.atom_db.queue.iter().collect();
        assert_eq!(queued, vec![0, 1, 2, 4, 5, 6, 7]);
    }
}

mod schedule {
    use super::*;

    fn eager_config() -> Config {
        let mut config = Config::default();
        config.compact.minimum_inactive.value = 0;
        config.arena.minimum_bytes.value = 0;
        config
    }

    #[test]
    fn compaction_when_due() {
        let mut the_context = Context::from_config(eager_config());
        for int in 1..=10 {
            the_context.import_literal(int).unwrap();
        }
        for int in [2, 4, 6] {
            let variable = the_context.import_literal(int).unwrap().variable();
            the_context.eliminate_variable(variable).unwrap();
        }

        assert!(the_context.compaction_due());
        assert_eq!(the_context.collect_if_due(), Ok(Scheduled::Compaction));
        assert!(the_context.is_watching());
        assert_eq!(the_context.variable_count(), 7);
        assert!(!the_context.compaction_due());
    }

    #[test]
    fn collection_when_due() {
        let mut the_context = Context::from_config(eager_config());
        let lits = internal(&mut the_context, &[1, 2, 3]);
        let key = the_context.new_original_clause(&lits).unwrap().unwrap();

        assert!(!the_context.collection_due());
        assert_eq!(the_context.collect_if_due(), Ok(Scheduled::Nothing));

        the_context.mark_as_garbage(key);
        assert!(the_context.collection_due());
        assert_eq!(the_context.collect_if_due(), Ok(Scheduled::Sparse));
        assert!(the_context.arena.is_empty());

        let key = the_context.new_original_clause(&lits).unwrap().unwrap();
        the_context.mark_as_garbage(key);
        the_context.enter_dense_mode();
        assert_eq!(the_context.collect_if_due(), Ok(Scheduled::Dense));
    }

    #[test]
    fn termination_prevents_a_pass() {
        let mut the_context = Context::from_config(eager_config());
        let lits = internal(&mut the_context, &[1, 2, 3]);
        let key = the_context.new_original_clause(&lits).unwrap().unwrap();
        the_context.mark_as_garbage(key);

        the_context.set_callback_terminate(Box::new(|| true));
        assert_eq!(the_context.collect_if_due(), Ok(Scheduled::Nothing));
        assert!(the_context.collection_due());
    }
}
