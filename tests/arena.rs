use otter_arena::{
    config::Config,
    context::Context,
    db::arena::header::{self, HEADER_WORDS, WORD_BYTES},
    structures::literal::Literal,
    types::err::{self, ErrorKind},
};

fn literals(context: &mut Context, ints: &[isize]) -> Vec<Literal> {
    ints.iter().map(|int| context.import_literal(*int).unwrap()).collect()
}

mod store {
    use super::*;

    #[test]
    fn routed_by_length() {
        let mut the_context = Context::from_config(Config::default());

        let ternary = literals(&mut the_context, &[1, -2, 3]);
        let binary = literals(&mut the_context, &[-1, 2]);
        let unit = literals(&mut the_context, &[4]);

        assert!(the_context.new_original_clause(&ternary).unwrap().is_some());
        assert!(the_context.new_original_clause(&binary).unwrap().is_none());
        assert!(the_context.new_original_clause(&unit).unwrap().is_none());
        assert_eq!(
            the_context.new_original_clause(&[]),
            Err(ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause))
        );

        assert_eq!(the_context.counters.original_clauses, 4);
        assert_eq!(the_context.counters.large_clauses(), 1);
        assert_eq!(the_context.counters.binary_clauses(), 1);
        assert_eq!(the_context.literal_db.units(), unit.as_slice());
        assert_eq!(the_context.arena.bytes(), header::record_bytes(3));
    }

    #[test]
    fn record_contents() {
        let mut the_context = Context::from_config(Config::default());
        let clause = literals(&mut the_context, &[1, 2, 3, -4]);

        let key = the_context.new_redundant_clause(5, &clause).unwrap().unwrap();
        let record = the_context.arena.clause(key);

        assert_eq!(record.literals(), clause.as_slice());
        assert_eq!(record.size(), 4);
        assert_eq!(record.glue(), 5);
        assert!(record.is_redundant());
        assert!(!record.is_garbage());
        assert_eq!(record.bytes(), (HEADER_WORDS + 4) * WORD_BYTES);
        assert_eq!(the_context.arena.first_reducible(), Some(key));
    }

    #[test]
    fn watched_on_first_two_literals() {
        let mut the_context = Context::from_config(Config::default());
        let clause = literals(&mut the_context, &[1, 2, 3]);
        let key = the_context.new_original_clause(&clause).unwrap().unwrap();

        use otter_arena::db::watches::pool::Watch;
        assert_eq!(
            the_context.watches.list(clause[0]),
            &[Watch::Large { blocking: clause[1], clause: key }]
        );
        assert_eq!(
            the_context.watches.list(clause[1]),
            &[Watch::Large { blocking: clause[0], clause: key }]
        );
        assert!(the_context.watches.list(clause[2]).is_empty());
    }

    #[test]
    fn allocation_reserves_invalid_literals() {
        let mut the_context = Context::from_config(Config::default());
        let key = the_context.allocate_clause(3, false).unwrap();

        assert!(the_context.arena.clause(key).literals().iter().all(|l| !l.is_valid()));

        let clause = literals(&mut the_context, &[1, 2, 3]);
        the_context.arena.clause_mut(key).literals_mut().copy_from_slice(&clause);
        assert_eq!(the_context.arena.clause(key).literals(), clause.as_slice());
    }

    #[test]
    fn allocation_is_counted() {
        let mut the_context = Context::from_config(Config::default());
        let key = the_context.allocate_clause(3, true).unwrap();
        assert_eq!(the_context.counters.large_clauses(), 1);
        assert_eq!(the_context.counters.redundant_clauses, 1);

        let clause = literals(&mut the_context, &[1, 2, 3]);
        the_context.arena.clause_mut(key).literals_mut().copy_from_slice(&clause);
        the_context.mark_as_garbage(key);
        assert_eq!(the_context.counters.large_clauses(), 0);

        for size in 0..3 {
            assert_eq!(
                the_context.allocate_clause(size, false),
                Err(ErrorKind::ClauseDB(err::ClauseDBError::ShortRecord))
            );
        }
        assert_eq!(the_context.arena.bytes(), header::record_bytes(3));
    }

    #[test]
    fn partition_violation_is_tracked() {
        let mut the_context = Context::from_config(Config::default());
        let learnt = literals(&mut the_context, &[1, 2, 3]);
        let original = literals(&mut the_context, &[4, 5, 6]);

        let redundant = the_context.new_redundant_clause(2, &learnt).unwrap().unwrap();
        assert!(!the_context.arena.partition_violated());
        assert!(the_context.arena.is_redundant_region(redundant));

        the_context.new_original_clause(&original).unwrap();
        assert!(the_context.arena.partition_violated());
    }

    #[test]
    fn promotion() {
        let mut the_context = Context::from_config(Config::default());
        let clause = literals(&mut the_context, &[1, 2, 3]);
        let key = the_context.new_redundant_clause(2, &clause).unwrap().unwrap();

        the_context.promote_clause(key);
        assert!(!the_context.arena.clause(key).is_redundant());
        assert!(!the_context.arena.is_redundant_region(key));
        assert_eq!(the_context.arena.first_reducible(), None);
        assert_eq!(the_context.counters.irredundant_clauses, 1);
        assert_eq!(the_context.counters.redundant_clauses, 0);
        assert_eq!(the_context.arena.last_irredundant(), Some(key));
    }

    #[test]
    fn promotion_of_the_first_redundant_record() {
        let mut the_context = Context::from_config(Config::default());
        let a = literals(&mut the_context, &[1, 2, 3]);
        let b = literals(&mut the_context, &[-1, -2, -3]);
        let key_a = the_context.new_redundant_clause(2, &a).unwrap().unwrap();
        let key_b = the_context.new_redundant_clause(2, &b).unwrap().unwrap();

        the_context.promote_clause(key_a);
        assert_eq!(the_context.arena.first_reducible(), Some(key_b));
        assert!(!the_context.arena.is_redundant_region(key_a));
        assert!(the_context.arena.is_redundant_region(key_b));
        assert!(!the_context.arena.partition_violated());

        // Nothing before the start is moved, and the bound is kept.
        the_context.mark_propagated();
        the_context.run_sparse_collection(key_b.offset()).unwrap();
        assert!(!the_context.arena.is_redundant_region(key_a));
        assert_eq!(the_context.arena.first_reducible(), Some(key_b));
        assert_eq!(the_context.arena.last_irredundant(), Some(key_a));
    }
}

mod garbage {
    use super::*;

    #[test]
    fn counted_when_marked() {
        let mut the_context = Context::from_config(Config::default());
        let a = literals(&mut the_context, &[1, 2, 3]);
        let b = literals(&mut the_context, &[-1, -2, -3, 4]);
        let key_a = the_context.new_original_clause(&a).unwrap().unwrap();
        let key_b = the_context.new_original_clause(&b).unwrap().unwrap();

        the_context.mark_as_garbage(key_b);

        // Counted, but not reclaimed.
        assert_eq!(the_context.arena.garbage_bytes(), header::record_bytes(4));
        assert_eq!(the_context.arena.bytes(), header::record_bytes(3) + header::record_bytes(4));
        assert_eq!(the_context.arena.live_bytes(), header::record_bytes(3));
        assert_eq!(the_context.counters.large_clauses(), 1);

        assert!(the_context.arena.is_valid(key_a));
        assert!(!the_context.arena.is_valid(key_b));
        assert!(the_context.arena.record(key_b).is_garbage());
        assert_eq!(the_context.arena.iter().collect::<Vec<_>>(), vec![key_a]);
    }

    #[test]
    fn shrinking_pads_the_record() {
        let mut the_context = Context::from_config(Config::default());
        let clause = literals(&mut the_context, &[1, 2, 3, 4, 5]);
        let key = the_context.new_original_clause(&clause).unwrap().unwrap();
        let second = literals(&mut the_context, &[6, 7, 8]);
        let after = the_context.new_original_clause(&second).unwrap().unwrap();

        the_context.shrink_clause(key, 3);

        let record = the_context.arena.clause(key);
        assert_eq!(record.literals(), &clause[..3]);
        assert!(record.is_shrunken());
        assert_eq!(the_context.arena.garbage_bytes(), 2 * WORD_BYTES);

        // Padding is skipped when walking the arena.
        assert_eq!(the_context.arena.iter().collect::<Vec<_>>(), vec![key, after]);
        assert!(the_context.arena.contains_record(after));
    }
}
