use otter_arena::{
    config::{dbs::WatchConfig, Config},
    context::Context,
    db::{keys::ClauseRef, watches::{pool::Watch, Watches}},
    structures::literal::Literal,
    types::err::{self},
};

fn binary(int: isize) -> Watch {
    Watch::Binary {
        other: Literal::from_dimacs(int).unwrap(),
        redundant: false,
    }
}

mod pool {
    use super::*;

    #[test]
    fn growth_doubles_capacity() {
        let mut watches = Watches::new(&WatchConfig::default());
        watches.resize(4).unwrap();
        let a = Literal::from_index(0);
        let b = Literal::from_index(3);

        for count in 1..=1000 {
            watches.push(a, binary(count as isize)).unwrap();
            // Interleaved pushes force relocation of the vector of a.
            if count % 100 == 0 {
                watches.push(b, binary(-(count as isize))).unwrap();
            }

            assert_eq!(watches.list(a).len(), count);
            assert_eq!(watches.capacity(a), count.next_power_of_two());
            let pool = watches.pool();
            assert_eq!(pool.len(), watches.total_capacity() + pool.tombstones());
        }

        assert!(watches.pool().tombstones() > 0);
        assert_eq!(watches.list(a)[999], binary(1000));
        assert_eq!(watches.list(b).len(), 10);
    }

    #[test]
    fn growth_at_the_end_is_in_place() {
        let mut watches = Watches::new(&WatchConfig::default());
        watches.resize(2).unwrap();
        let a = Literal::from_index(1);

        for count in 1..=64 {
            watches.push(a, binary(count)).unwrap();
        }
        assert_eq!(watches.pool().tombstones(), 0);
        assert_eq!(watches.pool().len(), 64);
    }

    #[test]
    fn defragmentation() {
        let mut config = WatchConfig::default();
        config.minimum_slots.value = 0;
        config.tombstone_fraction.value = 0.25;

        let mut watches = Watches::new(&config);
        watches.resize(6).unwrap();
        for round in 1..=20 {
            for index in 0..6 {
                watches.push(Literal::from_index(index), binary(round)).unwrap();
            }
        }
        assert!(watches.defragmentation_due());

        let before: Vec<Vec<Watch>> = (0..6).map(|index| watches.list(Literal::from_index(index)).to_vec()).collect();
        watches.defragment();

        assert_eq!(watches.pool().tombstones(), 0);
        assert_eq!(watches.pool().len(), 6 * 20);
        assert!(!watches.defragmentation_due());
        for (index, list) in before.iter().enumerate() {
            assert_eq!(watches.list(Literal::from_index(index)), list.as_slice());
        }
    }

    #[test]
    fn offset_limit() {
        let mut config = WatchConfig::default();
        config.offset_limit.value = 8;

        let mut watches = Watches::new(&config);
        watches.resize(2).unwrap();
        let a = Literal::from_index(0);
        for count in 1..=8 {
            watches.push(a, binary(count)).unwrap();
        }
        assert_eq!(watches.push(a, binary(9)), Err(err::PoolError::OffsetSpaceExhausted));
    }
}

mod lists {
    use super::*;

    #[test]
    fn binary_watches_are_symmetric() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.import_literal(1).unwrap();
        let q = the_context.import_literal(2).unwrap();
        let r = the_context.import_literal(3).unwrap();

        the_context.new_original_clause(&[p, !q]).unwrap();
        the_context.new_redundant_clause(2, &[q, r]).unwrap();

        assert_eq!(the_context.watches.list(p), &[Watch::Binary { other: !q, redundant: false }]);
        assert_eq!(the_context.watches.list(!q), &[Watch::Binary { other: p, redundant: false }]);
        assert_eq!(the_context.watches.list(r), &[Watch::Binary { other: q, redundant: true }]);
        assert!(the_context.watches.binaries_symmetric());

        assert!(the_context.delete_binary_clause(!q, p));
        assert!(!the_context.delete_binary_clause(p, !q));
        assert!(the_context.watches.list(p).is_empty());
        assert!(the_context.watches.binaries_symmetric());
        assert_eq!(the_context.counters.irredundant_binaries, 0);
        assert_eq!(the_context.counters.redundant_binaries, 1);
    }

    #[test]
    fn removal_keeps_order() {
        let mut watches = Watches::new(&WatchConfig::default());
        watches.resize(8).unwrap();
        let a = Literal::from_index(0);
        let clause = ClauseRef::INVALID;

        watches.push(a, binary(2)).unwrap();
        watches.push_blocking_watch(a, Literal::from_index(4), clause).unwrap();
        watches.push(a, binary(3)).unwrap();
        watches.push(a, binary(4)).unwrap();

        assert!(watches.remove_binary_watch(a, Literal::from_dimacs(3).unwrap()));
        assert!(!watches.remove_binary_watch(a, Literal::from_dimacs(3).unwrap()));
        assert_eq!(
            watches.list(a),
            &[
                binary(2),
                Watch::Large { blocking: Literal::from_index(4), clause },
                binary(4)
            ]
        );

        assert!(watches.remove_blocking_watch(a, clause));
        assert_eq!(watches.list(a), &[binary(2), binary(4)]);
    }

    #[test]
    fn dense_mode_keeps_binaries() {
        let mut the_context = Context::from_config(Config::default());
        let lits: Vec<Literal> = (1..=4).map(|int| the_context.import_literal(int).unwrap()).collect();

        the_context.new_original_clause(&lits[..3]).unwrap();
        the_context.new_original_clause(&[lits[0], lits[3]]).unwrap();

        the_context.enter_dense_mode();
        assert!(!the_context.is_watching());
        assert_eq!(the_context.watches.list(lits[0]), &[Watch::Binary { other: lits[3], redundant: false }]);
        assert!(the_context.watches.list(lits[1]).is_empty());

        // Clauses stored in dense mode are not watched.
        let key = the_context.new_original_clause(&[lits[1], lits[2], lits[3]]).unwrap().unwrap();
        assert!(the_context.watches.list(lits[1]).is_empty());

        the_context.resume_sparse_mode().unwrap();
        assert!(the_context
            .watches
            .list(lits[1])
            .iter()
            .any(|watch| matches!(watch, Watch::Large { clause, .. } if *clause == key)));
        let large = (0..the_context.watches.literal_count())
            .map(|index| the_context.watches.list(Literal::from_index(index)).iter().filter(|w| w.is_large()).count())
            .sum::<usize>();
        assert_eq!(large, 4);
    }
}
