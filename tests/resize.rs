use otter_arena::{
    config::Config,
    context::Context,
    db::keys::Reason,
    structures::{literal::Literal, variable::VARIABLE_MAX},
    types::err::{self, ErrorKind},
};

#[test]
fn reserve_doubles() {
    let mut the_context = Context::from_config(Config::default());

    let mut capacities = Vec::default();
    for int in 1..=5 {
        the_context.import_literal(int).unwrap();
        capacities.push(the_context.atom_db.capacity());

        assert_eq!(the_context.variable_count(), int as usize);
        assert_eq!(the_context.watches.literal_count(), 2 * int as usize);
    }
    assert_eq!(capacities, vec![1, 2, 4, 4, 8]);
}

#[test]
fn shrinking_releases_space() {
    let mut the_context = Context::from_config(Config::default());
    for int in 1..=5 {
        the_context.import_literal(int).unwrap();
    }

    the_context.resize(8).unwrap();
    assert_eq!(the_context.variable_count(), 8);
    assert_eq!(the_context.atom_db.capacity(), 8);

    // Fresh variables are not active until named.
    assert!(!the_context.atom_db.flags(7).active);
    assert_eq!(the_context.atom_db.active_count(), 5);

    the_context.resize(5).unwrap();
    assert_eq!(the_context.variable_count(), 5);
    assert_eq!(the_context.atom_db.capacity(), 5);
    assert_eq!(the_context.watches.literal_count(), 10);
}

#[test]
fn values_survive_growth() {
    let mut the_context = Context::from_config(Config::default());
    let p = the_context.import_literal(1).unwrap();
    the_context.assign(!p, Reason::Unit);

    for int in 2..=40 {
        the_context.import_literal(int).unwrap();
    }

    assert_eq!(the_context.atom_db.value_of(p), Some(false));
    assert_eq!(the_context.atom_db.value_of(Literal::new(39, true)), None);
    assert_eq!(the_context.atom_db.external(39), 40);
    assert_eq!(the_context.atom_db.capacity(), 64);
}

#[test]
fn variables_exhausted() {
    let mut the_context = Context::from_config(Config::default());
    the_context.import_literal(1).unwrap();

    assert_eq!(
        the_context.resize(VARIABLE_MAX as usize + 2),
        Err(ErrorKind::AtomDB(err::AtomDBError::VariablesExhausted))
    );
    // A failed resize leaves the context as it was.
    assert_eq!(the_context.variable_count(), 1);
    assert_eq!(the_context.atom_db.capacity(), 1);
}

#[test]
fn invalid_external() {
    let mut the_context = Context::from_config(Config::default());
    assert_eq!(
        the_context.import_literal(0),
        Err(ErrorKind::AtomDB(err::AtomDBError::InvalidExternal))
    );
}
