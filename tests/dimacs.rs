use otter_arena::{
    builder::ParserInfo,
    config::Config,
    context::Context,
    types::err::{self, ErrorKind},
};

fn read(formula: &str) -> (Context, Result<ParserInfo, ErrorKind>) {
    let mut the_context = Context::from_config(Config::default());
    let result = the_context.read_dimacs(formula.as_bytes());
    (the_context, result)
}

mod formulas {
    use super::*;

    #[test]
    fn with_problem_line() {
        let formula = "c a comment
c
p cnf 4 3
 1 -2 3 0
-1 4 0
c inline comment
2 0
";
        let (the_context, result) = read(formula);
        let info = result.unwrap();

        assert_eq!(info.expected_variables, Some(4));
        assert_eq!(info.expected_clauses, Some(3));
        assert_eq!(info.added_clauses, 3);
        assert_eq!(the_context.counters.large_clauses(), 1);
        assert_eq!(the_context.counters.binary_clauses(), 1);
        assert_eq!(the_context.literal_db.units().len(), 1);
        assert_eq!(the_context.atom_db.external_literal(the_context.literal_db.units()[0]), 2);
    }

    #[test]
    fn without_problem_line() {
        let (the_context, result) = read("1 2 3 0\n-3 -2 -1 0\n");
        let info = result.unwrap();

        assert_eq!(info.expected_variables, None);
        assert_eq!(info.expected_clauses, None);
        assert_eq!(info.added_clauses, 2);
        assert_eq!(the_context.counters.large_clauses(), 2);
        assert_eq!(the_context.variable_count(), 3);
    }

    #[test]
    fn clauses_across_lines() {
        let (the_context, result) = read("p cnf 5 2\n1 2\n3 0 4\n5 0\n");
        assert_eq!(result.unwrap().added_clauses, 2);

        let keys: Vec<_> = the_context.arena.iter().collect();
        assert_eq!(keys.len(), 1);
        let stored: Vec<isize> = the_context
            .arena
            .clause(keys[0])
            .literals()
            .iter()
            .map(|literal| the_context.atom_db.external_literal(*literal))
            .collect();
        assert_eq!(stored, vec![1, 2, 3]);
        assert_eq!(the_context.counters.binary_clauses(), 1);
    }

    #[test]
    fn percent_ends_the_formula() {
        let (the_context, result) = read("p cnf 3 1\n1 2 3 0\n%\n0\n");
        assert_eq!(result.unwrap().added_clauses, 1);
        assert_eq!(the_context.counters.original_clauses, 1);
    }

    #[test]
    fn tautologies_and_duplicates() {
        let (the_context, result) = read("p cnf 3 3\n1 2 3 0\n-1 1 2 0\n2 -3 2 0\n");
        let info = result.unwrap();

        assert_eq!(info.added_clauses, 2);
        assert_eq!(info.tautologies, 1);
        assert_eq!(the_context.counters.large_clauses(), 1);
        assert_eq!(the_context.counters.binary_clauses(), 1);
    }

    #[test]
    fn names_are_kept() {
        let (the_context, result) = read("p cnf 9 1\n9 -4 7 0\n");
        result.unwrap();

        assert_eq!(the_context.variable_count(), 3);
        assert_eq!(the_context.atom_db.external(0), 9);
        assert_eq!(the_context.atom_db.external(1), 4);
        assert_eq!(the_context.atom_db.external(2), 7);
    }

    #[test]
    fn unterminated_final_clause() {
        let (the_context, result) = read("p cnf 3 2\n1 2 3 0\n-1 -2");
        assert_eq!(result.unwrap().added_clauses, 2);
        assert_eq!(the_context.counters.binary_clauses(), 1);
    }
}

mod errors {
    use super::*;

    #[test]
    fn bad_literal() {
        let (_, result) = read("p cnf 3 2\n1 2 3 0\n1 x 0\n");
        assert_eq!(result, Err(ErrorKind::Parse(err::ParseError::Literal(3))));
    }

    #[test]
    fn bad_problem_line() {
        let (_, result) = read("p dnf 3 2\n1 2 3 0\n");
        assert_eq!(result, Err(ErrorKind::Parse(err::ParseError::ProblemSpecification)));

        let (_, result) = read("p cnf three 2\n1 2 3 0\n");
        assert_eq!(result, Err(ErrorKind::Parse(err::ParseError::ProblemSpecification)));
    }

    #[test]
    fn second_problem_line() {
        let (_, result) = read("p cnf 3 2\n1 2 3 0\np cnf 3 2\n");
        assert_eq!(result, Err(ErrorKind::Parse(err::ParseError::ProblemSpecification)));
    }

    #[test]
    fn empty_clause() {
        let (_, result) = read("p cnf 2 2\n1 2 0\n0\n");
        assert_eq!(result, Err(ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause)));
    }
}
