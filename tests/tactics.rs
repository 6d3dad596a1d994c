use serde::Deserialize;

use minmax_chess::{Board, MinMaxAi, SearchConfig};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    name: String,
    fen: String,
    depth: i32,
    best: String,
}

#[test]
fn tactics_suite() {
    let data = include_str!("data/tactics.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid tactics.json");

    for problem in &set.problems {
        for null_move in [true, false] {
            let mut board = Board::from_fen(&problem.fen).unwrap();
            let config = SearchConfig::depth(problem.depth).with_null_move(null_move);
            let mut ai = MinMaxAi::new(config).unwrap();
            let outcome = ai.choose_move(&mut board).unwrap();
            assert_eq!(
                outcome.best_move.to_string(),
                problem.best,
                "{} (null_move={null_move}): fen {}",
                problem.name,
                problem.fen
            );
        }
    }
}
