use live_scoreboard::interfaces::cli::{execute_script, CliError, ScriptReport};
use live_scoreboard::{ErrorKind, ScoreboardService, SimpleMatchKeyGenerator};

type Board = ScoreboardService<SimpleMatchKeyGenerator>;

fn run(board: &Board, script: &str, strict: bool) -> (Result<ScriptReport, CliError>, String) {
    let mut out = Vec::new();
    let result = execute_script(board, script.as_bytes(), &mut out, strict);
    (result, String::from_utf8(out).unwrap())
}

const WORLD_CUP: &str = "\
# opening day
start Mexico Canada
start Spain Brazil
start Germany France
start Uruguay Italy
start Argentina Australia

goal Mexico Canada away
goal Mexico Canada away
goal Mexico Canada away
goal Mexico Canada away
goal Mexico Canada away
goal Spain Brazil home
goal Spain Brazil home
goal Spain Brazil away
goal Germany France home
goal Germany France away
goal Uruguay Italy home
goal Argentina Australia home
goal Argentina Australia home
goal Argentina Australia home
goal Argentina Australia away

summary
";

#[test]
fn test_world_cup_script() {
    let board = Board::new(SimpleMatchKeyGenerator);
    let (result, output) = run(&board, WORLD_CUP, true);

    assert_eq!(result.unwrap(), ScriptReport { executed: 21, rejected: 0 });
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec![
            "Mexico 0 - Canada 5",
            "Argentina 3 - Australia 1",
            "Spain 2 - Brazil 1",
            "Germany 1 - France 1",
            "Uruguay 1 - Italy 0",
        ]
    );
    assert_eq!(board.active_matches(), 5);
}

#[test]
fn test_quoted_names_with_separator() {
    let board = Board::new(SimpleMatchKeyGenerator);
    let script = r#"
start "A vs B" C
start A "B vs C"
goal A "B vs C" home
score "A vs B" C
score A "B vs C"
"#;
    let (result, output) = run(&board, script, true);

    assert_eq!(result.unwrap(), ScriptReport { executed: 5, rejected: 0 });
    assert_eq!(output, "A vs B 0 - C 0\nA 1 - B vs C 0\n");
}

#[test]
fn test_rejections_continue_and_are_counted() {
    let board = Board::new(SimpleMatchKeyGenerator);
    let script = "\
start Spain Brazil
start Brazil Spain
start Spain Germany
goal Brazil Spain draw
undo Spain Brazil home
finish Spain Brazil
finish Spain Brazil
";
    let (result, output) = run(&board, script, false);

    assert_eq!(result.unwrap(), ScriptReport { executed: 2, rejected: 5 });
    let kinds: Vec<&str> = output
        .lines()
        .map(|line| line.split(": ").nth(1).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "existing_match_conflict",
            "team_already_in_match",
            "existing_match_conflict",
            "illegal_state",
            "match_not_found",
        ]
    );

    let rejections = &board.metrics().rejections;
    assert_eq!(rejections.with_label_values(&["start", "existing_match_conflict"]).get(), 1);
    assert_eq!(rejections.with_label_values(&["update", "existing_match_conflict"]).get(), 1);
    assert_eq!(rejections.with_label_values(&["adjust", "illegal_state"]).get(), 1);
    assert!(board.get_summary().is_empty());
}

#[test]
fn test_strict_run_stops_without_further_changes() {
    let board = Board::new(SimpleMatchKeyGenerator);
    let (result, _) = run(&board, "start A B\nfinish C D\nstart C D\n", true);

    match result.unwrap_err() {
        CliError::Rejected { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(source.kind(), ErrorKind::MatchNotFound);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(board.get_summary(), vec!["A 0 - B 0"]);
}

#[test]
fn test_syntax_error_reports_line() {
    let board = Board::new(SimpleMatchKeyGenerator);
    let (result, _) = run(&board, "start A B\n# note\nstart \"C D\n", false);

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Syntax { line: 3, .. }));
    assert_eq!(err.to_string(), "line 3: unterminated quote");
}
