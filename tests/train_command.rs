use clap::Parser;
use qttt::cli::commands::{
    advise::{AdviseArgs, execute as advise},
    train::{TrainArgs, execute as train},
};
use tempfile::tempdir;

fn parse_train<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn train_writes_a_loadable_nested_json_table() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");

    let args = parse_train([
        "qttt-train",
        "--episodes",
        "50",
        "--seed",
        "17",
        "--table",
        table_path.to_str().unwrap(),
    ]);

    train(args).expect("training should succeed");
    assert!(table_path.exists());

    let contents = std::fs::read_to_string(&table_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let states = parsed.as_object().expect("top level must be an object");
    assert!(!states.is_empty());

    for (state, actions) in states {
        assert_eq!(state.chars().count(), 9, "bad state key '{state}'");
        let actions = actions.as_object().expect("second level must be an object");
        for (action, value) in actions {
            let idx: usize = action.parse().expect("action keys are integers");
            assert!(idx < 9);
            assert!(value.as_f64().is_some());
        }
    }
}

#[test]
fn train_resumes_from_existing_file() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");
    let path_str = table_path.to_str().unwrap().to_string();

    let run = |seed: &str| {
        parse_train([
            "qttt-train",
            "--episodes",
            "30",
            "--seed",
            seed,
            "--table",
            &path_str,
        ])
    };

    train(run("1")).unwrap();
    let first = std::fs::read_to_string(&table_path).unwrap();
    let first: serde_json::Value = serde_json::from_str(&first).unwrap();

    train(run("2")).unwrap();
    let second = std::fs::read_to_string(&table_path).unwrap();
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();

    assert!(second.as_object().unwrap().len() >= first.as_object().unwrap().len());
}

#[test]
fn progress_flag_can_be_disabled() {
    let args = parse_train(["qttt-train", "--progress", "false"]);
    assert!(!args.progress);

    let args = parse_train(["qttt-train", "--progress", "true"]);
    assert!(args.progress);

    let args = parse_train(["qttt-train"]);
    assert!(args.progress);
}

#[test]
fn train_runs_without_progress_bar() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");

    let args = parse_train([
        "qttt-train",
        "--episodes",
        "10",
        "--seed",
        "4",
        "--progress",
        "false",
        "--table",
        table_path.to_str().unwrap(),
    ]);

    train(args).expect("training without progress bar should succeed");
    assert!(table_path.exists());
}

#[test]
fn train_fails_fast_on_corrupt_table() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");
    std::fs::write(&table_path, "{ definitely not json").unwrap();

    let args = parse_train([
        "qttt-train",
        "--episodes",
        "5",
        "--table",
        table_path.to_str().unwrap(),
    ]);

    assert!(train(args).is_err());
}

#[test]
fn train_rejects_out_of_range_hyperparameters() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");

    let args = parse_train([
        "qttt-train",
        "--episodes",
        "5",
        "--alpha",
        "1.5",
        "--table",
        table_path.to_str().unwrap(),
    ]);

    assert!(train(args).is_err());
    assert!(!table_path.exists());
}

#[test]
fn advise_works_after_training() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("q_table.json");

    train(parse_train([
        "qttt-train",
        "--episodes",
        "100",
        "--seed",
        "5",
        "--table",
        table_path.to_str().unwrap(),
    ]))
    .unwrap();

    let args = AdviseArgs::parse_from([
        "qttt-advise",
        "X   O    ",
        "--table",
        table_path.to_str().unwrap(),
        "--seed",
        "3",
    ]);
    advise(args).expect("advise should succeed on a trained table");
}

#[test]
fn advise_rejects_malformed_board() {
    let args = AdviseArgs::parse_from(["qttt-advise", "XXXX"]);
    assert!(advise(args).is_err());
}

#[test]
fn advise_rejects_over_long_board() {
    // Trailing garbage must not be silently dropped.
    let args = AdviseArgs::parse_from(["qttt-advise", "XXO  O   XXXXX"]);
    assert!(advise(args).is_err());
}
