use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], session_file: &Path) -> Output {
    run_with_env(args, session_file, &[])
}

fn run_with_env(args: &[&str], session_file: &Path, envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_council-insights"))
        .args(args)
        .env_remove("COUNCIL_INSIGHTS_DATA")
        .env_remove("COUNCIL_INSIGHTS_COUNT_POLICY")
        .env("COUNCIL_INSIGHTS_SESSION", session_file)
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to execute command")
}

fn stdout_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is JSON"))
        .collect()
}

#[test]
fn action_plans_lists_every_area() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["action-plans"], &dir.path().join("session.json"));
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["area"], "Northside");
    assert_eq!(
        lines[1]["plan"],
        "Create coding bootcamps and music events for youth participation."
    );
}

#[test]
fn breakdown_reads_a_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("catalog.yaml");
    std::fs::write(
        &data,
        r#"
projects:
  - id: pool
    title: Aquatic Centre
    demographics:
      sex:
        Male: { support: 3, neutral: 2, oppose: 1 }
        Female: 9
"#,
    )
    .unwrap();

    let output = run(
        &[
            "breakdown",
            "--data",
            data.to_str().unwrap(),
            "--dimension",
            "sex",
        ],
        &dir.path().join("session.json"),
    );
    assert!(output.status.success());

    let view = &stdout_lines(&output)[0];
    assert_eq!(view["title"], "Aquatic Centre");
    assert_eq!(view["total_votes"], 15);
    assert_eq!(view["rows"][0]["label"], "Female");
    assert_eq!(view["rows"][1]["total"], 6);
}

#[test]
fn reject_negative_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("catalog.json");
    std::fs::write(
        &data,
        r#"{ "projects": [ { "id": "p", "title": "t", "demographics": { "age": { "18-25": -1 } } } ] }"#,
    )
    .unwrap();
    let session = dir.path().join("session.json");

    let clamped = run(&["breakdown", "--data", data.to_str().unwrap()], &session);
    assert!(clamped.status.success());
    assert_eq!(stdout_lines(&clamped)[0]["total_votes"], 0);

    let rejected = run(
        &["breakdown", "--data", data.to_str().unwrap(), "--reject-negative"],
        &session,
    );
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("Negative vote count"));

    let from_env = run_with_env(
        &["breakdown", "--data", data.to_str().unwrap()],
        &session,
        &[("COUNCIL_INSIGHTS_COUNT_POLICY", "reject")],
    );
    assert!(!from_env.status.success());
    assert!(String::from_utf8_lossy(&from_env.stderr).contains("Negative vote count"));
}

#[test]
fn misspelled_tally_key_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("catalog.json");
    std::fs::write(
        &data,
        r#"{ "projects": [ { "id": "p", "title": "t", "demographics": { "age": { "18-25": { "suport": 40 } } } } ] }"#,
    )
    .unwrap();

    let output = run(
        &["breakdown", "--data", data.to_str().unwrap()],
        &dir.path().join("session.json"),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON parsing error"));
}

#[test]
fn unknown_dimension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &["breakdown", "--dimension", "income"],
        &dir.path().join("session.json"),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown dimension 'income'"));
}

#[test]
fn profile_of_second_project() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &["profile", "--entity", "proj-2"],
        &dir.path().join("session.json"),
    );
    assert!(output.status.success());

    let line = &stdout_lines(&output)[0];
    assert_eq!(line["profile"]["age"], "26-40");
    assert_eq!(line["profile"]["sex"], "Female");
    // ethnicity ties 50/50; the first bucket wins
    assert_eq!(line["profile"]["culture"], "Multicultural");
}

#[test]
fn session_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("state").join("session.json");

    let output = run(&["session", "sign-in", "--email", "resident@example.org"], &session);
    assert!(output.status.success());
    let output = run(&["session", "council", "melbourne city"], &session);
    assert!(output.status.success());
    let output = run(&["session", "language", "vi"], &session);
    assert!(output.status.success());

    let shown = stdout_lines(&run(&["session", "show"], &session))[0].clone();
    assert_eq!(shown["signed_in"], true);
    assert_eq!(shown["council"], "Melbourne City");
    assert_eq!(shown["language"], "vi");

    let output = run(&["session", "sign-out"], &session);
    assert!(output.status.success());
    let shown = stdout_lines(&run(&["session", "show"], &session))[0].clone();
    assert_eq!(shown["signed_in"], false);
    assert!(shown.get("council").is_none());
    assert_eq!(shown["language"], "vi");

    assert!(run(&["session", "language", "en"], &session).status.success());
    assert!(run(&["session", "sign-out"], &session).status.success());
    assert!(session.exists());
}

#[test]
fn plain_structuring_skips_the_backend() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &["structure", "--plain", "Shade sails for the playground"],
        &dir.path().join("session.json"),
    );
    assert!(output.status.success());

    let idea: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(idea["title"], "Shade sails for the playground");
    assert_eq!(idea["estimated_scope"], "small");
}

#[test]
fn unknown_council_and_preference_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");

    let output = run(&["session", "council", "City of Gotham"], &session);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown council 'City of Gotham'"));

    let output = run(&["session", "preferences", "Sports"], &session);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown preference 'Sports'"));
    assert!(!session.exists());

    let output = run(
        &["session", "preferences", "Civic Hackathons", "health & wellbeing"],
        &session,
    );
    assert!(output.status.success());
    let state = &stdout_lines(&output)[0];
    assert_eq!(state["onboarded"], true);
    assert_eq!(state["preferences"][1], "Health & Wellbeing");
}

#[test]
fn councils_search_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");

    let all = stdout_lines(&run(&["councils"], &session));
    assert_eq!(all.len(), 12);
    assert_eq!(all[0], "Alpine Shire");

    let yarra = stdout_lines(&run(&["councils", "yarra"], &session));
    assert_eq!(yarra, vec!["Yarra City", "Yarra Ranges Shire"]);
}

#[test]
fn second_vote_is_refused_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");

    let output = run(&["vote", "prop-2", "support"], &session);
    assert!(output.status.success());
    let summary = &stdout_lines(&output)[0];
    assert_eq!(summary["total"], 38);
    assert_eq!(summary["my_vote"], "support");

    let again = run(&["vote", "prop-2", "oppose"], &session);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("already voted"));

    let listed = stdout_lines(&run(&["proposals"], &session));
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[1]["counts"]["support"], 1);
    assert_eq!(listed[1]["counts"]["oppose"], 0);
    assert!(listed[0].get("my_vote").is_none());
}

#[test]
fn translate_uses_session_language() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let page = "https://council.example/projects";

    let english = run(&["translate", page], &session);
    assert!(english.status.success());
    assert_eq!(String::from_utf8_lossy(&english.stdout).trim(), page);

    assert!(run(&["session", "language", "el"], &session).status.success());
    let greek = run(&["translate", page], &session);
    let link = String::from_utf8_lossy(&greek.stdout).trim().to_string();
    assert!(link.starts_with("https://translate.google.com/translate?sl=auto&tl=el&u="));

    let unsupported = run(&["translate", page, "--lang", "fr"], &session);
    assert!(!unsupported.status.success());
}
