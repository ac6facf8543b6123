use serde_json::Value;
use std::path::Path;
use std::process::Command;

mod support;

fn run_cli(workbook: &Path, args: &[&str]) -> std::process::Output {
    Command::new(assert_cmd::cargo::cargo_bin!("faq-cli"))
        .env_remove("FAQ_SHEET_ENDPOINT")
        .arg("--workbook")
        .arg(workbook)
        .args(args)
        .output()
        .expect("run faq-cli")
}

fn parse_stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout utf8");
    serde_json::from_str(&stdout).expect("valid json")
}

fn seeded(workspace: &support::TestWorkspace) -> std::path::PathBuf {
    workspace.faq_workbook(
        "faq.xlsx",
        &[
            ["How do I pay?", "By **card**.", "billing", "card"],
            ["Can I cancel?", "Any time.", "account", ""],
        ],
    )
}

#[test]
fn cli_list_filters_by_category() {
    let workspace = support::TestWorkspace::new();
    let workbook = seeded(&workspace);

    let output = run_cli(&workbook, &["list", "--category", "billing"]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let payload = parse_stdout_json(&output);
    let records = payload.as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["pregunta"], "How do I pay?");
    assert_eq!(records[0]["rowIndex"], 2);
}

#[test]
fn cli_list_renders_html() {
    let workspace = support::TestWorkspace::new();
    let workbook = seeded(&workspace);

    let output = run_cli(&workbook, &["list", "--format", "html", "--search", "pay"]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);
    let html = String::from_utf8(output.stdout).expect("stdout utf8");
    assert!(html.contains("<strong>card</strong>"));
    assert!(!html.contains("Can I cancel?"));
}

#[test]
fn cli_html_format_is_only_for_list() {
    let workspace = support::TestWorkspace::new();
    let workbook = seeded(&workspace);

    let output = run_cli(&workbook, &["facets", "--format", "html"]);
    assert!(!output.status.success());
}

#[test]
fn cli_add_update_delete_cycle() {
    let workspace = support::TestWorkspace::new();
    let workbook = seeded(&workspace);

    let add = run_cli(
        &workbook,
        &["add", "Where are you?", "Online.", "--category", "general, contact"],
    );
    assert!(add.status.success(), "stderr: {:?}", add.stderr);
    assert_eq!(parse_stdout_json(&add)["total"], 3);

    let update = run_cli(
        &workbook,
        &["update", "4", "--answer", "Everywhere.", "--remove-category", "contact"],
    );
    assert!(update.status.success(), "stderr: {:?}", update.stderr);
    let grid = support::read_sheet(&workbook, "FAQ");
    assert_eq!(grid[3][1], "Everywhere.");
    assert_eq!(grid[3][2], "general");

    let delete = run_cli(&workbook, &["delete", "2"]);
    assert!(delete.status.success(), "stderr: {:?}", delete.stderr);
    assert_eq!(parse_stdout_json(&delete)["total"], 2);
}

#[test]
fn cli_update_reaches_rows_without_a_question() {
    let workspace = support::TestWorkspace::new();
    let workbook = workspace.faq_workbook(
        "faq.xlsx",
        &[
            ["How do I pay?", "By card.", "billing", ""],
            ["", "Orphan answer.", "", ""],
        ],
    );

    let listed = parse_stdout_json(&run_cli(&workbook, &["list"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let update = run_cli(&workbook, &["update", "3", "--question", "Recovered?"]);
    assert!(update.status.success(), "stderr: {:?}", update.stderr);
    let grid = support::read_sheet(&workbook, "FAQ");
    assert_eq!(grid[2][0], "Recovered?");
    assert_eq!(grid[2][1], "Orphan answer.");
}

#[test]
fn cli_import_and_rename_category() {
    let workspace = support::TestWorkspace::new();
    let workbook = seeded(&workspace);
    let import_file = workspace.path("bulk.txt");
    std::fs::write(
        &import_file,
        "P: First?\nR: One.\n---\nP: Second?\nR: Two.\n---\n",
    )
    .expect("write import file");

    let import = run_cli(&workbook, &["import", import_file.to_str().expect("path utf8")]);
    assert!(import.status.success(), "stderr: {:?}", import.stderr);
    assert_eq!(parse_stdout_json(&import)["parsed"], 2);

    let rename = run_cli(&workbook, &["rename-category", "billing", "payments"]);
    assert!(rename.status.success(), "stderr: {:?}", rename.stderr);
    let payload = parse_stdout_json(&rename);
    assert_eq!(payload["modified"], 1);
    assert_eq!(payload["categories"], serde_json::json!(["account", "payments"]));
}

#[test]
fn cli_missing_workbook_fails() {
    let workspace = support::TestWorkspace::new();
    let output = run_cli(&workspace.path("nope.xlsx"), &["list"]);
    assert!(!output.status.success());
}
