//! CLI surface tests: inspection commands, output modes, exit codes.

mod common;

use std::fs;

use serde_json::json;

use common::{run_cli_case, write_fixture};

#[test]
fn version_prints_package_version() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("version", dir.path(), &["version"]);
    assert!(result.status.success());
    assert!(result.stdout.starts_with("fsw "));
    assert!(result.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_json_mode_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("version_json", dir.path(), &["version", "--json", "--verbose"]);
    assert!(result.status.success());

    let payload: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(payload["command"], "version");
    assert_eq!(payload["package"], "flair_sweep");
}

#[test]
fn rules_lists_denylist_and_rename_table() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("rules", dir.path(), &["rules", "--no-color"]);
    assert!(result.status.success());
    assert!(result.stdout.contains("Denylist (exact match):"));
    assert!(result.stdout.contains("Clip"));
    assert!(result.stdout.contains("INFORMACIÓN :travieso:"));
    assert!(result.stdout.contains("Rename rules (first substring match wins):"));
    assert!(result.stdout.contains("\"Meme Artesanal\" -> \"MEME_ARTESANAL\""));
}

#[test]
fn rules_json_mode_carries_the_full_tables() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("rules_json", dir.path(), &["rules", "--json"]);
    assert!(result.status.success());

    let payload: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(payload["denylist"].as_array().unwrap().len(), 7);
    assert_eq!(payload["renames"][0]["contains"], "ORO");
    assert_eq!(payload["renames"][2]["replacement"], "MEME_ARTESANAL");
}

#[test]
fn config_commands_round_trip_an_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("fsw.toml");
    fs::write(&config_path, "[sweep]\nmax_depth = 5\n").unwrap();
    let config_arg = config_path.to_string_lossy().to_string();

    let result = run_cli_case(
        "config_path",
        dir.path(),
        &["--config", &config_arg, "config", "path"],
    );
    assert!(result.status.success());
    assert!(result.stdout.trim().ends_with("fsw.toml"));

    let result = run_cli_case(
        "config_show",
        dir.path(),
        &["--config", &config_arg, "config", "show"],
    );
    assert!(result.status.success());
    assert!(result.stdout.contains("max_depth = 5"));
    assert!(result.stdout.contains("[rules]") || result.stdout.contains("denylist"));

    let result = run_cli_case(
        "config_validate",
        dir.path(),
        &["--config", &config_arg, "config", "validate"],
    );
    assert!(result.status.success());
    assert!(result.stdout.contains("Configuration OK"));
}

#[test]
fn custom_rules_from_config_drive_the_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("fsw.toml");
    fs::write(
        &config_path,
        concat!(
            "[rules]\n",
            "denylist = [\"Basura\"]\n",
            "\n",
            "[[rules.renames]]\n",
            "contains = \"PLATA\"\n",
            "replacement = \"PLATA\"\n",
        ),
    )
    .unwrap();
    let config_arg = config_path.to_string_lossy().to_string();

    let posts = dir.path().join("posts");
    write_fixture(&posts.join("basura.json"), &json!({"link_flair_text": "Basura"}));
    write_fixture(
        &posts.join("plata.json"),
        &json!({"link_flair_text": "PLATA SEMANAL"}),
    );
    // Builtin rules are replaced: "Clip" is no longer denied.
    write_fixture(&posts.join("clip.json"), &json!({"link_flair_text": "Clip"}));

    let result = run_cli_case(
        "custom_rules",
        &posts,
        &["--config", &config_arg, "sweep", "."],
    );
    assert!(result.status.success(), "see {}", result.log_path.display());
    assert!(!posts.join("basura.json").exists());
    assert!(posts.join("clip.json").exists());

    let rewritten: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(posts.join("plata.json")).unwrap()).unwrap();
    assert_eq!(rewritten["link_flair_text"], "PLATA");
}

#[test]
fn invalid_config_fails_with_runtime_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("fsw.toml");
    fs::write(&config_path, "[sweep]\nmax_depth = 0\n").unwrap();
    let config_arg = config_path.to_string_lossy().to_string();

    let result = run_cli_case(
        "invalid_config",
        dir.path(),
        &["--config", &config_arg, "sweep", "."],
    );
    assert_eq!(result.status.code(), Some(2));
    assert!(result.stderr.contains("FSW-1001"), "stderr: {}", result.stderr);
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case(
        "missing_config",
        dir.path(),
        &["--config", "./no-such-config.toml", "config", "show"],
    );
    assert_eq!(result.status.code(), Some(2));
    assert!(result.stderr.contains("FSW-1002"), "stderr: {}", result.stderr);
}

#[test]
fn zero_max_depth_is_a_user_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case(
        "zero_depth",
        dir.path(),
        &["sweep", ".", "--max-depth", "0"],
    );
    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn quiet_mode_suppresses_banners_but_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "nope").unwrap();

    let result = run_cli_case("quiet", dir.path(), &["sweep", ".", "--quiet"]);
    assert!(result.status.success());
    assert!(!result.stdout.contains("Starting JSON file processing..."));
    assert!(!result.stdout.contains("Processing complete!"));
    assert!(result.stdout.contains("Error processing ./broken.json:"));
}

#[test]
fn completions_generate_a_script() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("completions", dir.path(), &["completions", "bash"]);
    assert!(result.status.success());
    assert!(result.stdout.contains("fsw"));
    assert!(!result.stdout.trim().is_empty());
}

#[test]
fn no_args_prints_help_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_cli_case("no_args", dir.path(), &[]);
    assert!(!result.status.success());
    let combined = format!("{}{}", result.stdout, result.stderr);
    assert!(combined.contains("Usage") || combined.contains("usage"));
}
