//! End-to-end tests for the cmdmap binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmdmap() -> Command {
    let mut cmd = Command::cargo_bin("cmdmap").expect("binary should be built");
    cmd.env_remove("CMDMAP_CONFIG")
        .env_remove("CMDMAP_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("commands.toml");
    std::fs::write(&path, content).expect("should write config");
    path
}

const DEPLOY_TABLE: &str = r#"
prompt = "deploy> "

[[command]]
path = ["deploy"]
action = "echo"
args = ["deploying", "main"]

[[command]]
path = ["deploy", "canary"]
action = "echo"
args = ["canary"]

[[command]]
path = ["rollback"]

[[command]]
path = ["start"]
action = "echo"

[[command]]
path = ["status"]
action = "echo"
args = ["all good"]
"#;

mod one_shot {
    use super::*;

    #[test]
    fn test_abbreviated_builtin() {
        cmdmap()
            .args(["ec", "hello", "world"])
            .assert()
            .success()
            .stdout("hello world\n");
    }

    #[test]
    fn test_unknown_command_exits_1() {
        cmdmap()
            .arg("frobnicate")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("unknown command: frobnicate"));
    }

    #[test]
    fn test_reserved_command_exits_2() {
        cmdmap()
            .arg("status")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("not implemented: status"));
    }

    #[test]
    fn test_promoted_action_still_runs() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, DEPLOY_TABLE);

        cmdmap()
            .arg("--config")
            .arg(&config)
            .args(["dep", "now"])
            .assert()
            .success()
            .stdout("deploying main now\n");

        cmdmap()
            .arg("--config")
            .arg(&config)
            .args(["d", "c", "eu"])
            .assert()
            .success()
            .stdout("canary eu\n");
    }

    #[test]
    fn test_ambiguous_prefix_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, DEPLOY_TABLE);

        cmdmap()
            .arg("--config")
            .arg(&config)
            .arg("sta")
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "ambiguous command 'sta': start, status",
            ));
    }

    #[test]
    fn test_rust_log_overrides_log_level() {
        cmdmap()
            .args(["echo", "hi"])
            .assert()
            .success()
            .stderr(predicate::str::contains("one-shot dispatch finished").not());

        cmdmap()
            .env("RUST_LOG", "debug")
            .args(["--log-level", "error", "echo", "hi"])
            .assert()
            .success()
            .stdout("hi\n")
            .stderr(predicate::str::contains("one-shot dispatch finished"));
    }

    #[test]
    fn test_config_from_environment() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, DEPLOY_TABLE);

        cmdmap()
            .env("CMDMAP_CONFIG", &config)
            .arg("rollback")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("not implemented: rollback"));
    }
}

mod interactive {
    use super::*;

    #[test]
    fn test_reads_until_quit() {
        cmdmap()
            .write_stdin("echo first\n\nq\necho never\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("first"))
            .stdout(predicate::str::contains("never").not());
    }

    #[test]
    fn test_queued_commands_run_first() {
        cmdmap()
            .args(["-c", "echo one", "-c", "echo two"])
            .write_stdin("echo three\n")
            .assert()
            .success()
            .stdout("one\ntwo\nthree\n");
    }

    #[test]
    fn test_paths_builtin_lists_table() {
        cmdmap()
            .write_stdin("paths\n")
            .assert()
            .success()
            .stdout("echo\npaths\nquit\nstatus\n");
    }

    #[test]
    fn test_prefix_and_transcript() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            &dir,
            "prefix = \"| \"\n[[command]]\npath = [\"say\"]\naction = \"echo\"\n",
        );
        let transcript = dir.path().join("transcript.txt");

        cmdmap()
            .arg("--config")
            .arg(&config)
            .arg("--transcript")
            .arg(&transcript)
            .write_stdin("say hi\nsing\n")
            .assert()
            .success()
            .stdout("| hi\n| unknown command: sing\n");

        let saved = std::fs::read_to_string(&transcript).unwrap();
        assert_eq!(saved, "| hi\n| unknown command: sing\n");
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_unknown_action_in_config() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[[command]]\npath = [\"x\"]\naction = \"explode\"\n");

        cmdmap()
            .arg("--config")
            .arg(&config)
            .arg("x")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown action 'explode'"));
    }

    #[test]
    fn test_missing_config_file() {
        cmdmap()
            .args(["--config", "/nonexistent/commands.toml", "echo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load command table"));
    }
}
