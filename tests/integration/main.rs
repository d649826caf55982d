//! Integration tests for buildpair

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Nothing listens here, so any network access fails fast
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn buildpair(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("buildpair");
        cmd.env_remove("BUILDPAIR_BASE_URL")
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--cache-dir")
            .arg(temp.path());
        cmd
    }

    fn seed_cache(dir: &Path) {
        let files = [
            (
                "initiator-builds.json",
                r#"{"builds": [
                    {"builderid": 2, "buildid": 10, "started_at": 1000,
                     "properties": {"build_speed": ["fast", "s"], "got_revision": ["abc123", "s"]}},
                    {"builderid": 2, "buildid": 12, "started_at": 1000,
                     "properties": {"build_speed": ["slow", "s"], "got_revision": ["def456", "s"]}}
                ], "meta": {"total": 2}}"#,
            ),
            ("remote-builds.json", r#"{"builds": []}"#),
            ("local-builds.json", r#"{"builds": []}"#),
            (
                "uploader-builds.json",
                r#"{"builds": [
                    {"builderid": 4, "buildid": 20, "started_at": 2000, "complete_at": 4600,
                     "properties": {"browser_name": ["chrome", "s"], "revision": ["abc123", "s"]}},
                    {"builderid": 4, "buildid": 21, "started_at": 2000, "complete_at": 9100,
                     "properties": {"browser_name": ["safari", "s"], "revision": ["def456", "s"]}}
                ]}"#,
            ),
        ];
        for (name, body) in files {
            std::fs::write(dir.join(name), body).unwrap();
        }
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        buildpair(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("report"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        buildpair(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("buildpair"));
    }

    #[test]
    fn report_from_cache_stays_offline() {
        let temp = TempDir::new().unwrap();
        seed_cache(temp.path());

        buildpair(&temp)
            .args(["--base-url", UNREACHABLE, "report"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Initiator | Browser | Uploader | Duration\n\
                 ----------|---------|----------|---------\n",
            ))
            .stdout(predicate::str::contains(
                "[10](http://127.0.0.1:9/#/builders/2/builds/10) | chrome | \
                 [20](http://127.0.0.1:9/#/builders/4/builds/20) | 1h 0s",
            ))
            .stdout(predicate::str::contains(
                "[10](http://127.0.0.1:9/#/builders/2/builds/10) | firefox | n/a | ∞",
            ))
            .stdout(predicate::str::contains(
                "[12](http://127.0.0.1:9/#/builders/2/builds/12) | edge | n/a | ∞",
            ))
            .stdout(predicate::str::contains(
                "[12](http://127.0.0.1:9/#/builders/2/builds/12) | safari | \
                 [21](http://127.0.0.1:9/#/builders/4/builds/21) | 2h 15s",
            ));
    }

    #[test]
    fn report_ignores_remote_record_shape() {
        let temp = TempDir::new().unwrap();
        seed_cache(temp.path());
        std::fs::write(
            temp.path().join("remote-builds.json"),
            r#"{"builds": [{"buildid": 5, "builderid": 1}]}"#,
        )
        .unwrap();

        buildpair(&temp)
            .args(["--base-url", UNREACHABLE, "report"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| chrome |"));
    }

    #[test]
    fn report_json_format() {
        let temp = TempDir::new().unwrap();
        seed_cache(temp.path());

        buildpair(&temp)
            .args(["--base-url", UNREACHABLE, "report", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"duration_minutes\": 60"))
            .stdout(predicate::str::contains("\"browser\": \"safari\""));
    }

    #[test]
    fn report_without_cache_or_server_fails() {
        let temp = TempDir::new().unwrap();

        buildpair(&temp)
            .args(["--base-url", UNREACHABLE, "report"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Error:"));

        assert!(!temp.path().join("initiator-builds.json").exists());
    }

    #[test]
    fn schema_error_is_reported() {
        let temp = TempDir::new().unwrap();
        seed_cache(temp.path());
        std::fs::write(temp.path().join("uploader-builds.json"), r#"{"meta": {}}"#).unwrap();

        buildpair(&temp)
            .args(["--base-url", UNREACHABLE, "report"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("uploader-builds.json"));
    }

    #[test]
    fn cache_list_and_clear() {
        let temp = TempDir::new().unwrap();
        seed_cache(temp.path());

        buildpair(&temp)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("initiator-builds.json"));

        buildpair(&temp)
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed"));

        assert!(!temp.path().join("uploader-builds.json").exists());
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        buildpair(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        buildpair(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[server]"));
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[server\n").unwrap();

        buildpair(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
