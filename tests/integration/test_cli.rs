//! End-to-end tests for the pentest-eval command line

use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pentest_eval::cli::exit_codes;
use pentest_eval::{Cli, CliApp};

const TARGET_TOML: &str = r#"
name = "thinkphp-5.0.23"

[[vulnerabilities]]
id = "thinkphp_rce"
vuln_type = "remote_code_execution"
location = "/index.php?s=captcha"
difficulty = "critical"

[[vulnerabilities.success_indicators]]
name = "command_execution"
patterns = [
    { match_type = "regex", value = 'uid=\d+\(www-data\)' },
]

[[vulnerabilities]]
id = "suid_find"
vuln_type = "privilege_escalation"
location = "/usr/bin/find"
difficulty = "high"

[[vulnerabilities.success_indicators]]
name = "root_shell"
require_all = true
patterns = [
    { match_type = "literal", value = "euid=0(root)" },
    { match_type = "model_assisted", value = "Root flag was read" },
]

[[attack_steps]]
step_id = "initial_access"
vulnerabilities = ["thinkphp_rce"]

[[attack_steps]]
step_id = "privilege_escalation"
vulnerabilities = ["suid_find"]
"#;

const LOG: &str = "\
$ curl 'http://10.0.0.5:8080/index.php?s=captcha'
uid=33(www-data) gid=33(www-data) groups=33(www-data)
# id
uid=33(www-data) gid=33(www-data) euid=0(root)
# cat /root/flag.txt
flag{thinkphp_pwned}
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.toml"), TARGET_TOML).unwrap();
        std::fs::write(dir.path().join("run.log"), LOG).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Config pointing the Ollama provider at `base_url`, without retries
    fn ollama_config(&self, base_url: &str) -> PathBuf {
        self.write(
            "pentest-eval.toml",
            &format!(
                r#"
[llm]
provider = "ollama"
model = "test-model"
timeout_seconds = 5

[llm.ollama]
base_url = "{base_url}"

[llm.resilience]
enabled = false
"#
            ),
        )
    }
}

async fn run_cli<I, S>(args: I) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = std::iter::once("pentest-eval".to_string())
        .chain(args.into_iter().map(|a| a.as_ref().to_string()))
        .collect();
    let cli = Cli::try_parse_from(argv).unwrap();
    CliApp::from_cli(cli).unwrap().run().await.unwrap()
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[tokio::test]
async fn test_evaluate_without_backend() {
    let fixture = Fixture::new();

    let code = run_cli([
        "--quiet".to_string(),
        "evaluate".to_string(),
        "--target".to_string(),
        display(&fixture.path("target.toml")),
        "--log".to_string(),
        display(&fixture.path("run.log")),
        "--provider".to_string(),
        "none".to_string(),
    ])
    .await;

    assert_eq!(code, exit_codes::SUCCESS);
}

#[tokio::test]
async fn test_evaluate_json_with_ollama_backend() {
    let fixture = Fixture::new();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "test-model",
            "response": "DETECTED: YES\nREASONING: flag{thinkphp_pwned} printed",
            "done": true,
            "done_reason": "stop"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = fixture.ollama_config(&server.uri());
    let code = run_cli([
        "--quiet".to_string(),
        "--format".to_string(),
        "json".to_string(),
        "--config".to_string(),
        display(&config),
        "evaluate".to_string(),
        "--target".to_string(),
        display(&fixture.path("target.toml")),
        "--log".to_string(),
        display(&fixture.path("run.log")),
    ])
    .await;

    assert_eq!(code, exit_codes::SUCCESS);
}

#[tokio::test]
async fn test_evaluate_backend_health_check_fails() {
    let fixture = Fixture::new();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "some-other-model" }]
        })))
        .mount(&server)
        .await;

    let config = fixture.ollama_config(&server.uri());
    let code = run_cli([
        "--quiet".to_string(),
        "--config".to_string(),
        display(&config),
        "evaluate".to_string(),
        "--target".to_string(),
        display(&fixture.path("target.toml")),
        "--log".to_string(),
        display(&fixture.path("run.log")),
        "--check-backend".to_string(),
    ])
    .await;

    assert_eq!(code, exit_codes::BACKEND_UNAVAILABLE);
}

#[rstest]
#[case::missing_target("missing.toml", "run.log", "none", exit_codes::INPUT_ERROR)]
#[case::missing_log("target.toml", "missing.log", "none", exit_codes::INPUT_ERROR)]
#[case::unsupported_extension("target.yaml", "run.log", "none", exit_codes::INPUT_ERROR)]
#[case::unknown_provider("target.toml", "run.log", "gpt", exit_codes::CONFIG_ERROR)]
#[tokio::test]
async fn test_evaluate_error_exit_codes(
    #[case] target: &str,
    #[case] log: &str,
    #[case] provider: &str,
    #[case] expected: i32,
) {
    let fixture = Fixture::new();
    fixture.write("target.yaml", "name: nope");

    let code = run_cli([
        "--quiet".to_string(),
        "evaluate".to_string(),
        "--target".to_string(),
        display(&fixture.path(target)),
        "--log".to_string(),
        display(&fixture.path(log)),
        "--provider".to_string(),
        provider.to_string(),
    ])
    .await;

    assert_eq!(code, expected);
}

#[tokio::test]
async fn test_anthropic_without_key_is_config_error() {
    let fixture = Fixture::new();
    let config = fixture.write(
        "anthropic.toml",
        r#"
[llm]
provider = "anthropic"

[llm.anthropic]
api_key = ""
"#,
    );

    // The environment key takes over from an empty configured one
    if std::env::var_os("ANTHROPIC_API_KEY").is_some() {
        return;
    }

    let code = run_cli([
        "--quiet".to_string(),
        "--config".to_string(),
        display(&config),
        "evaluate".to_string(),
        "--target".to_string(),
        display(&fixture.path("target.toml")),
        "--log".to_string(),
        display(&fixture.path("run.log")),
    ])
    .await;

    assert_eq!(code, exit_codes::CONFIG_ERROR);
}

#[rstest]
#[case::valid(TARGET_TOML, exit_codes::SUCCESS)]
#[case::unknown_step_reference(
    r#"
name = "broken"

[[attack_steps]]
step_id = "initial_access"
vulnerabilities = ["does_not_exist"]
"#,
    exit_codes::INPUT_ERROR
)]
#[case::empty_name("name = \"\"\n", exit_codes::INPUT_ERROR)]
#[case::not_toml("name = [", exit_codes::INPUT_ERROR)]
#[tokio::test]
async fn test_validate_target(#[case] content: &str, #[case] expected: i32) {
    let fixture = Fixture::new();
    let target = fixture.write("candidate.toml", content);

    let code = run_cli([
        "--quiet".to_string(),
        "--format".to_string(),
        "json".to_string(),
        "validate-target".to_string(),
        display(&target),
    ])
    .await;

    assert_eq!(code, expected);
}

#[test]
fn test_command_aliases_parse() {
    let cli = Cli::try_parse_from(["pentest-eval", "v", "target.toml"]).unwrap();
    assert!(matches!(cli.command, pentest_eval::cli::Commands::ValidateTarget(_)));

    let cli = Cli::try_parse_from([
        "pentest-eval",
        "e",
        "--target",
        "t.toml",
        "--log",
        "run.log",
    ])
    .unwrap();
    assert!(matches!(cli.command, pentest_eval::cli::Commands::Evaluate(_)));
}

#[test]
fn test_evaluate_requires_log() {
    assert!(Cli::try_parse_from(["pentest-eval", "evaluate", "--target", "t.toml"]).is_err());
}
