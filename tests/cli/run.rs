use anyhow::Result;
use serde_json::{Value, json};

use crate::CliTest;

const BASIC_INPUT: &str = r#"{
    "uiStrings": {
        "auth.login.title": "Welcome back",
        "settings.save": "Save changes"
    },
    "sourceLanguage": "en",
    "targetLanguages": ["fr", "de"]
}"#;

/// Stub engine that translates both locales.
const COMPLETE_ENGINE: &str = r#"
cat > temp_i18n/locales/fr.json <<'EOF'
{
  "auth.login.title": "Bon retour",
  "settings.save": "Enregistrer"
}
EOF
cat > temp_i18n/locales/de.json <<'EOF'
{
  "auth.login.title": "Willkommen",
  "settings.save": "Speichern"
}
EOF
"#;

#[test]
fn test_run_localizes_all_targets() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine(COMPLETE_ENGINE)?;

    let output = test.run_command(&engine).output()?;
    assert!(
        output.status.success(),
        "run should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Localized 2 of 2 locales from en"));

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(published["fr"]["auth.login.title"], "Bon retour");
    assert_eq!(published["de"]["settings.save"], "Speichern");

    let first = test.read_json("storage/datasets/default/000000001.json")?;
    assert_eq!(first["language"], "fr");
    assert_eq!(first["key"], "FILE_GENERATED");
    assert_eq!(first["status"], "Success");
    assert_eq!(first["message"], "Successfully generated 2 keys.");

    let second = test.read_json("storage/datasets/default/000000002.json")?;
    assert_eq!(second["language"], "de");

    Ok(())
}

#[test]
fn test_run_partial_failure_still_exits_zero() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    // Only fr is produced; de stays missing.
    let engine = test.write_engine(
        "printf '{\"auth.login.title\": \"Bon retour\"}' > temp_i18n/locales/fr.json\n",
    )?;

    let output = test.run_command(&engine).output()?;

    // The run completed and published, so the platform must not see a
    // failed run even though one locale is missing.
    assert!(
        output.status.success(),
        "partial failure should still exit 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(published["de"], json!({"error": "Translation missing"}));
    assert_eq!(published["fr"]["auth.login.title"], "Bon retour");

    let second = test.read_json("storage/datasets/default/000000002.json")?;
    assert_eq!(second["key"], "FILE_ERROR");
    assert_eq!(second["status"], "Error");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Localized 1 of 2 locales from en (1 failure)"));

    Ok(())
}

#[test]
fn test_run_rejects_empty_strings_before_engine() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {}, "targetLanguages": ["fr"]}"#)?;
    let engine = test.write_engine("touch engine-ran\n")?;

    let output = test.run_command(&engine).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("uiStrings is empty or missing"));
    assert!(
        !test.root().join("engine-ran").exists(),
        "engine must not run for invalid input"
    );

    Ok(())
}

#[test]
fn test_run_rejects_empty_targets_before_engine() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {"a": "b"}, "targetLanguages": []}"#)?;
    let engine = test.write_engine("touch engine-ran\n")?;

    let output = test.run_command(&engine).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("targetLanguages is empty"));
    assert!(!test.root().join("engine-ran").exists());

    Ok(())
}

#[test]
fn test_run_without_input_record() -> Result<()> {
    let test = CliTest::new()?;
    let engine = test.write_engine("true\n")?;

    let output = test.run_command(&engine).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("job input not found"));

    Ok(())
}

#[test]
fn test_run_engine_failure_fails_the_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine("echo 'credit limit reached' >&2\nexit 7\n")?;

    let output = test.run_command(&engine).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exit code 7"));
    assert!(stderr.contains("credit limit reached"));
    assert!(
        !test
            .root()
            .join("storage/key_value_stores/default/OUTPUT.json")
            .exists(),
        "no output may be published for a failed run"
    );

    Ok(())
}

#[test]
fn test_run_stages_expected_artifacts() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(
        r#"{
            "uiStrings": {"profile.greeting": "Hello, {{username}}"},
            "targetLanguages": ["fr"],
            "tone": "friendly",
            "placeholders": ["{{username}}"]
        }"#,
    )?;
    let engine = test.write_engine(
        "printf '{\"profile.greeting\": \"Bonjour, {{username}}\"}' > temp_i18n/locales/fr.json\n",
    )?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let staged = test.read_json("temp_i18n/locales/en.json")?;
    assert_eq!(staged["profile.greeting"], "Hello, {{username}}");

    let context = test.read_file("LINGO_CONTEXT.md")?;
    assert!(context.contains("# Localization Context"));
    assert!(context.contains("- **Tone**: friendly"));
    assert!(context.contains("{{username}}"));

    let config = test.read_json("i18n.json")?;
    assert_eq!(config["$schema"], "https://lingo.dev/schema/i18n.json");
    assert_eq!(config["version"], "1.10");
    assert_eq!(config["locale"]["source"], "en");
    assert_eq!(config["locale"]["targets"], json!(["fr"]));
    assert_eq!(
        config["buckets"]["json"]["include"],
        json!(["temp_i18n/locales/[locale].json"])
    );

    Ok(())
}

#[test]
fn test_run_warns_on_placeholder_credential_and_skips_injection() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(
        r#"{
            "uiStrings": {"a": "Hello"},
            "targetLanguages": ["fr"],
            "lingoApiKey": "YOUR_LINGO_API_KEY"
        }"#,
    )?;
    let engine = test.write_engine(concat!(
        "printf '%s' \"${LINGODOTDEV_API_KEY:-unset}\" > credential-seen.txt\n",
        "printf '{\"a\": \"Bonjour\"}' > temp_i18n/locales/fr.json\n",
    ))?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"));
    assert!(stderr.contains("lingoApiKey is missing or invalid"));

    assert_eq!(test.read_file("credential-seen.txt")?, "unset");

    Ok(())
}

#[test]
fn test_run_injects_provided_credential() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(
        r#"{
            "uiStrings": {"a": "Hello"},
            "targetLanguages": ["fr"],
            "lingoApiKey": "api_key_123"
        }"#,
    )?;
    let engine = test.write_engine(concat!(
        "printf '%s' \"${LINGODOTDEV_API_KEY:-unset}\" > credential-seen.txt\n",
        "printf '{\"a\": \"Bonjour\"}' > temp_i18n/locales/fr.json\n",
    ))?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("lingoApiKey is missing"));

    assert_eq!(test.read_file("credential-seen.txt")?, "api_key_123");

    Ok(())
}

#[test]
fn test_run_rejects_path_traversal_locale() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {"a": "b"}, "targetLanguages": ["../escape"]}"#)?;
    let engine = test.write_engine("touch engine-ran\n")?;

    let output = test.run_command(&engine).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid locale code"));
    assert!(!test.root().join("engine-ran").exists());

    Ok(())
}

#[test]
fn test_run_keeps_target_order_in_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {"a": "x"}, "targetLanguages": ["es", "de", "fr"]}"#)?;
    let engine = test.write_engine(concat!(
        "for locale in es de fr; do\n",
        "  printf '{\"a\": \"x\"}' > \"temp_i18n/locales/$locale.json\"\n",
        "done\n",
    ))?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    let keys: Vec<&String> = published.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["es", "de", "fr"]);

    for (index, locale) in ["es", "de", "fr"].iter().enumerate() {
        let record = test.read_json(&format!("storage/datasets/default/00000000{}.json", index + 1))?;
        assert_eq!(&record["language"], locale);
    }

    Ok(())
}

#[test]
fn test_rerun_overwrites_output_and_appends_records() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine(COMPLETE_ENGINE)?;

    assert!(test.run_command(&engine).output()?.status.success());
    assert!(test.run_command(&engine).output()?.status.success());

    // OUTPUT is a single record keyed by locale, so the second run
    // overwrites it in place.
    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(published.as_object().unwrap().len(), 2);

    // The dataset is append-only: two runs, two locales each.
    for index in 1..=4 {
        assert!(
            test.root()
                .join(format!("storage/datasets/default/00000000{}.json", index))
                .exists()
        );
    }
    assert!(
        !test
            .root()
            .join("storage/datasets/default/000000005.json")
            .exists()
    );

    Ok(())
}

#[test]
fn test_run_reads_explicit_input_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "jobs/custom.json",
        r#"{"uiStrings": {"a": "Hello"}, "targetLanguages": ["fr"]}"#,
    )?;
    let engine = test.write_engine(
        "printf '{\"a\": \"Bonjour\"}' > temp_i18n/locales/fr.json\n",
    )?;

    let output = test
        .run_command(&engine)
        .arg("--input")
        .arg("jobs/custom.json")
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(published["fr"]["a"], "Bonjour");

    Ok(())
}

#[test]
fn test_run_verbose_previews_translations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine(COMPLETE_ENGINE)?;

    let output = test.run_command(&engine).arg("-v").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bon retour"));
    assert!(stdout.contains("Willkommen"));

    Ok(())
}

#[test]
fn test_run_relays_engine_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {"a": "x"}, "targetLanguages": ["fr"]}"#)?;
    let engine = test.write_engine(concat!(
        "echo 'engine says hello'\n",
        "printf '{\"a\": \"x\"}' > temp_i18n/locales/fr.json\n",
    ))?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("engine says hello"));

    Ok(())
}

#[test]
fn test_run_malformed_locale_output_is_isolated() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine(concat!(
        "printf '{\"a\": \"Bon retour\"}' > temp_i18n/locales/fr.json\n",
        "printf '{broken json' > temp_i18n/locales/de.json\n",
    ))?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(published["de"], json!({"error": "Translation missing"}));

    let second = test.read_json("storage/datasets/default/000000002.json")?;
    assert_eq!(second["key"], "FILE_ERROR");
    let message = second["message"].as_str().unwrap();
    assert!(message.contains("could not parse"));

    Ok(())
}

#[test]
fn test_run_ignores_stale_translations_from_previous_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    // A leftover scratch dir from an earlier run holds a stale de.json the
    // engine will not refresh.
    test.write_file("temp_i18n/locales/de.json", r#"{"stale": "value"}"#)?;
    let engine = test.write_engine(
        "printf '{\"a\": \"Bon retour\"}' > temp_i18n/locales/fr.json\n",
    )?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    let published = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(
        published["de"],
        json!({"error": "Translation missing"}),
        "stale translations must not be collected"
    );

    Ok(())
}

#[test]
fn test_run_initializes_git_work_tree() -> Result<()> {
    let git_available = std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false);
    if !git_available {
        return Ok(());
    }

    let test = CliTest::new()?;
    test.write_input(BASIC_INPUT)?;
    let engine = test.write_engine(COMPLETE_ENGINE)?;

    let output = test.run_command(&engine).output()?;
    assert!(output.status.success());

    assert!(test.root().join(".git").exists());

    let log = std::process::Command::new("git")
        .args(["log", "--format=%s <%ae>"])
        .current_dir(test.root())
        .output()?;
    let log = String::from_utf8_lossy(&log.stdout);
    assert!(log.contains("Prepare translation context <actor@apify.com>"));

    Ok(())
}

#[test]
fn test_run_with_explicit_workdir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_input(r#"{"uiStrings": {"a": "x"}, "targetLanguages": ["fr"]}"#)?;
    let engine = test.write_engine(
        "printf '{\"a\": \"x\"}' > temp_i18n/locales/fr.json\n",
    )?;

    let output = test
        .run_command(&engine)
        .arg("--workdir")
        .arg(test.root().join("job-root"))
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Scratch artifacts land under the workdir; storage stays resolved
    // against the process working directory.
    assert!(
        test.root()
            .join("job-root/temp_i18n/locales/en.json")
            .exists()
    );
    assert!(test.root().join("job-root/i18n.json").exists());
    assert!(!test.root().join("i18n.json").exists());

    let value: Value = test.read_json("storage/key_value_stores/default/OUTPUT.json")?;
    assert_eq!(value["fr"]["a"], "x");

    Ok(())
}
