//! Integration tests for install, build, and the dev server

mod common;

use common::{exit, FakeRunner, TestWorkspace};
use simforge_core::Error as CoreError;
use simforge_projects::{
    build_project, install_core_dependencies, install_packages, run_dev_server, Error, OutputLine,
};

fn fails_when(pattern: &'static str) -> FakeRunner {
    FakeRunner::with_handler(move |spec| {
        let line = format!(
            "{} @ {}",
            spec,
            spec.cwd.as_ref().map(|c| c.as_str()).unwrap_or("")
        );
        Ok(exit(if line.contains(pattern) { 1 } else { 0 }))
    })
}

#[tokio::test]
async fn test_install_runs_in_directory() {
    let t = TestWorkspace::new(FakeRunner::new());
    t.npm_project("chipper");

    install_packages(&t.ws, "chipper").await.unwrap();

    let calls = t.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to_string(), "npm install");
    assert_eq!(calls[0].cwd.as_deref(), Some(t.root.join("chipper").as_path()));
}

#[tokio::test]
async fn test_install_requires_package_manifest() {
    let t = TestWorkspace::new(FakeRunner::new());
    t.write("chipper/README.md", "x");

    let err = install_packages(&t.ws, "chipper").await.unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::ManifestNotFound { .. })));

    let err = install_packages(&t.ws, "absent").await.unwrap_err();
    assert!(matches!(err, Error::DirectoryNotFound { .. }));

    assert!(t.runner.calls().is_empty());
}

#[tokio::test]
async fn test_install_nonzero_exit_fails() {
    let t = TestWorkspace::new(FakeRunner::with_handler(|_| Ok(exit(1))));
    t.npm_project("chipper");

    let err = install_packages(&t.ws, "chipper").await.unwrap_err();
    assert!(matches!(err, Error::InstallFailed { code: Some(1), .. }));
    assert_eq!(
        t.observer.events(),
        vec!["install-start chipper", "install-failed chipper"]
    );
}

#[tokio::test]
async fn test_build_synthesizes_script_and_preserves_fields() {
    let t = TestWorkspace::new(FakeRunner::new());
    t.write(
        "area-model/package.json",
        r#"{"name": "area-model", "version": "1.2.0", "devDependencies": {"grunt": "1.5.3"}}"#,
    );

    let report = build_project(&t.ws, "area-model").await.unwrap();

    assert!(report.script_synthesized);
    assert_eq!(report.output_dir, t.root.join("area-model").join("build"));

    let manifest: serde_json::Value =
        serde_json::from_str(&t.read("area-model/package.json")).unwrap();
    assert_eq!(manifest["scripts"]["build"], "grunt build");
    assert_eq!(manifest["name"], "area-model");
    assert_eq!(manifest["version"], "1.2.0");
    assert_eq!(manifest["devDependencies"]["grunt"], "1.5.3");

    assert_eq!(
        t.runner.command_lines(),
        vec!["npm install", "npm run build"]
    );
}

#[tokio::test]
async fn test_build_keeps_existing_script() {
    let t = TestWorkspace::new(FakeRunner::new());
    let before = r#"{"name": "joist", "scripts": {"build": "vite build"}}"#;
    t.write("joist/package.json", before);

    let report = build_project(&t.ws, "joist").await.unwrap();

    assert!(!report.script_synthesized);
    assert_eq!(t.read("joist/package.json"), before);
}

#[tokio::test]
async fn test_build_skipped_when_install_fails() {
    let t = TestWorkspace::new(fails_when("npm install"));
    t.npm_project("joist");

    let err = build_project(&t.ws, "joist").await.unwrap_err();

    assert!(matches!(err, Error::InstallFailed { .. }));
    assert_eq!(t.runner.command_lines(), vec!["npm install"]);
    assert!(!t
        .observer
        .events()
        .iter()
        .any(|e| e.starts_with("build-start")));
}

#[tokio::test]
async fn test_build_failure_streams_output() {
    let runner = fails_when("npm run build").streaming(vec![
        OutputLine::Stdout("Running \"lint\" task".to_string()),
        OutputLine::Stderr("Warning: lint failed".to_string()),
    ]);
    let t = TestWorkspace::new(runner);
    t.npm_project("joist");

    let err = build_project(&t.ws, "joist").await.unwrap_err();

    assert!(matches!(err, Error::BuildFailed { code: Some(1), .. }));
    let events = t.observer.events();
    assert!(events.contains(&"build-start joist".to_string()));
    assert!(events.contains(&"output Warning: lint failed".to_string()));
}

#[tokio::test]
async fn test_build_rejects_bad_manifest() {
    let t = TestWorkspace::new(FakeRunner::new());
    t.write("joist/package.json", "not json");
    t.write("empty/package.json", "{}");
    t.write("none/dependencies.json", "{}");

    assert!(matches!(
        build_project(&t.ws, "joist").await.unwrap_err(),
        Error::Core(CoreError::ManifestParse { .. })
    ));
    assert!(matches!(
        build_project(&t.ws, "empty").await.unwrap_err(),
        Error::Core(CoreError::ManifestEmpty { .. })
    ));
    assert!(matches!(
        build_project(&t.ws, "none").await.unwrap_err(),
        Error::Core(CoreError::ManifestNotFound { .. })
    ));
    assert!(t.runner.calls().is_empty());
}

#[tokio::test]
async fn test_dev_server_installs_core_then_watches() {
    let runner = FakeRunner::new().streaming(vec![OutputLine::Stdout("watching".to_string())]);
    let t = TestWorkspace::new(runner);
    t.npm_project("perennial-alias");
    t.npm_project("chipper");

    let outcome = run_dev_server(&t.ws).await.unwrap();

    assert!(outcome.success());
    let calls = t.runner.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].cwd.as_deref(), Some(t.root.join("perennial-alias").as_path()));
    assert_eq!(calls[1].cwd.as_deref(), Some(t.root.join("chipper").as_path()));
    assert_eq!(calls[2].to_string(), "node js/scripts/transpile.js --watch");
    assert_eq!(calls[2].cwd.as_deref(), Some(t.root.join("chipper").as_path()));
    assert!(calls[2].timeout.is_none());
    assert!(t.observer.events().contains(&"output watching".to_string()));
}

#[tokio::test]
async fn test_dev_server_not_started_when_core_install_fails() {
    let t = TestWorkspace::new(fails_when("perennial-alias"));
    t.npm_project("perennial-alias");
    t.npm_project("chipper");

    let err = run_dev_server(&t.ws).await.unwrap_err();

    match err {
        Error::CoreDependencyFailed { name, .. } => assert_eq!(name, "perennial-alias"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(t.runner.calls().len(), 1);
}

#[tokio::test]
async fn test_core_dependencies_require_checkouts() {
    let t = TestWorkspace::new(FakeRunner::new());
    t.npm_project("perennial-alias");

    let err = install_core_dependencies(&t.ws).await.unwrap_err();

    match err {
        Error::CoreDependencyFailed { name, source } => {
            assert_eq!(name, "chipper");
            assert!(matches!(*source, Error::DirectoryNotFound { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(t.runner.calls().len(), 1);
}
