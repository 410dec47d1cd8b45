//! Loader resolution with and without importcfg overrides
//!
//! Builds a scratch GOROOT/GOPATH tree and drives the loader through the same
//! flag surface the CLI uses.

mod fixtures;

use clap::Parser;
use fixtures::{write_importcfg, SourceTree};
use pkgload::{BuildFlags, FlagError, LoadError, Loader, Origin};

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    flags: BuildFlags,
}

fn loader(tree: &SourceTree, extra: &[&str]) -> Loader {
    let mut argv = vec!["pkgload".to_string(), "--goroot".to_string(), tree.path_str("goroot")];
    for entry in tree.gopath() {
        argv.push("--gopath".to_string());
        argv.push(entry.to_str().unwrap().to_string());
    }
    argv.extend(extra.iter().map(|s| s.to_string()));

    // An explicit empty config keeps a stray pkgload.toml in the working
    // directory out of the test.
    argv.push("--config".to_string());
    argv.push(tree.path_str("pkgload.toml"));
    std::fs::write(tree.path("pkgload.toml"), "").unwrap();

    TestCli::try_parse_from(argv).unwrap().flags.loader().unwrap()
}

fn importcfg_flag(tree: &SourceTree) -> String {
    let body = format!(
        r#"{{
  "example.com/app": {{"Dir": "{app}", "Import": {{"example.com/lib": "fork.example.com/lib"}}}},
  "fork.example.com/lib": {{"Dir": "{fork}", "Import": {{}}}},
  "example.com/nodir": {{"Import": {{}}}}
}}"#,
        app = tree.path_str("gopath1/src/example.com/app"),
        fork = tree.path_str("forks/lib"),
    );
    let path = write_importcfg(tree.root.path(), "importcfg", &body);
    format!("--debug-deprecated-importcfg={}", path.display())
}

// =============================================================================
// Default resolution
// =============================================================================

#[test]
fn test_standard_library_from_goroot() {
    let tree = SourceTree::new();
    let pkg = loader(&tree, &[]).resolve(None, "fmt").unwrap();
    assert_eq!(pkg.import_path, "fmt");
    assert_eq!(pkg.dir, tree.path("goroot/src/fmt"));
    assert_eq!(pkg.origin, Origin::Goroot);
}

#[test]
fn test_gopath_first_match_wins() {
    let tree = SourceTree::new();
    let loader = loader(&tree, &[]);

    let lib = loader.resolve(None, "example.com/lib").unwrap();
    assert_eq!(lib.dir, tree.path("gopath1/src/example.com/lib"));
    assert_eq!(lib.origin, Origin::Gopath);

    let extra = loader.resolve(None, "example.com/extra").unwrap();
    assert_eq!(extra.dir, tree.path("gopath2/src/example.com/extra"));
}

#[test]
fn test_missing_package() {
    let tree = SourceTree::new();
    let err = loader(&tree, &[]).resolve(None, "example.com/none").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));

    let err = loader(&tree, &[]).resolve(None, "nosuchstd").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn test_root_override() {
    let tree = SourceTree::new();
    let flag = importcfg_flag(&tree);
    let loader = loader(&tree, &[&flag]);

    let pkg = loader.resolve(None, "fork.example.com/lib").unwrap();
    assert_eq!(pkg.import_path, "fork.example.com/lib");
    assert_eq!(pkg.dir, tree.path("forks/lib"));
    assert_eq!(pkg.origin, Origin::Importcfg);
}

#[test]
fn test_import_redirected_through_parent() {
    let tree = SourceTree::new();
    let flag = importcfg_flag(&tree);
    let loader = loader(&tree, &[&flag]);

    let app = loader.resolve(None, "example.com/app").unwrap();
    assert_eq!(app.origin, Origin::Importcfg);

    let lib = loader.resolve(Some(&app), "example.com/lib").unwrap();
    assert_eq!(lib.import_path, "fork.example.com/lib");
    assert_eq!(lib.dir, tree.path("forks/lib"));
    assert_eq!(lib.origin, Origin::Importcfg);
}

#[test]
fn test_unmapped_import_falls_back() {
    let tree = SourceTree::new();
    let flag = importcfg_flag(&tree);
    let loader = loader(&tree, &[&flag]);

    let app = loader.resolve(None, "example.com/app").unwrap();
    let fmt = loader.resolve(Some(&app), "fmt").unwrap();
    assert_eq!(fmt.origin, Origin::Goroot);

    // Without the parent the same path is not redirected
    let lib = loader.resolve(None, "example.com/lib").unwrap();
    assert_eq!(lib.origin, Origin::Gopath);
}

#[test]
fn test_entry_without_dir_falls_back() {
    let tree = SourceTree::new();
    let flag = importcfg_flag(&tree);
    let loader = loader(&tree, &[&flag]);

    let err = loader.resolve(None, "example.com/nodir").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn test_disabling_flag_restores_default_resolution() {
    let tree = SourceTree::new();
    let flag = importcfg_flag(&tree);
    let loader = loader(&tree, &[&flag, "--debug-deprecated-importcfg="]);

    assert!(!loader.importcfg().is_enabled());
    let app = loader.resolve(None, "example.com/app").unwrap();
    assert_eq!(app.origin, Origin::Gopath);
    let lib = loader.resolve(Some(&app), "example.com/lib").unwrap();
    assert_eq!(lib.import_path, "example.com/lib");
    assert_eq!(lib.origin, Origin::Gopath);
}

#[test]
fn test_bad_importcfg_aborts_flag_processing() {
    let tree = SourceTree::new();
    let bad = tree.path("bad.importcfg");
    std::fs::write(&bad, "{}").unwrap();

    let argv = vec![
        "pkgload".to_string(),
        format!("--debug-deprecated-importcfg={}", bad.display()),
    ];
    let err = TestCli::try_parse_from(argv).unwrap().flags.loader().unwrap_err();
    assert!(matches!(err, FlagError::Importcfg { .. }));
    assert!(err.to_string().contains("malformed syntax"));
}

// =============================================================================
// Config module
// =============================================================================

#[test]
fn test_loader_from_config_module() {
    let tree = SourceTree::new();
    let toml = format!(
        "goroot = \"{}\"\ngopath = [\"{}\"]\n",
        tree.path_str("goroot"),
        tree.path_str("gopath2"),
    );
    let config = pkgload::config::LoaderConfig::from_str(&toml).unwrap();
    let loader = Loader::new(config, pkgload::DebugImportcfg::default());

    assert_eq!(loader.resolve(None, "fmt").unwrap().origin, Origin::Goroot);
    let lib = loader.resolve(None, "example.com/lib").unwrap();
    assert_eq!(lib.dir, tree.path("gopath2/src/example.com/lib"));
    assert_eq!(pkgload::config::DEFAULT_CONFIG_PATH, "pkgload.toml");
}
