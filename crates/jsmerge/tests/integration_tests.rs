#![allow(clippy::disallowed_methods)]

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use jsmerge::config::Config;
use jsmerge::error::BuildErrorKind;
use jsmerge::orchestrator::BuildOrchestrator;

const BANNER: &str = "/**\n * PathFinding.js\n * Released under the MIT license\n */\n";

/// Lay out a miniature PathFinding.js checkout: `src/`, `utils/banner` and an
/// optional fake minifier under `utils/node_modules/.bin/uglifyjs`.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new_in(env!("CARGO_TARGET_TMPDIR")).expect("create project dir");
        let project = Self { dir };
        project.write("src/PathFinding.js", "var PF = {};\n");
        project.write("src/core/Node.js", "PF.Node = function(x, y) {\n    this.x = x;\n};\n");
        project.write("src/core/Grid.js", "PF.Grid = function(w, h) {};\n");
        project.write("utils/banner", BANNER);
        project
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, content).expect("write file");
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("read artifact")
    }

    /// Install a minifier that strips spaces and newlines from its input
    #[cfg(unix)]
    fn install_minifier(&self) {
        self.install_script(
            r#"[ "$1" = "--no-copyright" ] && shift
tr -d ' \n' < "$1""#,
        );
    }

    #[cfg(unix)]
    fn install_script(&self, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let tool = self.path().join("utils/node_modules/.bin/uglifyjs");
        self.write(
            "utils/node_modules/.bin/uglifyjs",
            &format!("#!/bin/sh\n{body}\n"),
        );
        fs::set_permissions(tool, fs::Permissions::from_mode(0o755)).expect("chmod tool");
    }

    fn config(&self, minify: bool, banner: bool) -> Config {
        Config {
            project_dir: self.path().to_path_buf(),
            modules: ["PathFinding.js", "core/Node.js", "core/Grid.js"]
                .iter()
                .map(PathBuf::from)
                .collect(),
            minify,
            banner,
            ..Config::default()
        }
    }

    fn expected_bundle(&self) -> String {
        ["src/PathFinding.js", "src/core/Node.js", "src/core/Grid.js"]
            .iter()
            .map(|module| self.read(module))
            .collect()
    }
}

#[test]
fn test_plain_build_equals_merge() {
    let project = Project::new();

    let report = BuildOrchestrator::new(project.config(false, false))
        .build()
        .expect("build should succeed");

    assert_eq!(report.artifact, project.path().join("build/PathFinding.js"));
    assert_eq!(project.read("build/PathFinding.js"), project.expected_bundle());
}

#[test]
fn test_plain_build_is_idempotent() {
    let project = Project::new();
    let orchestrator = BuildOrchestrator::new(project.config(false, false));

    orchestrator.build().expect("first build");
    let first = fs::read(project.path().join("build/PathFinding.js")).expect("read");
    orchestrator.build().expect("second build");
    let second = fs::read(project.path().join("build/PathFinding.js")).expect("read");

    assert_eq!(first, second);
}

#[test]
fn test_module_order_is_taken_verbatim() {
    let project = Project::new();
    let mut config = project.config(false, false);
    config.modules.reverse();

    BuildOrchestrator::new(config).build().expect("build");

    let expected: String = ["src/core/Grid.js", "src/core/Node.js", "src/PathFinding.js"]
        .iter()
        .map(|module| project.read(module))
        .collect();
    assert_eq!(project.read("build/PathFinding.js"), expected);
}

#[test]
fn test_banner_without_minify() {
    let project = Project::new();

    BuildOrchestrator::new(project.config(false, true))
        .build()
        .expect("build");

    let artifact = project.read("build/PathFinding.js");
    assert_eq!(artifact, format!("{BANNER}{}", project.expected_bundle()));
}

#[test]
fn test_missing_module_fails_before_any_artifact() {
    let project = Project::new();
    let mut config = project.config(false, true);
    config.modules.insert(1, PathBuf::from("modules/Heap.js"));

    let err = BuildOrchestrator::new(config).build().unwrap_err();

    assert_eq!(err.kind(), BuildErrorKind::Read);
    assert!(err.to_string().contains("Heap.js"));
    assert!(!project.path().join("build").exists());
}

#[test]
fn test_missing_module_leaves_previous_artifact_alone() {
    let project = Project::new();
    project.write("build/PathFinding.js", "previous build");
    let mut config = project.config(false, false);
    config.modules.push(PathBuf::from("modules/AStar.js"));

    BuildOrchestrator::new(config).build().unwrap_err();

    assert_eq!(project.read("build/PathFinding.js"), "previous build");
}

#[test]
fn test_atomic_writes_produce_same_artifact() {
    let project = Project::new();
    let mut config = project.config(false, true);
    config.atomic_writes = true;

    BuildOrchestrator::new(config).build().expect("build");

    assert_eq!(
        project.read("build/PathFinding.js"),
        format!("{BANNER}{}", project.expected_bundle())
    );
    let entries = fs::read_dir(project.path().join("build"))
        .expect("read build dir")
        .count();
    assert_eq!(entries, 1);
}

#[cfg(unix)]
mod minify {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minified_artifact_replaces_bundle() {
        let project = Project::new();
        project.install_minifier();

        let report = BuildOrchestrator::new(project.config(true, false))
            .build()
            .expect("build");

        assert_eq!(
            report.artifact,
            project.path().join("build/PathFinding.min.js")
        );
        assert!(report.minified);
        let expected: String = project
            .expected_bundle()
            .chars()
            .filter(|c| *c != ' ' && *c != '\n')
            .collect();
        assert_eq!(project.read("build/PathFinding.min.js"), expected);
        assert!(!project.path().join("build/PathFinding.js").exists());
    }

    #[test]
    fn test_full_pipeline_banners_minified_artifact() {
        let project = Project::new();
        project.install_minifier();

        BuildOrchestrator::new(project.config(true, true))
            .build()
            .expect("build");

        let artifact = project.read("build/PathFinding.min.js");
        assert!(artifact.starts_with(BANNER));
        assert_eq!(
            &artifact[BANNER.len()..],
            "varPF={};PF.Node=function(x,y){this.x=x;};PF.Grid=function(w,h){};"
        );
    }

    #[test]
    fn test_missing_minifier_keeps_unminified_bundle() {
        let project = Project::new();

        let err = BuildOrchestrator::new(project.config(true, true))
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), BuildErrorKind::ToolInvocation);
        assert_eq!(project.read("build/PathFinding.js"), project.expected_bundle());
        assert!(!project.path().join("build/PathFinding.min.js").exists());
    }

    #[test]
    fn test_failing_minifier_keeps_unminified_bundle() {
        let project = Project::new();
        project.install_script("echo 'Unexpected token' >&2\nexit 1");

        let err = BuildOrchestrator::new(project.config(true, false))
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), BuildErrorKind::ToolInvocation);
        assert!(err.to_string().contains("Unexpected token"));
        assert_eq!(project.read("build/PathFinding.js"), project.expected_bundle());
    }

    #[test]
    fn test_copyright_flag_follows_config() {
        let project = Project::new();
        // Echo the arguments instead of minifying
        project.install_script(r#"printf '%s|' "$@""#);

        let mut config = project.config(true, false);
        config.no_copyright = false;
        BuildOrchestrator::new(config).build().expect("build");
        let bundle = project.path().join("build/PathFinding.js");
        assert_eq!(
            project.read("build/PathFinding.min.js"),
            format!("{}|", bundle.display())
        );

        BuildOrchestrator::new(project.config(true, false))
            .build()
            .expect("build");
        assert_eq!(
            project.read("build/PathFinding.min.js"),
            format!("--no-copyright|{}|", bundle.display())
        );
    }
}
