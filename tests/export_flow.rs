//! Export runs against a fake fontmake: `sh` plays the interpreter and a
//! shell script plays the zip-app.
#![cfg(unix)]

use fontmake_pyz::command_handlers::export::{run_export, ExportArgs, ExportOutcome};
use fontmake_pyz::{Config, UiSink};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

const FAKE_FONTMAKE: &str = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    --output-dir) out="$2"; shift ;;
    *) last="$1" ;;
  esac
  shift
done
echo "INFO:fontmake.font_project:Building from $last"
echo "INFO:fontmake.font_project:Saving $out/Font-Regular.ttf"
echo "WARNING:fontmake: something odd" >&2
echo "INFO:fontmake.font_project:Saving $out/Font-VF.ttf"
exit ${FAKE_EXIT:-0}
"#;

#[derive(Default)]
struct Recorder {
    lines: RefCell<Vec<String>>,
    notes: RefCell<Vec<String>>,
    revealed: RefCell<Vec<PathBuf>>,
}

impl UiSink for Recorder {
    fn console_write(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
    fn prompt_for_directory(&self, _message: &str) -> Option<PathBuf> {
        panic!("output dir was given on the command line");
    }
    fn reveal(&self, path: &Path) {
        self.revealed.borrow_mut().push(path.to_path_buf());
    }
    fn notify(&self, message: &str) {
        self.notes.borrow_mut().push(message.to_string());
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    source: PathBuf,
    out: PathBuf,
}

fn fixture(script: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fontmake-3.7.0.pyz"), script).unwrap();
    let source = dir.path().join("My Font.glyphs");
    std::fs::write(&source, b"{}").unwrap();
    let out = dir.path().join("build");
    Fixture { dir, source, out }
}

fn export(
    fx: &Fixture,
    cfg: &Config,
    ui: &Recorder,
    strict: bool,
    extra: &[String],
) -> anyhow::Result<ExportOutcome> {
    run_export(ExportArgs {
        source: &fx.source,
        output_dir: Some(&fx.out),
        fontmake_version: Some("v3.7.0"),
        python: Some(Path::new("sh")),
        install_dir: fx.dir.path(),
        strict,
        extra,
        cfg,
        ui,
    })
}

#[test]
fn successful_export_reveals_last_saved_file() {
    let fx = fixture(FAKE_FONTMAKE);
    let cfg = Config::default();
    let ui = Recorder::default();

    let outcome = export(&fx, &cfg, &ui, false, &[]).unwrap();

    let ExportOutcome::Finished { result, primary_output } = outcome else {
        panic!("export was cancelled");
    };
    assert_eq!(result.exit_code, 0);
    let expected = fx.out.join("Font-VF.ttf");
    assert_eq!(primary_output.as_deref(), Some(expected.as_path()));
    assert_eq!(*ui.revealed.borrow(), vec![expected]);
    assert!(fx.out.is_dir());

    let lines = ui.lines.borrow();
    assert!(lines[0].starts_with("$ /"), "{}", lines[0]);
    assert!(lines[0].contains("fontmake-3.7.0.pyz -o variable"), "{}", lines[0]);
    assert!(lines[0].contains("-o variable --output-dir"), "{}", lines[0]);
    assert!(lines[0].ends_with("My Font.glyphs'"), "{}", lines[0]);
    assert_eq!(lines[3], "WARNING:fontmake: something odd");
    assert_eq!(lines.last().map(String::as_str), Some("Done!"));
    assert!(ui.notes.borrow().is_empty());
}

#[test]
fn failed_export_notifies_and_still_reveals() {
    let fx = fixture(&FAKE_FONTMAKE.replace("${FAKE_EXIT:-0}", "1"));
    let cfg = Config::default();
    let ui = Recorder::default();

    let outcome = export(&fx, &cfg, &ui, false, &[]).unwrap();

    assert!(!outcome.succeeded());
    let notes = ui.notes.borrow();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("exit code: 1"));
    assert_eq!(ui.revealed.borrow().len(), 1);
    assert!(!ui.lines.borrow().iter().any(|l| l == "Done!"));
}

#[test]
fn strict_export_fails_hard() {
    let fx = fixture("echo 'fatal' >&2; exit 4\n");
    let cfg = Config::default();
    let ui = Recorder::default();

    let err = export(&fx, &cfg, &ui, true, &[]).unwrap_err();

    assert!(err.to_string().contains("code 4"), "{err}");
    assert_eq!(ui.notes.borrow().len(), 1);
    assert!(ui.revealed.borrow().is_empty());
}

#[test]
fn configured_and_extra_arguments_are_passed_through_in_order() {
    let fx = fixture("echo \"$@\"\n");
    let cfg = Config {
        fontmake_args: vec!["-o".into(), "ttf".into()],
        ..Config::default()
    };
    let ui = Recorder::default();
    let extra = vec!["--filter=FlattenComponentsFilter".to_string()];

    export(&fx, &cfg, &ui, false, &extra).unwrap();

    let lines = ui.lines.borrow();
    let echoed = &lines[1];
    let expected = format!(
        "-o ttf --filter=FlattenComponentsFilter --output-dir {} {}",
        fx.out.display(),
        fx.source.display()
    );
    assert_eq!(echoed, &expected);
    assert!(ui.revealed.borrow().is_empty());
}
