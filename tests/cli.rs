use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const SCENE: &str = r#"<scene>
  <camera>
    <position>0 0 5</position>
    <target>0 0 0</target>
  </camera>
  <object>
    <name>Cube</name>
    <color>0.8 0.2 0.2</color>
  </object>
  <light>
    <kind>directional</kind>
    <eulers>0 180 0</eulers>
    <color>1 1 1</color>
  </light>
  <light>
    <kind>point</kind>
    <position>2 2 2</position>
  </light>
</scene>
"#;

fn write_scene(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp scene");
    tmp.write_all(contents.as_bytes()).expect("write scene");
    tmp
}

#[test]
fn cli_prints_scene_summary_and_frame_params() {
    let scene = write_scene(SCENE);
    let mut cmd = Command::cargo_bin("preview-runtime").expect("binary exists");
    cmd.arg(scene.path()).arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains(
            "Loaded scene with 1 objects (1 directional, 0 spot, 1 point lights)",
        ))
        .stdout(contains(" - Cube (default cube)"))
        .stdout(contains(" - camera position=(0.00, 0.00, 5.00)"))
        .stdout(contains(" - light counts direction=1 spot=0 point=1"));
}

#[test]
fn cli_rejects_malformed_scenes() {
    let scene = write_scene("<scene><object><mesh>cube.obj</mesh></object></scene>");
    let mut cmd = Command::cargo_bin("preview-runtime").expect("binary exists");
    cmd.arg(scene.path()).arg("--summary-only");
    cmd.assert().failure();
}

#[test]
fn cli_rejects_unknown_arguments() {
    let scene = write_scene(SCENE);
    let mut cmd = Command::cargo_bin("preview-runtime").expect("binary exists");
    cmd.arg(scene.path()).arg("--frobnicate");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument"));
}
