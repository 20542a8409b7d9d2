//! Incremental rebuild behavior across runs.

use listbuild_lib::RecordingHost;

use super::common::TestEnv;

#[tokio::test]
async fn second_run_without_changes_compiles_nothing() {
  let env = TestEnv::new();
  env.write_file("a.c", "int a(void) { return 1; }\n");
  env.write_file("b.cpp", "int b() { return 2; }\n");
  env.manifest("a.c\nb.cpp\n");

  let first = env.build(&mut RecordingHost::new()).await.unwrap();
  let second = env.build(&mut RecordingHost::new()).await.unwrap();

  assert_eq!(first.units_compiled, 2);
  assert_eq!(second.units_compiled, 0);
  assert_eq!(second.units_cached, 2);
  assert_eq!(env.invocations_of("compile").len(), 2);
  assert_eq!(first.output_script, second.output_script);
}

#[tokio::test]
async fn only_changed_unit_is_rebuilt() {
  let env = TestEnv::new();
  let a = env.write_file("a.c", "int a(void) { return 1; }\n");
  env.write_file("b.c", "int b(void) { return 2; }\n");
  env.manifest("a.c\nb.c\n");

  env.build(&mut RecordingHost::new()).await.unwrap();
  std::fs::write(&a, "int a(void) { return 3; }\n").unwrap();
  let second = env.build(&mut RecordingHost::new()).await.unwrap();

  assert_eq!(second.units_compiled, 1);
  assert_eq!(second.units_cached, 1);
  let compiles = env.invocations_of("compile");
  assert_eq!(compiles.len(), 3);
  assert!(compiles[2].ends_with(&*a.to_string_lossy()));
}

#[tokio::test]
async fn deleted_output_is_rebuilt() {
  let env = TestEnv::new();
  env.write_file("a.c", "int a(void) { return 1; }\n");
  env.manifest("a.c\n");

  env.build(&mut RecordingHost::new()).await.unwrap();
  for entry in std::fs::read_dir(env.build_dir()).unwrap() {
    let path = entry.unwrap().path();
    if path.extension().is_some_and(|e| e == "bc") {
      std::fs::remove_file(path).unwrap();
    }
  }
  let second = env.build(&mut RecordingHost::new()).await.unwrap();

  assert_eq!(second.units_compiled, 1);
}

#[tokio::test]
async fn same_file_name_in_two_directories_gets_two_outputs() {
  let env = TestEnv::new();
  env.write_file("one/util.c", "int one(void) { return 1; }\n");
  env.write_file("two/util.c", "int two(void) { return 2; }\n");
  env.manifest("one/util.c\ntwo/util.c\n");

  let output = env.build(&mut RecordingHost::new()).await.unwrap();

  assert_eq!(output.units_compiled, 2);
  let objects: Vec<_> = std::fs::read_dir(env.build_dir())
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
    .filter(|name| name.starts_with("util-") && name.ends_with(".bc"))
    .collect();
  assert_eq!(objects.len(), 2);
}

#[tokio::test]
async fn failed_unit_is_retried_on_next_run() {
  let env = TestEnv::new();
  let a = env.write_file("a.c", "#error\n");
  env.manifest("a.c\n");

  assert!(env.build(&mut RecordingHost::new()).await.is_err());
  std::fs::write(&a, "int a(void) { return 1; }\n").unwrap();
  let output = env.build(&mut RecordingHost::new()).await.unwrap();

  assert_eq!(output.units_compiled, 1);
}
