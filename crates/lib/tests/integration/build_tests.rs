//! Single-build scenarios.

use listbuild_lib::BuildError;
use listbuild_lib::RecordingHost;
use listbuild_lib::diagnostic::DiagnosticLevel;

use super::common::TestEnv;

#[tokio::test]
async fn single_cpp_source_compiles_and_links() {
  let env = TestEnv::new();
  env.write_file("main.cpp", "int main() { return 0; }\n");
  env.manifest("main.cpp\n");
  let mut host = RecordingHost::new();

  let output = env.build(&mut host).await.unwrap();

  assert_eq!(env.invocations_of("compile").len(), 1);
  assert_eq!(env.invocations_of("link").len(), 1);
  assert_eq!(output.units_compiled, 1);
  assert_eq!(output.units_cached, 0);
  assert!(output.diagnostics.is_empty());
  assert!(host.diagnostics.is_empty());

  assert_eq!(output.script_path, env.build_dir().join("app.js"));
  assert!(output.output_script.contains("// linked\n// main-"));
  assert!(output.output_script.contains("onRuntimeInitialized"));

  assert_eq!(output.emitted_artifacts, vec![env.build_dir().join("app.wasm")]);
  assert_eq!(host.file("app.wasm"), Some(&b"wasm"[..]));
}

#[tokio::test]
async fn scripts_and_objects_are_linked_in_manifest_order() {
  let env = TestEnv::new();
  let pre = env.write_file("pre.js", "// pre\n");
  let post = env.write_file("post.js", "// post\n");
  env.write_file("one.c", "int one(void) { return 1; }\n");
  let two = env.write_file("two.o", "object\n");
  env.manifest("^pre.js\none.c\ntwo.o\n$post.js\n");
  let mut host = RecordingHost::new();

  env.build(&mut host).await.unwrap();

  let links = env.invocations_of("link");
  assert_eq!(links.len(), 1);
  let args: Vec<&str> = links[0].split(' ').skip(1).collect();

  let pre_at = args.iter().position(|a| *a == "--pre-js").unwrap();
  assert_eq!(args[pre_at + 1], pre.to_string_lossy());
  let post_at = args.iter().position(|a| *a == "--post-js").unwrap();
  assert_eq!(args[post_at + 1], post.to_string_lossy());

  let one_at = args.iter().position(|a| a.contains("/build/one-") && a.ends_with(".bc")).unwrap();
  let two_at = args.iter().position(|a| *a == two.to_string_lossy()).unwrap();
  assert!(one_at < two_at, "objects must keep manifest order: {args:?}");
}

#[tokio::test]
async fn every_input_is_registered_as_a_dependency() {
  let env = TestEnv::new();
  let pre = env.write_file("js/pre.js", "// pre\n");
  let source = env.write_file("src/main.c", "int main() { return 0; }\n");
  let header = env.write_file("src/util.h", "#pragma once\n");
  let object = env.write_file("lib/libz.a", "archive\n");
  let manifest = env.manifest("# app\n^js/pre.js\nsrc/main.c\nlib/libz.a\n");
  let mut host = RecordingHost::new();

  env.build(&mut host).await.unwrap();

  for path in [&manifest, &pre, &source, &header, &object] {
    assert!(host.has_dependency(path), "missing dependency {}", path.display());
  }
}

#[tokio::test]
async fn missing_compiler_fails_before_anything_is_emitted() {
  let env = TestEnv::new();
  env.write_file("main.c", "int main() { return 0; }\n");
  env.manifest("main.c\n");
  let mut config = env.config();
  config.cc = "listbuild-definitely-missing-cc".to_string();
  let mut host = RecordingHost::new();

  let result = env.build_with(config, &mut host).await;

  assert!(matches!(
    result,
    Err(BuildError::ToolchainNotFound { ref program }) if program == "listbuild-definitely-missing-cc"
  ));
  assert!(host.files.is_empty());
  assert!(host.diagnostics.is_empty());
  assert!(!env.build_dir().join("app.js").exists());
}

#[tokio::test]
async fn missing_linker_is_fatal() {
  let env = TestEnv::new();
  env.write_file("main.c", "int main() { return 0; }\n");
  env.manifest("main.c\n");
  let mut config = env.config();
  config.ld = "listbuild-definitely-missing-ld".to_string();

  let result = env.build_with(config, &mut RecordingHost::new()).await;

  assert!(matches!(result, Err(BuildError::ToolchainNotFound { ref program }) if program.ends_with("-ld")));
  assert_eq!(env.invocations_of("compile").len(), 1);
}

#[tokio::test]
async fn compile_errors_are_collected_across_units_without_linking() {
  let env = TestEnv::new();
  env.write_file("a.c", "#error\n");
  env.write_file("b.c", "int b(void) { return 0; }\n");
  env.write_file("c.c", "#error\n");
  env.manifest("a.c\nb.c\nc.c\n");
  let mut host = RecordingHost::new();

  let result = env.build(&mut host).await;

  let err = match result {
    Err(err @ BuildError::CompileDiagnostics { .. }) => err,
    other => panic!("expected compile diagnostics, got {other:?}"),
  };
  let errors: Vec<_> = err.diagnostics().iter().filter(|d| d.is_error()).collect();
  assert_eq!(errors.len(), 2);
  assert!(errors[0].file_path.ends_with("/a.c"));
  assert!(errors[1].file_path.ends_with("/c.c"));
  assert_eq!(err.to_string(), "encountered 2 error(s) while compiling");

  assert_eq!(env.invocations_of("compile").len(), 3);
  assert!(env.invocations_of("link").is_empty());
  assert_eq!(host.diagnostics.len(), 2);
  assert!(host.files.is_empty());
}

#[tokio::test]
async fn warnings_are_reported_but_do_not_fail() {
  let env = TestEnv::new();
  env.write_file("w.c", "#warning\n");
  env.manifest("w.c\n");
  let mut host = RecordingHost::new();

  let output = env.build(&mut host).await.unwrap();

  assert_eq!(output.diagnostics.len(), 1);
  assert_eq!(output.diagnostics[0].level, DiagnosticLevel::Warning);
  assert_eq!(host.diagnostics.len(), 1);
  assert_eq!(host.diagnostics[0].0, DiagnosticLevel::Warning);
  assert!(host.diagnostics[0].1.contains("(1,2): warning: hand-written warning\n#warning"));
}

#[tokio::test]
async fn link_errors_fail_without_emitting() {
  let env = TestEnv::new();
  env.write_file("main.c", "int main() { return 0; }\n");
  env.write_file("broken.o", "LINK_ERROR\n");
  env.manifest("main.c\nbroken.o\n");
  let mut host = RecordingHost::new();

  let result = env.build(&mut host).await;

  let err = match result {
    Err(err @ BuildError::LinkDiagnostics { .. }) => err,
    other => panic!("expected link diagnostics, got {other:?}"),
  };
  assert_eq!(err.diagnostics().len(), 1);
  assert_eq!(err.diagnostics()[0].summary, "undefined symbol: missing_fn");
  assert!(host.files.is_empty());
}

#[tokio::test]
async fn toolchain_runs_in_configured_cwd() {
  let env = TestEnv::new();
  env.write_file("src/main.c", "int main() { return 0; }\n");
  env.write_file("js/pre.js", "// pre\n");
  env.manifest("^js/pre.js\nsrc/main.c\n");
  let mut config = env.config();
  config.cwd = Some(env.root().to_path_buf());

  env.build_with(config, &mut RecordingHost::new()).await.unwrap();

  let links = env.invocations_of("link");
  assert!(links[0].starts_with("link --pre-js js/pre.js -s WASM=1 -o build/app.js build/main-"), "{links:?}");
}
