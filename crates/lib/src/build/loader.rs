//! Wrapping of the linked module into a loader.
//!
//! The emitted script exports `initialize(userModule)`, which returns a
//! promise resolved with the module once the runtime has initialized.

const LOADER_PREFIX: &str = "
module.exports = (function() {
\treturn {
\t\tinitialize: function (userModule) {
\t\t\tuserModule = userModule || {};
\t\t\treturn new Promise((resolve, reject) => {
\t\t\t\tvar Module = Object.assign({}, userModule);
\t\t\t\tModule['onRuntimeInitialized'] = () => resolve(Module);

";

const LOADER_SUFFIX: &str = "

\t\t\t});
\t\t}
\t};
})();";

pub fn wrap_loader_script(module_source: &str) -> String {
  format!("{LOADER_PREFIX}{module_source}{LOADER_SUFFIX}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn module_source_is_embedded_verbatim() {
    let wrapped = wrap_loader_script("var Module = Module;\nrun();");
    assert!(wrapped.contains("\n\nvar Module = Module;\nrun();\n\n"));
    assert!(wrapped.starts_with("\nmodule.exports = (function() {"));
    assert!(wrapped.ends_with("})();"));
    assert!(wrapped.contains("Module['onRuntimeInitialized'] = () => resolve(Module);"));
  }
}
