//! Crate-wide constants.

/// Length of the hex digest embedded in intermediate object names.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

pub const DEFAULT_CC: &str = "emcc";
pub const DEFAULT_CXX: &str = "em++";
pub const DEFAULT_LD: &str = "emcc";

/// Extension given to compiled units in the build directory.
pub const UNIT_OUTPUT_EXT: &str = "bc";

/// Extensions (lower-case) of inputs that are linked as-is.
pub const OBJECT_EXTENSIONS: &[&str] = &["a", "bc", "o"];

/// Extensions (lower-case) compiled with the C++ compiler.
pub const CXX_EXTENSIONS: &[&str] = &["cc", "cpp", "cxx"];

/// Flags that make the linker produce a WebAssembly module.
pub const MODULE_FLAGS: &[&str] = &["-s", "WASM=1"];

/// Suffixes of optional files the linker may leave next to `<stem>.js`.
pub const SIDE_ARTIFACT_SUFFIXES: &[&str] = &[".asm.js", ".js.mem", ".wast", ".wasm", ".wasm.map"];
