//! C++ compiler resolution and invocation.

use std::path::Path;
use std::process::Command;

use super::AotConfig;
use crate::error::BackendError;

/// A resolved C++20 compiler.
#[derive(Debug)]
pub(super) struct Toolchain {
    tool: cc::Tool,
}

/// Target triple of the running process.
fn host_target() -> String {
    let arch = std::env::consts::ARCH;
    match std::env::consts::OS {
        "macos" => format!("{arch}-apple-darwin"),
        "windows" => format!("{arch}-pc-windows-msvc"),
        _ => format!("{arch}-unknown-linux-gnu"),
    }
}

impl Toolchain {
    /// Resolve the compiler `cc` would use for the host (honouring `CXX`),
    /// or the one named in `config`.
    pub(super) fn resolve(config: &AotConfig) -> Result<Self, BackendError> {
        let target = host_target();
        let mut build = cc::Build::new();
        build
            .cpp(true)
            .std("c++20")
            .opt_level(config.opt_level)
            .debug(false)
            .cargo_metadata(false)
            .warnings(false)
            .host(&target)
            .target(&target);
        if let Some(compiler) = &config.compiler {
            build.compiler(compiler);
        }
        let tool = build
            .try_get_compiler()
            .map_err(|e| BackendError::Toolchain(e.to_string()))?;
        tracing::debug!(compiler = %tool.path().display(), %target, "resolved toolchain");
        Ok(Self { tool })
    }

    /// Compile `source` into the shared library `output`.
    ///
    /// `symbol` names the unit in a [`BackendError::Compilation`].
    pub(super) fn compile_shared(
        &self,
        source: &Path,
        include_dir: &Path,
        output: &Path,
        symbol: &str,
    ) -> Result<(), BackendError> {
        let mut cmd = self.tool.to_command();
        if self.tool.is_like_msvc() {
            cmd.args(["/nologo", "/LD"])
                .arg(format!("/I{}", include_dir.display()))
                .arg(format!("/Fe:{}", output.display()))
                .arg(source);
        } else {
            cmd.args(["-shared", "-fPIC"])
                .arg("-I")
                .arg(include_dir)
                .arg("-o")
                .arg(output)
                .arg(source);
        }
        run_compiler(cmd, symbol)
    }
}

fn run_compiler(mut cmd: Command, symbol: &str) -> Result<(), BackendError> {
    let output = cmd
        .output()
        .map_err(|e| BackendError::Toolchain(e.to_string()))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(BackendError::Compilation {
            symbol: symbol.to_string(),
            diagnostics: String::from_utf8_lossy(&output.stderr).into(),
        })
    }
}
