use crate::errors::{Error, Result};
use crate::ui::UiSink;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::process::Command;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Keep a copy of everything the child printed.
    pub capture_output: bool,
    /// Turn a non-zero exit into [`Error::Process`].
    pub check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// -1 when the child was terminated by a signal.
    pub exit_code: i32,
    pub captured_output: Option<String>,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `command` with stderr merged into stdout, forwarding each line to
/// `sink` as soon as it is read.
///
/// The combined stream is drained until EOF before the child is reaped, so
/// trailing output is never lost. There is no timeout.
pub fn run(command: &[OsString], opts: RunOptions, sink: &dyn UiSink) -> Result<ProcessResult> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    sink.console_write(&format!("$ {}", command_line(command)));

    let (reader, writer) = io::pipe()?;
    let writer_err = writer.try_clone()?;
    let mut cmd = Command::new(program);
    cmd.args(args).stdout(writer).stderr(writer_err);
    let mut child = cmd.spawn().map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("spawning {}: {e}", program.to_string_lossy()),
        )
    })?;
    // the Command still owns write ends of the pipe
    drop(cmd);

    let mut captured = opts.capture_output.then(String::new);
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let chunk = String::from_utf8_lossy(&buf);
        sink.console_write(chunk.trim_end_matches(['\n', '\r']));
        if let Some(out) = captured.as_mut() {
            out.push_str(&chunk);
        }
    }

    let status = child.wait()?;
    let exit_code = status.code().unwrap_or(-1);
    log::debug!("{} exited with {exit_code}", program.to_string_lossy());
    if opts.check && exit_code != 0 {
        return Err(Error::Process { exit_code });
    }
    Ok(ProcessResult {
        exit_code,
        captured_output: captured,
    })
}

/// Render `command` the way a POSIX shell would need it typed.
pub fn command_line(command: &[OsString]) -> String {
    command
        .iter()
        .map(|arg| shell_quote(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c);
    if !arg.is_empty() && arg.chars().all(safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}
