use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use forgelink_core::{CommandResult, Error, Result};

/// Human-readable command line carried in errors and logs.
fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Run one external command to completion in `cwd`, capturing both output
/// streams.
///
/// No shell is involved (`Command::new` + args, no interpolation). stdout and
/// stderr are drained by independent tasks, each appending chunks in arrival
/// order, and the result is only assembled after both pipes reach EOF and the
/// process reports termination. A non-zero exit code is delivered in the
/// result, not as an error; only a spawn-level failure rejects.
pub async fn exec(program: &str, args: &[&str], cwd: impl AsRef<Path>) -> Result<CommandResult> {
    let command = render_command(program, args);

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd.as_ref())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::ProcessSpawn {
            command: command.clone(),
            source,
        })?;

    debug!(command = %command, cwd = ?cwd.as_ref(), "spawned process");

    let mut stdout_pipe = child.stdout.take().expect("stdout was piped");
    let mut stderr_pipe = child.stderr.take().expect("stderr was piped");

    // Separate reader tasks so neither pipe can fill up and block the child
    // while the other side waits.
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Err(e) = stdout_pipe.read_to_end(&mut buf).await {
            tracing::warn!("stdout pipe read error: {e}");
        }
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Err(e) = stderr_pipe.read_to_end(&mut buf).await {
            tracing::warn!("stderr pipe read error: {e}");
        }
        buf
    });

    // Both pipes must hit EOF before the exit status is read; the exit event
    // can fire while late output is still in flight.
    let stdout_buf = stdout_task.await.unwrap_or_default();
    let stderr_buf = stderr_task.await.unwrap_or_default();

    let status = child.wait().await.map_err(|source| Error::ProcessSpawn {
        command: command.clone(),
        source,
    })?;

    let result = CommandResult {
        exit_code: status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
    };

    debug!(command = %command, code = result.exit_code, "process finished");
    Ok(result)
}

/// Run a command and return its stdout, failing on non-zero exit.
pub async fn output(program: &str, args: &[&str], cwd: impl AsRef<Path>) -> Result<String> {
    let result = exec(program, args, cwd).await?;

    if !result.success() {
        tracing::warn!(
            command = %render_command(program, args),
            code = result.exit_code,
            "command failed"
        );
        return Err(Error::CommandFailed {
            command: render_command(program, args),
            stderr: result.stderr,
        });
    }

    // Log stderr at debug level even on success (progress info, etc.)
    if !result.stderr.is_empty() {
        debug!(stderr = %result.stderr, "command stderr output");
    }

    Ok(result.stdout)
}

/// As [`output`], split on line breaks.
pub async fn lines(program: &str, args: &[&str], cwd: impl AsRef<Path>) -> Result<Vec<String>> {
    let out = output(program, args, cwd).await?;
    Ok(out.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> std::path::PathBuf {
        std::env::temp_dir()
    }

    #[tokio::test]
    async fn test_exec_clean_exit_no_output() {
        let result = exec("sh", &["-c", "exit 0"], cwd()).await.unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "");
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_exec_delivers_nonzero_exit() {
        let result = exec("sh", &["-c", "printf out; printf err >&2; exit 3"], cwd())
            .await
            .unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_exec_preserves_stream_order() {
        let result = exec("sh", &["-c", "echo a; echo b >&2; echo c; echo d >&2"], cwd())
            .await
            .unwrap();
        assert_eq!(result.stdout, "a\nc\n");
        assert_eq!(result.stderr, "b\nd\n");
    }

    #[tokio::test]
    async fn test_exec_spawn_failure() {
        let err = exec("definitely-not-a-real-binary", &[], cwd())
            .await
            .unwrap_err();
        match err {
            Error::ProcessSpawn { command, .. } => {
                assert_eq!(command, "definitely-not-a-real-binary");
            }
            other => panic!("expected ProcessSpawn, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_output_success() {
        let out = output("sh", &["-c", "printf hello"], cwd()).await.unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_output_failure_carries_stderr() {
        let err = output("sh", &["-c", "printf boom >&2; exit 2"], cwd())
            .await
            .unwrap_err();
        match err {
            Error::CommandFailed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        // The rendered message carries the stderr for diagnostics
        let err = output("sh", &["-c", "printf boom >&2; exit 2"], cwd())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_lines_splits_output() {
        let lines = lines("sh", &["-c", "printf 'one\\ntwo\\nthree\\n'"], cwd())
            .await
            .unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_lines_empty_output() {
        let lines = lines("sh", &["-c", "exit 0"], cwd()).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_execs_are_independent() {
        let (a, b) = tokio::join!(
            exec("sh", &["-c", "printf A"], cwd()),
            exec("sh", &["-c", "printf B; exit 1"], cwd()),
        );
        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a.stdout, "A");
        assert_eq!(a.exit_code, 0);
        assert_eq!(b.stdout, "B");
        assert_eq!(b.exit_code, 1);
    }
}
