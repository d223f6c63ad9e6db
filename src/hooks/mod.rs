//! Collaborators the materializer calls out to: external programs, git and the
//! overwrite prompt. Tests swap these for in-memory fakes.

use std::path::Path;
use std::process::Command;

use crate::error::{CodeforgeError, Result};

pub const PATH_PLACEHOLDER: &str = "%PATH%";
pub const NAME_PLACEHOLDER: &str = "%NAME%";

/// Split a command template into words, then replace `%NAME%` and `%PATH%`
/// inside each word.
///
/// Splitting happens before substitution, so a project name or path can never
/// introduce extra arguments or shell syntax. The words are run as is, without
/// a shell.
pub fn command_line(template: &str, project_name: &str, path: &Path) -> Result<Vec<String>> {
    let words = shell_words::split(template).map_err(|e| CodeforgeError::CommandFailed {
        command: template.to_string(),
        message: format!("cannot parse command: {e}"),
    })?;
    if words.is_empty() {
        return Err(CodeforgeError::CommandFailed {
            command: template.to_string(),
            message: "command is empty".into(),
        });
    }

    let path = path.display().to_string();
    Ok(words
        .iter()
        .map(|word| fill_placeholders(word, project_name, &path))
        .collect())
}

/// Single pass, so a name containing `%PATH%` is not expanded a second time.
fn fill_placeholders(word: &str, project_name: &str, path: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut rest = word;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        if let Some(after) = tail.strip_prefix(NAME_PLACEHOLDER) {
            out.push_str(project_name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(PATH_PLACEHOLDER) {
            out.push_str(path);
            rest = after;
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Render an argument vector for logs and error messages.
pub fn display_command(argv: &[String]) -> String {
    shell_words::join(argv)
}

pub trait ExternalCommands {
    /// Run a language's project generator inside the freshly created project directory.
    fn run_generator(&self, argv: &[String], project_path: &Path) -> Result<()>;

    fn init_repository(&self, project_path: &Path) -> Result<()>;

    fn open_editor(&self, argv: &[String]) -> Result<()>;
}

/// Asks whether an existing project directory may be replaced.
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path) -> Result<bool>,
{
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        self(path)
    }
}

/// Runs collaborators as real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommands;

impl ExternalCommands for SystemCommands {
    fn run_generator(&self, argv: &[String], project_path: &Path) -> Result<()> {
        run_program(argv, project_path)
    }

    fn init_repository(&self, project_path: &Path) -> Result<()> {
        let output = Command::new("git")
            .arg("init")
            .current_dir(project_path)
            .output()
            .map_err(|e| CodeforgeError::CommandFailed {
                command: "git init".into(),
                message: format!("failed to execute: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodeforgeError::CommandFailed {
                command: "git init".into(),
                message: stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    fn open_editor(&self, argv: &[String]) -> Result<()> {
        let cwd = std::env::current_dir().map_err(|e| CodeforgeError::Io {
            context: "getting current directory".into(),
            source: e,
        })?;
        run_program(argv, &cwd)
    }
}

fn run_program(argv: &[String], cwd: &Path) -> Result<()> {
    let command = display_command(argv);
    let Some((program, args)) = argv.split_first() else {
        return Err(CodeforgeError::CommandFailed {
            command,
            message: "command is empty".into(),
        });
    };
    tracing::debug!(%command, cwd = %cwd.display(), "running command");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| CodeforgeError::CommandFailed {
            command: command.clone(),
            message: format!("failed to execute: {e}"),
        })?;

    if !status.success() {
        return Err(CodeforgeError::CommandFailed {
            command,
            message: format!("exited with status {status}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn path_with_spaces_stays_one_argument() {
        let words = command_line("code %PATH%", "demo", Path::new("/tmp/my project")).unwrap();
        assert_eq!(words, argv(&["code", "/tmp/my project"]));
    }

    #[test]
    fn quoted_placeholders_are_unwrapped() {
        let words = command_line(
            r#"dotnet new console -n "%NAME%" -o %PATH%"#,
            "demo",
            Path::new("/tmp/demo"),
        )
        .unwrap();
        assert_eq!(
            words,
            argv(&["dotnet", "new", "console", "-n", "demo", "-o", "/tmp/demo"])
        );
    }

    #[rstest]
    #[case("x$(touch INJECTED)")]
    #[case("x; touch INJECTED")]
    #[case("x`touch INJECTED`")]
    #[case("a\" && touch INJECTED && \"b")]
    fn shell_syntax_in_name_is_literal(#[case] name: &str) {
        let words = command_line(r#"tool -n "%NAME%" -o %PATH%"#, name, Path::new("/tmp/p")).unwrap();
        assert_eq!(words, argv(&["tool", "-n", name, "-o", "/tmp/p"]));
    }

    #[test]
    fn placeholders_are_expanded_once() {
        let words = command_line("tool %NAME%", "%PATH%", Path::new("/tmp/p")).unwrap();
        assert_eq!(words, argv(&["tool", "%PATH%"]));
    }

    #[test]
    fn lone_percent_is_kept() {
        let words = command_line("tool 100% %NAME%", "demo", Path::new("/tmp")).unwrap();
        assert_eq!(words, argv(&["tool", "100%", "demo"]));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("tool \"unterminated")]
    fn unusable_templates_fail(#[case] template: &str) {
        let err = command_line(template, "demo", Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, CodeforgeError::CommandFailed { .. }));
    }

    #[test]
    fn closures_confirm_overwrite() {
        let mut asked = Vec::new();
        let mut confirm = |path: &Path| -> Result<bool> {
            asked.push(path.to_path_buf());
            Ok(false)
        };
        assert!(!confirm.confirm_overwrite(Path::new("/tmp/x")).unwrap());
        assert_eq!(asked, [Path::new("/tmp/x")]);
    }

    #[cfg(unix)]
    #[test]
    fn run_program_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_program(&argv(&["false"]), dir.path()).unwrap_err();
        assert!(matches!(err, CodeforgeError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn run_program_runs_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        run_program(&argv(&["touch", "marker"]), dir.path()).unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn substituted_name_never_reaches_a_shell() {
        let dir = tempfile::tempdir().unwrap();
        let words = command_line("touch %NAME%", "x$(touch INJECTED)", dir.path()).unwrap();
        run_program(&words, dir.path()).unwrap();

        assert!(dir.path().join("x$(touch INJECTED)").exists());
        assert!(!dir.path().join("INJECTED").exists());
    }

    #[test]
    fn missing_program_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_program(&argv(&["codeforge-no-such-program"]), dir.path()).unwrap_err();
        assert!(
            matches!(err, CodeforgeError::CommandFailed { message, .. } if message.starts_with("failed to execute"))
        );
    }
}
