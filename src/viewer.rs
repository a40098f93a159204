//! Open the exported map in the platform's default viewer.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{MapError, MapResult};

/// Launcher programs tried on Unix-like systems, in order.
#[cfg(all(unix, not(target_os = "macos")))]
const LAUNCHERS: &[&str] = &["xdg-open", "gio", "sensible-browser"];

/// Build the launcher command for a file, if one is available.
fn launcher_command(path: &Path) -> MapResult<Command> {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        Ok(cmd)
    }

    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        Ok(cmd)
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let (name, program) = LAUNCHERS
            .iter()
            .find_map(|name| which::which(name).ok().map(|p| (*name, p)))
            .ok_or_else(|| {
                MapError::Viewer(format!("none of {} found in PATH", LAUNCHERS.join(", ")))
            })?;
        let mut cmd = Command::new(program);
        if name == "gio" {
            cmd.arg("open");
        }
        cmd.arg(path);
        Ok(cmd)
    }
}

/// Drop the `\\?\` verbatim prefix that `canonicalize` produces on Windows.
/// `cmd /C start` does not understand verbatim paths.
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path;
    };
    if let Some(rest) = s.strip_prefix(r"\\?\UNC\") {
        PathBuf::from(format!(r"\\{}", rest))
    } else if let Some(rest) = s.strip_prefix(r"\\?\") {
        PathBuf::from(rest)
    } else {
        path
    }
}

/// Open `path` without waiting for the viewer to exit.
pub fn open_in_viewer(path: &Path) -> MapResult<()> {
    let path = path
        .canonicalize()
        .map(strip_verbatim)
        .map_err(|e| MapError::io(path, e))?;

    let mut cmd = launcher_command(&path)?;
    tracing::debug!("Launching viewer: {:?}", cmd);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| MapError::Viewer(e.to_string()))?;

    // Reap the launcher in the background so it does not linger as a zombie.
    std::thread::spawn(move || match child.wait() {
        Ok(status) => tracing::debug!("Viewer launcher exited with {}", status),
        Err(e) => tracing::debug!("Failed to wait for viewer launcher: {}", e),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = open_in_viewer(Path::new("/nonexistent/map.html")).unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn test_strip_verbatim() {
        assert_eq!(
            strip_verbatim(PathBuf::from(r"\\?\C:\Users\me\map.html")),
            PathBuf::from(r"C:\Users\me\map.html")
        );
        assert_eq!(
            strip_verbatim(PathBuf::from(r"\\?\UNC\server\share\map.html")),
            PathBuf::from(r"\\server\share\map.html")
        );
        assert_eq!(
            strip_verbatim(PathBuf::from("/home/me/map.html")),
            PathBuf::from("/home/me/map.html")
        );
    }
}
