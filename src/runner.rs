//! Drives a [`Desktop`] from a stream of text commands.

use std::io::{BufRead, Write};

use indoc::indoc;
use ratatui::layout::Rect;

use crate::command::Command;
use crate::desktop::Desktop;
use crate::error::{DesktopError, Result};
use crate::host::HostMessage;
use crate::preview::{Preview, buffer_lines};
use crate::surface::SurfaceLoads;
use crate::window::{OpenOutcome, WindowPatch};

pub const HELP: &str = indoc! {"
    Commands:
      apps                     list launchable apps
      list                     list open windows, back to front
      open ID                  open an app, or focus it if already open
      close ID                 close a window
      focus ID                 raise a window and restore it
      minimize ID              minimize a window
      restore ID               clear the minimized flag without raising
      move ID X Y              move a window (surface pixels)
      resize ID WIDTH HEIGHT   resize a window (surface pixels)
      taskbar ID               click the taskbar button of a window
      host JSON                deliver a host message, e.g. {\"action\":\"desktop:open\"}
      preview                  draw the desktop
      help                     show this text
      quit                     stop reading commands
"};

/// Whether a bad line stops the run or is reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Abort,
    Report,
}

#[derive(Debug)]
pub struct Session {
    desktop: Desktop,
    loads: SurfaceLoads,
    preview: Preview,
    area: Rect,
    auto_preview: bool,
}

impl Session {
    pub fn new(desktop: Desktop, preview: Preview, area: Rect) -> Self {
        Self {
            desktop,
            loads: SurfaceLoads::new(),
            preview,
            area,
            auto_preview: false,
        }
    }

    /// Redraw after every command that changes windows or visibility.
    pub fn with_auto_preview(mut self, enabled: bool) -> Self {
        self.auto_preview = enabled;
        self
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn loads(&self) -> &SurfaceLoads {
        &self.loads
    }

    /// Run commands until the input ends or `quit` is read.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        policy: ErrorPolicy,
    ) -> Result<()> {
        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let outcome = Command::parse(&line, line_no).and_then(|command| match command {
                Some(Command::Quit) => Ok(false),
                Some(command) => self.execute(&command, line_no, out).map(|()| true),
                None => Ok(true),
            });
            match outcome {
                Ok(true) => {}
                Ok(false) => break,
                Err(err @ DesktopError::Io(_)) => return Err(err),
                Err(err) if policy == ErrorPolicy::Abort => return Err(err),
                Err(err) => {
                    tracing::warn!(line = line_no, error = %err, "command failed");
                    writeln!(out, "error: {err}")?;
                }
            }
        }
        Ok(())
    }

    pub fn execute<W: Write>(
        &mut self,
        command: &Command,
        line_no: usize,
        out: &mut W,
    ) -> Result<()> {
        tracing::debug!(line = line_no, command = %command, "executing");
        let mut redraw = command.mutates_windows();
        match command {
            Command::Apps => {
                for app in self.desktop.list_apps() {
                    let size = match (app.default_width(), app.default_height()) {
                        (Some(w), Some(h)) => format!("{w}x{h}"),
                        _ => "default".to_string(),
                    };
                    writeln!(out, "{}\t{}\t{}", app.id(), app.name(), size)?;
                }
            }
            Command::List => self.write_windows(out)?,
            Command::Open(id) => match self.desktop.launch(id)? {
                OpenOutcome::Opened => writeln!(out, "opened {id}")?,
                OpenOutcome::Focused => writeln!(out, "focused {id}")?,
            },
            Command::Close(id) => {
                let done = self.desktop.windows_mut().close_window(id);
                report(out, done, "closed", id)?;
            }
            Command::Focus(id) => {
                let done = self.desktop.windows_mut().focus_window(id);
                report(out, done, "focused", id)?;
            }
            Command::Minimize(id) => {
                let done = self.desktop.windows_mut().minimize_window(id);
                report(out, done, "minimized", id)?;
            }
            Command::Restore(id) => {
                let patch = WindowPatch::new().minimized(false);
                let done = self.desktop.windows_mut().update_window(id, patch);
                report(out, done, "restored", id)?;
            }
            Command::Move { id, x, y } => {
                let patch = WindowPatch::new().position(*x, *y);
                let done = self.desktop.windows_mut().update_window(id, patch);
                report(out, done, "moved", id)?;
            }
            Command::Resize { id, width, height } => {
                let patch = WindowPatch::new().size(*width, *height);
                let done = self.desktop.windows_mut().update_window(id, patch);
                report(out, done, "resized", id)?;
            }
            Command::Taskbar(id) => {
                let done = self.desktop.toggle_taskbar(id);
                report(out, done, "toggled", id)?;
            }
            Command::Host(json) => {
                let message =
                    HostMessage::from_json(json).map_err(|err| DesktopError::Command {
                        line: line_no,
                        message: err.to_string(),
                    })?;
                self.desktop.handle_host_message(&message);
                if let Some(visible) = self.desktop.take_visibility_change() {
                    writeln!(out, "desktop {}", if visible { "shown" } else { "hidden" })?;
                    redraw = true;
                }
            }
            Command::Preview => {
                self.sync_loads();
                self.write_preview(out)?;
                return Ok(());
            }
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => {}
        }
        self.sync_loads();
        if redraw && self.auto_preview {
            self.write_preview(out)?;
        }
        Ok(())
    }

    fn sync_loads(&mut self) {
        self.loads.sync(self.desktop.windows());
        self.loads.poll();
    }

    fn write_windows<W: Write>(&self, out: &mut W) -> Result<()> {
        let windows = self.desktop.windows();
        if windows.is_empty() {
            writeln!(out, "no windows")?;
            return Ok(());
        }
        for w in windows.draw_order() {
            writeln!(
                out,
                "z={} {} \"{}\" {},{} {}x{}{}",
                w.z_index(),
                w.id(),
                w.title(),
                w.x(),
                w.y(),
                w.width(),
                w.height(),
                if w.minimized() { " minimized" } else { "" }
            )?;
        }
        Ok(())
    }

    fn write_preview<W: Write>(&self, out: &mut W) -> Result<()> {
        let buf = self.preview.render(&self.desktop, Some(&self.loads), self.area);
        for line in buffer_lines(&buf) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn report<W: Write>(out: &mut W, done: bool, verb: &str, id: &str) -> Result<()> {
    if done {
        writeln!(out, "{verb} {id}")?;
    } else {
        writeln!(out, "{id} is not open")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::builtin_registry;
    use crate::config::WmConfig;
    use crate::surface::ContentState;

    fn session() -> Session {
        let desktop = Desktop::new(builtin_registry().unwrap(), WmConfig::default());
        let area = Rect {
            x: 0,
            y: 0,
            width: 60,
            height: 20,
        };
        Session::new(desktop, Preview::default(), area)
    }

    fn run(session: &mut Session, script: &str, policy: ErrorPolicy) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = session.run(script.as_bytes(), &mut out, policy);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scenario_open_reopen_close() {
        let mut s = session();
        let (result, out) = run(
            &mut s,
            "open calculator\nlist\nopen calculator\nlist\nclose calculator\nlist\n",
            ErrorPolicy::Abort,
        );
        result.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "opened calculator",
                "z=2 calculator \"Calculator\" 50,50 300x550",
                "focused calculator",
                "z=3 calculator \"Calculator\" 50,50 300x550",
                "closed calculator",
                "no windows",
            ]
        );
    }

    #[test]
    fn geometry_commands_go_through_update() {
        let mut s = session();
        let (result, _) = run(
            &mut s,
            "open bank\nmove bank 10 20\nresize bank 640 480\nminimize bank\nrestore bank\n",
            ErrorPolicy::Abort,
        );
        result.unwrap();
        let w = s.desktop().windows().get("bank").unwrap();
        assert_eq!((w.x(), w.y(), w.width(), w.height()), (10, 20, 640, 480));
        assert!(!w.minimized());
        assert_eq!(w.z_index(), 2);
    }

    #[test]
    fn absent_windows_are_reported_not_errors() {
        let mut s = session();
        let (result, out) = run(&mut s, "close ghost\nfocus ghost\n", ErrorPolicy::Abort);
        result.unwrap();
        assert_eq!(out, "ghost is not open\nghost is not open\n");
    }

    #[test]
    fn abort_policy_stops_at_first_error() {
        let mut s = session();
        let (result, _) = run(&mut s, "open solitaire\nopen notes\n", ErrorPolicy::Abort);
        assert!(matches!(result, Err(DesktopError::UnknownApp(_))));
        assert!(s.desktop().windows().is_empty());
    }

    #[test]
    fn report_policy_continues_after_errors() {
        let mut s = session();
        let (result, out) = run(
            &mut s,
            "bogus\nhost nope\nopen notes\nquit\nopen files\n",
            ErrorPolicy::Report,
        );
        result.unwrap();
        assert!(out.contains("error: line 1: unknown command `bogus`"));
        assert!(out.contains("error: line 2: malformed host message"));
        assert!(out.contains("opened notes"));
        assert!(!s.desktop().windows().contains("files"));
    }

    #[test]
    fn bad_host_json_reports_its_line() {
        let mut s = session();
        let (result, _) = run(
            &mut s,
            "open notes\n\nhost {\"act\n",
            ErrorPolicy::Abort,
        );
        match result {
            Err(DesktopError::Command { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.starts_with("malformed host message"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn host_messages_show_and_preview_draws() {
        let mut s = session().with_auto_preview(true);
        let (result, out) = run(
            &mut s,
            "open calculator\nhost {\"action\":\"desktop:open\"}\n",
            ErrorPolicy::Abort,
        );
        result.unwrap();
        assert!(out.contains("desktop shown"));
        assert!(out.contains("Calculator"));
        assert_eq!(
            s.loads().state("calculator"),
            Some(&ContentState::Ready(crate::renderable::View::new(
                "apps/Calculator"
            )))
        );
    }
}
