use anyhow::{Context, Result};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::github::RepoSource;
use crate::ui;
use crate::view::{self, ViewLine};

/// Line-oriented stand-in for the username text box.
///
/// Every entered line replaces the input value, an empty line clears it,
/// and the results are re-printed whenever what they show changes.
pub struct InteractiveSession<S> {
    app: App<S>,
    color: bool,
    last_frame: Option<Vec<ViewLine>>,
}

impl<S: RepoSource> InteractiveSession<S> {
    pub const fn new(app: App<S>, color: bool) -> Self {
        Self {
            app,
            color,
            last_frame: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        ui::print_header("🔍 GitHub repository lookup");
        ui::print_info("Type a username and press enter. Empty line clears, ':q' quits.");
        prompt()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut updates = self.app.subscribe();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    if is_quit(&line) {
                        break;
                    }
                    self.app.handle_input(&line);
                    self.redraw()?;
                    prompt()?;
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if self.redraw()? {
                        prompt()?;
                    }
                }
            }
        }

        println!();
        Ok(())
    }

    /// Print the current view if it differs from the last one printed
    fn redraw(&mut self) -> Result<bool> {
        let frame = self.app.view();
        if self.last_frame.as_ref() == Some(&frame) {
            return Ok(false);
        }

        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        write!(stdout, "{}", view::render_text(&frame, self.color))?;
        stdout.flush()?;

        self.last_frame = Some(frame);
        Ok(true)
    }
}

fn prompt() -> Result<()> {
    print!("username> ");
    io::stdout().flush()?;
    Ok(())
}

#[must_use]
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim(), ":q" | ":quit")
}
