//! Terminal setup for the editor: raw mode, alternate screen and bracketed
//! paste, undone on exit and on panic.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    ExecutableCommand,
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type EditorTerminal = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> io::Result<EditorTerminal> {
    setup_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableBracketedPaste)?;
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(Show)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
