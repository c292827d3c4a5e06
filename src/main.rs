use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use pindeck::app::Workbench;
use pindeck::logging;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let _logging = logging::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut workbench = Workbench::new();
    let result = run(&mut terminal, &mut workbench);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    workbench.flush_store();

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workbench: &mut Workbench,
) -> io::Result<()> {
    loop {
        if workbench.take_dirty() {
            terminal.draw(|frame| workbench.render(frame))?;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => workbench.handle_key(key),
                Event::Mouse(mouse) => workbench.handle_mouse(mouse),
                Event::Resize(_, _) => workbench.mark_dirty(),
                _ => {}
            }
        }

        workbench.drain_bus();

        if workbench.should_quit() {
            return Ok(());
        }
    }
}
