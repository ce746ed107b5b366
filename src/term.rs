use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};

use crate::board::{Board, Cell};
use crate::game::{Frame, InputEvent, InputSource, Renderer};
use crate::snake::Direction::*;
use crate::Coords;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';

/// Terminal shell: crossterm input on one side, a bordered playfield on the other.
/// One terminal column per grid column; the border occupies row and column 0.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    board: Board,
    last_food: Option<Cell>,
}

impl TermManager<Stdout> {
    pub fn new(board: Board) -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        let (need_w, need_h) = required_size(&board);

        ensure!(
            width as i32 >= need_w && height as i32 >= need_h,
            "terminal is {}x{}, the {}x{} board needs at least {}x{}",
            width, height, board.columns(), board.rows(), need_w, need_h
        );

        Ok(TermManager::with_writer(stdout(), board))
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking).context("Failed to hide cursor")?;
        Ok(())
    }

    /// Undoes `setup`. Safe to call after a partial setup.
    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        Ok(())
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W, board: Board) -> Self {
        TermManager { out, board, last_food: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.out, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn print_cell(&mut self, cell: Cell, ch: char) -> Result<()> {
        let pos = self.screen_pos(cell);
        self.print_at(pos, ch)
    }

    fn screen_pos(&self, cell: Cell) -> Coords {
        let (col, row) = self.board.grid_index(cell);
        ((col + 1) as u16, (row + 1) as u16)
    }

    fn draw_borders(&mut self) -> Result<()> {
        let end_x = (self.board.columns() + 1) as u16;
        let end_y = (self.board.rows() + 1) as u16;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn draw_status(&mut self, length: usize) -> Result<()> {
        let y = (self.board.rows() + 2) as u16;
        queue!(
            self.out,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(format!("Length: {}   Arrows/WASD to move, Esc to quit", length))
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TermManager<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let snake = frame.snake;

        if frame.cleared {
            queue!(self.out, terminal::Clear(ClearType::All))?;
            self.draw_borders()?;
            for &pos in snake.positions().iter().skip(1) {
                self.print_cell(pos, SNAKE_BODY_CHAR)?;
            }
        } else {
            if let Some(tail) = frame.vacated {
                self.print_cell(tail, ' ')?;
            }
            if let Some(&neck) = snake.positions().get(1) {
                self.print_cell(neck, SNAKE_BODY_CHAR)?;
            }
            // Food eaten somewhere along the body leaves its glyph behind
            if let Some(old) = self.last_food {
                if old != frame.food && snake.occupies(old) && old != snake.head() {
                    self.print_cell(old, SNAKE_BODY_CHAR)?;
                }
            }
        }

        self.print_cell(snake.head(), snake.head_char())?;
        self.print_cell(frame.food, FOOD_CHAR)?;
        self.last_food = Some(frame.food);

        self.draw_status(snake.length())?;
        self.out.flush().context("Failed to flush terminal output")?;
        Ok(())
    }
}

/// Keyboard side of the shell. Reads crossterm's global event queue.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("Failed to poll terminal events")? {
            if let Event::Key(ev) = read().context("Failed to read terminal event")? {
                if let Some(input) = translate_key(&ev) {
                    events.push(input);
                }
            }
        }

        Ok(events)
    }
}

/// Terminal columns and rows needed for the board, its border and the status line.
pub fn required_size(board: &Board) -> (i32, i32) {
    (board.columns() + 2, board.rows() + 3)
}

pub fn translate_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let dir = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Up,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Left,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Down,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Right,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(InputEvent::Quit),
        _ => return None,
    };

    Some(InputEvent::KeyPress(dir))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
