use super::view_model::{Screen, truncate_to_width};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};
use unicode_width::UnicodeWidthStr;

/// Draws a `Screen` onto the terminal, repainting only rows that changed.
pub struct View {
    last_rows: Vec<String>,
    last_terminal_size: (u16, u16),
    needs_full_redraw: bool,
}

impl View {
    pub fn new() -> Self {
        Self {
            last_rows: Vec::new(),
            last_terminal_size: (0, 0),
            needs_full_redraw: true,
        }
    }

    fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    fn move_cursor(&self, line: usize, column: usize) -> io::Result<()> {
        execute!(stdout(), cursor::MoveTo(column as u16, line as u16))
    }

    pub fn render(&mut self, screen: &Screen) -> io::Result<()> {
        let (width, height) = size()?;

        // Check if terminal size changed
        let current_size = (width, height);
        if self.last_terminal_size != current_size {
            self.needs_full_redraw = true;
            self.last_terminal_size = current_size;
        }

        if self.needs_full_redraw {
            self.clear_screen()?;
            self.needs_full_redraw = false;
            self.last_rows.clear();
        }

        let rows = compose_rows(screen, width as usize, height as usize);

        for (i, row) in rows.iter().enumerate() {
            if self.last_rows.get(i) != Some(row) {
                self.move_cursor(i, 0)?;
                execute!(stdout(), Clear(ClearType::CurrentLine))?;
                print!("{row}");
            }
        }

        match rows.last() {
            Some(last_row) if screen.prompt.is_some() => {
                self.move_cursor(rows.len() - 1, last_row.width())?;
                execute!(stdout(), cursor::Show)?;
            }
            _ => execute!(stdout(), cursor::Hide)?,
        }

        self.last_rows = rows;
        stdout().flush()?;
        Ok(())
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay a screen out as exactly `height` rows: content at the top, the status
/// line second to last and the prompt (or status when there is no prompt)
/// on the last row. Every row is clipped to `width` columns.
pub fn compose_rows(screen: &Screen, width: usize, height: usize) -> Vec<String> {
    if height == 0 {
        return Vec::new();
    }

    let reserved = if screen.prompt.is_some() { 2 } else { 1 };
    let content_rows = height.saturating_sub(reserved);

    let mut rows: Vec<String> = screen
        .content_lines()
        .iter()
        .take(content_rows)
        .map(|line| truncate_to_width(line, width))
        .collect();
    rows.resize(content_rows, String::new());

    match &screen.prompt {
        Some(prompt) if height >= 2 => {
            rows.push(truncate_to_width(&screen.status, width));
            rows.push(truncate_to_width(prompt, width));
        }
        Some(prompt) => rows.push(truncate_to_width(prompt, width)),
        None => rows.push(truncate_to_width(&screen.status, width)),
    }
    rows
}
