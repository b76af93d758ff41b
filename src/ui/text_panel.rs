use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::text_buffer::TextBuffer;

/// Render an editable buffer inside a bordered block, scrolled so the cursor
/// stays visible, and place the terminal cursor when focused.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: Line,
    buffer: &TextBuffer,
    focused: bool,
) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_color)
        .title(title);

    let inner = block.inner(area);
    let (row, col) = buffer.cursor();
    let scroll_y = row.saturating_sub((inner.height as usize).saturating_sub(1));
    let scroll_x = col.saturating_sub((inner.width as usize).saturating_sub(1));

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let widget = Paragraph::new(lines)
        .fg(Color::Gray)
        .block(block)
        .scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(widget, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x + (col - scroll_x) as u16;
        let cursor_y = inner.y + (row - scroll_y) as u16;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}
