use ratatui::prelude::*;
use ratatui::widgets::Widget;

pub const GLYPH_HEIGHT: u16 = 5;
const CHAR_SPACING: u16 = 1;

/// Block-digit rendering of an `MM:SS` readout.
pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns needed to draw the whole text.
    pub fn width(&self) -> u16 {
        let glyphs: u16 = self.text.chars().map(|ch| glyph(ch)[0].len() as u16).sum();
        let gaps = (self.text.chars().count() as u16).saturating_sub(1) * CHAR_SPACING;
        glyphs + gaps
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut x_offset = 0;

        for ch in self.text.chars() {
            let rows = glyph(ch);
            let width = rows[0].len() as u16;

            if x_offset + width > area.width {
                break;
            }

            for (y, row) in rows.iter().enumerate() {
                if y as u16 >= area.height {
                    break;
                }

                for (x, pixel) in row.chars().enumerate() {
                    if pixel != '#' {
                        continue;
                    }
                    let position = (area.left() + x_offset + x as u16, area.top() + y as u16);
                    if let Some(cell) = buf.cell_mut(position) {
                        cell.set_style(self.style).set_symbol("█");
                    }
                }
            }
            x_offset += width + CHAR_SPACING;
        }
    }
}

fn glyph(ch: char) -> [&'static str; 5] {
    match ch {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", "###", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", "..#", "..#", "..#"],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        ':' => [".", "#", ".", "#", "."],
        _ => ["...", "...", "...", "...", "..."],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(BigText::new("05:00").width(), 3 + 1 + 3 + 1 + 1 + 1 + 3 + 1 + 3);
        assert_eq!(BigText::new("").width(), 0);
    }

    #[test]
    fn test_render_colon() {
        let area = Rect::new(0, 0, 1, 5);
        let mut buf = Buffer::empty(area);
        BigText::new(":").render(area, &mut buf);

        let column: Vec<&str> = (0..5).map(|y| buf[(0, y)].symbol()).collect();
        assert_eq!(column, vec![" ", "█", " ", "█", " "]);
    }

    #[test]
    fn test_render_stops_at_edge() {
        let area = Rect::new(0, 0, 5, 5);
        let mut buf = Buffer::empty(area);
        BigText::new("88").render(area, &mut buf);

        assert_eq!(buf[(2, 0)].symbol(), "█");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }
}
