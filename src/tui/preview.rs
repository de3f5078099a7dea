//! Gradient preview widget.
//!
//! Paints the gradient with upper-half blocks: each terminal cell carries
//! two vertically stacked pixels (foreground = top, background = bottom),
//! which keeps pixels roughly square on common fonts.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::gradient::render::sample;
use crate::gradient::GradientState;

const UPPER_HALF: &str = "\u{2580}";

/// Preview surface for a gradient.
pub struct GradientPreview<'a> {
    state: &'a GradientState,
}

impl<'a> GradientPreview<'a> {
    pub fn new(state: &'a GradientState) -> Self {
        Self { state }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl Widget for GradientPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as f32;
        let height = area.height as f32 * 2.0;
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as f32 + 0.5;
                let top_y = row as f32 * 2.0 + 0.5;
                let top = sample(self.state, x, top_y, width, height);
                let bottom = sample(self.state, x, top_y + 1.0, width, height);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(rgb(top))
                        .set_bg(rgb(bottom));
                }
            }
        }
    }
}
