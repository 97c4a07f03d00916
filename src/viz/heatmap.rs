use ratatui::{prelude::*, widgets::*};

/// Viridis anchors at 0.0, 0.5 and 1.0
const STOPS: [(f64, [u8; 3]); 3] = [
    (0.0, [68, 1, 84]),
    (0.5, [33, 145, 140]),
    (1.0, [253, 231, 37]),
];

/// Map a value in `[0, 1]` onto the viridis ramp
pub(super) fn viridis(value: f64) -> Color {
    let v = value.clamp(0.0, 1.0);
    let (lo, hi) = if v <= STOPS[1].0 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let t = (v - lo.0) / (hi.0 - lo.0);
    let channel = |i: usize| (lo.1[i] as f64 + t * (hi.1[i] as f64 - lo.1[i] as f64)).round() as u8;
    Color::Rgb(channel(0), channel(1), channel(2))
}

/// A grid of intensities drawn as colored blocks, two columns per cell so
/// cells come out roughly square
pub struct Heatmap<'a> {
    values: &'a [Vec<f64>],
}

impl<'a> Heatmap<'a> {
    pub fn new(values: &'a [Vec<f64>]) -> Self {
        Self { values }
    }

    /// Rows needed to show the whole grid, border included
    pub fn height(&self) -> u16 {
        u16::try_from(self.values.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Grid World");
        let inner = block.inner(area);
        block.render(area, buf);

        for (r, row) in self.values.iter().enumerate() {
            let y = match u16::try_from(r).map(|r| inner.y.saturating_add(r)) {
                Ok(y) if y < inner.bottom() => y,
                _ => break,
            };
            for (c, &value) in row.iter().enumerate() {
                let x = match u16::try_from(2 * c).map(|c| inner.x.saturating_add(c)) {
                    Ok(x) if x.saturating_add(1) < inner.right() => x,
                    _ => break,
                };
                let color = viridis(value);
                buf.get_mut(x, y).set_symbol(" ").set_bg(color);
                buf.get_mut(x + 1, y).set_symbol(" ").set_bg(color);
            }
        }
    }
}
