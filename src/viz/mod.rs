//! Terminal surface for the `human2` render mode

use std::io;

use log::error;
use ratatui::prelude::*;
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetState};

use self::{heatmap::Heatmap, tui::Tui};

mod heatmap;
mod tui;

/// An interactive terminal screen owned by one environment
///
/// The alternate screen is entered on [`acquire`](Surface::acquire) and left when the
/// surface is dropped. Log records captured by `tui_logger` are shown beneath the grid.
pub struct Surface {
    terminal: Tui,
    logs: TuiWidgetState,
}

impl Surface {
    pub fn acquire() -> io::Result<Self> {
        Ok(Self {
            terminal: tui::init()?,
            logs: TuiWidgetState::new().set_default_display_level(log::LevelFilter::Trace),
        })
    }

    /// Draw one frame from a grid of intensities in `[0, 1]`
    pub fn draw_heatmap(&mut self, values: &[Vec<f64>]) -> io::Result<()> {
        let logs = &self.logs;
        self.terminal.draw(|frame| {
            let heatmap = Heatmap::new(values);
            let [map_area, log_area] =
                Layout::vertical([Constraint::Length(heatmap.height()), Constraint::Fill(1)])
                    .areas(frame.size());
            frame.render_widget(heatmap, map_area);
            frame.render_widget(
                TuiLoggerSmartWidget::default()
                    .style(Style::default().white())
                    .style_error(Style::default().light_red())
                    .style_warn(Style::default().light_yellow())
                    .style_info(Style::default().cyan())
                    .output_separator(' ')
                    .state(logs),
                log_area,
            );
        })?;
        Ok(())
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if let Err(e) = tui::restore() {
            error!("failed to restore terminal: {e}");
        }
    }
}
