use crate::application::CellView;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Draws one OTP cell: a bordered box in the resolved border color with the
/// cell text centered inside.
pub struct OtpCellWidget<'a> {
    view: &'a CellView,
}

impl<'a> OtpCellWidget<'a> {
    pub fn new(view: &'a CellView) -> Self {
        Self { view }
    }
}

impl Widget for OtpCellWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if view.focused { BorderType::Thick } else { BorderType::Rounded })
            .border_style(Style::default().fg(view.border_color));

        let mut text_style = view.text_style;
        if view.is_placeholder {
            text_style = text_style.add_modifier(Modifier::DIM);
        }
        if view.selected {
            text_style = text_style.add_modifier(Modifier::REVERSED);
        }

        Paragraph::new(view.text.as_str())
            .style(text_style)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
