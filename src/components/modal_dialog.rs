//! Generic modal card
//!
//! Renders one open modal with its id and data. Lower modals are drawn
//! dimmed underneath the top one.

use crate::action::Action;
use crate::component::Component;
use crate::components::stacked_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use history_modals::ActiveModal;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const CARD_WIDTH: u16 = 44;
const CARD_HEIGHT: u16 = 10;

#[derive(Default)]
pub struct ModalDialog;

impl Component for ModalDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('x') => Some(Action::CloseTopModal),
            KeyCode::Char('o') => Some(Action::OpenModal),
            KeyCode::Char('d') => Some(Action::OpenDuplicate),
            KeyCode::Backspace | KeyCode::Left => Some(Action::NavigateBack),
            KeyCode::Right => Some(Action::NavigateForward),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the modal itself, see draw_with_modal
        Ok(())
    }
}

impl ModalDialog {
    pub fn draw_with_modal(
        &self,
        frame: &mut Frame,
        area: Rect,
        modal: &ActiveModal,
        depth: usize,
        is_top: bool,
    ) -> Result<()> {
        let popup_area = stacked_popup(area, CARD_WIDTH, CARD_HEIGHT, depth);
        frame.render_widget(Clear, popup_area);

        let accent = if is_top { Color::Magenta } else { Color::DarkGray };
        let text_style = if is_top {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![Line::from(vec![
            Span::styled("depth ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                (depth + 1).to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ])];

        if modal.data.is_empty() {
            lines.push(Line::from(Span::styled("no data", text_style)));
        } else {
            for (key, value) in &modal.data {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", key), Style::default().fg(Color::Cyan)),
                    Span::styled(value.to_string(), text_style),
                ]));
            }
        }

        if is_top {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    " x ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("close  "),
                Span::styled(
                    " Bksp ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("back  "),
                Span::styled(
                    " o ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("nest"),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent))
                    .title(format!(" {} ", modal.id))
                    .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
