//! Home screen component
//!
//! Shows the modal stack, the session history with its cursor, and the log
//! of stack notifications. Reads the stack through a `ModalContext`.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use history_modals::{ModalContext, SessionHistory};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Maximum number of retained log lines
const MAX_LOG_LINES: usize = 200;

/// Stack notifications received so far, oldest first
#[derive(Debug, Default)]
pub struct NotificationLog {
    lines: VecDeque<String>,
}

impl NotificationLog {
    pub fn push(&mut self, line: String) {
        if self.lines.len() >= MAX_LOG_LINES {
            // Drop oldest line
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }
}

pub struct HomeComponent {
    context: ModalContext,
    session: Option<Rc<SessionHistory>>,
    log: Rc<RefCell<NotificationLog>>,
    /// Lines scrolled up from the newest log entry
    pub log_scroll: usize,
}

impl HomeComponent {
    pub fn new(
        context: ModalContext,
        session: Option<Rc<SessionHistory>>,
        log: Rc<RefCell<NotificationLog>>,
    ) -> Self {
        Self {
            context,
            session,
            log,
            log_scroll: 0,
        }
    }

    pub fn draw_with_status(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        status: Option<&str>,
    ) -> Result<()> {
        let layout = calculate_main_layout(area, status.is_some());

        self.draw_stack(frame, layout.stack);
        self.draw_history(frame, layout.history);
        self.draw_log(frame, layout.log);

        if let (Some(status_area), Some(message)) = (layout.status, status) {
            let line = Paragraph::new(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Yellow),
            )));
            frame.render_widget(line, status_area);
        }

        draw_help_bar(frame, layout.help);
        Ok(())
    }

    fn draw_stack(&self, frame: &mut Frame, area: Rect) {
        let stack = self.context.handle().active_modals();
        let title = format!(" Modal stack (depth {}) ", stack.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );

        if stack.is_empty() {
            let empty = Paragraph::new("No open modals. Press o to open one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Topmost first
        let top_index = stack.len() - 1;
        let items: Vec<ListItem> = stack
            .iter()
            .enumerate()
            .rev()
            .map(|(i, modal)| {
                let style = if i == top_index {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                let data = if modal.data.is_empty() {
                    String::new()
                } else {
                    format!(" ({} keys)", modal.data.len())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(modal.id.clone(), style),
                    Span::styled(data, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let Some(session) = &self.session else {
            let paragraph = Paragraph::new(
                "No navigation history: back/forward are unavailable.\nStack operations still work.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Session history (disabled) "),
            );
            frame.render_widget(paragraph, area);
            return;
        };

        let cursor = session.cursor();
        let entries = session.entries();
        let title = format!(" Session history ({} entries) ", entries.len());

        // Newest first
        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .rev()
            .map(|(i, payload)| {
                let (marker, style) = if i == cursor {
                    ("▶ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                } else if i > cursor {
                    ("  ", Style::default().fg(Color::DarkGray))
                } else {
                    ("  ", Style::default())
                };
                let body = match payload.to_json() {
                    Ok(json) => json,
                    Err(_) => payload.label().to_string(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("#{} ", i), Style::default().fg(Color::DarkGray)),
                    Span::styled(body, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(list, area);
    }

    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log = self.log.borrow();
        let visible = area.height.saturating_sub(2) as usize;
        let max_scroll = log.len().saturating_sub(visible);
        self.log_scroll = self.log_scroll.min(max_scroll);

        let start = max_scroll - self.log_scroll;
        let lines: Vec<Line> = log
            .iter()
            .skip(start)
            .take(visible)
            .map(|line| Line::from(line.clone()))
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notifications ")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('o') => Some(Action::OpenModal),
            KeyCode::Char('d') => Some(Action::OpenDuplicate),
            KeyCode::Char('x') | KeyCode::Esc => Some(Action::CloseTopModal),
            KeyCode::Backspace | KeyCode::Left => Some(Action::NavigateBack),
            KeyCode::Right => Some(Action::NavigateForward),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('c') => Some(Action::ClearLog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // Scrolling up moves away from the newest line
            Action::ScrollUp => self.log_scroll = self.log_scroll.saturating_add(1),
            Action::ScrollDown => self.log_scroll = self.log_scroll.saturating_sub(1),
            Action::ClearLog => {
                self.log.borrow_mut().clear();
                self.log_scroll = 0;
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_status(frame, area, None)
    }
}

fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" o ", key_style),
        Span::raw("Open  "),
        Span::styled(" d ", key_style),
        Span::raw("Duplicate  "),
        Span::styled(" x ", key_style),
        Span::raw("Close  "),
        Span::styled(" Bksp/← ", key_style),
        Span::raw("Back  "),
        Span::styled(" → ", key_style),
        Span::raw("Forward  "),
        Span::styled(" ? ", key_style),
        Span::raw("Help  "),
        Span::styled(" q ", key_style),
        Span::raw("Quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_drops_oldest_when_full() {
        let mut log = NotificationLog::default();
        for i in 0..MAX_LOG_LINES + 5 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), MAX_LOG_LINES);
        assert_eq!(log.iter().next().map(String::as_str), Some("line 5"));
    }

    #[test]
    fn test_clear_log_resets_scroll() {
        let log = Rc::new(RefCell::new(NotificationLog::default()));
        log.borrow_mut().push("opened".into());
        let mut home = HomeComponent::new(ModalContext::default(), None, Rc::clone(&log));

        home.update(Action::ScrollUp).unwrap();
        assert_eq!(home.log_scroll, 1);

        home.update(Action::ClearLog).unwrap();
        assert_eq!(home.log_scroll, 0);
        assert_eq!(log.borrow().len(), 0);
    }
}
