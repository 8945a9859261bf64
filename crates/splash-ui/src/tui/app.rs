//! Terminal front end.
//!
//! The `App` owns the [`TodoModel`], forwards intents to the
//! [`TodoService`] and folds replies back in. It draws the pure
//! [`TodoView`] and redraws only when the model revision or the
//! terminal-local state (focus, selection, size) changes.

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use splash_services::TodoStore;

use crate::models::palette::{CardStyle, TextTone};
use crate::models::todo_model::TodoModel;
use crate::services::{TodoCommand, TodoService, TodoServiceMessage};
use crate::view::{render, RowContent, RowView, TodoView};

const HELP_INPUT: &str = "Enter add · Tab list · Ctrl-C quit";
const HELP_LIST: &str = "↑/↓ select · e edit · d delete · r refresh · Tab input · q quit";
const HELP_EDIT: &str = "Enter save · Esc cancel";

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
    Edit,
}

pub struct App<S: TodoStore> {
    model: TodoModel,
    service: TodoService<S>,
    rx: Receiver<TodoServiceMessage>,
    focus: Focus,
    list_state: ListState,
    tick_rate: Duration,
    show_help: bool,
    drawn_revision: Option<u64>,
    ui_dirty: bool,
    should_quit: bool,
}

impl<S: TodoStore> App<S> {
    pub fn new(
        service: TodoService<S>,
        rx: Receiver<TodoServiceMessage>,
        tick_rate: Duration,
        show_help: bool,
    ) -> Self {
        Self {
            model: TodoModel::new(),
            service,
            rx,
            focus: Focus::Input,
            list_state: ListState::default(),
            tick_rate,
            show_help,
            drawn_revision: None,
            ui_dirty: true,
            should_quit: false,
        }
    }

    pub fn model(&self) -> &TodoModel {
        &self.model
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Main loop: load, then draw / drain replies / read keys until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.dispatch(self.model.request_refresh());

        loop {
            self.refresh_screen(terminal)?;

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(_, _) => self.ui_dirty = true,
                    _ => {}
                }
            }

            if self.should_quit {
                tracing::info!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Fold in replies that have arrived, then redraw if anything visible
    /// changed, so network results show up in the same tick.
    pub fn refresh_screen<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.drain_messages();

        if self.needs_redraw() {
            let view = render(&self.model);
            terminal.draw(|f| self.draw(f, &view))?;
            self.drawn_revision = Some(self.model.revision());
            self.ui_dirty = false;
        }
        Ok(())
    }

    fn needs_redraw(&self) -> bool {
        self.ui_dirty || self.drawn_revision != Some(self.model.revision())
    }

    fn dispatch(&self, command: TodoCommand) {
        self.service.dispatch(command);
    }

    /// Apply every reply that has arrived, chaining follow-up commands.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            if let Some(next) = self.model.apply(message) {
                self.dispatch(next);
            }
        }
        self.sync_ui_state();
    }

    /// Keep focus and selection consistent with the model after replies.
    fn sync_ui_state(&mut self) {
        if self.focus == Focus::Edit && self.model.editing_id().is_none() {
            self.focus = Focus::List;
            self.ui_dirty = true;
        }

        let len = self.model.todos().len();
        let clamped = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None if self.focus == Focus::List => Some(0),
            None => None,
        };
        if clamped != self.list_state.selected() {
            self.list_state.select(clamped);
            self.ui_dirty = true;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Chords like Ctrl-U or Alt-X are not text and have no binding.
        if matches!(key.code, KeyCode::Char(_))
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key.code),
            Focus::List => self.handle_list_key(key.code),
            Focus::Edit => self.handle_edit_key(key.code),
        }
        self.sync_ui_state();
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.ui_dirty = true;
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                let mut text = self.model.text().to_string();
                text.push(c);
                self.model.set_text(text);
            }
            KeyCode::Backspace => {
                let mut text = self.model.text().to_string();
                if text.pop().is_some() {
                    self.model.set_text(text);
                }
            }
            KeyCode::Enter => {
                if let Some(command) = self.model.submit_new() {
                    self.dispatch(command);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.set_focus(Focus::List),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('i') => self.set_focus(Focus::Input),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('r') => self.dispatch(self.model.request_refresh()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if self.model.start_edit(&id) {
                        self.set_focus(Focus::Edit);
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(self.model.request_delete(&id));
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                let mut text = self.model.edit_text().to_string();
                text.push(c);
                self.model.set_edit_text(text);
            }
            KeyCode::Backspace => {
                let mut text = self.model.edit_text().to_string();
                if text.pop().is_some() {
                    self.model.set_edit_text(text);
                }
            }
            KeyCode::Enter => {
                if let Some(command) = self.model.submit_edit() {
                    self.dispatch(command);
                }
            }
            KeyCode::Esc => {
                self.model.cancel_edit();
                self.set_focus(Focus::List);
            }
            _ => {}
        }
    }

    fn selected_id(&self) -> Option<splash_services::TaskId> {
        let index = self.list_state.selected()?;
        self.model.todos().get(index).map(|t| t.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.model.todos().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        if Some(next) != self.list_state.selected() {
            self.list_state.select(Some(next));
            self.ui_dirty = true;
        }
    }

    fn draw(&mut self, f: &mut Frame, view: &TodoView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(if self.show_help { 1 } else { 0 }),
            ])
            .split(f.area());

        let title = Paragraph::new(Line::from(Span::styled(
            view.title,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, chunks[0]);

        self.draw_input(f, chunks[1], view);
        self.draw_list(f, chunks[2], view);

        if self.show_help {
            let help = match self.focus {
                Focus::Input => HELP_INPUT,
                Focus::List => HELP_LIST,
                Focus::Edit => HELP_EDIT,
            };
            let help = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
            f.render_widget(help, chunks[3]);
        }
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, view: &TodoView) {
        let focused = self.focus == Focus::Input;
        let border = if focused {
            Style::default().fg(Color::Rgb(0x21, 0x96, 0xF3))
        } else {
            Style::default()
        };

        let line = match view.input.placeholder {
            Some(placeholder) => Line::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::from(view.input.text.as_str()),
        };

        let input = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" New task · [Enter] Add "),
        );
        f.render_widget(input, area);

        if focused {
            let width = view.input.text.chars().count() as u16;
            f.set_cursor_position((
                (area.x + 1 + width).min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }

    fn draw_list(&mut self, f: &mut Frame, area: Rect, view: &TodoView) {
        let block = Block::default().borders(Borders::ALL).title(" Tasks ");

        if let Some(message) = view.empty_message {
            let empty = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = view.rows.iter().map(row_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn card_colors(style: &CardStyle) -> Style {
    let (r, g, b) = style.background;
    let fg = match style.text {
        TextTone::White => Color::White,
        TextTone::Black => Color::Black,
    };
    Style::default().bg(Color::Rgb(r, g, b)).fg(fg)
}

fn row_item(row: &RowView) -> ListItem<'static> {
    let style = card_colors(&row.style);
    let line = match &row.content {
        RowContent::Display(text) => {
            let mut text_style = Style::default();
            if row.completed {
                text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
            }
            Line::from(vec![
                Span::styled(format!(" {} ", text), text_style),
                Span::styled("  [e] Edit  [d] Delete ", Style::default().add_modifier(Modifier::DIM)),
            ])
        }
        RowContent::Editing(buffer) => Line::from(vec![
            Span::styled(
                format!(" ✎ {}▏", buffer),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  [Enter] Save "),
        ]),
    };
    ListItem::new(vec![Line::from(""), line, Line::from("")]).style(style)
}
