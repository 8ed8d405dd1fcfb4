//! TUI catalog browser.
//!
//! Provides a full-screen terminal UI with:
//! - Filterable product table with live slash search
//! - Owner selector and category multi-select
//! - Key bindings: j/k navigate, / search, o owner, F categories, r reset, q quit
//!
//! The view owns the single [`FilterState`] instance; every key event
//! runs to completion and the visible list is recomputed in full on each
//! state change. The catalog is small and static, so no caching.

use crate::cmd::list::NO_MATCH_MESSAGE;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        TableState},
};
use shelf_core::catalog::{Catalog, EnrichedProduct};
use shelf_core::{FilterState, fixture};
use std::io;
use std::time::{Duration, Instant};

/// Which input surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box; every keystroke re-filters.
    Search,
    /// Category multi-select popup is open.
    CategoryPopup,
}

/// Interactive catalog browser state.
pub struct BrowseView {
    /// The immutable enriched catalog.
    catalog: Catalog,
    /// The single filter-state instance; replaced, never mutated in place.
    filter: FilterState,
    /// Products surviving the current filter, in catalog order.
    visible: Vec<EnrichedProduct>,
    /// Table navigation state (selected row index in `visible`).
    table_state: TableState,
    /// Current input mode.
    input_mode: InputMode,
    /// Buffer for the search query being typed.
    search_buf: String,
    /// Query value before entering Search mode (for Esc cancel).
    search_prev_query: String,
    /// Cursor row inside the category popup (0 = "All" / clear).
    popup_cursor: usize,
    /// Whether to quit.
    should_quit: bool,
    /// Transient status message.
    status_msg: Option<(String, Instant)>,
}

impl BrowseView {
    /// Create a browser over the given catalog with no filters active.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let mut view = Self {
            catalog,
            filter: FilterState::default(),
            visible: Vec::new(),
            table_state: TableState::default(),
            input_mode: InputMode::default(),
            search_buf: String::new(),
            search_prev_query: String::new(),
            popup_cursor: 0,
            should_quit: false,
            status_msg: None,
        };
        view.apply_filter();
        view
    }

    /// Recompute `visible` from the catalog using the current filter.
    fn apply_filter(&mut self) {
        self.visible = self.filter.apply(&self.catalog.products);

        // Clamp selection into valid range.
        let len = self.visible.len();
        match self.table_state.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None if len > 0 => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    /// Replace the filter state and re-derive the visible list.
    fn set_filter(&mut self, next: FilterState) {
        self.filter = next;
        self.apply_filter();
    }

    fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    /// Whether the view wants to exit the event loop.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn select_next(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| if i + 1 >= len { len - 1 } else { i + 1 });
        self.table_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.visible.len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    // -----------------------------------------------------------------------
    // Filter transitions
    // -----------------------------------------------------------------------

    /// Cycle the owner selection: All -> first owner -> ... -> All.
    fn cycle_owner(&mut self) {
        let names: Vec<&str> = self.catalog.users.iter().map(|u| u.name.as_str()).collect();
        let next = match self.filter.owner.as_deref() {
            None => names.first().map(ToString::to_string),
            Some(current) => names
                .iter()
                .position(|n| *n == current)
                .and_then(|i| names.get(i + 1))
                .map(ToString::to_string),
        };
        let label = next.clone().unwrap_or_else(|| "All".to_string());
        self.set_filter(self.filter.clone().select_owner(next));
        self.set_status(format!("Owner: {label}"));
    }

    /// Toggle the category under the popup cursor; row 0 clears all.
    fn toggle_popup_row(&mut self) {
        if self.popup_cursor == 0 {
            self.set_filter(self.filter.clone().clear_categories());
            return;
        }
        if let Some(category) = self.catalog.categories.get(self.popup_cursor - 1) {
            let category = category.clone();
            self.set_filter(self.filter.clone().toggle_category(&category));
        }
    }

    // -----------------------------------------------------------------------
    // Key event handling
    // -----------------------------------------------------------------------

    /// Handle a key event; each event runs to completion before the next.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::CategoryPopup => self.handle_popup_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),

            // Search mode; remember the query so Esc can restore it.
            KeyCode::Char('/') => {
                self.search_prev_query = self.filter.search.clone();
                self.search_buf = self.filter.search.clone();
                self.input_mode = InputMode::Search;
            }

            KeyCode::Char('o') => self.cycle_owner(),

            KeyCode::Char('F') => {
                self.popup_cursor = 0;
                self.input_mode = InputMode::CategoryPopup;
            }

            // Atomic reset: one transition, one redraw.
            KeyCode::Char('r') => {
                self.set_filter(self.filter.clone().reset());
                self.search_buf.clear();
                self.set_status("Filters reset".to_string());
            }

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Cancel: restore the query active before '/'.
                self.search_buf = self.search_prev_query.clone();
                let prev = self.search_prev_query.clone();
                self.set_filter(self.filter.clone().set_search(&prev));
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_buf.pop();
                let buf = self.search_buf.clone();
                self.set_filter(self.filter.clone().set_search(&buf));
            }
            KeyCode::Char(c) => {
                self.search_buf.push(c);
                let buf = self.search_buf.clone();
                // set_search strips leading whitespace at the point of
                // input; mirror the stored value back into the buffer.
                self.set_filter(self.filter.clone().set_search(&buf));
                self.search_buf = self.filter.search.clone();
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let rows = self.catalog.categories.len() + 1;
        match key.code {
            KeyCode::Esc | KeyCode::Char('F') | KeyCode::Char('q') => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.popup_cursor = (self.popup_cursor + 1).min(rows - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.popup_cursor = self.popup_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_popup_row(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Draw the full view; a pure function of (catalog, filter state).
    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_filter_panel(frame, chunks[0]);
        self.render_table(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);

        if self.input_mode == InputMode::CategoryPopup {
            self.render_category_popup(frame, area);
        }
    }

    fn render_filter_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let active = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let inactive = Style::default().fg(Color::White);

        let mut owner_spans = vec![Span::styled("Owner: ", Style::default().fg(Color::DarkGray))];
        owner_spans.push(Span::styled(
            "All",
            if self.filter.owner.is_none() { active } else { inactive },
        ));
        for user in &self.catalog.users {
            owner_spans.push(Span::raw("  "));
            let style = if self.filter.owner.as_deref() == Some(user.name.as_str()) {
                active
            } else {
                inactive
            };
            owner_spans.push(Span::styled(user.name.clone(), style));
        }

        let mut cat_spans = vec![Span::styled(
            "Categories: ",
            Style::default().fg(Color::DarkGray),
        )];
        cat_spans.push(Span::styled(
            "All",
            if self.filter.categories.is_empty() { active } else { inactive },
        ));
        for category in &self.catalog.categories {
            cat_spans.push(Span::raw("  "));
            let selected = self.filter.categories.iter().any(|c| c.id == category.id);
            cat_spans.push(Span::styled(
                category.title.clone(),
                if selected { active } else { inactive },
            ));
        }

        let panel = Paragraph::new(vec![Line::from(owner_spans), Line::from(cat_spans)]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .title(" Filters "),
        );
        frame.render_widget(panel, area);
    }

    fn render_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block_title = match self.input_mode {
            InputMode::Search => format!(" shelf — search: {}▏", self.search_buf),
            _ if !self.filter.search.is_empty() => {
                format!(
                    " shelf — {} of {} products  [search: {}] ",
                    self.visible.len(),
                    self.catalog.products.len(),
                    self.filter.search
                )
            }
            _ => format!(
                " shelf — {} of {} products ",
                self.visible.len(),
                self.catalog.products.len()
            ),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(block_title);

        if self.visible.is_empty() {
            let empty = Paragraph::new(NO_MATCH_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(["ID", "PRODUCT", "CATEGORY", "OWNER"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row<'static>> = self.visible.iter().map(build_row).collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Min(16),
            Constraint::Min(8),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(" ");
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_status_bar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Show a transient status message if recent (< 3 seconds).
        if let Some((ref msg, at)) = self.status_msg {
            if at.elapsed() < Duration::from_secs(3) {
                let line = Line::from(vec![Span::styled(
                    msg.clone(),
                    Style::default().fg(Color::Cyan),
                )]);
                frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
                return;
            }
        }

        let key_style = Style::default().fg(Color::Cyan);
        let dim_style = Style::default().fg(Color::DarkGray);
        let spans: Vec<Span<'static>> = match self.input_mode {
            InputMode::Search => vec![
                Span::styled("ESC", key_style),
                Span::styled(" cancel  ", dim_style),
                Span::styled("ENTER", key_style),
                Span::styled(" confirm", dim_style),
            ],
            InputMode::CategoryPopup => vec![
                Span::styled("j/k", key_style),
                Span::styled(" move  ", dim_style),
                Span::styled("SPACE", key_style),
                Span::styled(" toggle  ", dim_style),
                Span::styled("ESC", key_style),
                Span::styled(" close", dim_style),
            ],
            InputMode::Normal => vec![
                Span::styled("j/k", key_style),
                Span::styled(" move  ", dim_style),
                Span::styled("/", key_style),
                Span::styled(" search  ", dim_style),
                Span::styled("o", key_style),
                Span::styled(" owner  ", dim_style),
                Span::styled("F", key_style),
                Span::styled(" categories  ", dim_style),
                Span::styled("r", key_style),
                Span::styled(" reset  ", dim_style),
                Span::styled("q", key_style),
                Span::styled(" quit", dim_style),
            ],
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
            area,
        );
    }

    fn render_category_popup(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let popup = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup);

        let mut items: Vec<ListItem<'_>> = Vec::with_capacity(self.catalog.categories.len() + 1);
        let all_marker = if self.filter.categories.is_empty() { "●" } else { "○" };
        items.push(ListItem::new(format!("{all_marker} All (clear selection)")));
        for category in &self.catalog.categories {
            let selected = self.filter.categories.iter().any(|c| c.id == category.id);
            let marker = if selected { "☑" } else { "☐" };
            items.push(ListItem::new(format!(
                "{marker} {} {}",
                category.icon, category.title
            )));
        }

        let mut state = ListState::default();
        state.select(Some(self.popup_cursor));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .title(" Categories "),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_stateful_widget(list, popup, &mut state);
    }
}

/// Build one product table row; owner colored blue for `m`, red for `f`.
fn build_row(product: &EnrichedProduct) -> Row<'static> {
    let owner_style = if product.owner_is_danger() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Blue)
    };
    Row::new(vec![
        Cell::from(product.id.to_string()),
        Cell::from(product.name.clone()),
        Cell::from(product.category_label()),
        Cell::from(Span::styled(product.user.name.clone(), owner_style)),
    ])
}

/// A centered sub-rectangle taking the given percentages of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Run the interactive browser over the embedded catalog.
///
/// Sets up the alternate screen and raw mode, runs the event loop, and
/// restores the terminal even when the loop errors.
pub fn run_browse_tui() -> Result<()> {
    let catalog = fixture::load().context("load catalog")?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view = BrowseView::new(catalog);
    let result = run_loop(&mut terminal, &mut view);

    let _ = disable_raw_mode();
    let _ = crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut BrowseView,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .context("draw frame")?;

        if event::poll(Duration::from_millis(250)).context("poll events")? {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => view.handle_key(key),
                _ => {}
            }
        }

        if view.should_quit() {
            return Ok(());
        }
    }
}
