use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use inventory_keeper::{Field, Record, TableData};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_SIZE: usize = 10;

pub struct App {
    pub records: Vec<Record>,
    pub table: TableData,
    pub state: TableState,
    pub show_detail: bool,
}

impl App {
    pub fn new(records: Vec<Record>) -> Self {
        let mut state = TableState::default();
        if !records.is_empty() {
            state.select(Some(0));
        }

        let table = TableData::from_records("Inventory", &records, &Field::ALL);

        Self {
            records,
            table,
            state,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.state.selected().and_then(|i| self.records.get(i))
    }

    pub fn next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= self.records.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.records.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| (i + PAGE_SIZE).min(self.records.len() - 1))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| i.saturating_sub(PAGE_SIZE))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.records.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.records.is_empty() {
            self.state.select(Some(self.records.len() - 1));
        }
    }

    /// Units across all records, pinned at u64::MAX
    pub fn total_units(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.quantity))
    }

    pub fn total_value(&self) -> f64 {
        self.records.iter().map(|r| r.value()).sum()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    if app.show_detail {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        render_table(f, content[0], app);
        render_detail_panel(f, content[1], app);
    } else {
        render_table(f, chunks[0], app);
    }

    render_status_bar(f, chunks[1], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let table = app
        .table
        .widget()
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.records.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Units: {}  Value: {:.2}", app.total_units(), app.total_value()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines = match app.selected_record() {
        Some(record) => detail_lines(record),
        None => vec![Line::from("No record selected")],
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );

    f.render_widget(panel, area);
}

fn detail_lines(record: &Record) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    Field::ALL
        .iter()
        .chain(std::iter::once(&Field::Value))
        .map(|field| {
            Line::from(vec![
                Span::styled(format!("{:<10}", field.header()), label),
                Span::raw(field.cell(record)),
            ])
        })
        .collect()
}
