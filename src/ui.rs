use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portfolio_dashboard::style::parse_hex_color;
use portfolio_dashboard::{Dashboard, DashboardView, Status, TableRow};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
        Row, Table, TableState,
    },
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Holdings,
    Timeline,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Holdings,
            Page::Holdings => Page::Timeline,
            Page::Timeline => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::Timeline,
            Page::Holdings => Page::Overview,
            Page::Timeline => Page::Holdings,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Overview => "Overview",
            Page::Holdings => "Holdings",
            Page::Timeline => "Timeline",
        }
    }
}

pub struct App {
    pub dashboard: Dashboard,
    /// Recomputed from scratch after every selection change
    pub view: DashboardView,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let view = dashboard.view();

        let mut state = TableState::default();
        if !view.is_empty() {
            state.select(Some(0));
        }

        Self {
            dashboard,
            view,
            state,
            current_page: Page::Overview,
            show_detail: false,
        }
    }

    fn refresh(&mut self) {
        self.view = self.dashboard.view();

        // Reset selection to first item
        if !self.view.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn cycle_fund(&mut self) {
        let next = cycle(&self.dashboard.selection().fund, &self.dashboard.options().funds);
        self.dashboard.select_fund(next);
        self.refresh();
    }

    pub fn cycle_industry(&mut self) {
        let next = cycle(
            &self.dashboard.selection().industry,
            &self.dashboard.options().industries,
        );
        self.dashboard.select_industry(next);
        self.refresh();
    }

    pub fn cycle_status(&mut self) {
        let next = cycle(&self.dashboard.selection().status, &self.dashboard.options().statuses);
        self.dashboard.select_status(next);
        self.refresh();
    }

    pub fn clear_filter(&mut self) {
        self.dashboard.clear_selection();
        self.refresh();
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_row(&self) -> Option<&TableRow> {
        self.state.selected().and_then(|i| self.view.table.get(i))
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.view.table.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.table.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.view.table.len();
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 20).min(len - 1));
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.view.table.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(20));
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.view.table.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.view.table.is_empty() {
            self.state.select(Some(self.view.table.len() - 1));
        }
    }
}

/// all → first option → ... → last option → all
fn cycle<T: Clone + PartialEq>(current: &Option<T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, event::read);

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        log::error!("UI loop failed: {}", err);
    }

    Ok(res?)
}

fn run_app<B, E>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: E) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    E: FnMut() -> io::Result<Event>,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = next_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('f') => app.cycle_fund(),
                KeyCode::Char('i') => app.cycle_industry(),
                KeyCode::Char('s') => app.cycle_status(),
                KeyCode::Char('c') => app.clear_filter(),
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
            Constraint::Length(3), // Header with navigation + summary
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Overview => render_overview(f, chunks[1], app),
        Page::Holdings if app.show_detail => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(60), // Holdings table
                    Constraint::Percentage(40), // Detail panel
                ])
                .split(chunks[1]);

            render_table(f, content_chunks[0], app);
            render_detail_panel(f, content_chunks[1], app);
        }
        Page::Holdings => render_table(f, chunks[1], app),
        Page::Timeline => render_timeline(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn hex(color: &str) -> Color {
    parse_hex_color(color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn status_color(app: &App, status: Status) -> Color {
    hex(&app.dashboard.style().status_style(status).color)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.view.summary;

    let mut tab_spans = vec![];
    for (i, page) in [Page::Overview, Page::Holdings, Page::Timeline].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Companies: {}", summary.total_companies),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Current: {}", summary.current_companies),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Exits: {}", summary.total_exits),
        Style::default().fg(Color::Gray),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Industries: {}", summary.total_industries),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let fund_bars: Vec<Bar> = app
        .view
        .fund_distribution
        .iter()
        .map(|c| {
            Bar::default()
                .label(Line::from(c.label.as_str()))
                .value(c.value as u64)
                .style(Style::default().fg(hex(&c.color)))
        })
        .collect();

    let fund_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Fund Distribution "),
        )
        .data(BarGroup::default().bars(&fund_bars))
        .bar_width(12)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(Color::White));

    let industry_bars: Vec<Bar> = app
        .view
        .industry_distribution
        .iter()
        .map(|c| {
            Bar::default()
                .label(Line::from(c.label.as_str()))
                .value(c.value as u64)
                .style(Style::default().fg(hex(&c.color)))
        })
        .collect();

    let industry_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Industry Distribution "),
        )
        .data(BarGroup::default().bars(&industry_bars))
        .bar_width(12)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(Color::White));

    f.render_widget(fund_chart, chunks[0]);
    f.render_widget(industry_chart, chunks[1]);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Company", "Status", "Industry", "Fund", "Year", "Headquarters"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .view
        .table
        .iter()
        .map(|row| {
            let color = status_color(app, row.status);

            let cells = vec![
                Cell::from(truncate(&row.company, 28)),
                Cell::from(row.status.as_str()).style(Style::default().fg(color)),
                Cell::from(truncate(&row.industry, 20)),
                Cell::from(truncate(&row.fund, 24)),
                Cell::from(row.year_of_investment.clone()),
                Cell::from(truncate(&row.headquarters, 24)),
            ];

            Row::new(cells).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(9),
            Constraint::Length(22),
            Constraint::Length(26),
            Constraint::Length(6),
            Constraint::Length(26),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Holdings ({}) ", app.view.table.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_timeline(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Investment Timeline ");

    let markers = &app.view.timeline;
    if markers.is_empty() {
        f.render_widget(Paragraph::new("  No companies with an investment year").block(block), area);
        return;
    }

    // y = position in display order, first company on top
    let n = markers.len() as f64;
    let points_for = |status: Status| -> Vec<(f64, f64)> {
        markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.status == status)
            .map(|(i, m)| (m.x, n - i as f64))
            .collect()
    };
    let current = points_for(Status::Current);
    let former = points_for(Status::Former);

    // one year of padding either side, in f64 so no year can overflow
    let min_year = markers.iter().map(|m| m.year).min().unwrap_or_default() as f64 - 1.0;
    let max_year = markers.iter().map(|m| m.year).max().unwrap_or_default() as f64 + 1.0;

    let datasets = vec![
        Dataset::default()
            .name("Current")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(status_color(app, Status::Current)))
            .data(&current),
        Dataset::default()
            .name("Former")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(status_color(app, Status::Former)))
            .data(&former),
    ];

    let first = markers.first().map(|m| m.y.as_str()).unwrap_or_default();
    let last = markers.last().map(|m| m.y.as_str()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Year of Investment")
                .style(Style::default().fg(Color::Gray))
                .bounds([min_year, max_year])
                .labels(vec![
                    Span::raw(format!("{:.0}", min_year)),
                    Span::raw(format!("{:.0}", (min_year + max_year) / 2.0)),
                    Span::raw(format!("{:.0}", max_year)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, n + 1.0])
                .labels(vec![
                    Span::raw(truncate(last, 14)),
                    Span::raw(truncate(first, 14)),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.view.table.len();

    let mut status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            app.dashboard.selection().describe(),
            Style::default().fg(Color::Green),
        ),
    ];

    if !app.dashboard.selection().is_all() {
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    for (key, label) in [("f", " Fund "), ("i", " Industry "), ("s", " Status ")] {
        status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(label));
    }
    status_spans.push(Span::raw("| "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let row = match app.selected_row() {
        Some(r) => r,
        None => {
            let no_selection = Paragraph::new("No company selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Company Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![label("  Company: "), Span::raw(row.company.as_str())]),
        Line::from(""),
        Line::from(vec![
            label("  Status: "),
            Span::styled(row.status.as_str(), Style::default().fg(status_color(app, row.status))),
        ]),
        Line::from(""),
        Line::from(vec![label("  Industry: "), Span::raw(row.industry.as_str())]),
        Line::from(""),
        Line::from(vec![label("  Headquarters: "), Span::raw(row.headquarters.as_str())]),
        Line::from(""),
        Line::from(vec![label("  Year of Investment: "), Span::raw(row.year_of_investment.as_str())]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  FUNDS",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
    ];

    let style = app.dashboard.style();
    for fund in row.fund.split(portfolio_dashboard::FUND_SEPARATOR) {
        content.push(Line::from(vec![
            Span::raw("  ● "),
            Span::styled(fund.to_string(), Style::default().fg(hex(style.fund_color(fund)))),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Company Details "),
    );

    f.render_widget(detail_panel, area);
}

// ============================================================================
// TESTS
// ============================================================================
