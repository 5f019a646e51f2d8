use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use rodada_stats::config::AppConfig;
use rodada_stats::leaderboard::{Leaderboards, build_leaderboards};
use rodada_stats::logging;
use rodada_stats::period::Period;
use rodada_stats::ranking::RankedEntry;
use rodada_stats::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Players,
    Sessions,
}

struct App {
    config: AppConfig,
    store: Store,
    today: NaiveDate,
    period: Period,
    board: Leaderboards,
    screen: Screen,
    scroll: u16,
    date_index: usize,
    status: String,
    help_overlay: bool,
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let store = Store::load(&config.db_path);
        let today = Local::now().date_naive();
        let period = config.period;
        let board = build_leaderboards(&store, period, today, config.limits);
        let status = format!("Store: {}", config.db_path.display());
        Self {
            config,
            store,
            today,
            period,
            board,
            screen: Screen::Dashboard,
            scroll: 0,
            date_index: 0,
            status,
            help_overlay: false,
            should_quit: false,
        }
    }

    fn rebuild(&mut self) {
        self.board = build_leaderboards(&self.store, self.period, self.today, self.config.limits);
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.switch(Screen::Dashboard),
            KeyCode::Char('2') => self.switch(Screen::Players),
            KeyCode::Char('3') => self.switch(Screen::Sessions),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.period = self.period.next();
                self.rebuild();
                tracing::debug!(period = self.period.label(), "period changed");
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('h') | KeyCode::Left => self.shift_date(1),
            KeyCode::Char('l') | KeyCode::Right => self.shift_date(-1),
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            _ => {}
        }
    }

    fn switch(&mut self, screen: Screen) {
        self.screen = screen;
        self.scroll = 0;
    }

    // Dates are newest first, so moving "left" goes back in time.
    fn shift_date(&mut self, step: isize) {
        let total = self.store.session_dates().len();
        if total == 0 {
            return;
        }
        let next = (self.date_index as isize + step).clamp(0, total as isize - 1);
        self.date_index = next as usize;
        self.scroll = 0;
    }

    fn reload(&mut self) {
        self.store = Store::load(&self.config.db_path);
        self.today = Local::now().date_naive();
        self.date_index = 0;
        self.rebuild();
        self.status = format!("Reloaded {}", self.config.db_path.display());
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let _log_guard = logging::init_file(&config.log_dir);
    tracing::info!("dashboard starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("dashboard failed: {err}");
        eprintln!("error: {err}");
    }
    tracing::info!("dashboard stopped");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .style(Style::default().fg(Color::Rgb(255, 102, 0)).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Dashboard => render_dashboard(frame, chunks[1], app),
        Screen::Players => render_players(frame, chunks[1], app),
        Screen::Sessions => render_sessions(frame, chunks[1], app),
    }

    let footer = Paragraph::new(format!("{}\n{}", footer_text(app.screen), app.status))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);

    if app.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let screen = match app.screen {
        Screen::Dashboard => "Dashboard",
        Screen::Players => "Jogadores",
        Screen::Sessions => "Rodadas",
    };
    format!(
        "CENTRAL | {} | Período: {} | {} jogadores, {} rodadas",
        screen,
        app.period.label(),
        app.store.players().len(),
        app.store.sessions().len()
    )
}

fn footer_text(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => "1 Dashboard | 2 Jogadores | 3 Rodadas | p Período | j/k Scroll | r Reload | ? Help | q Quit",
        Screen::Players => "1 Dashboard | 2 Jogadores | 3 Rodadas | j/k Scroll | r Reload | ? Help | q Quit",
        Screen::Sessions => "1 Dashboard | 2 Jogadores | 3 Rodadas | h/l Data | j/k Scroll | r Reload | q Quit",
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    render_ranking(frame, top[0], "Artilharia", &app.board.goals, app.scroll);
    render_ranking(frame, top[1], "Assistências", &app.board.assists, app.scroll);
    render_ranking(frame, top[2], "Craque", &app.board.star, app.scroll);

    let cats = &app.board.categories;
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cats.len() as u32); cats.len()])
        .split(rows[1]);
    for (col, (cat, entries)) in middle.iter().zip(cats.iter()) {
        render_ranking(frame, *col, cat.label(), entries, app.scroll);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_ranking(frame, bottom[0], "Puskás (votos)", &app.board.best_goal, app.scroll);
    render_lineups(frame, bottom[1], app);
}

fn render_ranking(frame: &mut Frame, area: Rect, title: &str, entries: &[RankedEntry], scroll: u16) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    if entries.is_empty() {
        let empty = Paragraph::new("Sem dados")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }
    let lines: Vec<Line> = entries
        .iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(
                    format!("{:>4} ", e.position_label()),
                    Style::default().fg(Color::Rgb(255, 102, 0)),
                ),
                Span::raw(format!("{} ", e.name)),
                Span::styled(e.value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn render_lineups(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Melhor Quinteto");
    if app.board.lineups.is_empty() {
        let empty = Paragraph::new("Nenhum quinteto registrado.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }
    let lines: Vec<Line> = app
        .board
        .lineups
        .iter()
        .enumerate()
        .map(|(i, l)| Line::from(format!("{:>3}º {}  {} vitórias", i + 1, l.label(), l.win_count)))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_players(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Jogadores (histórico)");
    if app.board.players.is_empty() {
        let empty = Paragraph::new("Nenhum jogador cadastrado.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }
    let mut lines = vec![Line::styled(
        format!(
            "{:<20} {:<12} {:>5} {:>6} {:>7} {:>8} {:>7}",
            "Nome", "Posição", "Gols", "Assist", "Craque", "Pontos", "Puskás"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    lines.extend(app.board.players.iter().map(|p| {
        Line::from(format!(
            "{:<20} {:<12} {:>5} {:>6} {:>7} {:>8} {:>7}",
            p.name, p.position, p.goals, p.assists, p.star_count, p.star_total, p.best_goal_votes
        ))
    }));
    frame.render_widget(Paragraph::new(lines).block(block).scroll((app.scroll, 0)), area);
}

fn render_sessions(frame: &mut Frame, area: Rect, app: &App) {
    let dates = app.store.session_dates();
    let Some(date) = dates.get(app.date_index) else {
        let empty = Paragraph::new("Nenhuma rodada registrada.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Rodadas"));
        frame.render_widget(empty, area);
        return;
    };
    let title = format!("Rodada {} ({}/{})", date, app.date_index + 1, dates.len());
    let mut lines = vec![Line::styled(
        format!("{:<20} {:>8} {:>5} {:>6} {:>6}  Prêmios", "Nome", "Presente", "Gols", "Assist", "Votos"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    lines.extend(app.store.records_on(*date).into_iter().map(|r| {
        let awards: Vec<&str> = r.flags.iter().map(|c| c.label()).collect();
        Line::from(format!(
            "{:<20} {:>8} {:>5} {:>6} {:>6}  {}",
            r.player_name,
            if r.present { "sim" } else { "não" },
            r.goals,
            r.assists,
            r.best_goal_votes,
            awards.join(", ")
        ))
    }));
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block).scroll((app.scroll, 0)), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(60);
    let height = area.height.min(12);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let text = "\
1/2/3  Dashboard / Jogadores / Rodadas
p      Próximo período (Mensal → Histórico)
j/k    Rolar listas
h/l    Data anterior / seguinte (Rodadas)
r      Recarregar o arquivo do disco
?      Fechar ajuda
q      Sair";
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Ajuda")),
        popup,
    );
}
