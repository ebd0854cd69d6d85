use chrono::Utc;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::calendar::{CALENDAR_WIDTH, CalendarView};
use crate::components::tournament_list::tournament_lines;
use crate::state::app_state::Focus;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use tourcal_api::SportFilter;
use tourcal_api::calendar::month_label;
use tourcal_api::screen::DataSource;

static TABS: &[&str; 2] = &["Calendar", "Help"];

const HELP_TEXT: &str = "\
Global
  q / Ctrl-c   quit
  1            calendar
  ?            help (Esc to leave)
  Tab          switch between calendar and list
  [ ] or < >   previous / next month
  /            search by name (Enter or Esc to finish)
  s            pick a sport
  r            retry loading tournaments
  f            full screen
  \"            toggle log pane

Calendar
  h j k l      move the day cursor
  Enter        select / unselect the day
  x            clear the day

List
  j k          move (scrolling past the end loads more)
  Enter        show / hide matches
  l            like / unlike";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Calendar => {
                draw_filter_bar(f, layout.filter_bar, app);
                draw_calendar(f, layout.calendar, app);
                draw_tournaments(f, layout.list, app);
                if app.state.focus == Focus::SportPicker {
                    draw_sport_picker(f, layout.list, app);
                }
            }
            MenuItem::Help => {
                let bottom = if app.state.show_logs { layout.logs.y } else { f.area().bottom() };
                let area = Rect {
                    height: bottom.saturating_sub(layout.filter_bar.y),
                    ..layout.filter_bar
                };
                draw_help(f, area);
            }
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn focus_color(app: &App, focus: Focus) -> Color {
    if app.state.focus == focus { Color::Cyan } else { Color::White }
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Calendar => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let source = match app.state.screen.source() {
        DataSource::Empty => "",
        DataSource::Cached => "cached ",
        DataSource::Live => "live ",
    };
    let status = Paragraph::new(source)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(status, tab_bar[1]);
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let [search_area, sport_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(area);

    let params = app.state.screen.params();
    let searching = app.state.focus == Focus::Search;
    let search_text = if params.search_text.is_empty() && !searching {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else if searching {
        Span::raw(format!("{}_", params.search_text))
    } else {
        Span::raw(params.search_text.as_str())
    };
    f.render_widget(
        Paragraph::new(Line::from(search_text))
            .block(default_border(focus_color(app, Focus::Search)).title(" Search ")),
        search_area,
    );

    let sport = match &params.sport_filter {
        SportFilter::All => SportFilter::SENTINEL_NAME.to_owned(),
        SportFilter::Sport(id) => app
            .state
            .screen
            .sports()
            .iter()
            .find(|s| s.id.matches(id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string()),
    };
    f.render_widget(
        Paragraph::new(sport).block(default_border(focus_color(app, Focus::SportPicker)).title(" Sport (s) ")),
        sport_area,
    );
}

fn draw_calendar(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(focus_color(app, Focus::Calendar)).title(" Calendar ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let screen = &app.state.screen;
    let (title, cells) = match (month_label(screen.year(), screen.month()), screen.grid()) {
        (Ok(title), Ok(cells)) => (title, cells),
        (Err(e), _) | (_, Err(e)) => {
            draw_placeholder(f, inner, &e.to_string());
            return;
        }
    };
    let title = format!("‹ {title} ›");
    let cursor = (app.state.focus == Focus::Calendar).then_some(app.state.day_cursor);

    let [grid_area] = Layout::horizontal([Constraint::Length(CALENDAR_WIDTH)]).areas(inner);
    f.render_widget(CalendarView { title: &title, cells: &cells, cursor }, grid_area);
}

fn draw_tournaments(f: &mut Frame, area: Rect, app: &App) {
    let screen = &app.state.screen;
    let page = screen.visible_page();
    let total = screen.filtered().len();

    let title = match screen.selected_day() {
        Some(day) => format!(" Tournaments on {day:02} ({total}) "),
        None => format!(" Tournaments ({total}) "),
    };
    let block = default_border(focus_color(app, Focus::List)).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [notice_area, body] = if screen.last_error.is_some() {
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner)
    } else {
        [Rect::ZERO, inner]
    };
    if let Some(err) = screen.last_error.as_deref() {
        f.render_widget(
            Paragraph::new(format!("{err} Press r to retry.")).style(Style::default().fg(Color::Red)),
            notice_area,
        );
    }

    if page.is_empty() {
        let msg = if screen.source() == DataSource::Empty && screen.last_error.is_none() {
            "Loading tournaments..."
        } else {
            "No sports event"
        };
        draw_placeholder(f, body, msg);
        return;
    }

    let cursor = (app.state.focus == Focus::List).then_some(app.state.list_cursor);
    let rendered = tournament_lines(&page, &app.state.liked, &app.state.expanded, cursor, Utc::now());

    let mut lines = rendered.lines;
    if screen.pager().is_loading_more() {
        lines.push(Line::styled("  Loading more...", Style::default().fg(Color::Gray)));
    } else if screen.has_more() {
        lines.push(Line::styled(
            format!("  {} of {total} shown, scroll down for more", page.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let mut state = ListState::default().with_selected(cursor.map(|_| rendered.cursor_line));
    f.render_stateful_widget(List::new(items), body, &mut state);
}

fn draw_sport_picker(f: &mut Frame, area: Rect, app: &App) {
    let sports = app.state.screen.sports();
    let height = (sports.len() as u16 + 2).min(area.height);
    let width = 30.min(area.width);
    let popup = Rect::new(area.x + area.width.saturating_sub(width), area.y, width, height);

    let items: Vec<ListItem> = sports.iter().map(|s| ListItem::new(s.name.as_str())).collect();
    let list = List::new(items)
        .block(default_border(Color::Cyan).title(" Sport "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.state.sport_cursor));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
