use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tourcal_api::datetime::{display_or_fallback, format_date, format_span, format_time};
use tourcal_api::{LikedSet, Match, Tournament};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const LIKED: &str = "♥";
const NOT_LIKED: &str = "♡";
const MISSING: &str = "N/A";

/// Rendered rows of the tournament list.
pub struct ListLines<'a> {
    pub lines: Vec<Line<'a>>,
    /// Index into `lines` of the row under the cursor.
    pub cursor_line: usize,
}

/// Two lines per tournament (header and date span), plus one per match when
/// the tournament is expanded.
pub fn tournament_lines<'a>(
    page: &[&'a Tournament],
    liked: &LikedSet,
    expanded: &HashSet<i64>,
    cursor: Option<usize>,
    now: DateTime<Utc>,
) -> ListLines<'a> {
    let mut lines = Vec::new();
    let mut cursor_line = 0;

    for (i, &t) in page.iter().enumerate() {
        let selected = cursor == Some(i);
        if selected {
            cursor_line = lines.len();
        }
        let is_expanded = expanded.contains(&t.id);
        lines.push(header_line(t, liked.contains(t.id), is_expanded, selected));

        let sport = if t.sport_name.is_empty() { "Unknown" } else { t.sport_name.as_str() };
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(format_span(t.display_span(now)), Style::default().fg(Color::Gray)),
            Span::styled(format!("  {sport}"), Style::default().fg(Color::Gray)),
            Span::styled(format!("  {}", t.level), Style::default().fg(Color::DarkGray)),
        ]));

        if is_expanded && t.has_matches() {
            lines.extend(t.matches.iter().map(|m| match_line(m, &t.start_date)));
        }
    }

    ListLines { lines, cursor_line }
}

fn header_line(t: &Tournament, liked: bool, expanded: bool, selected: bool) -> Line<'_> {
    let marker = if selected { "> " } else { "  " };
    let heart = if liked {
        Span::styled(LIKED, Style::default().fg(Color::Red))
    } else {
        Span::raw(NOT_LIKED)
    };
    let fold = match (t.has_matches(), expanded) {
        (false, _) => "",
        (true, true) => " ▲",
        (true, false) => " ▼",
    };

    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![
        Span::raw(marker),
        heart,
        Span::raw(" "),
        Span::styled(t.name.as_str(), name_style),
        Span::styled(fold, Style::default().fg(Color::Gray)),
    ])
}

fn match_line<'a>(m: &'a Match, tournament_start: &str) -> Line<'a> {
    let when = match display_or_fallback(&m.start_time, tournament_start) {
        Ok(at) => format!("{} {}", format_date(at), format_time(at)),
        Err(_) => "TBD".to_owned(),
    };
    let stage = or_missing(&m.stage);
    let venue = or_missing(&m.venue);

    Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("{} vs {}", m.team_a, m.team_b), Style::default().fg(Color::White)),
        Span::styled(format!("  {stage}"), Style::default().fg(Color::Cyan)),
        Span::raw(format!("  {when}")),
        Span::styled(format!("  {venue}"), Style::default().fg(Color::Gray)),
    ])
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() { MISSING } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tourcal_api::SportId;

    fn sample() -> Tournament {
        Tournament {
            id: 7,
            name: "Monsoon Cup".into(),
            image_url: String::new(),
            level: "National".into(),
            start_date: "2025-08-05T10:00:00Z".into(),
            end_date: Some("2025-08-07T10:00:00Z".into()),
            matches: vec![
                Match {
                    id: 1,
                    stage: "Final".into(),
                    team_a: "Falcons".into(),
                    team_b: "Tigers".into(),
                    start_time: "2025-08-07T10:00:00Z".into(),
                    venue: String::new(),
                    status: None,
                },
                Match {
                    id: 2,
                    stage: String::new(),
                    team_a: "Lions".into(),
                    team_b: "Bears".into(),
                    start_time: "later".into(),
                    venue: "Eden Gardens".into(),
                    status: None,
                },
            ],
            sport_id: SportId::Numeric(1),
            sport_name: String::new(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn collapsed_tournament_is_two_lines() {
        let t = sample();
        let out = tournament_lines(&[&t], &LikedSet::default(), &HashSet::new(), None, now());
        assert_eq!(out.lines.len(), 2);
        assert_eq!(text(&out.lines[0]), "  ♡ Monsoon Cup ▼");
        assert_eq!(text(&out.lines[1]), "    05 Aug 2025 - 07 Aug 2025  Unknown  National");
    }

    #[test]
    fn expanded_rows_fill_missing_fields() {
        let t = sample();
        let expanded = HashSet::from([7]);
        let liked = LikedSet::from_iter([7]);
        let out = tournament_lines(&[&t], &liked, &expanded, Some(0), now());

        assert_eq!(out.lines.len(), 4);
        assert_eq!(text(&out.lines[0]), "> ♥ Monsoon Cup ▲");
        assert_eq!(
            text(&out.lines[2]),
            "      Falcons vs Tigers  Final  07 Aug 2025 03:30 PM  N/A"
        );
        assert_eq!(
            text(&out.lines[3]),
            "      Lions vs Bears  N/A  05 Aug 2025 03:30 PM  Eden Gardens"
        );
    }

    #[test]
    fn cursor_line_accounts_for_expanded_rows() {
        let a = sample();
        let mut b = sample();
        b.id = 8;
        let expanded = HashSet::from([7]);
        let out = tournament_lines(&[&a, &b], &LikedSet::default(), &expanded, Some(1), now());
        assert_eq!(out.cursor_line, 4);
    }

    #[test]
    fn no_fold_marker_without_matches() {
        let mut t = sample();
        t.matches.clear();
        let out = tournament_lines(&[&t], &LikedSet::default(), &HashSet::from([7]), None, now());
        assert_eq!(out.lines.len(), 2);
        assert_eq!(text(&out.lines[0]), "  ♡ Monsoon Cup");
    }
}
