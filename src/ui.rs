//! Rendering for the trends dashboard.
//!
//! One frame is the dashboard proper (header, ranked trend list, status
//! line) plus whatever overlay is active: trend detail with its analysis,
//! the blog draft modal, the country picker, or an alert. Overlays draw over
//! a cleared centered rect; all state is read from [`AppState`], never
//! mutated here beyond the list's scroll state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::{
    countries,
    state::{AppState, LanguageMode, Modal},
    theme::theme,
    util::truncate_to_width,
};

/// Render the full frame: dashboard plus any overlay (detail, blog, modal).
pub fn draw(f: &mut Frame, app: &mut AppState) {
    draw_dashboard(f, app);
    if app.selected_trend.is_some() {
        render_detail(f, app, f.area());
    }
    if app.blog_open {
        render_blog(f, app, f.area());
    }
    render_modals(f, app, f.area());
}

/// Render the dashboard proper (header, trend list, status line).
///
/// Split out from [`draw`] so snapshot capture can render the board without
/// whatever overlay happens to be open.
pub fn draw_dashboard(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();

    // Opaque background; snapshots must not show through.
    let bg = Block::default().style(Style::default().bg(th.base));
    f.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_trend_list(f, app, chunks[1]);
    render_status_line(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let flag = countries::flag(&app.country);
    let name = countries::name_local(&app.country);
    let mode = match app.language_mode {
        LanguageMode::Original => "원문",
        LanguageMode::Translated => "번역",
    };
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    let updated = app
        .last_updated
        .map(|t| format!("갱신 {}", t.format("%H:%M")))
        .unwrap_or_default();

    let mut right = vec![Span::styled(clock, Style::default().fg(th.subtext0))];
    if !updated.is_empty() {
        right.insert(0, Span::raw("  "));
        right.insert(0, Span::styled(updated, Style::default().fg(th.overlay1)));
    }

    let left = Line::from(vec![
        Span::styled(
            "실시간 인기 검색어",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{flag} {name}"), Style::default().fg(th.text)),
        Span::raw("  "),
        Span::styled(format!("[{mode}]"), Style::default().fg(th.sapphire)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.surface2))
        .style(Style::default().bg(th.mantle));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(22)])
        .split(inner);
    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(
        Paragraph::new(Line::from(right)).right_aligned(),
        cols[1],
    );
}

fn render_trend_list(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();

    if app.loading || app.translating {
        let msg = if app.loading {
            "트렌드를 불러오는 중..."
        } else {
            "번역 중..."
        };
        let para = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
        )))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.surface2)),
        );
        let rect = centered_rect(area, area.width.saturating_sub(4).min(50), 3);
        f.render_widget(para, rect);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .trends
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut segs = vec![
                Span::styled(
                    format!("{:>2}. ", i + 1),
                    Style::default().fg(th.overlay1),
                ),
                Span::styled(
                    t.title.clone(),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
            ];
            if !t.approx_traffic.is_empty() {
                segs.push(Span::styled(
                    format!("  {}", t.approx_traffic),
                    Style::default().fg(th.yellow),
                ));
            }
            segs.push(Span::styled(
                format!("  {}", t.source),
                Style::default().fg(th.overlay2),
            ));
            let mut lines = vec![Line::from(segs)];
            if let Some(news) = t.news_items.first() {
                lines.push(Line::from(Span::styled(
                    format!("      {}", truncate_to_width(&news.title, width)),
                    Style::default().fg(th.subtext0),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" 트렌드 ({}) ", app.trends.len()),
                    Style::default().fg(th.overlay1),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.surface2)),
        )
        .highlight_style(Style::default().fg(th.crust).bg(th.lavender))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let line = if let Some(toast) = &app.toast_message {
        Line::from(Span::styled(
            toast.clone(),
            Style::default().fg(th.green).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut hints = vec![
            "q 종료",
            "r 새로고침",
            "c 국가",
            "Enter 상세",
            "s 캡처",
            "b 블로그",
        ];
        if !app.at_home() {
            hints.insert(2, "t 언어");
        }
        Line::from(Span::styled(
            hints.join("  "),
            Style::default().fg(th.overlay1),
        ))
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.mantle)),
        area,
    );
}

fn render_detail(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let Some(trend) = &app.selected_trend else {
        return;
    };

    let w = area.width.saturating_sub(8).min(100);
    let h = area.height.saturating_sub(4).min(28);
    let rect = centered_rect(area, w, h);
    f.render_widget(Clear, rect);

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            trend.title.clone(),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", trend.approx_traffic),
            Style::default().fg(th.yellow),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        trend.pub_date.clone(),
        Style::default().fg(th.overlay1),
    )));
    lines.push(Line::from(""));
    if !trend.description.is_empty() {
        lines.push(Line::from(Span::styled(
            trend.description.clone(),
            Style::default().fg(th.text),
        )));
        lines.push(Line::from(""));
    }

    // AI analysis section
    lines.push(Line::from(Span::styled(
        "AI 분석",
        Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
    )));
    if app.analyzing {
        lines.push(Line::from(Span::styled(
            "분석 중...",
            Style::default().fg(th.yellow),
        )));
    } else if let Some(analysis) = &app.analysis {
        lines.push(Line::from(Span::styled(
            analysis.summary.clone(),
            Style::default().fg(th.text),
        )));
        lines.push(Line::from(Span::styled(
            analysis.reason.clone(),
            Style::default().fg(th.subtext0),
        )));
        if !analysis.tags.is_empty() {
            lines.push(Line::from(Span::styled(
                analysis
                    .tags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect::<Vec<_>>()
                    .join(" "),
                Style::default().fg(th.green),
            )));
        }
    }
    lines.push(Line::from(""));

    if !trend.news_items.is_empty() {
        lines.push(Line::from(Span::styled(
            "관련 뉴스",
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        )));
        for news in &trend.news_items {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(th.overlay1)),
                Span::styled(news.title.clone(), Style::default().fg(th.text)),
                Span::styled(
                    format!("  ({})", news.source),
                    Style::default().fg(th.overlay2),
                ),
            ]));
            if !news.snippet.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", news.snippet),
                    Style::default().fg(th.subtext0),
                )));
            }
        }
    }

    let para = Paragraph::new(lines)
        .style(Style::default().fg(th.text).bg(th.mantle))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    " 상세 보기 (Esc 닫기) ",
                    Style::default().fg(th.mauve),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.mauve))
                .style(Style::default().bg(th.mantle)),
        );
    f.render_widget(para, rect);
}

fn render_blog(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let w = area.width.saturating_sub(6).min(110);
    let h = area.height.saturating_sub(2).min(34);
    let rect = centered_rect(area, w, h);
    f.render_widget(Clear, rect);

    let mut lines: Vec<Line<'static>> = Vec::new();
    if app.generating_blog {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "블로그 초안 생성 중...",
            Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
        )));
    } else {
        for raw in app.blog_content.lines() {
            lines.push(Line::from(Span::styled(
                raw.to_string(),
                Style::default().fg(th.text),
            )));
        }
        if app.blog_image.is_some() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[대시보드 캡처 첨부됨]",
                Style::default().fg(th.green),
            )));
        }
    }

    let para = Paragraph::new(lines)
        .style(Style::default().fg(th.text).bg(th.mantle))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(
                    " 블로그 초안 (e 내보내기, Esc 닫기) ",
                    Style::default().fg(th.green),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.green))
                .style(Style::default().bg(th.mantle)),
        );
    f.render_widget(para, rect);
}

/// Render modal overlays: the alert box and the country picker.
fn render_modals(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    match &app.modal {
        Modal::None => {}
        Modal::Alert { message } => {
            let w = area.width.saturating_sub(10).min(70);
            let rect = centered_rect(area, w, 7);
            f.render_widget(Clear, rect);
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(message.clone(), Style::default().fg(th.text))),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter 또는 Esc로 닫기",
                    Style::default().fg(th.subtext0),
                )),
            ];
            let para = Paragraph::new(lines)
                .centered()
                .style(Style::default().fg(th.text).bg(th.mantle))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(Span::styled(
                            " 알림 ",
                            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
                        ))
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .border_style(Style::default().fg(th.red))
                        .style(Style::default().bg(th.mantle)),
                );
            f.render_widget(para, rect);
        }
        Modal::CountryPicker { selected } => {
            let w = area.width.saturating_sub(20).min(44);
            let h = area.height.saturating_sub(4).min(24);
            let rect = centered_rect(area, w, h);
            f.render_widget(Clear, rect);

            // Keep the highlighted row inside the visible window.
            let visible = rect.height.saturating_sub(2) as usize;
            let first = selected.saturating_sub(visible.saturating_sub(1) / 2).min(
                countries::COUNTRIES
                    .len()
                    .saturating_sub(visible.max(1)),
            );
            let lines: Vec<Line<'static>> = countries::COUNTRIES
                .iter()
                .enumerate()
                .skip(first)
                .take(visible.max(1))
                .map(|(i, c)| {
                    let style = if i == *selected {
                        Style::default().fg(th.crust).bg(th.lavender)
                    } else {
                        Style::default().fg(th.text)
                    };
                    Line::from(Span::styled(
                        format!(" {} {} ({})", c.flag, c.name_local, c.code),
                        style,
                    ))
                })
                .collect();
            let para = Paragraph::new(lines)
                .style(Style::default().fg(th.text).bg(th.mantle))
                .block(
                    Block::default()
                        .title(Span::styled(
                            " 국가 선택 ",
                            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
                        ))
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(th.sapphire))
                        .style(Style::default().bg(th.mantle)),
                );
            f.render_widget(para, rect);
        }
    }
}

fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TrendRecord;
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with_trends(n: usize) -> AppState {
        let mut app = AppState::default();
        app.trends = (0..n)
            .map(|i| TrendRecord {
                title: format!("trend {i}"),
                approx_traffic: "1,000+".into(),
                ..Default::default()
            })
            .collect();
        app.list_state.select(Some(0));
        app
    }

    #[test]
    fn dashboard_renders_without_panicking_at_small_sizes() {
        for (w, h) in [(20u16, 6u16), (80, 24), (160, 50)] {
            let backend = TestBackend::new(w, h);
            let mut term = Terminal::new(backend).unwrap();
            let mut app = app_with_trends(10);
            term.draw(|f| draw(f, &mut app)).unwrap();
        }
    }

    #[test]
    fn overlays_render_on_top_of_dashboard() {
        let backend = TestBackend::new(100, 30);
        let mut term = Terminal::new(backend).unwrap();
        let mut app = app_with_trends(3);
        app.selected_trend = Some(app.trends[0].clone());
        app.analyzing = true;
        app.blog_open = true;
        app.generating_blog = true;
        app.modal = Modal::CountryPicker { selected: 5 };
        term.draw(|f| draw(f, &mut app)).unwrap();
    }

    #[test]
    fn centered_rect_never_exceeds_area() {
        let area = Rect::new(0, 0, 30, 10);
        let r = centered_rect(area, 100, 100);
        assert!(r.width <= area.width && r.height <= area.height);
    }
}
