use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::GameKind;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════╗
 ║   P O C K E T   ·   A R C A D E           ║
 ║   five tiny games, one terminal           ║
 ╚═══════════════════════════════════════════╝"#;

struct GameTile {
    kind: GameKind,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 5] = [
    GameTile { kind: GameKind::Snake, desc: "Eat, grow,\ndon't bite yourself", color: Color::Rgb(80, 220, 80), border_color: Color::Rgb(40, 120, 40) },
    GameTile { kind: GameKind::Tetris, desc: "Stack pieces,\nclear lines", color: Color::Rgb(100, 180, 255), border_color: Color::Rgb(50, 90, 140) },
    GameTile { kind: GameKind::Pong, desc: "First to 5\ntakes the match", color: Color::Rgb(230, 230, 230), border_color: Color::Rgb(110, 110, 110) },
    GameTile { kind: GameKind::Breakout, desc: "Smash every\nbrick", color: Color::Rgb(220, 80, 80), border_color: Color::Rgb(120, 40, 40) },
    GameTile { kind: GameKind::SpaceInvaders, desc: "Hold the line\nagainst waves", color: Color::Rgb(200, 120, 255), border_color: Color::Rgb(100, 60, 140) },
];

/// Key bindings per game, shared by the home panel and the in-game help overlay.
pub fn controls(kind: GameKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        GameKind::Snake => &[("Arrows", "Change direction"), ("Space / P", "Pause"), ("H", "Help"), ("R", "Restart")],
        GameKind::Tetris => &[
            ("← →", "Move piece"),
            ("↓", "Soft drop"),
            ("↑", "Rotate"),
            ("Space", "Hard drop"),
            ("P", "Pause"),
            ("H", "Help"),
            ("R", "Restart"),
        ],
        GameKind::Pong => &[("W / S", "Left paddle"), ("↑ / ↓", "Right paddle"), ("P", "Pause"), ("H", "Help"), ("R", "Restart")],
        GameKind::Breakout => &[("Mouse", "Move paddle"), ("← / →", "Move paddle"), ("P", "Pause"), ("H", "Help"), ("R", "Restart")],
        GameKind::SpaceInvaders => &[("← / →", "Move ship"), ("Space / ↑", "Shoot"), ("P", "Pause"), ("H", "Help"), ("R", "Restart")],
    }
}

fn render_game_tile(frame: &mut Frame, area: Rect, key: usize, tile: &GameTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{key}] "), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(tile.kind.title(), Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];
    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(desc_color))));
    }
    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn controls_lines(tile: &GameTile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", tile.kind.title()),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, action) in controls(tile.kind) {
        lines.push(Line::from(vec![
            Span::styled(format!("    {key:<16}"), Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(*action, Style::default().fg(Color::Rgb(140, 140, 140))),
        ]));
    }
    lines
}

fn navigation_lines() -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let text = Style::default().fg(Color::Rgb(140, 140, 140));
    [
        ("1-5", "Jump to a game"),
        ("← →", "Select game"),
        ("Enter", "Play"),
        ("Tab", "Next tab"),
        ("Esc", "Back to menu"),
        ("Q", "Quit"),
    ]
    .into_iter()
    .map(|(k, t)| Line::from(vec![Span::styled(format!("    {k:<10}"), key), Span::styled(t, text)]))
    .collect()
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Banner
            Constraint::Length(7), // Game tiles
            Constraint::Min(8),    // Controls area
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(super::ACCENT))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(super::ACCENT_DARK))
        .title(" Games: ←→ select, Enter to play ")
        .title_style(Style::default().fg(super::ACCENT).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[1]);
    frame.render_widget(games_block, chunks[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], i + 1, tile, selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    let nav = Paragraph::new(navigation_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
            .title(" Navigation "),
    );
    frame.render_widget(nav, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_TILES.len() - 1)];
    let ctrl = Paragraph::new(controls_lines(tile)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(tile.border_color))
            .title(" Controls "),
    );
    frame.render_widget(ctrl, ctrl_cols[1]);
}
