use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::{Component, theme};
use crate::action::Action;
use crate::detail::{DetailField, DetailLine, DetailPanel};

const PAGE: i16 = 10;
const MAX_WIDTH: u16 = 90;
const PAD_X: u16 = 2;
const PAD_Y: u16 = 1;

pub struct DetailOverlayProps<'a> {
    pub panel: &'a DetailPanel,
    pub scroll: u16,
    pub is_focused: bool,
}

/// Modal card with everything known about one monster.
pub struct DetailOverlayView {
    modal: Modal,
    panel_area: Option<Rect>,
}

impl Default for DetailOverlayView {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            panel_area: None,
        }
    }
}

impl DetailOverlayView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel_area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(8).min(MAX_WIDTH);
        centered_rect(width, area.height.saturating_sub(4), area)
    }

    /// Largest useful scroll offset: the wrapped body height minus the rows
    /// visible at once, for a screen of size `area`.
    pub fn max_scroll(panel: &DetailPanel, area: Rect) -> u16 {
        let inner = Self::panel_area(area).inner(Margin::new(PAD_X, PAD_Y));
        let [_, body, _] = content_chunks(inner);
        let rows = body_paragraph(Self::text_lines(panel)).line_count(body.width);
        rows.saturating_sub(usize::from(body.height))
            .min(usize::from(u16::MAX)) as u16
    }

    pub fn text_lines(panel: &DetailPanel) -> Vec<Line<'static>> {
        panel
            .lines()
            .into_iter()
            .map(|line| match line {
                DetailLine::Grid(fields) => {
                    let mut spans = Vec::new();
                    for field in fields {
                        spans.extend(field_spans(&field, 28));
                    }
                    Line::from(spans)
                }
                DetailLine::Field(field) => Line::from(field_spans(&field, 0).to_vec()),
                DetailLine::Heading(title) => Line::styled(
                    title,
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ),
                DetailLine::Text(text) => {
                    Line::styled(format!("  {text}"), Style::default().fg(theme::TEXT_MAIN))
                }
                DetailLine::Blank => Line::raw(""),
            })
            .collect()
    }
}

fn content_chunks(content_area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Min(1),    // Body
        Constraint::Length(1), // Hints
    ])
    .areas(content_area)
}

fn body_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// `label: value`, the value padded to `width` when it sits in a grid.
fn field_spans(field: &DetailField, width: usize) -> [Span<'static>; 2] {
    let label = format!("{}: ", field.label);
    let pad = width.saturating_sub(label.chars().count() + field.value.chars().count());
    [
        Span::styled(label, Style::default().fg(theme::TEXT_DIM)),
        Span::styled(
            format!("{}{}", field.value, " ".repeat(pad)),
            Style::default().fg(theme::TEXT_MAIN),
        ),
    ]
}

impl Component<Action> for DetailOverlayView {
    type Props<'a> = DetailOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::DetailClose),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::DetailScroll(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::DetailScroll(1)),
                KeyCode::PageUp => Some(Action::DetailScroll(-PAGE)),
                KeyCode::PageDown => Some(Action::DetailScroll(PAGE)),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::DetailScroll(*delta as i16)),
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let inside = self
                    .panel_area
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                (!inside).then_some(Action::DetailClose)
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let panel_area = Self::panel_area(area);
        self.panel_area = Some(panel_area);

        let title = props.panel.title.clone();
        let lines = Self::text_lines(props.panel);
        let scroll = props.scroll;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = content_chunks(content_area);

            frame.render_widget(
                Paragraph::new(Line::styled(
                    title.clone(),
                    Style::default()
                        .fg(theme::ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                )),
                chunks[0],
            );
            let body = body_paragraph(lines.clone());
            let max = body
                .line_count(chunks[1].width)
                .saturating_sub(usize::from(chunks[1].height));
            let scroll = scroll.min(max.min(usize::from(u16::MAX)) as u16);
            frame.render_widget(body.scroll((scroll, 0)), chunks[1]);
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "↑/↓ scroll  PgUp/PgDn page  Esc close",
                    Style::default().fg(theme::TEXT_DIM),
                )),
                chunks[2],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: panel_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(theme::BG_PANEL),
                        padding: Padding::xy(PAD_X, PAD_Y),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DetailClose,
                render_content: &mut render_content,
            },
        );
    }
}
