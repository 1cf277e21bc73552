use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{Component, theme};
use crate::action::Action;
use crate::state::AppState;
use crate::view::{CatalogView, ListRow, NO_RESULTS_HINT, NO_RESULTS_TITLE};

pub const LOADING_TEXT: &str = "Loading monster data...";
pub const FAILED_TITLE: &str = "Failed to load monster data";

pub struct CatalogListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Region sections and their monster cards as one selectable list.
pub struct CatalogList {
    list: SelectList,
}

impl Default for CatalogList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl CatalogList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per row: section headers carry the glyph and count, cards
    /// are indented under their section.
    pub fn row_lines(view: &CatalogView) -> Vec<Line<'static>> {
        view.rows()
            .into_iter()
            .filter_map(|row| match row {
                ListRow::Header { section } => {
                    let section = view.sections.get(section)?;
                    Some(Line::from(vec![
                        Span::styled(
                            format!("{} ", section.glyph()),
                            Style::default().fg(theme::ACCENT),
                        ),
                        Span::styled(
                            section.header(),
                            Style::default()
                                .fg(theme::TEXT_MAIN)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]))
                }
                ListRow::Card { section, card } => {
                    let card = view.card(section, card)?;
                    Some(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(card.name.clone(), Style::default().fg(theme::TEXT_MAIN)),
                        Span::styled(
                            format!(
                                "  type {}  hp {}  round {}",
                                card.kind, card.hp, card.spawn_round
                            ),
                            Style::default().fg(theme::TEXT_DIM),
                        ),
                    ]))
                }
            })
            .collect()
    }

    fn list_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let items = Self::row_lines(&state.view);
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.cursor.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::ListSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, props).into_iter().collect()
    }

    fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let chunks = Layout::vertical([
            Constraint::Percentage(35),
            Constraint::Min(1),
        ])
        .split(area);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);
    }
}

impl Component<Action> for CatalogList {
    type Props<'a> = CatalogListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::F(5) => vec![Action::CatalogLoad],
                KeyCode::Char('/') => vec![Action::SearchStart],
                KeyCode::Char('r') => vec![Action::FilterRegionNext],
                KeyCode::Char('R') => vec![Action::FilterRegionPrev],
                KeyCode::Char('t') => vec![Action::FilterTypeNext],
                KeyCode::Char('T') => vec![Action::FilterTypePrev],
                KeyCode::Char('x') => vec![Action::FilterClear],
                KeyCode::Char('e') => vec![Action::SectionExpandAll],
                KeyCode::Char('c') => vec![Action::SectionCollapseAll],
                KeyCode::Char('j') => vec![Action::ListMove(1)],
                KeyCode::Char('k') => vec![Action::ListMove(-1)],
                KeyCode::Enter | KeyCode::Char(' ') => vec![Action::ListActivate],
                _ => self.list_event(event, state),
            },
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let mut actions = self.list_event(event, state);
                if actions
                    .iter()
                    .any(|action| matches!(action, Action::ListSelect(_)))
                {
                    actions.push(Action::ListActivate);
                }
                actions
            }
            EventKind::Scroll { delta, .. } => vec![Action::ListMove(*delta as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if props.is_focused {
                theme::ACCENT
            } else {
                theme::TEXT_DIM
            }))
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(error) = state.catalog.error() {
            let mut lines = vec![
                Line::styled(
                    FAILED_TITLE,
                    Style::default()
                        .fg(theme::ERROR)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
            ];
            lines.extend(
                error
                    .lines()
                    .map(|line| Line::styled(line.to_string(), Style::default().fg(theme::TEXT_DIM))),
            );
            Self::render_message(frame, inner, lines);
            return;
        }

        if state.is_loading() {
            Self::render_message(
                frame,
                inner,
                vec![Line::styled(LOADING_TEXT, Style::default().fg(theme::TEXT_DIM))],
            );
            return;
        }

        if state.view.is_no_results() {
            Self::render_message(
                frame,
                inner,
                vec![
                    Line::styled(
                        NO_RESULTS_TITLE,
                        Style::default()
                            .fg(theme::TEXT_MAIN)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(NO_RESULTS_HINT, Style::default().fg(theme::TEXT_DIM)),
                ],
            );
            return;
        }

        let items = Self::row_lines(&state.view);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.cursor.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::ListSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(theme::TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(theme::BG_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::Monster;
    use crate::reducer::reducer;
    use serde_json::json;
    use tui_dispatch::testing::*;
    use tui_dispatch::DataResource;

    fn loaded_state() -> AppState {
        let monsters: Vec<Monster> = serde_json::from_value(json!([
            { "name": "Bat", "region": "Cave", "type": "Beast", "hp": 8 },
            { "name": "Slime", "region": "Plains" }
        ]))
        .unwrap();
        let mut state = AppState::default();
        reducer(&mut state, Action::CatalogDidLoad(monsters));
        state
    }

    fn actions_for(state: &AppState, code: &str) -> Vec<Action> {
        let mut component = CatalogList::new();
        component
            .handle_event(
                &EventKind::Key(key(code)),
                CatalogListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_key_map() {
        let state = loaded_state();
        actions_for(&state, "/").assert_first(Action::SearchStart);
        actions_for(&state, "r").assert_first(Action::FilterRegionNext);
        actions_for(&state, "t").assert_first(Action::FilterTypeNext);
        actions_for(&state, "e").assert_first(Action::SectionExpandAll);
        actions_for(&state, "enter").assert_first(Action::ListActivate);
        actions_for(&state, "j").assert_first(Action::ListMove(1));
        actions_for(&state, "q").assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let state = loaded_state();
        let mut component = CatalogList::new();
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("q")),
                CatalogListProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_row_lines_follow_expansion() {
        let mut state = loaded_state();
        let text = |state: &AppState| -> Vec<String> {
            CatalogList::row_lines(&state.view)
                .iter()
                .map(|line| line.to_string())
                .collect()
        };
        assert_eq!(text(&state), ["▼ Cave (1)", "▼ Plains (1)"]);

        reducer(&mut state, Action::SectionToggle("Cave".into()));
        let lines = text(&state);
        assert_eq!(lines[0], "▲ Cave (1)");
        assert_eq!(lines[1], "    Bat  type Beast  hp 8  round unknown");
    }

    #[test]
    fn test_render_loading_and_failure() {
        let mut render = RenderHarness::new(70, 12);
        let mut component = CatalogList::new();

        let state = AppState {
            catalog: DataResource::Loading,
            ..Default::default()
        };
        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                CatalogListProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains(LOADING_TEXT));

        let state = AppState {
            catalog: DataResource::Failed("fallback missing\nMake sure that:".into()),
            ..Default::default()
        };
        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                CatalogListProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains(FAILED_TITLE));
        assert!(output.contains("Make sure that:"));
    }
}
