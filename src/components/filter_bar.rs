use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;

use super::{Component, theme};
use crate::action::Action;
use crate::state::AppState;

pub struct FilterBarProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search query, region/type selections and match counts.
#[derive(Default)]
pub struct FilterBar;

impl FilterBar {
    fn search_span(state: &AppState) -> Span<'static> {
        let query = &state.criteria.search;
        if state.search_active {
            Span::styled(
                format!("/{query}_"),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        } else if query.is_empty() {
            Span::styled("/ search", Style::default().fg(theme::TEXT_DIM))
        } else {
            Span::styled(format!("/{query}"), Style::default().fg(theme::TEXT_MAIN))
        }
    }

    fn choice_spans(label: &str, value: Option<&str>) -> [Span<'static>; 2] {
        let value_style = match value {
            Some(_) => Style::default()
                .fg(theme::ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(theme::TEXT_DIM),
        };
        [
            Span::styled(format!("  {label}: "), Style::default().fg(theme::TEXT_DIM)),
            Span::styled(value.unwrap_or("all").to_string(), value_style),
        ]
    }
}

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps<'a>;

    /// Only typing while search mode is on; everything else belongs to the list.
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.state.search_active {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let total = state.loaded_catalog().map(|catalog| catalog.len()).unwrap_or(0);

        let mut spans = vec![Self::search_span(state)];
        spans.extend(Self::choice_spans("region", state.criteria.region.as_deref()));
        spans.extend(Self::choice_spans("type", state.criteria.kind.as_deref()));
        spans.push(Span::styled(
            format!("  {}/{} shown", state.filtered.len(), total),
            Style::default().fg(theme::TEXT_DIM),
        ));

        let border = if state.search_active {
            theme::ACCENT
        } else {
            theme::TEXT_DIM
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " Monsters ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_ignores_keys_outside_search_mode() {
        let mut component = FilterBar;
        let state = AppState::default();
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("a")),
                FilterBarProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_typing_in_search_mode() {
        let mut component = FilterBar;
        let state = AppState {
            search_active: true,
            ..Default::default()
        };
        let props = || FilterBarProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("g")), props())
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput('g'));

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("esc")), props())
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchCancel);
    }

    #[test]
    fn test_render_shows_selections() {
        let mut render = RenderHarness::new(80, 3);
        let mut component = FilterBar;
        let mut state = AppState::default();
        state.criteria.search = "gob".into();
        state.criteria.region = Some("Cave".into());

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                FilterBarProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("/gob"));
        assert!(output.contains("region: Cave"));
        assert!(output.contains("type: all"));
    }
}
