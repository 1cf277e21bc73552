//! Store, component and render flows combined with EffectStoreTestHarness

use monsterdex::{
    action::Action,
    components::{Component, MonsterScreen, MonsterScreenProps},
    effect::Effect,
    monster::Monster,
    reducer::reducer,
    state::{AppState, Sources},
};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::{EventKind, NumericComponentId};

fn dataset() -> Vec<Monster> {
    serde_json::from_value(json!([
        {
            "name": "Goblin",
            "region": "Forest",
            "type": "Humanoid",
            "hp": 12,
            "spawnRound": 2,
            "skills": [{ "name": "Stab", "damage": 4 }, "无"],
            "background": "Lives in burrows."
        },
        { "name": "Wolf", "region": "Forest", "type": "Beast", "hp": 15 },
        { "name": "Yeti", "region": "Peaks", "type": "Beast", "hp": 90 }
    ]))
    .unwrap()
}

fn screen_actions(state: &AppState, screen: &mut MonsterScreen, event: &EventKind) -> Vec<Action> {
    screen
        .handle_event(
            event,
            MonsterScreenProps {
                state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect()
}

#[test]
fn test_load_flow_with_harness() {
    let sources = Sources {
        primary: "http://localhost:3000/monsters.json".into(),
        fallback: "monsters_data.json".into(),
    };
    let mut harness = EffectStoreTestHarness::new(AppState::new(sources), reducer);

    harness.dispatch_collect(Action::CatalogLoad);
    harness.assert_state(|s| s.catalog.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadCatalog { primary, .. } if primary.starts_with("http://"))
    });

    harness.complete_action(Action::CatalogDidLoad(dataset()));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.catalog.is_loaded());
    harness.assert_state(|s| s.view.sections.len() == 2);
    harness.assert_state(|s| s.view.sections.iter().all(|section| !section.expanded));
}

#[test]
fn test_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CatalogLoad);
    harness.complete_action(Action::CatalogDidError("both sources failed".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.catalog.is_failed());
    harness.assert_state(|s| s.catalog.error() == Some("both sources failed"));
}

#[test]
fn test_search_typing_through_screen() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CatalogDidLoad(dataset()));
    let mut screen = MonsterScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/", |state, event| {
        screen_actions(state, &mut screen, &event.kind)
    });
    actions.assert_first(Action::SearchStart);
    harness.dispatch_collect(Action::SearchStart);

    // While searching, letters feed the query instead of triggering shortcuts.
    let actions = harness.send_keys::<NumericComponentId, _, _>("y e", |state, event| {
        screen_actions(state, &mut screen, &event.kind)
    });
    actions.assert_count(2);
    actions.assert_first(Action::SearchInput('y'));
    harness.dispatch_all(actions);

    harness.assert_state(|s| s.criteria.search == "ye");
    harness.assert_state(|s| s.filtered == vec![2]);
    harness.assert_state(|s| s.view.section("Peaks").is_some_and(|section| section.expanded));
}

#[test]
fn test_detail_overlay_takes_over_keys() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CatalogDidLoad(dataset()));
    harness.dispatch_collect(Action::DetailShow("Goblin".into()));
    let mut screen = MonsterScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("down", |state, event| {
        screen_actions(state, &mut screen, &event.kind)
    });
    actions.assert_first(Action::DetailScroll(1));
    harness.dispatch_all(actions);
    harness.assert_state(|s| s.detail.as_ref().is_some_and(|detail| detail.scroll == 1));

    let actions = harness.send_keys::<NumericComponentId, _, _>("esc", |state, event| {
        screen_actions(state, &mut screen, &event.kind)
    });
    actions.assert_first(Action::DetailClose);
    harness.dispatch_all(actions);
    harness.assert_state(|s| s.detail.is_none());
}

fn left_click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn test_backdrop_click_closes_detail() {
    let mut state = AppState::default();
    reducer(&mut state, Action::CatalogDidLoad(dataset()));
    reducer(&mut state, Action::DetailShow("Goblin".into()));
    let mut screen = MonsterScreen::new();

    // The overlay learns where its panel sits when it is drawn.
    let mut render = RenderHarness::new(80, 24);
    render.render_to_string_plain(|frame| {
        screen.render(
            frame,
            frame.area(),
            MonsterScreenProps {
                state: &state,
                is_focused: true,
            },
        );
    });

    let inside = screen_actions(&state, &mut screen, &left_click(40, 12));
    inside.assert_empty();

    let backdrop = screen_actions(&state, &mut screen, &left_click(0, 0));
    backdrop.assert_count(1);
    backdrop.assert_first(Action::DetailClose);

    for action in backdrop {
        reducer(&mut state, action);
    }
    assert!(state.detail.is_none());
}

#[test]
fn test_open_card_from_list() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CatalogDidLoad(dataset()));
    let mut screen = MonsterScreen::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter j enter", |state, event| {
        screen_actions(state, &mut screen, &event.kind)
    });
    actions.assert_count(3);
    harness.dispatch_all(actions);

    harness.assert_state(|s| s.view.section("Forest").is_some_and(|section| section.expanded));
    harness.assert_state(|s| {
        s.detail_monster()
            .is_some_and(|monster| monster.name == "Goblin")
    });
}

#[test]
fn test_render_after_load() {
    let mut state = AppState::default();
    reducer(&mut state, Action::CatalogDidLoad(dataset()));
    reducer(&mut state, Action::SectionExpandAll);

    let mut render = RenderHarness::new(90, 20);
    let mut screen = MonsterScreen::new();
    let output = render.render_to_string_plain(|frame| {
        screen.render(
            frame,
            frame.area(),
            MonsterScreenProps {
                state: &state,
                is_focused: true,
            },
        );
    });

    assert!(output.contains("Forest (2)"));
    assert!(output.contains("Peaks (1)"));
    assert!(output.contains("Wolf"));
    assert!(output.contains("Goblin"));
}
