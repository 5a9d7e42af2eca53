//! UI domain: level complete and defeat screens.

use bevy::prelude::*;

use crate::core::{GameState, RunConfig};

/// Marker for the end-of-level overlay
#[derive(Component)]
pub struct EndScreenUI;

/// Marker for the continue / retry button
#[derive(Component)]
pub struct ContinueButton;

/// Title, subtitle and button caption for a finished level
pub fn end_screen_text(
    state: &GameState,
    level_number: u32,
) -> Option<(String, String, &'static str)> {
    match state {
        GameState::LevelComplete => Some((
            "LEVEL COMPLETE".to_string(),
            format!("Level {} cleared.", level_number),
            "CONTINUE",
        )),
        GameState::Defeated => Some((
            "DEFEATED".to_string(),
            format!("Out of lives on level {}.", level_number),
            "RETRY",
        )),
        _ => None,
    }
}

pub(crate) fn spawn_end_screen(
    mut commands: Commands,
    state: Res<State<GameState>>,
    run_config: Res<RunConfig>,
) {
    let Some((title, subtitle, caption)) = end_screen_text(state.get(), run_config.level_number)
    else {
        return;
    };
    let title_color = match state.get() {
        GameState::LevelComplete => Color::srgb(0.95, 0.85, 0.3),
        _ => Color::srgb(0.8, 0.15, 0.15),
    };

    commands
        .spawn((
            EndScreenUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(subtitle),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(48.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    ContinueButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new(caption),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or [R], or click"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

/// Keyboard restarts are handled by the level domain; this covers the button.
pub(crate) fn handle_continue_button(
    button_query: Query<&Interaction, (With<ContinueButton>, Changed<Interaction>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        next_state.set(GameState::Level);
    }
}

pub(crate) fn despawn_end_screen(mut commands: Commands, query: Query<Entity, With<EndScreenUI>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
