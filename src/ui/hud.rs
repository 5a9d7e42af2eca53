//! UI domain: lives and diamond counters.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::collectables::CollectorGoal;
use crate::core::UiNotice;

pub(crate) const HUD_PADDING: f32 = 16.0;

const LIVES_COLOR: Color = Color::srgb(0.9, 0.3, 0.35);
const DIAMOND_COLOR: Color = Color::srgb(0.4, 0.85, 0.95);
const PURPLE_COLOR: Color = Color::srgb(0.65, 0.3, 0.95);

/// Last values announced through `UiNotice`
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HudCounters {
    pub lives: i32,
    pub diamonds: u32,
    pub purple: u32,
}

impl HudCounters {
    pub fn apply(&mut self, notice: UiNotice) {
        match notice {
            UiNotice::Lives(lives) => self.lives = lives.max(0),
            UiNotice::Diamonds(count) => self.diamonds = count,
            UiNotice::PurpleDiamonds(count) => self.purple = count,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Lives,
    Diamonds,
    Purple,
}

pub fn hud_label(field: HudField, counters: &HudCounters, goal: &CollectorGoal) -> String {
    match field {
        HudField::Lives => format!("x {}", counters.lives),
        HudField::Diamonds => format!("{}", counters.diamonds),
        HudField::Purple => format!("{} / {}", counters.purple, goal.goal),
    }
}

/// Marker for the HUD root container
#[derive(Component)]
pub struct HudUI;

pub(crate) fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            for (field, color) in [
                (HudField::Lives, LIVES_COLOR),
                (HudField::Diamonds, DIAMOND_COLOR),
                (HudField::Purple, PURPLE_COLOR),
            ] {
                parent
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|row| {
                        // Icon
                        row.spawn((
                            Node {
                                width: Val::Px(16.0),
                                height: Val::Px(16.0),
                                ..default()
                            },
                            BackgroundColor(color),
                        ));
                        row.spawn((
                            field,
                            Text::new(""),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.9, 0.9, 0.9)),
                        ));
                    });
            }
        });
}

pub(crate) fn collect_notices(
    mut notices: MessageReader<UiNotice>,
    mut counters: ResMut<HudCounters>,
) {
    for notice in notices.read() {
        counters.apply(*notice);
    }
}

pub(crate) fn update_hud_text(
    counters: Res<HudCounters>,
    goal: Res<CollectorGoal>,
    mut query: Query<(&HudField, &mut Text)>,
) {
    if !counters.is_changed() && !goal.is_changed() {
        return;
    }
    for (field, mut text) in &mut query {
        **text = hud_label(*field, &counters, &goal);
    }
}
