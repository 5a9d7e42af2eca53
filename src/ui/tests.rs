//! UI domain: HUD counter and end screen text tests.

use super::{HudCounters, HudField, end_screen_text, hud_label};
use crate::collectables::CollectorGoal;
use crate::core::{GameState, UiNotice};

// -----------------------------------------------------------------------------
// HUD
// -----------------------------------------------------------------------------

#[test]
fn test_notices_update_counters() {
    let mut counters = HudCounters::default();
    counters.apply(UiNotice::Lives(3));
    counters.apply(UiNotice::Diamonds(2));
    counters.apply(UiNotice::PurpleDiamonds(4));
    counters.apply(UiNotice::Lives(2));

    assert_eq!(
        counters,
        HudCounters {
            lives: 2,
            diamonds: 2,
            purple: 4
        }
    );
}

#[test]
fn test_lives_never_show_negative() {
    let mut counters = HudCounters::default();
    counters.apply(UiNotice::Lives(-1));
    assert_eq!(counters.lives, 0);
}

#[test]
fn test_labels() {
    let counters = HudCounters {
        lives: 3,
        diamonds: 7,
        purple: 2,
    };
    let goal = CollectorGoal::new(6);

    assert_eq!(hud_label(HudField::Lives, &counters, &goal), "x 3");
    assert_eq!(hud_label(HudField::Diamonds, &counters, &goal), "7");
    assert_eq!(hud_label(HudField::Purple, &counters, &goal), "2 / 6");
}

// -----------------------------------------------------------------------------
// End screens
// -----------------------------------------------------------------------------

#[test]
fn test_end_screens_only_for_finished_levels() {
    let (title, subtitle, caption) = end_screen_text(&GameState::LevelComplete, 2).unwrap();
    assert_eq!(title, "LEVEL COMPLETE");
    assert!(subtitle.contains('2'));
    assert_eq!(caption, "CONTINUE");

    let (title, _, caption) = end_screen_text(&GameState::Defeated, 1).unwrap();
    assert_eq!(title, "DEFEATED");
    assert_eq!(caption, "RETRY");

    assert!(end_screen_text(&GameState::Level, 1).is_none());
    assert!(end_screen_text(&GameState::Boot, 1).is_none());
}
