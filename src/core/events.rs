//! Core domain: fire-and-forget notifications for audio and UI.

use bevy::ecs::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundAction {
    Play,
    Stop,
}

/// Named sound trigger. Consumers never block the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCue {
    pub name: &'static str,
    pub action: SoundAction,
}

impl SoundCue {
    pub fn play(name: &'static str) -> Self {
        Self {
            name,
            action: SoundAction::Play,
        }
    }

    pub fn stop(name: &'static str) -> Self {
        Self {
            name,
            action: SoundAction::Stop,
        }
    }
}

impl Message for SoundCue {}

/// Counter changes the HUD should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiNotice {
    Lives(i32),
    Diamonds(u32),
    PurpleDiamonds(u32),
}

impl Message for UiNotice {}

/// Event fired when the player touches an active level end
#[derive(Debug)]
pub struct LevelCompletedEvent {
    pub level_number: u32,
}

impl Message for LevelCompletedEvent {}
