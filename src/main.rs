mod camera;
mod collectables;
mod content;
mod core;
mod damage;
mod dash;
#[cfg(feature = "dev-tools")]
mod debug;
mod enemies;
mod level;
mod movement;
#[cfg(test)]
mod testing;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Dash Platformer".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        level::LevelPlugin,
        movement::MovementPlugin,
        dash::DashPlugin,
        enemies::EnemiesPlugin,
        damage::DamagePlugin,
        collectables::CollectablesPlugin,
        camera::CameraPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
