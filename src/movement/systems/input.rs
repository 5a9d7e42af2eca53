//! Movement domain: input sampling for locomotion and dash triggers.

use bevy::prelude::*;

use crate::movement::MovementInput;

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const CHARGE_KEYS: [KeyCode; 2] = [KeyCode::KeyJ, KeyCode::ShiftLeft];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.axis = x;
    input.jump_just_pressed = keyboard.any_just_pressed(JUMP_KEYS);
    input.jump_just_released = keyboard.any_just_released(JUMP_KEYS);
    input.charge_just_pressed = keyboard.any_just_pressed(CHARGE_KEYS);
    input.charge_just_released = keyboard.any_just_released(CHARGE_KEYS);
}
