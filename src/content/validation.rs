//! Sanity checks for level definitions.

use super::data::*;
use crate::collectables::CollectableKind;
use crate::enemies::EnemyKind;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub level_number: u32,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level {} field '{}': {}",
            self.level_number, self.field, self.message
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $level:expr, $cond:expr, $field:expr, $($message:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                level_number: $level.level_number,
                field: $field,
                message: format!($($message)+),
            });
        }
    };
}

fn inside_bounds(level: &LevelDef, point: [f32; 2]) -> bool {
    let b = &level.bounds;
    (b.left..=b.right).contains(&point[0]) && (b.bottom..=b.top).contains(&point[1])
}

fn positive_size(size: [f32; 2]) -> bool {
    size[0] > 0.0 && size[1] > 0.0
}

/// Validate a level against itself.
/// Returns a list of validation errors, empty if the level is playable.
pub fn validate_level(level: &LevelDef, default_goal: u32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let bounds = &level.bounds;

    check!(
        errors,
        level,
        bounds.left < bounds.right && bounds.bottom < bounds.top,
        "bounds",
        "empty area {:?}",
        bounds
    );
    check!(
        errors,
        level,
        inside_bounds(level, level.spawn),
        "spawn",
        "{:?} is outside the level bounds",
        level.spawn
    );

    for block in &level.blocks {
        check!(
            errors,
            level,
            positive_size(block.size),
            "blocks",
            "{:?} block at {:?} has size {:?}",
            block.kind,
            block.center,
            block.size
        );
    }

    for zone in level.pits.iter().chain(&level.respawn_zones) {
        check!(
            errors,
            level,
            positive_size(zone.size),
            "zones",
            "zone at {:?} has size {:?}",
            zone.center,
            zone.size
        );
    }
    for zone in &level.respawn_zones {
        check!(
            errors,
            level,
            inside_bounds(level, zone.center),
            "respawn_zones",
            "{:?} is outside the level bounds",
            zone.center
        );
    }

    for enemy in &level.enemies {
        check!(
            errors,
            level,
            inside_bounds(level, enemy.position),
            "enemies",
            "{:?} at {:?} is outside the level bounds",
            enemy.kind,
            enemy.position
        );
        if let EnemyKind::Flyer { left, right } = enemy.kind {
            check!(
                errors,
                level,
                left < right && (left..=right).contains(&enemy.position[0]),
                "enemies",
                "flyer at {:?} does not start on its route [{}, {}]",
                enemy.position,
                left,
                right
            );
        }
    }

    let purples = level
        .collectables
        .iter()
        .filter(|c| c.kind == CollectableKind::PurpleDiamond)
        .count() as u32;
    let goal = level.purple_goal.unwrap_or(default_goal);
    check!(
        errors,
        level,
        purples >= goal,
        "purple_goal",
        "goal of {} but only {} purple diamond(s) placed",
        goal,
        purples
    );
    check!(
        errors,
        level,
        positive_size(level.level_end.size),
        "level_end",
        "size {:?}",
        level.level_end.size
    );

    errors
}
