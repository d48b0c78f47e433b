// ABOUTME: Built-in exercise catalog inserted at startup
// ABOUTME: Idempotent by name so restarts never duplicate catalog rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CreateExerciseRequest, ExercisesManager};
use liftshare_core::errors::AppResult;
use tracing::info;

/// Catalog entry definition
struct CatalogExercise {
    name: &'static str,
    short_description: &'static str,
    detailed_description: &'static str,
    muscle_group: &'static str,
    difficulty: &'static str,
    equipment: &'static str,
    target_muscles: &'static str,
}

const CATALOG: &[CatalogExercise] = &[
    CatalogExercise {
        name: "Push-ups",
        short_description: "Bodyweight press for chest, shoulders and triceps",
        detailed_description: "Start in a plank with hands under shoulders. Lower the chest to just above the floor keeping the body straight, then press back up.",
        muscle_group: "Chest",
        difficulty: "Beginner",
        equipment: "None",
        target_muscles: "Pectorals, Triceps, Anterior deltoids",
    },
    CatalogExercise {
        name: "Squats",
        short_description: "Fundamental lower-body movement",
        detailed_description: "Stand with feet shoulder-width apart. Sit the hips back and down until thighs are parallel to the floor, then drive up through the heels.",
        muscle_group: "Legs",
        difficulty: "Beginner",
        equipment: "None",
        target_muscles: "Quadriceps, Glutes, Hamstrings",
    },
    CatalogExercise {
        name: "Pull-ups",
        short_description: "Vertical pull for back and biceps",
        detailed_description: "Hang from a bar with an overhand grip. Pull until the chin clears the bar, then lower under control to a full hang.",
        muscle_group: "Back",
        difficulty: "Intermediate",
        equipment: "Pull-up bar",
        target_muscles: "Latissimus dorsi, Biceps, Rhomboids",
    },
    CatalogExercise {
        name: "Plank",
        short_description: "Isometric core hold",
        detailed_description: "Rest on forearms and toes with the body in a straight line. Brace the abdominals and hold without letting the hips sag.",
        muscle_group: "Core",
        difficulty: "Beginner",
        equipment: "None",
        target_muscles: "Rectus abdominis, Transverse abdominis, Obliques",
    },
    CatalogExercise {
        name: "Lunges",
        short_description: "Single-leg strength and balance",
        detailed_description: "Step forward and lower until both knees are bent about 90 degrees. Push back to standing and alternate legs.",
        muscle_group: "Legs",
        difficulty: "Beginner",
        equipment: "None",
        target_muscles: "Quadriceps, Glutes",
    },
    CatalogExercise {
        name: "Deadlift",
        short_description: "Hip hinge lifting a barbell from the floor",
        detailed_description: "With the bar over mid-foot, hinge to grip it, brace, and stand up by driving the hips forward. Lower by reversing the hinge.",
        muscle_group: "Back",
        difficulty: "Advanced",
        equipment: "Barbell",
        target_muscles: "Hamstrings, Glutes, Erector spinae",
    },
    CatalogExercise {
        name: "Bench Press",
        short_description: "Horizontal barbell press",
        detailed_description: "Lie on a bench, lower the bar to the mid-chest with elbows slightly tucked, then press to lockout.",
        muscle_group: "Chest",
        difficulty: "Intermediate",
        equipment: "Barbell, Bench",
        target_muscles: "Pectorals, Triceps, Anterior deltoids",
    },
    CatalogExercise {
        name: "Overhead Press",
        short_description: "Standing vertical press",
        detailed_description: "Press the bar from the front rack to overhead lockout while keeping the ribs down and glutes tight.",
        muscle_group: "Shoulders",
        difficulty: "Intermediate",
        equipment: "Barbell",
        target_muscles: "Deltoids, Triceps, Upper trapezius",
    },
    CatalogExercise {
        name: "Burpees",
        short_description: "Full-body conditioning drill",
        detailed_description: "Drop into a squat, kick back to a plank, perform a push-up, jump the feet in and explode upward.",
        muscle_group: "Full body",
        difficulty: "Intermediate",
        equipment: "None",
        target_muscles: "Quadriceps, Pectorals, Core",
    },
    CatalogExercise {
        name: "Dumbbell Row",
        short_description: "Unilateral horizontal pull",
        detailed_description: "Support one hand and knee on a bench, row the dumbbell toward the hip and lower with control.",
        muscle_group: "Back",
        difficulty: "Beginner",
        equipment: "Dumbbell, Bench",
        target_muscles: "Latissimus dorsi, Rhomboids, Biceps",
    },
];

/// Insert every catalog exercise whose name is not already present
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns an error if a lookup or insert fails
pub async fn seed_exercises(exercises: &ExercisesManager) -> AppResult<usize> {
    let mut inserted = 0;

    for entry in CATALOG {
        if exercises.exists_by_name(entry.name).await? {
            continue;
        }

        let request = CreateExerciseRequest {
            name: Some(entry.name.to_owned()),
            short_description: Some(entry.short_description.to_owned()),
            detailed_description: Some(entry.detailed_description.to_owned()),
            muscle_group: Some(entry.muscle_group.to_owned()),
            difficulty: Some(entry.difficulty.to_owned()),
            equipment: Some(entry.equipment.to_owned()),
            target_muscles: Some(entry.target_muscles.to_owned()),
            ..CreateExerciseRequest::default()
        };
        exercises.insert(&request, false).await?;
        inserted += 1;
    }

    info!(inserted, catalog_size = CATALOG.len(), "Exercise catalog seeded");
    Ok(inserted)
}

/// Number of built-in catalog exercises
#[must_use]
pub const fn catalog_size() -> usize {
    CATALOG.len()
}
