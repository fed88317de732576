use chrono::NaiveDate;
use ferrum_domain as domain;

pub static USERS: std::sync::LazyLock<Vec<domain::User>> =
    std::sync::LazyLock::new(|| vec![USER.clone(), USER_2.clone()]);

pub static USER: std::sync::LazyLock<domain::User> = std::sync::LazyLock::new(|| domain::User {
    id: 1.into(),
    name: domain::Name::new("Alice").unwrap(),
    email: domain::Email::new("alice@example.org").unwrap(),
    role: domain::Role::Admin,
});

pub static USER_2: std::sync::LazyLock<domain::User> = std::sync::LazyLock::new(|| domain::User {
    id: 2.into(),
    name: domain::Name::new("Bob").unwrap(),
    email: domain::Email::new("bob@example.org").unwrap(),
    role: domain::Role::User,
});

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| vec![EXERCISE.clone(), EXERCISE_2.clone()]);

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 10.into(),
        name: domain::Name::new("Back Squat").unwrap(),
        body_part: domain::BodyPart::Legs,
        video_url: Some("https://example.org/squat.mp4".to_string()),
        notes: "high bar".to_string(),
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 11.into(),
        name: domain::Name::new("Bench Press").unwrap(),
        body_part: domain::BodyPart::Chest,
        video_url: None,
        notes: String::new(),
    });

pub static TEMPLATE: std::sync::LazyLock<domain::Template> =
    std::sync::LazyLock::new(|| domain::Template {
        id: 20.into(),
        name: domain::Name::new("Lower Body A").unwrap(),
        description: "Squat focused strength day".to_string(),
        items: vec![
            domain::BlueprintItem {
                exercise_id: EXERCISE.id,
                order: domain::OrderToken::new("A").unwrap(),
                sets: domain::Sets::new(3).unwrap(),
                target_reps: domain::TargetReps::new("5").unwrap(),
                tempo: domain::Tempo::new("3-1-1").unwrap(),
                rest: domain::Rest::new(120).unwrap(),
                notes: "pause at the bottom".to_string(),
            },
            domain::BlueprintItem {
                exercise_id: EXERCISE_2.id,
                order: domain::OrderToken::new("B").unwrap(),
                sets: domain::Sets::new(2).unwrap(),
                target_reps: domain::TargetReps::new("8-12").unwrap(),
                tempo: domain::Tempo::default(),
                rest: domain::Rest::new(90).unwrap(),
                notes: String::new(),
            },
        ],
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 30.into(),
        user_id: USER_2.id,
        name: domain::Name::new("Week 1 Day 1").unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        occurrences: domain::Occurrences::new(2).unwrap(),
        feedback: None,
    });

/// First row of the expanded plan, day 1 set 1 of the squat.
pub static LOG_ENTRY: std::sync::LazyLock<domain::LogEntry> =
    std::sync::LazyLock::new(|| LOG_ENTRIES[0].clone());

pub static LOG_ENTRIES: std::sync::LazyLock<Vec<domain::LogEntry>> = std::sync::LazyLock::new(
    || domain::expand(WORKOUT.id, &TEMPLATE.items, WORKOUT.occurrences).unwrap(),
);
