// SPDX-License-Identifier: MIT

//! Firestore integration tests for the entity services.
//!
//! These tests require the Firestore emulator to be running (set
//! FIRESTORE_EMULATOR_HOST). The emulator provides a clean state for
//! each test run; per-test isolation comes from unique subject ids.

use fitforge::middleware::auth::AuthUser;
use fitforge::models::user::{Background, HealthMetrics, WorkoutPreferences};
use fitforge::models::{Intensity, LibraryEntry, Role, User, UserPatch};
use fitforge::services::library::LibraryFilter;
use fitforge::services::{
    ExerciseLibraryService, ExerciseService, QuestionService, UserService, WorkoutService,
};
use fitforge::models::NewWorkout;

mod common;
use common::{test_db, unique_suffix};

fn test_user() -> User {
    User {
        id: None,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role: Role::Lite,
        health_metrics: HealthMetrics {
            weight: 80.0,
            height: 180.0,
            body_fat_percentage: None,
            injuries_or_limitations: None,
        },
        workout_preferences: WorkoutPreferences {
            days_available: vec!["Monday".to_string(), "Thursday".to_string()],
            time_per_day: 60,
            gym_access: true,
            equipment: None,
        },
        background: Background {
            experience: "beginner".to_string(),
            routine: "none".to_string(),
            goals: "general fitness".to_string(),
        },
    }
}

fn viewer(uid: &str, role: Role) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        role: Some(role),
    }
}

#[tokio::test]
async fn user_profile_round_trip() {
    require_emulator!();

    let users = UserService::new(test_db().await);
    let uid = format!("user-{}", unique_suffix());

    let created = users.create_user(test_user(), &uid).await.unwrap();
    assert_eq!(created.id.as_deref(), Some(uid.as_str()));

    let fetched = users.get_user_by_id(&uid).await.unwrap();
    assert_eq!(fetched.id.as_deref(), Some(uid.as_str()));
    assert_eq!(fetched.name, "Test User");
    assert_eq!(fetched.role, Role::Lite);
    assert_eq!(fetched.workout_preferences.time_per_day, 60);

    // Reads without intervening writes are stable.
    let again = users.get_user_by_id(&uid).await.unwrap();
    assert_eq!(again.name, fetched.name);
    assert_eq!(again.email, fetched.email);
}

#[tokio::test]
async fn missing_user_is_a_not_found_error() {
    require_emulator!();

    let users = UserService::new(test_db().await);

    let err = users.get_user_by_id("no-such-user").await.unwrap_err();
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_update_merges_only_present_fields() {
    require_emulator!();

    let users = UserService::new(test_db().await);
    let uid = format!("user-{}", unique_suffix());
    users.create_user(test_user(), &uid).await.unwrap();

    let patch = UserPatch {
        name: Some("Renamed".to_string()),
        email: None,
        health_metrics: None,
        workout_preferences: None,
        background: None,
    };
    let result = users.update_user(&uid, &patch).await.unwrap();
    assert_eq!(result["id"], uid.as_str());
    assert_eq!(result["name"], "Renamed");

    // Untouched fields survive the partial write.
    let fetched = users.get_user_by_id(&uid).await.unwrap();
    assert_eq!(fetched.name, "Renamed");
    assert_eq!(fetched.email, "test@example.com");
    assert!(fetched.workout_preferences.gym_access);
}

#[tokio::test]
async fn role_upgrade_persists() {
    require_emulator!();

    let users = UserService::new(test_db().await);
    let uid = format!("user-{}", unique_suffix());
    users.create_user(test_user(), &uid).await.unwrap();

    users.set_role(&uid, Role::Premium).await.unwrap();

    let fetched = users.get_user_by_id(&uid).await.unwrap();
    assert_eq!(fetched.role, Role::Premium);
}

#[tokio::test]
async fn user_deletion_cascades_to_owned_workouts_and_exercises() {
    require_emulator!();

    let db = test_db().await;
    let users = UserService::new(db.clone());
    let library = ExerciseLibraryService::new(db.clone());
    let workouts = WorkoutService::new(db.clone());
    let exercises = ExerciseService::new(db);

    let uid = format!("user-{}", unique_suffix());
    users.create_user(test_user(), &uid).await.unwrap();

    let entry = library
        .create_entry(LibraryEntry {
            id: None,
            name: "Deadlift".to_string(),
            equipment: vec!["Barbell".to_string()],
            muscles_worked: vec!["Back".to_string()],
            intensity: Intensity::High,
        })
        .await
        .unwrap();

    let workout = workouts
        .create_workout(
            NewWorkout {
                name: "Pull Day".to_string(),
                description: None,
                date: None,
            },
            &uid,
            &[entry.id.clone().unwrap()],
        )
        .await
        .unwrap();
    assert_eq!(workout.exercises.len(), 1);

    users.delete_user(&uid).await.unwrap();

    let err = users.get_user_by_id(&uid).await.unwrap_err();
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

    let remaining = exercises
        .get_exercises(&viewer(&uid, Role::Lite), None)
        .await
        .unwrap();
    assert!(remaining.is_empty(), "Owned exercises should be deleted");

    let remaining = workouts.get_workouts_by_user(&uid).await.unwrap();
    assert!(remaining.is_empty(), "Owned workouts should be deleted");
}

#[tokio::test]
async fn field_query_returns_matches_and_rejects_empty_result() {
    require_emulator!();

    let db = test_db().await;
    let questions = QuestionService::new(db.clone());
    let uid = format!("user-{}", unique_suffix());

    questions
        .create_question("First question", &uid)
        .await
        .unwrap();
    questions
        .create_question("Second question", &uid)
        .await
        .unwrap();

    let matched: Vec<fitforge::models::Question> = db
        .get_documents_by_field("questions", "userId", &uid, None)
        .await
        .unwrap();
    assert_eq!(matched.len(), 2);

    let limited: Vec<fitforge::models::Question> = db
        .get_documents_by_field("questions", "userId", &uid, Some(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    // An empty result is a 404, not an empty list.
    let err = db
        .get_documents_by_field::<fitforge::models::Question>(
            "questions",
            "userId",
            "no-such-user",
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DOCUMENTS_NOT_FOUND");
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn library_filters_match_any_overlap() {
    require_emulator!();

    let library = ExerciseLibraryService::new(test_db().await);
    let marker = format!("band-{}", unique_suffix());

    library
        .create_entry(LibraryEntry {
            id: None,
            name: "Band Pull-Apart".to_string(),
            equipment: vec![marker.clone()],
            muscles_worked: vec!["Shoulders".to_string()],
            intensity: Intensity::Low,
        })
        .await
        .unwrap();

    let filter = LibraryFilter {
        equipment: Some(vec![marker.clone(), "Kettlebell".to_string()]),
        muscles_worked: None,
        intensity: None,
    };
    let matched = library.get_entries(&filter).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Band Pull-Apart");

    // Intensity is an exact match, so High finds nothing for this entry.
    let filter = LibraryFilter {
        equipment: Some(vec![marker]),
        muscles_worked: None,
        intensity: Some(Intensity::High),
    };
    let matched = library.get_entries(&filter).await.unwrap();
    assert!(matched.is_empty());
}

#[tokio::test]
async fn trainer_sees_all_exercises_others_see_their_own() {
    require_emulator!();

    let db = test_db().await;
    let library = ExerciseLibraryService::new(db.clone());
    let workouts = WorkoutService::new(db.clone());
    let exercises = ExerciseService::new(db);

    let owner = format!("user-{}", unique_suffix());
    let other = format!("user-{}", unique_suffix());

    let entry = library
        .create_entry(LibraryEntry {
            id: None,
            name: "Row".to_string(),
            equipment: vec![],
            muscles_worked: vec!["Back".to_string()],
            intensity: Intensity::Medium,
        })
        .await
        .unwrap();

    workouts
        .create_workout(
            NewWorkout {
                name: "Back Day".to_string(),
                description: None,
                date: None,
            },
            &owner,
            &[entry.id.clone().unwrap()],
        )
        .await
        .unwrap();

    let own = exercises
        .get_exercises(&viewer(&owner, Role::Lite), None)
        .await
        .unwrap();
    assert_eq!(own.len(), 1);

    let others_view = exercises
        .get_exercises(&viewer(&other, Role::Lite), None)
        .await
        .unwrap();
    assert!(others_view.is_empty());

    let trainer_view = exercises
        .get_exercises(&viewer("trainer-1", Role::Trainer), None)
        .await
        .unwrap();
    assert!(trainer_view.iter().any(|e| e.user_id == owner));
}

#[tokio::test]
async fn question_lifecycle_rejects_second_answer() {
    require_emulator!();

    let questions = QuestionService::new(test_db().await);
    let uid = format!("user-{}", unique_suffix());

    let question = questions
        .create_question("How do I fix my squat depth?", &uid)
        .await
        .unwrap();
    let qid = question.id.clone().unwrap();
    assert!(!question.is_answered());
    assert!(!question.date_asked.is_empty());

    questions
        .respond_to_question(&qid, "Work on ankle mobility.", "trainer-1")
        .await
        .unwrap();

    let answered = questions.get_question_by_id(&qid).await.unwrap();
    assert!(answered.is_answered());
    assert_eq!(answered.trainer_id.as_deref(), Some("trainer-1"));
    assert!(answered.date_responded.is_some());

    // Answered is a terminal state.
    let err = questions
        .respond_to_question(&qid, "Different advice.", "trainer-2")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUESTION_ALREADY_ANSWERED");
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);

    // The original answer is untouched.
    let after = questions.get_question_by_id(&qid).await.unwrap();
    assert_eq!(after.response.as_deref(), Some("Work on ankle mobility."));
}

#[tokio::test]
async fn question_visibility_matches_exercise_rules() {
    require_emulator!();

    let questions = QuestionService::new(test_db().await);
    let asker = format!("user-{}", unique_suffix());
    let stranger = format!("user-{}", unique_suffix());

    questions
        .create_question("Is cardio before lifting fine?", &asker)
        .await
        .unwrap();

    let own = questions.get_questions(&viewer(&asker, Role::Premium)).await.unwrap();
    assert_eq!(own.len(), 1);

    let strangers_view = questions
        .get_questions(&viewer(&stranger, Role::Premium))
        .await
        .unwrap();
    assert!(strangers_view.is_empty());

    let trainer_view = questions
        .get_questions(&viewer("trainer-1", Role::Trainer))
        .await
        .unwrap();
    assert!(trainer_view.iter().any(|q| q.user_id == asker));
}
