// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
///
/// One canonical lowercase name per entity; services must never spell
/// these inline.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
    pub const EXERCISES: &str = "exercises";
    pub const EXERCISE_LIBRARY: &str = "exercise_library";
    pub const QUESTIONS: &str = "questions";
}
