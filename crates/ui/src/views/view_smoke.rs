use std::sync::Arc;

use chrono::Duration;
use dioxus::prelude::WritableExt;
use quiz_core::model::{Question, QuestionDraft, QuestionId, VideoKind};
use quiz_core::time::fixed_now;
use services::{QUIZ_CONFIG_KEY, QuizDraft, QuizStore};
use storage::repository::Storage;

use super::test_harness::{ViewKind, setup_view_harness};
use crate::vm::{PlayerIntent, QuestionForm};

fn question(id: u64, time_secs: u32, correct_index: usize) -> Question {
    QuestionDraft {
        time_secs,
        text: format!("Question {id}"),
        options: ["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index,
    }
    .validate(QuestionId::new(id))
    .unwrap()
}

async fn seed(storage: &Storage, kind: VideoKind, link: &str, questions: Vec<Question>) {
    QuizStore::new(Arc::clone(&storage.kv))
        .save(QuizDraft {
            kind,
            raw_link: link.to_string(),
            questions,
        })
        .await
        .expect("seed quiz");
}

#[tokio::test(flavor = "current_thread")]
async fn player_without_config_points_to_admin() {
    let mut harness = setup_view_harness(ViewKind::Player, Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No Quiz Configuration Found"), "{html}");
    assert!(html.contains("Go to Admin Panel"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn player_refuses_quiz_without_questions() {
    let storage = Storage::in_memory();
    seed(&storage, VideoKind::YouTube, "https://youtu.be/abc123", Vec::new()).await;
    let mut harness = setup_view_harness(ViewKind::Player, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz Not Ready"), "{html}");
    assert!(html.contains("no questions"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn youtube_player_renders_sequential_badge() {
    let storage = Storage::in_memory();
    seed(
        &storage,
        VideoKind::YouTube,
        "https://www.youtube.com/watch?v=abc123",
        vec![question(1, 5, 0), question(2, 20, 1)],
    )
    .await;
    let mut harness = setup_view_harness(ViewKind::Player, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Video Type: youtube, Video ID: abc123"), "{html}");
    assert!(html.contains("Sequential viewing required"), "{html}");
    assert!(html.contains("Progress: 0 / 2 questions"), "{html}");
    assert!(html.contains("youtube.com/embed/abc123"), "{html}");
    assert!(!html.contains("I paused the video"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn drive_player_runs_to_completion() {
    let storage = Storage::in_memory();
    seed(
        &storage,
        VideoKind::GDrive,
        "https://drive.google.com/file/d/abc-DEF_1/view",
        vec![question(1, 5, 1), question(2, 20, 2)],
    )
    .await;
    let mut harness = setup_view_harness(ViewKind::Player, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("I paused the video"), "{html}");
    assert!(!html.contains("Sequential viewing required"), "{html}");

    let dispatch = harness.player_handles.dispatch();
    let mut controller = harness.player_handles.controller();
    let start = fixed_now();

    harness.dom.in_runtime(|| {
        dispatch.call(PlayerIntent::SurfaceLoaded);
        if let Some(active) = controller.write().as_mut() {
            active.tick(start + Duration::seconds(6));
        }
    });
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "{html}");

    harness.dom.in_runtime(|| dispatch.call(PlayerIntent::Answer(1)));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "{html}");
    assert!(html.contains("Continue"), "{html}");
    assert!(html.contains("Current Score: 1 / 1"), "{html}");

    harness.dom.in_runtime(|| {
        dispatch.call(PlayerIntent::Continue);
        if let Some(active) = controller.write().as_mut() {
            active.tick(start + Duration::seconds(21));
        }
    });
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "{html}");

    harness.dom.in_runtime(|| {
        dispatch.call(PlayerIntent::Answer(2));
        dispatch.call(PlayerIntent::Continue);
    });
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Quiz Complete!"), "{html}");
    assert!(html.contains("PASSED!"), "{html}");
    assert!(html.contains("Final Score: 2 / 2"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_shows_saved_configuration() {
    let storage = Storage::in_memory();
    seed(
        &storage,
        VideoKind::YouTube,
        "https://youtu.be/abc123",
        vec![question(1, 5, 0), question(2, 20, 1)],
    )
    .await;
    let mut harness = setup_view_harness(ViewKind::Admin, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz Admin Panel"), "{html}");
    assert!(html.contains("Questions (2)"), "{html}");
    assert!(html.contains("Question 2 (at 20s)"), "{html}");
    assert!(html.contains("Current Saved Configuration"), "{html}");
    assert!(html.contains("2 out of 2 (60%)"), "{html}");
    assert!(html.contains("Valid YouTube URL detected"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_save_persists_configuration() {
    let mut harness = setup_view_harness(ViewKind::Admin, Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No questions added yet."), "{html}");
    assert!(!html.contains("Current Saved Configuration"), "{html}");

    let mut vm = harness.admin_handles.vm();
    let save = harness.admin_handles.save();
    harness.dom.in_runtime(|| {
        let mut editor = vm.write();
        editor.set_link("https://youtu.be/xyz789");
        editor.form = QuestionForm {
            time: "12".into(),
            text: "What colour is the sky?".into(),
            options: ["Red".into(), "Blue".into(), "Green".into(), "Black".into()],
            correct_index: 1,
        };
        editor.add_question(1).expect("valid question");
    });
    harness.dom.in_runtime(|| save.call(()));
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Quiz data saved successfully!"), "{html}");
    assert!(html.contains("Current Saved Configuration"), "{html}");

    let stored = harness
        .storage
        .kv
        .get(QUIZ_CONFIG_KEY)
        .await
        .expect("read store");
    assert!(stored.is_some());
    let config = QuizStore::new(Arc::clone(&harness.storage.kv))
        .load()
        .await
        .expect("load")
        .expect("config present");
    assert_eq!(config.video().resolved_id(), "xyz789");
    assert_eq!(config.questions()[0].correct_option(), "Blue");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_clear_removes_configuration() {
    let storage = Storage::in_memory();
    seed(
        &storage,
        VideoKind::YouTube,
        "https://youtu.be/abc123",
        vec![question(1, 5, 0)],
    )
    .await;
    let mut harness = setup_view_harness(ViewKind::Admin, storage);
    harness.settle().await;
    assert!(harness.render().contains("Clear All Data"));

    let clear = harness.admin_handles.clear();
    harness.dom.in_runtime(|| clear.call(()));
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Quiz data cleared successfully!"), "{html}");
    assert!(!html.contains("Current Saved Configuration"), "{html}");
    assert!(html.contains("Questions (0)"), "{html}");
    let stored = harness
        .storage
        .kv
        .get(QUIZ_CONFIG_KEY)
        .await
        .expect("read store");
    assert!(stored.is_none());
}
