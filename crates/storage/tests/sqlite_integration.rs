use quiz_core::model::{QuestionDraft, QuestionId, QuizConfig, VideoKind, VideoSource};
use storage::repository::KeyValueStore;
use storage::sqlite::SqliteRepository;
use storage::{QuizRecord, Storage};

#[tokio::test]
async fn sqlite_put_get_remove_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("quizData").await.unwrap(), None);

    repo.put("quizData", "first").await.unwrap();
    repo.put("quizData", "second").await.unwrap();
    assert_eq!(repo.get("quizData").await.unwrap().as_deref(), Some("second"));

    repo.remove("quizData").await.unwrap();
    assert_eq!(repo.get("quizData").await.unwrap(), None);

    // Removing again is a no-op.
    repo.remove("quizData").await.unwrap();
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.put("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_persists_quiz_record() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_record?mode=memory&cache=shared")
        .await
        .expect("storage");

    let question = QuestionDraft {
        time_secs: 12,
        text: "Which?".into(),
        options: ["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index: 3,
    }
    .validate(QuestionId::new(9))
    .unwrap();
    let video = VideoSource::parse(VideoKind::YouTube, "https://youtu.be/abc123").unwrap();
    let config = QuizConfig::new(video, vec![question]);

    let json = QuizRecord::from_config(&config).to_json().unwrap();
    storage.kv.put("quizData", &json).await.unwrap();

    let raw = storage.kv.get("quizData").await.unwrap().expect("stored");
    let restored = QuizRecord::from_json(&raw).unwrap().into_config().unwrap();
    assert_eq!(restored, config);
}
