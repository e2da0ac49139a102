//! Integration tests for persona matching.
//!
//! Completes a dialog, starts a scoring pass and reads the stored result,
//! against file-backed sessions and a catalog loaded from disk.

use std::path::Path;
use std::sync::Arc;

use rental_persona::adapters::ai::MockAIProvider;
use rental_persona::adapters::audit::InMemoryExtractionAuditLog;
use rental_persona::adapters::catalog::{InMemoryPersonaCatalog, YamlPersonaCatalog};
use rental_persona::adapters::storage::InMemorySessionStore;
use rental_persona::application::handlers::{
    AnswerWeightQuestionCommand, BeginIntakeCommand, GetMatchResultQuery, StartMatchingCommand,
    SubmitUtteranceCommand, UtteranceReply,
};
use rental_persona::config::{AiConfig, AiProvider, AppConfig};
use rental_persona::domain::elicitation::OptionChoice;
use rental_persona::domain::foundation::{ErrorCode, UserId};
use rental_persona::domain::session::{IntakeStep, MatchOutcome, MatchStatus};
use rental_persona::{IntakeApp, IntakeDependencies};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

const CATALOG: &str = r#"
archetypes:
  - id: lazy_noble
    name: 懶人貴族型
    keywords: [電梯, 方便]
    rent_min: 5500
    rent_max: 8000
    preferred_locations: [downtown]
    required_features: [garbage, elevator]
    bonus_features: [parking]
    management_pref: no_owner
    room_type: studio

  - id: budget_saver
    name: 省錢戰士型
    keywords: [便宜, 省錢]
    rent_min: 2000
    rent_max: 3500
    preferred_locations: [quiet]
    room_type: shared

  - id: retired
    name: 已停用
    active: false
    rent_min: 1000
    rent_max: 2000
    room_type: shared
"#;

fn user() -> UserId {
    UserId::new("U4af4980629").unwrap()
}

fn offline_config(dir: &Path) -> AppConfig {
    let catalog_path = dir.join("catalog.yaml");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let mut config = AppConfig {
        ai: AiConfig {
            provider: AiProvider::Disabled,
            ..Default::default()
        },
        ..Default::default()
    };
    config.matching.catalog_path = Some(catalog_path);
    config.storage.session_dir = Some(dir.join("sessions"));
    config
}

async fn complete_dialog(app: &IntakeApp, utterances: &[&str]) {
    app.begin
        .handle(BeginIntakeCommand { user_id: user() })
        .await
        .unwrap();
    for index in 1..=6 {
        app.answer_weight_question
            .handle(AnswerWeightQuestionCommand {
                user_id: user(),
                index,
                choice: OptionChoice::A,
            })
            .await
            .unwrap();
    }

    let mut last = None;
    for text in utterances {
        last = Some(
            app.submit_utterance
                .handle(SubmitUtteranceCommand {
                    user_id: user(),
                    text: text.to_string(),
                })
                .await
                .unwrap(),
        );
    }
    match last {
        Some(UtteranceReply::Advanced { step: IntakeStep::ReadyToScore, .. }) => {}
        other => panic!("dialog did not finish: {:?}", other),
    }
}

async fn status(app: &IntakeApp) -> MatchStatus {
    app.match_result
        .handle(GetMatchResultQuery { user_id: user() })
        .await
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn result_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    let first = IntakeApp::from_config(&config).await.unwrap();
    complete_dialog(
        &first,
        &["預算7000，想住市區的套房，不要房東", "要有電梯跟子母車"],
    )
    .await;

    let ticket = first
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap();
    let outcome = ticket.handle.await.unwrap();

    match &outcome {
        MatchOutcome::Matched { archetype_id, score, .. } => {
            assert_eq!(archetype_id.as_str(), "lazy_noble");
            assert!(*score > 0.0);
        }
        other => panic!("unexpected {:?}", other),
    }

    let restarted = IntakeApp::from_config(&config).await.unwrap();
    match status(&restarted).await {
        MatchStatus::Ready(record) => {
            assert_eq!(record.request_id, ticket.request_id);
            assert_eq!(record.outcome, outcome);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn incomplete_profile_cannot_be_matched() {
    let dir = TempDir::new().unwrap();
    let app = IntakeApp::from_config(&offline_config(dir.path())).await.unwrap();

    app.begin
        .handle(BeginIntakeCommand { user_id: user() })
        .await
        .unwrap();
    let err = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap_err();

    assert!(err.is_invalid_transition());
    assert_eq!(status(&app).await, MatchStatus::NotRequested);
}

#[tokio::test]
async fn never_started_profile_reports_missing_slots() {
    let dir = TempDir::new().unwrap();
    let app = IntakeApp::from_config(&offline_config(dir.path())).await.unwrap();

    let err = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ProfileIncomplete);
    assert_eq!(err.details.get("missing").map(String::as_str), Some("budget"));
}

#[tokio::test]
async fn semantic_feature_matching_costs_one_call_per_pass() {
    let mock = MockAIProvider::new()
        .with_response(
            r#"{"budget": 7000, "location_pref": "downtown", "type_pref": "studio", "management_pref": "no_owner"}"#,
        )
        .with_response(r#"{"required_features": ["垃圾代收", "電梯"], "features_preference": "done"}"#)
        .with_response(r#"{"lazy_noble": 1.0, "budget_saver": 0.0}"#);
    let catalog = YamlPersonaCatalog::from_yaml(CATALOG).unwrap();
    let app = IntakeApp::build(
        &AppConfig::default(),
        IntakeDependencies {
            store: Arc::new(InMemorySessionStore::new()),
            catalog: Arc::new(catalog),
            audit_log: Arc::new(InMemoryExtractionAuditLog::new()),
            provider: Arc::new(mock.clone()),
        },
    )
    .unwrap();

    complete_dialog(&app, &["七千，市區套房，不要房東", "垃圾代收跟電梯"]).await;
    assert_eq!(mock.call_count(), 2);

    let ticket = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap();
    let outcome = ticket.handle.await.unwrap();

    assert_eq!(mock.call_count(), 3);
    let prompt = mock.get_calls()[2].user_prompt().to_string();
    assert!(prompt.contains("lazy_noble"));
    assert!(prompt.contains("budget_saver"));
    assert!(!prompt.contains("retired"));
    match outcome {
        MatchOutcome::Matched { archetype_id, .. } => assert_eq!(archetype_id.as_str(), "lazy_noble"),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn superseded_pass_does_not_overwrite_newer_request() {
    let dir = TempDir::new().unwrap();
    let app = IntakeApp::from_config(&offline_config(dir.path())).await.unwrap();
    complete_dialog(&app, &["預算3000，安靜的雅房，都可以", "都可以", "沒有"]).await;

    let older = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap();
    let newer = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap();
    assert_ne!(older.request_id, newer.request_id);

    older.handle.await.unwrap();
    newer.handle.await.unwrap();

    match status(&app).await {
        MatchStatus::Ready(record) => {
            assert_eq!(record.request_id, newer.request_id);
            assert_eq!(record.archetype_id().map(|id| id.as_str()), Some("budget_saver"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn empty_catalog_yields_no_archetypes() {
    let app = IntakeApp::build(
        &AppConfig {
            ai: AiConfig {
                provider: AiProvider::Disabled,
                ..Default::default()
            },
            ..Default::default()
        },
        IntakeDependencies {
            store: Arc::new(InMemorySessionStore::new()),
            catalog: Arc::new(InMemoryPersonaCatalog::new(Vec::new())),
            audit_log: Arc::new(InMemoryExtractionAuditLog::new()),
            provider: Arc::new(MockAIProvider::new()),
        },
    )
    .unwrap();
    complete_dialog(&app, &["5000 學校 套房 有管理員", "沒有"]).await;

    let ticket = app
        .start_matching
        .handle(StartMatchingCommand { user_id: user() })
        .await
        .unwrap();

    assert_eq!(ticket.handle.await.unwrap(), MatchOutcome::NoArchetypes);
    assert!(matches!(status(&app).await, MatchStatus::Ready(_)));
}
