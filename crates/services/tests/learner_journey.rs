use serde_json::Value;
use services::config::AppConfig;
use services::guarantee_service::GUARANTEE_TABLE;
use services::training_service::TRAINING_TABLE;
use services::{
    AppServices, CourseAccessError, GuaranteeError, GuaranteeService, InMemoryBackend,
    TrainingError, TrainingService,
};
use signcode_core::model::{
    CompanySize, CourseSlug, GuaranteeRequestDraft, GuaranteeRequestError, RefundReason, Session,
    SubscriptionTier, TrainingRequestDraft, TrainingTopic,
};
use signcode_core::time::{fixed_clock, fixed_now};
use signcode_core::{AccessPolicy, PlaybackState};
use std::sync::Arc;

fn offline_config(policy: AccessPolicy) -> AppConfig {
    AppConfig::from_lookup(|name| {
        (name == services::config::ACCESS_POLICY_VAR).then(|| policy.as_str().to_owned())
    })
    .unwrap()
}

fn slug(raw: &str) -> CourseSlug {
    CourseSlug::new(raw).unwrap()
}

#[tokio::test]
async fn anonymous_learner_hits_paywall_then_upgrades() {
    let services = AppServices::in_memory(fixed_clock(), &offline_config(AccessPolicy::Ranked))
        .await
        .unwrap();
    let catalog = services.catalog();

    let err = catalog
        .open_course(&slug("advanced-python"), &Session::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAccessError::Denied { .. }));

    let free = catalog
        .open_course(&slug("digital-literacy-101"), &Session::anonymous())
        .await
        .unwrap();
    assert_eq!(free.state(), PlaybackState::Ready);

    let signed_in = services
        .auth()
        .sign_in("learner@example.org", "learner")
        .await
        .unwrap();
    assert_eq!(signed_in.session.tier(), SubscriptionTier::Free);

    let subscriptions = services.subscriptions();
    let checkout = subscriptions
        .start_checkout(&signed_in.session, SubscriptionTier::Premium)
        .await
        .unwrap();
    let upgraded = subscriptions
        .confirm_checkout(&signed_in.session, &signed_in.token, &checkout.payment_id)
        .await
        .unwrap();

    let mut player = catalog
        .open_course(&slug("advanced-python"), &upgraded)
        .await
        .unwrap();
    player.play();
    assert!(player.is_playing());

    let signed_out = services.auth().sign_out(&signed_in.token).await;
    assert!(signed_out.is_anonymous());
}

#[tokio::test]
async fn unknown_course_is_not_found() {
    let services = AppServices::in_memory(fixed_clock(), &offline_config(AccessPolicy::ExactPremium))
        .await
        .unwrap();
    assert_eq!(services.policy(), AccessPolicy::ExactPremium);
    let err = services
        .catalog()
        .open_course(&slug("underwater-basket-weaving"), &Session::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAccessError::NotFound { .. }));
}

fn training_draft() -> TrainingRequestDraft {
    TrainingRequestDraft {
        company_name: "Acme Ltd".into(),
        contact_name: "Grace Hopper".into(),
        email: "grace@acme.example".into(),
        phone: None,
        company_size: Some(CompanySize::UpTo50),
        training_interest: vec![TrainingTopic::DisabilityAwareness],
        message: Some("Deaf awareness for the support team".into()),
    }
}

#[tokio::test]
async fn training_request_is_recorded() {
    let backend = InMemoryBackend::new();
    let service = TrainingService::new(fixed_clock(), Arc::new(backend.clone()));

    let request = service.submit(training_draft()).await.unwrap();
    assert_eq!(request.created_at(), fixed_now());

    let rows = backend.records(TRAINING_TABLE).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["company_name"], Value::from("Acme Ltd"));
    assert_eq!(rows[0]["company_size"], Value::from("11-50"));
    assert_eq!(
        rows[0]["training_interest"],
        Value::from(vec!["Disability Awareness & Inclusion"])
    );
    assert_eq!(rows[0]["created_at"], Value::from("2023-11-14T22:13:20Z"));
}

#[tokio::test]
async fn invalid_training_request_never_reaches_backend() {
    let backend = InMemoryBackend::new();
    let service = TrainingService::new(fixed_clock(), Arc::new(backend.clone()));

    let err = service
        .submit(TrainingRequestDraft {
            training_interest: Vec::new(),
            ..training_draft()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TrainingError::Invalid(_)));
    assert!(backend.records(TRAINING_TABLE).unwrap().is_empty());

    backend.set_offline(true).unwrap();
    let err = service.submit(training_draft()).await.unwrap_err();
    assert!(matches!(err, TrainingError::Backend(_)));
}

fn guarantee_draft() -> GuaranteeRequestDraft {
    GuaranteeRequestDraft {
        name: "Ada Lovelace".into(),
        email: "ada@example.org".into(),
        subscription_type: Some(SubscriptionTier::Premium),
        reason: Some(RefundReason::TechnicalIssues),
        additional_info: None,
    }
}

#[tokio::test]
async fn guarantee_request_is_recorded() {
    let backend = InMemoryBackend::new();
    let service = GuaranteeService::new(fixed_clock(), Arc::new(backend.clone()));

    let request = service.submit(guarantee_draft()).await.unwrap();
    assert_eq!(request.created_at(), fixed_now());

    let rows = backend.records(GUARANTEE_TABLE).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["subscription_type"], Value::from("premium"));
    assert_eq!(rows[0]["reason"], Value::from("technical_issues"));
    assert!(rows[0]["additional_info"].is_null());
}

#[tokio::test]
async fn free_plan_guarantee_request_is_rejected_locally() {
    let backend = InMemoryBackend::new();
    let service = GuaranteeService::new(fixed_clock(), Arc::new(backend.clone()));

    let err = service
        .submit(GuaranteeRequestDraft {
            subscription_type: Some(SubscriptionTier::Free),
            ..guarantee_draft()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GuaranteeError::Invalid(GuaranteeRequestError::UnpaidPlan(SubscriptionTier::Free))
    ));
    assert!(backend.records(GUARANTEE_TABLE).unwrap().is_empty());
}
