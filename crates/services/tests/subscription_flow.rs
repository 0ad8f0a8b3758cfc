use std::sync::Arc;

use services::{
    Backend, InMemoryBackend, MockPaymentProvider, PaymentError, PaymentId, SubscriptionService,
};
use signcode_core::model::{Session, SubscriptionTier};
use url::Url;

struct Fixture {
    backend: InMemoryBackend,
    payments: MockPaymentProvider,
    service: SubscriptionService,
}

fn fixture() -> Fixture {
    let backend = InMemoryBackend::new();
    let payments =
        MockPaymentProvider::new(Url::parse("https://sandbox.example.com/checkout").unwrap());
    let service = SubscriptionService::new(Arc::new(backend.clone()), Arc::new(payments.clone()));
    Fixture {
        backend,
        payments,
        service,
    }
}

#[tokio::test]
async fn checkout_then_verify_upgrades_to_premium() {
    let f = fixture();
    f.backend
        .add_account("learner@example.org", "pw", SubscriptionTier::Free)
        .unwrap();
    let signed_in = f.backend.sign_in("learner@example.org", "pw").await.unwrap();

    let checkout = f
        .service
        .start_checkout(&signed_in.session, SubscriptionTier::Premium)
        .await
        .unwrap();
    assert_eq!(checkout.checkout_url.query(), Some("plan=premium&amount=500"));

    let upgraded = f
        .service
        .confirm_checkout(&signed_in.session, &signed_in.token, &checkout.payment_id)
        .await
        .unwrap();
    assert_eq!(upgraded.tier(), SubscriptionTier::Premium);
    assert_eq!(upgraded.user_id(), signed_in.session.user_id());

    // The backend keeps the new tier for later refreshes.
    let refreshed = f.backend.get_session(&signed_in.token).await.unwrap();
    assert_eq!(refreshed.tier(), SubscriptionTier::Premium);

    // A checkout only upgrades once.
    let again = f
        .service
        .confirm_checkout(&signed_in.session, &signed_in.token, &checkout.payment_id)
        .await
        .unwrap_err();
    assert!(matches!(again, PaymentError::NotVerified));
}

#[tokio::test]
async fn checkout_rules() {
    let f = fixture();
    let err = f
        .service
        .start_checkout(&Session::anonymous(), SubscriptionTier::Premium)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotSignedIn));

    f.backend
        .add_account("p@example.org", "pw", SubscriptionTier::Premium)
        .unwrap();
    let premium = f.backend.sign_in("p@example.org", "pw").await.unwrap();

    let err = f
        .service
        .start_checkout(&premium.session, SubscriptionTier::Premium)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PaymentError::AlreadySubscribed(SubscriptionTier::Premium)
    ));

    for tier in [SubscriptionTier::Free, SubscriptionTier::Enterprise] {
        let err = f
            .service
            .start_checkout(&premium.session, tier)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotPurchasable(t) if t == tier));
    }
}

#[tokio::test]
async fn failed_or_foreign_payments_do_not_upgrade() {
    let f = fixture();
    f.backend
        .add_account("a@example.org", "pw", SubscriptionTier::Free)
        .unwrap();
    f.backend
        .add_account("b@example.org", "pw", SubscriptionTier::Free)
        .unwrap();
    let a = f.backend.sign_in("a@example.org", "pw").await.unwrap();
    let b = f.backend.sign_in("b@example.org", "pw").await.unwrap();

    let checkout = f
        .service
        .start_checkout(&a.session, SubscriptionTier::Premium)
        .await
        .unwrap();

    let err = f
        .service
        .confirm_checkout(&b.session, &b.token, &checkout.payment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotVerified));

    let err = f
        .service
        .confirm_checkout(&a.session, &a.token, &PaymentId::new("made-up"))
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotVerified));

    f.payments.mark_failed(&checkout.payment_id).unwrap();
    let err = f
        .service
        .confirm_checkout(&a.session, &a.token, &checkout.payment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotVerified));
    assert_eq!(
        f.backend.get_session(&a.token).await.unwrap().tier(),
        SubscriptionTier::Free
    );
}

#[tokio::test]
async fn backend_failure_leaves_checkout_confirmable() {
    let f = fixture();
    f.backend
        .add_account("a@example.org", "pw", SubscriptionTier::Free)
        .unwrap();
    let a = f.backend.sign_in("a@example.org", "pw").await.unwrap();
    let checkout = f
        .service
        .start_checkout(&a.session, SubscriptionTier::Premium)
        .await
        .unwrap();

    f.backend.set_offline(true).unwrap();
    let err = f
        .service
        .confirm_checkout(&a.session, &a.token, &checkout.payment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Backend(_)));

    f.backend.set_offline(false).unwrap();
    let upgraded = f
        .service
        .confirm_checkout(&a.session, &a.token, &checkout.payment_id)
        .await
        .unwrap();
    assert_eq!(upgraded.tier(), SubscriptionTier::Premium);
}
