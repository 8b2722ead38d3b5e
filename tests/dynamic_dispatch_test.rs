use card_gateway::domain::id::PaymentId;
use card_gateway::domain::payment::{AuthorizationOutcome, PaymentStatus};
use card_gateway::domain::ports::PaymentStoreBox;
use card_gateway::infrastructure::cached::CachedPaymentStore;
use card_gateway::infrastructure::in_memory::InMemoryPaymentStore;

fn outcome() -> AuthorizationOutcome {
    AuthorizationOutcome {
        id: PaymentId::generate(),
        status: PaymentStatus::Authorized,
        card_number: "0005".to_string(),
        expiry_month: 7,
        expiry_year: 2031,
        currency: "EUR".to_string(),
        amount: 4200,
    }
}

#[tokio::test]
async fn test_stores_as_trait_objects() {
    let in_memory: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    let cached: PaymentStoreBox = Box::new(CachedPaymentStore::with_backend(Box::new(
        InMemoryPaymentStore::new(),
    )));

    let first = outcome();
    let second = outcome();
    let (expected_first, expected_second) = (first.clone(), second.clone());

    // Verify Send + Sync by spawning tasks
    let h1 = tokio::spawn(async move {
        in_memory.insert(first.clone()).await.unwrap();
        in_memory.get(first.id).await.unwrap().unwrap()
    });

    let h2 = tokio::spawn(async move {
        cached.insert(second.clone()).await.unwrap();
        cached.get(second.id).await.unwrap().unwrap()
    });

    assert_eq!(h1.await.unwrap(), expected_first);
    assert_eq!(h2.await.unwrap(), expected_second);
}
