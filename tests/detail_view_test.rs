use async_trait::async_trait;
use rust_decimal::Decimal;
use shopswift::app::views;
use shopswift::{CartStore, LoadState, Product, ProductDetailView, ProductSource, Rating, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory product source with optional latency and scripted failures.
#[derive(Default)]
struct FakeSource {
    products: HashMap<u64, Product>,
    delay: Option<Duration>,
    failures_before_success: usize,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeSource {
    fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProductSource for FakeSource {
    async fn list_products(&self) -> shopswift::Result<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }

    async fn get_product(&self, id: u64) -> shopswift::Result<Product> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if call < self.failures_before_success {
            return Err(StoreError::transport("connection reset"));
        }
        self.products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list_categories(&self) -> shopswift::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

fn product(id: u64) -> Product {
    Product {
        id,
        title: "Mens Casual Slim Fit".to_string(),
        price: Decimal::new(1599, 2),
        description: "The color could be slightly different".to_string(),
        category: "men's clothing".to_string(),
        image: "https://fakestoreapi.com/img/71YXzeOuslL._AC_UY879_.jpg".to_string(),
        rating: Rating {
            rate: 2.1,
            count: 430,
        },
    }
}

#[tokio::test]
async fn test_loads_existing_product() {
    let source = Arc::new(FakeSource::with_products(vec![product(4)]));
    let view = ProductDetailView::open(source, 4);

    let state = view.settled().await;

    assert_eq!(state, LoadState::Loaded(product(4)));
    assert_eq!(view.product_id(), 4);
}

#[tokio::test]
async fn test_missing_product_renders_not_found() {
    let source = Arc::new(FakeSource::with_products(vec![product(4)]));
    let view = ProductDetailView::open(source, 99);

    let state = view.settled().await;

    assert_eq!(state, LoadState::NotFound(99));
    let text = views::render_product_detail(&state, None);
    assert!(text.contains("Product Not Found"));
    assert!(text.contains("Browse Products"));
}

#[tokio::test]
async fn test_dropping_view_discards_pending_fetch() {
    let source = Arc::new(FakeSource {
        delay: Some(Duration::from_millis(200)),
        ..FakeSource::with_products(vec![product(1)])
    });

    let view = ProductDetailView::open(source.clone(), 1);
    let mut rx = view.subscribe();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    drop(view);
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(source.completed.load(Ordering::SeqCst), 0);
    assert_eq!(*rx.borrow_and_update(), LoadState::Loading);
}

#[tokio::test]
async fn test_retry_after_transport_failure() {
    let source = Arc::new(FakeSource {
        failures_before_success: 1,
        ..FakeSource::with_products(vec![product(2)])
    });
    let mut view = ProductDetailView::open(source.clone(), 2);

    let first = view.settled().await;
    assert!(matches!(first, LoadState::Failed(ref message) if message.contains("connection reset")));

    assert!(view.retry());
    let second = view.settled().await;

    assert_eq!(second, LoadState::Loaded(product(2)));
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert!(!view.retry());
}

#[tokio::test]
async fn test_add_to_cart_waits_for_product() {
    let source = Arc::new(FakeSource {
        delay: Some(Duration::from_millis(50)),
        ..FakeSource::with_products(vec![product(3)])
    });
    let cart = CartStore::new();
    let view = ProductDetailView::open(source, 3);

    assert!(!view.add_to_cart(&cart));
    assert_eq!(cart.total_items(), 0);

    view.settled().await;
    assert!(view.add_to_cart(&cart));
    assert!(view.add_to_cart(&cart));

    assert_eq!(cart.quantity_of(3), 2);
    assert_eq!(cart.total_price(), Decimal::new(3198, 2));
}
