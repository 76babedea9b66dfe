use crate::domain::model::Product;
use crate::domain::ports::ProductSource;
use crate::utils::error::Result;

/// The full product list, fetched once per session.
///
/// Category filtering runs over the fetched list and never re-requests the
/// source.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    products: Vec<Product>,
}

impl Catalogue {
    pub async fn load<S: ProductSource + ?Sized>(source: &S) -> Result<Self> {
        let products = source.list_products().await?;
        Ok(Self::from_products(products))
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories present in the list, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .products
            .iter()
            .map(|product| product.category.clone())
            .filter(|category| !category.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Products in `category` (case-insensitive), or all products for `None`.
    pub fn filter(&self, category: Option<&str>) -> Vec<&Product> {
        match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => self
                .products
                .iter()
                .filter(|product| product.category.eq_ignore_ascii_case(category))
                .collect(),
            None => self.products.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Rating;
    use crate::utils::error::StoreError;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    struct StaticSource(Vec<Product>);

    #[async_trait]
    impl ProductSource for StaticSource {
        async fn list_products(&self) -> Result<Vec<Product>> {
            Ok(self.0.clone())
        }

        async fn get_product(&self, id: u64) -> Result<Product> {
            Err(StoreError::NotFound { id })
        }

        async fn list_categories(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            title: format!("Item {}", id),
            price: Decimal::new(1000, 2),
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating {
                rate: 3.5,
                count: 4,
            },
        }
    }

    fn sample() -> Catalogue {
        Catalogue::from_products(vec![
            product(1, "men's clothing"),
            product(2, "jewelery"),
            product(3, "electronics"),
            product(4, "jewelery"),
        ])
    }

    #[test]
    fn test_load_keeps_source_order() {
        let source = StaticSource(vec![product(9, "electronics"), product(2, "jewelery")]);
        let catalogue = tokio_test::block_on(Catalogue::load(&source)).unwrap();

        let ids: Vec<u64> = catalogue.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 2]);
    }

    #[test]
    fn test_categories_are_sorted_and_unique() {
        assert_eq!(
            sample().categories(),
            vec!["electronics", "jewelery", "men's clothing"]
        );
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let catalogue = sample();
        let ids: Vec<u64> = catalogue
            .filter(Some("Jewelery"))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_no_or_blank_filter_returns_everything() {
        let catalogue = sample();
        assert_eq!(catalogue.filter(None).len(), 4);
        assert_eq!(catalogue.filter(Some(" ")).len(), 4);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(sample().filter(Some("books")).is_empty());
    }

    #[test]
    fn test_find() {
        let catalogue = sample();
        assert_eq!(catalogue.find(3).map(|p| p.id), Some(3));
        assert!(catalogue.find(30).is_none());
    }
}
