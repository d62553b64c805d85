use std::cmp::Ordering;

use crate::models::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Price,
    #[default]
    Name,
    Category,
}

impl SortKey {
    /// Case-insensitive; anything unrecognized falls back to [`SortKey::Name`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("price") => SortKey::Price,
            Some("category") => SortKey::Category,
            _ => SortKey::Name,
        }
    }
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `products` by `key`.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Price => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::Name => {
            products.sort_by(|a, b| nulls_last(Some(a.name.as_str()), Some(b.name.as_str())))
        }
        SortKey::Category => {
            products.sort_by(|a, b| nulls_last(a.category.as_deref(), b.category.as_deref()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductType;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, category: Option<&str>, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.map(str::to_string),
            price: Decimal::new(cents, 2),
            stock_quantity: 1,
            product_type: ProductType::Product,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn parse_is_case_insensitive_with_name_default() {
        assert_eq!(SortKey::parse(Some("PRICE")), SortKey::Price);
        assert_eq!(SortKey::parse(Some("Category")), SortKey::Category);
        assert_eq!(SortKey::parse(Some("name")), SortKey::Name);
        assert_eq!(SortKey::parse(Some("stockQuantity")), SortKey::Name);
        assert_eq!(SortKey::parse(None), SortKey::Name);
    }

    #[test]
    fn price_sort_is_non_decreasing_permutation() {
        let mut products = vec![
            product("a", "A", None, 999),
            product("b", "B", None, 100),
            product("c", "C", None, 250),
            product("d", "D", None, 100),
        ];
        let mut before: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        sort_products(&mut products, SortKey::Price);

        assert!(products.windows(2).all(|w| w[0].price <= w[1].price));
        let mut after: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn equal_keys_keep_original_order() {
        let mut products = vec![
            product("first", "Same", Some("x"), 100),
            product("cheap", "Other", Some("x"), 50),
            product("second", "Same", Some("x"), 100),
        ];
        sort_products(&mut products, SortKey::Price);
        assert_eq!(ids(&products), ["cheap", "first", "second"]);

        sort_products(&mut products, SortKey::Name);
        assert_eq!(ids(&products), ["cheap", "first", "second"]);
    }

    #[test]
    fn name_sort_uses_code_point_order() {
        let mut products = vec![
            product("1", "banana", None, 1),
            product("2", "Zucchini", None, 1),
            product("3", "apple", None, 1),
        ];
        sort_products(&mut products, SortKey::Name);
        assert_eq!(ids(&products), ["2", "3", "1"]);
    }

    #[test]
    fn missing_categories_sort_last() {
        let mut products = vec![
            product("none-1", "A", None, 1),
            product("toys", "B", Some("Toys"), 1),
            product("none-2", "C", None, 1),
            product("books", "D", Some("Books"), 1),
        ];
        sort_products(&mut products, SortKey::Category);
        assert_eq!(ids(&products), ["books", "toys", "none-1", "none-2"]);
    }
}
