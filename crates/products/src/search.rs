use crate::catalog::Product;

/// Catalog search: case-insensitive substring match on title, unit, or
/// description. A blank term returns every product; any other term is matched
/// untrimmed.
pub fn search_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    if term.trim().is_empty() {
        return products.iter().collect();
    }
    let term = term.to_lowercase();

    products
        .iter()
        .filter(|product| {
            [
                Some(product.title.as_str()),
                Some(product.unit.as_str()),
                product.description.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductId;
    use stockroom_inventory::StockLevels;

    fn product(id: &str, title: &str, unit: &str, description: Option<&str>) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_string(),
            unit: unit.to_string(),
            price: None,
            description: description.map(str::to_string),
            stock_quantity: 0,
            levels: StockLevels::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Mustard Oil", "1 l", None),
            product("2", "Jaggery", "500 g", Some("Organic, unrefined")),
            product("3", "Rock salt", "1 kg", Some("Pink salt from the hills")),
        ]
    }

    fn ids(found: Vec<&Product>) -> Vec<&str> {
        found.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn blank_term_returns_everything() {
        let products = catalog();
        assert_eq!(ids(search_products(&products, "   ")), vec!["1", "2", "3"]);
    }

    #[test]
    fn matches_title_case_insensitively() {
        let products = catalog();
        assert_eq!(ids(search_products(&products, "OIL")), vec!["1"]);
    }

    #[test]
    fn matches_unit_and_description() {
        let products = catalog();
        assert_eq!(ids(search_products(&products, "kg")), vec!["3"]);
        assert_eq!(ids(search_products(&products, "organic")), vec!["2"]);
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_term() {
        let products = catalog();
        assert_eq!(ids(search_products(&products, " salt")), vec!["3"]);
        assert!(search_products(&products, "jaggery ").is_empty());
    }

    #[test]
    fn missing_description_never_matches() {
        let products = catalog();
        assert!(search_products(&products, "unrefined mustard").is_empty());
    }
}
