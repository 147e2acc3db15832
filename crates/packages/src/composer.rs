//! Package price composition.

use crate::package::PackageItem;

/// Aggregates derived from a package's item list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition {
    /// Catalog value: `Σ product.base_price * quantity`.
    pub original_price: f64,
    /// Sale value: `Σ (unit_price ?? 0) * quantity`.
    pub sale_price: f64,
}

/// Recompute both package aggregates from the item list.
///
/// Pure and idempotent: the same item list always yields the same
/// composition. An item without a unit price contributes zero to the sale
/// side (it is priced only once the operator fills it in).
pub fn compose(items: &[PackageItem]) -> Composition {
    let mut original_price = 0.0;
    let mut sale_price = 0.0;

    for item in items {
        original_price += item.product.base_price * item.quantity;
        sale_price += item.unit_price.unwrap_or(0.0) * item.quantity;
    }

    Composition {
        original_price,
        sale_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressdesk_catalog::ProductRef;
    use pressdesk_core::ProductId;
    use proptest::prelude::*;

    fn test_item(base_price: f64, unit_price: Option<f64>, quantity: f64) -> PackageItem {
        let id = ProductId::new();
        PackageItem {
            product_id: id,
            product: ProductRef::new(id, "product", base_price),
            quantity,
            unit_price,
            variant_description: None,
        }
    }

    #[test]
    fn package_scenario_original_fifty_sale_thirty_eight() {
        let items = vec![
            test_item(20.0, Some(15.0), 2.0),
            test_item(10.0, Some(8.0), 1.0),
        ];
        let composition = compose(&items);
        assert_eq!(composition.original_price, 50.0);
        assert_eq!(composition.sale_price, 38.0);
    }

    #[test]
    fn unpriced_item_contributes_zero_to_sale_price() {
        let items = vec![test_item(20.0, None, 3.0)];
        let composition = compose(&items);
        assert_eq!(composition.original_price, 60.0);
        assert_eq!(composition.sale_price, 0.0);
    }

    #[test]
    fn empty_item_list_composes_to_zero() {
        let composition = compose(&[]);
        assert_eq!(composition.original_price, 0.0);
        assert_eq!(composition.sale_price, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: composing the same item list twice yields identical
        /// aggregates (idempotence over the item list).
        #[test]
        fn compose_is_idempotent(
            specs in prop::collection::vec(
                (0.0f64..500.0, prop::option::of(0.0f64..400.0), 0.0f64..20.0),
                0..12
            )
        ) {
            let items: Vec<PackageItem> = specs
                .iter()
                .map(|&(base, unit, qty)| test_item(base, unit, qty))
                .collect();

            let first = compose(&items);
            let second = compose(&items);
            prop_assert_eq!(first, second);
        }
    }
}
