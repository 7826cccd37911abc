//! End-to-end tests for a feed batch: raw JSON text -> canonicalization ->
//! strict normalization -> insertion through the `CatalogStore` seam.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use tradefeed_catalog::{InMemoryCatalogStore, Packaging};

    use crate::normalize_batch;

    /// A three-item feed body exercising the known quirks in one document:
    /// mapping weight, alias keys, a duplicate packaging key, a meat item,
    /// and one rejected item in the middle.
    const FEED_BODY: &str = r#"[
        {
            "code": "4311501438306",
            "type": "gtin",
            "comment": "",
            "amount_multiplier": 1,
            "brand": "GUT&GUENSTIG",
            "description": "H-Milch 3,5%",
            "edeka_article_number": "111087",
            "net_weight": { "amount": 1, "unit": 3 },
            "gross_weight": 1.06,
            "packaging": false,
            "packaging": "NE",
            "trade_item_descriptor": "CASE",
            "requires_best_before_date": true,
            "status": "validated",
            "vat": { "DEU": { "label": "DE7", "rate": 19 } },
            "vat_rate": "STANDARD"
        },
        {
            "code": "4021700002275",
            "brand": "Broken",
            "description": "Bad item",
            "amount_multiplier": 1,
            "net_weight": "heavy",
            "packaging": "XX",
            "trade_item_unit_descriptor": "CASE",
            "validation_status": "validated"
        },
        {
            "code": "2000000000015",
            "type": "whitelisted_plu",
            "amount_multiplier": 6,
            "brand": "Landmetzgerei",
            "description": "Rinderhack",
            "net_weight": { "amount": 500, "unit": "g" },
            "packaging": "CU",
            "trade_item_unit_descriptor": "BASE_UNIT_OR_EACH",
            "requires_meat_info": true,
            "country_of_slaughter": "DE",
            "country_of_rearing": "DE",
            "lot_number": "L-2209",
            "validation_status": "unvalidated"
        }
    ]"#;

    #[test]
    fn feed_batch_flows_into_the_store() {
        tradefeed_observability::init();

        let items: Vec<Value> = serde_json::from_str(FEED_BODY).unwrap();
        let results = normalize_batch(&items);
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err(), "middle item must be quarantined");

        let mut store = InMemoryCatalogStore::new();
        for result in results {
            if let Ok(item) = result {
                item.insert_into(&mut store).unwrap();
            }
        }
        assert_eq!(store.product_count(), 2);
    }

    #[test]
    fn quirks_survive_the_full_path() {
        let items: Vec<Value> = serde_json::from_str(FEED_BODY).unwrap();
        let results = normalize_batch(&items);

        let milk = results[0].as_ref().unwrap();
        // Duplicate key resolved to the later value, alias keys folded,
        // unit name derived from the weight mapping.
        assert_eq!(milk.product.packaging, Packaging::Ne);
        assert_eq!(milk.product.unit_name, "3");
        assert_eq!(milk.product.vat_country_name.as_deref(), Some("DEU"));

        let meat = results[2].as_ref().unwrap();
        let fields = meat.meat_info.as_ref().unwrap();
        assert_eq!(fields.country_of_slaughter.unwrap().as_str(), "DE");
        assert_eq!(fields.lot_number.as_deref(), Some("L-2209"));
    }
}
