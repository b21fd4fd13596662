#[cfg(test)]
mod tests {
    use cubedeck::model::{Dimension, DimensionType};
    use std::str::FromStr;

    #[test]
    fn test_dimension_defaults() {
        let dim = Dimension::string("name", "name");

        assert_eq!(dim.dimension_type, DimensionType::String);
        assert!(!dim.primary_key);
        assert!(dim.shown);
        assert!(dim.title.is_none());
    }

    #[test]
    fn test_primary_key_dimension() {
        let dim = Dimension::number("appId", "app_id").with_primary_key();

        assert!(dim.primary_key);
        assert_eq!(dim.sql.as_str(), "app_id");
    }

    #[test]
    fn test_hidden_dimension() {
        let dim = Dimension::string("internalCode", "internal_code").with_shown(false);
        assert!(!dim.shown);
    }

    #[test]
    fn test_display_title_prefers_explicit_title() {
        let dim = Dimension::string("reviewScoreDesc", "review_score_desc")
            .with_title("Review Description");
        assert_eq!(dim.display_title(), "Review Description");

        let untitled = Dimension::time("lastUpdated", "last_updated");
        assert_eq!(untitled.display_title(), "Last Updated");
    }

    #[test]
    fn test_dimension_type_parses_wire_spellings() {
        assert_eq!(
            DimensionType::from_str("number").unwrap(),
            DimensionType::Number
        );
        assert_eq!(
            DimensionType::from_str("string").unwrap(),
            DimensionType::String
        );
        assert_eq!(DimensionType::from_str("time").unwrap(), DimensionType::Time);
        assert_eq!(
            DimensionType::from_str("boolean").unwrap(),
            DimensionType::Boolean
        );
    }

    #[test]
    fn test_dimension_type_rejects_unknown_spelling() {
        let err = DimensionType::from_str("currency").unwrap_err();
        assert_eq!(err.0, "currency");
        assert_eq!(err.to_string(), "unknown dimension type 'currency'");
    }

    #[test]
    fn test_dimension_type_round_trips_display() {
        for ty in [
            DimensionType::Number,
            DimensionType::String,
            DimensionType::Time,
            DimensionType::Boolean,
        ] {
            assert_eq!(DimensionType::from_str(ty.as_str()).unwrap(), ty);
        }
    }
}
