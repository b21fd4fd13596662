#[cfg(test)]
mod tests {
    use cubedeck::model::{Measure, MeasureType};
    use std::str::FromStr;

    #[test]
    fn test_count_measure_needs_no_sql() {
        let measure = Measure::count("count").with_title("Total Recent Top Games");

        assert_eq!(measure.measure_type, MeasureType::Count);
        assert!(measure.sql.is_none());
        assert!(!measure.measure_type.requires_sql());
        assert_eq!(measure.display_title(), "Total Recent Top Games");
    }

    #[test]
    fn test_sum_measure_carries_expression() {
        let measure = Measure::sum(
            "totalReviews",
            "COALESCE(total_positive, 0) + COALESCE(total_negative, 0)",
        );

        assert_eq!(measure.measure_type, MeasureType::Sum);
        assert_eq!(
            measure.sql.as_ref().map(|s| s.as_str()),
            Some("COALESCE(total_positive, 0) + COALESCE(total_negative, 0)")
        );
        assert!(measure.measure_type.requires_sql());
    }

    #[test]
    fn test_display_title_humanizes_member_name() {
        let measure = Measure::sum("totalPositiveReviews", "total_positive");
        assert_eq!(measure.display_title(), "Total Positive Reviews");

        let count = Measure::count("count");
        assert_eq!(count.display_title(), "Count");
    }

    #[test]
    fn test_measure_with_filter_and_description() {
        let measure = Measure::avg("avgScore", "review_score")
            .with_filter("${CUBE}.review_score IS NOT NULL")
            .with_description("Mean review score over scored games");

        assert!(measure.filter.is_some());
        assert!(measure.description.is_some());
    }

    #[test]
    fn test_measure_type_parses_wire_spellings() {
        assert_eq!(MeasureType::from_str("count").unwrap(), MeasureType::Count);
        assert_eq!(MeasureType::from_str("sum").unwrap(), MeasureType::Sum);
        assert_eq!(MeasureType::from_str("avg").unwrap(), MeasureType::Avg);
        assert_eq!(MeasureType::from_str("min").unwrap(), MeasureType::Min);
        assert_eq!(MeasureType::from_str("max").unwrap(), MeasureType::Max);
        assert_eq!(
            MeasureType::from_str("countDistinct").unwrap(),
            MeasureType::CountDistinct
        );
        assert_eq!(
            MeasureType::from_str("runningTotal").unwrap(),
            MeasureType::RunningTotal
        );
    }

    #[test]
    fn test_measure_type_rejects_unknown_spelling() {
        let err = MeasureType::from_str("median").unwrap_err();
        assert_eq!(err.0, "median");
        assert_eq!(err.to_string(), "unknown aggregation type 'median'");

        // Spellings are case-sensitive: the wire format is camelCase.
        assert!(MeasureType::from_str("COUNT").is_err());
        assert!(MeasureType::from_str("countdistinct").is_err());
    }

    #[test]
    fn test_measure_type_round_trips_display() {
        for ty in [
            MeasureType::Count,
            MeasureType::Sum,
            MeasureType::Avg,
            MeasureType::Min,
            MeasureType::Max,
            MeasureType::CountDistinct,
            MeasureType::RunningTotal,
        ] {
            assert_eq!(MeasureType::from_str(ty.as_str()).unwrap(), ty);
        }
    }
}
