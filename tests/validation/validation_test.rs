#[cfg(test)]
mod tests {
    use cubedeck::model::{Cube, Dimension, Measure, PreAggregation};
    use cubedeck::validation::{validate_cube, MemberKind, SchemaError, SchemaWarning};
    use insta::assert_snapshot;

    fn valid_cube() -> Cube {
        Cube::new("Games", "SELECT * FROM games")
            .with_count("count")
            .with_dimension(Dimension::number("appId", "app_id").with_primary_key())
    }

    #[test]
    fn test_valid_cube_passes_without_warnings() {
        let warnings = validate_cube(&valid_cube()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_source_sql_is_rejected() {
        let cube = Cube::new("Games", "");
        let errors = validate_cube(&cube).unwrap_err();

        assert_eq!(
            errors,
            vec![SchemaError::MissingSource {
                cube: "Games".to_string(),
            }]
        );
        assert_snapshot!(errors[0].to_string(), @"cube 'Games' has no source sql");
    }

    #[test]
    fn test_blank_source_sql_is_rejected() {
        let cube = Cube::new("Games", "   ");
        assert!(validate_cube(&cube).is_err());
    }

    #[test]
    fn test_non_count_measure_requires_sql() {
        let cube = valid_cube().with_measure(Measure::new(
            "totalReviews",
            cubedeck::model::MeasureType::Sum,
        ));
        let errors = validate_cube(&cube).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            SchemaError::MissingMeasureSql { cube, measure, .. }
                if cube == "Games" && measure == "totalReviews"
        ));
        assert_snapshot!(
            errors[0].to_string(),
            @"measure 'Games.totalReviews' of type sum requires a sql expression"
        );
    }

    #[test]
    fn test_count_measure_without_sql_is_accepted() {
        let cube = Cube::new("Games", "SELECT * FROM games").with_count("count");
        assert!(validate_cube(&cube).is_ok());
    }

    #[test]
    fn test_pre_aggregation_with_undefined_measure_is_rejected() {
        let cube = valid_cube().with_pre_aggregation(
            PreAggregation::rollup("main")
                .with_measure("count")
                .with_measure("totalReviews"),
        );
        let errors = validate_cube(&cube).unwrap_err();

        assert_eq!(
            errors,
            vec![SchemaError::DanglingReference {
                cube: "Games".to_string(),
                pre_aggregation: "main".to_string(),
                kind: MemberKind::Measure,
                name: "totalReviews".to_string(),
            }]
        );
        assert_snapshot!(
            errors[0].to_string(),
            @"pre-aggregation 'Games.main' references undefined measure 'totalReviews'"
        );
    }

    #[test]
    fn test_pre_aggregation_with_undefined_dimension_is_rejected() {
        let cube = valid_cube()
            .with_pre_aggregation(PreAggregation::rollup("main").with_dimension("reviewScoreDesc"));
        let errors = validate_cube(&cube).unwrap_err();

        assert!(matches!(
            &errors[0],
            SchemaError::DanglingReference { kind: MemberKind::Dimension, name, .. }
                if name == "reviewScoreDesc"
        ));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let cube = Cube::new("Games", "")
            .with_measure(Measure::new("revenue", cubedeck::model::MeasureType::Sum))
            .with_pre_aggregation(PreAggregation::rollup("main").with_measure("missing"));
        let errors = validate_cube(&cube).unwrap_err();

        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_multiple_primary_keys_warn_but_pass() {
        let cube = Cube::new("Games", "SELECT * FROM games")
            .with_dimension(Dimension::number("steamId", "steam_id").with_primary_key())
            .with_dimension(Dimension::number("appId", "app_id").with_primary_key());

        let warnings = validate_cube(&cube).unwrap();
        assert_eq!(
            warnings,
            vec![SchemaWarning::MultiplePrimaryKeys {
                cube: "Games".to_string(),
                dimensions: vec!["appId".to_string(), "steamId".to_string()],
            }]
        );
        assert_snapshot!(
            warnings[0].to_string(),
            @"cube 'Games' flags multiple primary key dimensions: appId, steamId"
        );
    }

    #[test]
    fn test_single_primary_key_does_not_warn() {
        let warnings = validate_cube(&valid_cube()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_member_stored_under_wrong_key_is_rejected() {
        let mut cube = valid_cube();
        let measure = Measure::count("rowCount");
        cube.measures.insert("count_of_rows".to_string(), measure);

        let errors = validate_cube(&cube).unwrap_err();
        assert!(matches!(
            &errors[0],
            SchemaError::MismatchedMemberName { kind: MemberKind::Measure, key, name, .. }
                if key == "count_of_rows" && name == "rowCount"
        ));
    }
}
