#[cfg(test)]
mod tests {
    use cubedeck::model::{
        Cube, Dimension, Join, Measure, PreAggregation, Relationship, Segment,
    };

    fn minimal_cube() -> Cube {
        Cube::new("RecentTopGames", "SELECT * FROM recent_top_games")
            .with_count("count")
            .with_dimension(Dimension::number("appId", "app_id").with_primary_key())
    }

    #[test]
    fn test_minimal_cube_builder() {
        let cube = minimal_cube();

        assert_eq!(cube.name, "RecentTopGames");
        assert_eq!(cube.sql.as_str(), "SELECT * FROM recent_top_games");
        assert_eq!(cube.measures.len(), 1);
        assert_eq!(cube.dimensions.len(), 1);
        assert!(cube.measure("count").is_some());
        assert!(cube.dimension("appId").is_some());
        assert!(cube.measure("missing").is_none());
    }

    #[test]
    fn test_cube_records_joins() {
        let cube = minimal_cube().with_join(Join::new(
            "GameTags",
            "${CUBE}.app_id = ${GameTags.appId}",
            Relationship::HasMany,
        ));

        let join = cube.join("GameTags").unwrap();
        assert_eq!(join.target, "GameTags");
        assert_eq!(join.relationship, Relationship::HasMany);
        assert_eq!(join.on.as_str(), "${CUBE}.app_id = ${GameTags.appId}");
        assert_eq!(join.on.referenced_cubes(), vec!["GameTags".to_string()]);
    }

    #[test]
    fn test_cube_records_segments_and_pre_aggregations() {
        let cube = minimal_cube()
            .with_segment(Segment::new("freeGames", "${CUBE}.is_free = true"))
            .with_pre_aggregation(
                PreAggregation::rollup("main")
                    .with_measure("count")
                    .with_dimension("appId")
                    .with_refresh_key("SELECT MAX(last_updated) FROM ${CUBE}"),
            );

        assert!(cube.segment("freeGames").is_some());
        let rule = cube.pre_aggregation("main").unwrap();
        assert_eq!(rule.measures, vec!["count".to_string()]);
        assert_eq!(rule.dimensions, vec!["appId".to_string()]);
        assert_eq!(
            rule.refresh_key.as_ref().map(|k| k.as_str()),
            Some("SELECT MAX(last_updated) FROM ${CUBE}")
        );
    }

    #[test]
    fn test_primary_key_lookup() {
        let cube = minimal_cube();
        assert_eq!(cube.primary_key().map(|d| d.name.as_str()), Some("appId"));

        let keyless = Cube::new("Tags", "SELECT * FROM tags")
            .with_dimension(Dimension::string("tag", "tag"));
        assert!(keyless.primary_key().is_none());
    }

    #[test]
    fn test_primary_key_name_order_tiebreak() {
        let cube = Cube::new("Games", "SELECT * FROM games")
            .with_dimension(Dimension::number("steamId", "steam_id").with_primary_key())
            .with_dimension(Dimension::number("appId", "app_id").with_primary_key());

        let flagged = cube.primary_keys();
        assert_eq!(flagged.len(), 2);
        assert_eq!(cube.primary_key().map(|d| d.name.as_str()), Some("appId"));
    }

    #[test]
    fn test_later_member_with_same_name_replaces() {
        let cube = Cube::new("Games", "SELECT * FROM games")
            .with_count("total")
            .with_measure(Measure::sum("total", "amount"));

        assert_eq!(cube.measures.len(), 1);
        assert!(cube.measure("total").unwrap().sql.is_some());
    }

    #[test]
    fn test_display_title_falls_back_to_name() {
        let cube = minimal_cube();
        assert_eq!(cube.display_title(), "Recent Top Games");

        let titled = minimal_cube().with_title("Top Games (Recent)");
        assert_eq!(titled.display_title(), "Top Games (Recent)");
    }

    #[test]
    fn test_identical_declarations_are_equal() {
        assert_eq!(minimal_cube(), minimal_cube());

        let other = minimal_cube().with_count("extra");
        assert_ne!(minimal_cube(), other);
    }
}
