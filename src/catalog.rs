//! The Steam games catalog.
//!
//! Concrete descriptors for the recent-top-games analytics schema. The
//! `recent_top_games` source relation exposes the columns `app_id`, `name`,
//! `review_score_desc`, `review_score`, `last_updated`,
//! `release_date_actual`, `is_free`, `total_positive`, and `total_negative`;
//! those names are part of the contract with the backing store and must not
//! drift.

use crate::model::{Cube, Dimension, Join, Measure, PreAggregation, Relationship, Segment};
use crate::registry::{CubeRegistry, RegistryBuilder, RegistryError};

/// The central cube: recently updated games ranked by review volume.
pub fn recent_top_games() -> Cube {
    Cube::new("RecentTopGames", "SELECT * FROM recent_top_games")
        .with_join(Join::new(
            "GameTags",
            "${CUBE}.app_id = ${GameTags.appId}",
            Relationship::HasMany,
        ))
        .with_join(Join::new(
            "Genres",
            "${CUBE}.app_id = ${Genres.gameAppId}",
            Relationship::HasMany,
        ))
        .with_join(Join::new(
            "Categories",
            "${CUBE}.app_id = ${Categories.gameAppId}",
            Relationship::HasMany,
        ))
        .with_measure(Measure::count("count").with_title("Total Recent Top Games"))
        .with_measure(
            Measure::sum(
                "totalReviews",
                "COALESCE(total_positive, 0) + COALESCE(total_negative, 0)",
            )
            .with_title("Total Reviews"),
        )
        .with_measure(
            Measure::sum("totalPositiveReviews", "total_positive")
                .with_title("Total Positive Reviews"),
        )
        .with_measure(
            Measure::sum("totalNegativeReviews", "total_negative")
                .with_title("Total Negative Reviews"),
        )
        .with_dimension(
            Dimension::number("appId", "app_id")
                .with_primary_key()
                .with_shown(true),
        )
        .with_dimension(Dimension::string("name", "name").with_title("Game Name"))
        .with_dimension(
            Dimension::string("reviewScoreDesc", "review_score_desc")
                .with_title("Review Description"),
        )
        .with_dimension(
            Dimension::number("reviewScore", "review_score").with_title("Review Score"),
        )
        .with_dimension(Dimension::time("lastUpdated", "last_updated").with_title("Last Updated"))
        .with_dimension(
            Dimension::time("releaseDate", "release_date_actual").with_title("Release Date"),
        )
        .with_dimension(Dimension::boolean("isFree", "is_free").with_title("Is Free"))
        .with_segment(Segment::new(
            "veryPositiveOrBetter",
            "${CUBE}.review_score_desc IN ('Very Positive', 'Overwhelmingly Positive')",
        ))
        .with_pre_aggregation(
            PreAggregation::rollup("main")
                .with_measure("count")
                .with_measure("totalReviews")
                .with_measure("totalPositiveReviews")
                .with_measure("totalNegativeReviews")
                .with_dimension("reviewScoreDesc")
                .with_refresh_key("SELECT MAX(last_updated) FROM ${CUBE}"),
        )
}

/// User-applied tags per game. Join target of [`recent_top_games`].
pub fn game_tags() -> Cube {
    Cube::new("GameTags", "SELECT * FROM game_tags")
        .with_count("count")
        .with_dimension(Dimension::number("appId", "app_id").with_primary_key())
        .with_dimension(Dimension::string("tag", "tag"))
}

/// Store genres per game. Join target of [`recent_top_games`].
pub fn genres() -> Cube {
    Cube::new("Genres", "SELECT * FROM genres")
        .with_count("count")
        .with_dimension(Dimension::number("gameAppId", "game_app_id").with_primary_key())
        .with_dimension(Dimension::string("genre", "genre"))
}

/// Store categories per game. Join target of [`recent_top_games`].
pub fn categories() -> Cube {
    Cube::new("Categories", "SELECT * FROM categories")
        .with_count("count")
        .with_dimension(Dimension::number("gameAppId", "game_app_id").with_primary_key())
        .with_dimension(Dimension::string("category", "category"))
}

/// Build the full catalog: every cube registered, joins resolved, frozen.
pub fn steam_catalog() -> Result<CubeRegistry, RegistryError> {
    RegistryBuilder::new()
        .register(recent_top_games())
        .register(game_tags())
        .register(genres())
        .register(categories())
        .build()
}
