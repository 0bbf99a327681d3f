//! Level-select map layout
//!
//! Levels snake across the map in rows (left-to-right, then right-to-left),
//! one block of rows per season with a header above it. Y grows downward as
//! negative values, matching a scroll view anchored at the top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::level::LevelDescriptor;
use super::profile::PlayerProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayoutConfig {
    pub levels_per_row: u32,
    pub map_width: f32,
    /// Vertical distance between rows
    pub level_spacing: f32,
    /// Vertical distance reserved around each season header
    pub season_spacing: f32,
    /// Extra scroll space below the last row
    pub bottom_padding: f32,
}

impl Default for MapLayoutConfig {
    fn default() -> Self {
        Self {
            levels_per_row: 3,
            map_width: 600.0,
            level_spacing: 150.0,
            season_spacing: 300.0,
            bottom_padding: 200.0,
        }
    }
}

/// Display state of a level node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Locked,
    /// The resume point
    Current,
    Completed,
    Unlocked,
}

/// Connector between consecutive levels of a season
#[derive(Debug, Clone, PartialEq)]
pub struct MapPath {
    pub from: u32,
    pub to: u32,
    pub start: Vec2,
    pub end: Vec2,
    /// Drawn lit when the destination is reachable or already beaten
    pub unlocked: bool,
}

/// Result of laying out the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    /// (season number, header y)
    pub season_headers: Vec<(u32, f32)>,
    /// Scrollable content height
    pub content_height: f32,
}

impl MapLayoutConfig {
    fn column_step(&self) -> f32 {
        self.map_width / (self.levels_per_row as f32 + 1.0)
    }

    /// Position of the `index`-th level in a season whose rows start at `*y`
    fn level_position(&self, index: u32, row: u32, y: &mut f32) -> Vec2 {
        let per_row = self.levels_per_row;
        let column = if row % 2 == 0 {
            index % per_row
        } else {
            (per_row - 1) - (index % per_row)
        };

        let start_x = -(self.map_width * 0.5) + self.column_step();
        let x = start_x + column as f32 * self.column_step();

        if index % per_row == 0 && index > 0 {
            *y -= self.level_spacing;
        }
        Vec2::new(x, *y)
    }
}

/// Assign `map_position` to every level and return header placement
pub fn layout_map(catalog: &mut Catalog, config: &MapLayoutConfig) -> MapLayout {
    let config = MapLayoutConfig {
        levels_per_row: config.levels_per_row.max(1),
        ..config.clone()
    };

    let mut season_headers = Vec::new();
    let mut placed: Vec<(u32, Vec2)> = Vec::new();
    let mut y = 0.0_f32;
    for season in catalog.seasons() {
        season_headers.push((season.season_number, y));
        y -= config.season_spacing * 0.3;

        let mut row = 0;
        for (index, level) in (0u32..).zip(&season.levels) {
            placed.push((level.level_number, config.level_position(index, row, &mut y)));
            if (index + 1) % config.levels_per_row == 0 {
                row += 1;
            }
        }
        y -= config.season_spacing * 0.7;
    }

    for (number, pos) in placed {
        if let Some(level) = catalog.level_mut(number) {
            level.map_position = pos;
        }
    }

    MapLayout {
        season_headers,
        content_height: y.abs() + config.bottom_padding,
    }
}

pub fn node_status(catalog: &Catalog, profile: &PlayerProfile, level: &LevelDescriptor) -> NodeStatus {
    if !catalog.is_level_unlocked(profile, level.level_number) {
        NodeStatus::Locked
    } else if catalog
        .next_unlocked_level(profile)
        .is_some_and(|next| next.level_number == level.level_number)
    {
        NodeStatus::Current
    } else if level.is_completed() {
        NodeStatus::Completed
    } else {
        NodeStatus::Unlocked
    }
}

/// Connectors between consecutive levels within each season
pub fn map_paths(catalog: &Catalog, profile: &PlayerProfile) -> Vec<MapPath> {
    catalog
        .seasons()
        .iter()
        .flat_map(|season| season.levels.windows(2))
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            MapPath {
                from: from.level_number,
                to: to.level_number,
                start: from.map_position,
                end: to.map_position,
                unlocked: catalog.is_level_unlocked(profile, to.level_number) || to.is_completed(),
            }
        })
        .collect()
}

/// Scroll offset (0 = top, 1 = bottom) that brings the resume level into view
pub fn scroll_to_current(catalog: &Catalog, profile: &PlayerProfile, layout: &MapLayout) -> Option<f32> {
    let next = catalog.next_unlocked_level(profile)?;
    if layout.content_height <= 0.0 {
        return None;
    }
    Some((next.map_position.y.abs() / layout.content_height).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn catalog(per_season: u32) -> Catalog {
        Catalog::standard(&GameConfig {
            levels_per_season: per_season,
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_zigzag_rows() {
        let mut cat = catalog(6);
        layout_map(&mut cat, &MapLayoutConfig::default());

        let x = |n: u32| cat.level(n).unwrap().map_position.x;
        let y = |n: u32| cat.level(n).unwrap().map_position.y;

        // Row 0 left to right: -150, 0, 150
        assert!((x(1) + 150.0).abs() < 1e-3);
        assert!(x(2).abs() < 1e-3);
        assert!((x(3) - 150.0).abs() < 1e-3);
        // Row 1 right to left
        assert!((x(4) - 150.0).abs() < 1e-3);
        assert!((x(6) + 150.0).abs() < 1e-3);
        // Header takes 90, second row one spacing lower
        assert!((y(1) + 90.0).abs() < 1e-3);
        assert!((y(4) + 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_season_headers_and_height() {
        let mut cat = catalog(3);
        let layout = layout_map(&mut cat, &MapLayoutConfig::default());
        assert_eq!(layout.season_headers.len(), 3);
        assert_eq!(layout.season_headers[0], (1, 0.0));
        // Each one-row season consumes the full season spacing
        assert!((layout.season_headers[1].1 + 300.0).abs() < 1e-3);
        assert!((layout.content_height - 1100.0).abs() < 1e-3);
    }

    #[test]
    fn test_node_status() {
        let mut cat = catalog(3);
        cat.level_mut(1).unwrap().stars_earned = 2;
        let profile = PlayerProfile {
            unlocked_levels: 2,
            ..PlayerProfile::default()
        };
        let status = |n: u32| node_status(&cat, &profile, cat.level(n).unwrap());
        assert_eq!(status(1), NodeStatus::Completed);
        assert_eq!(status(2), NodeStatus::Current);
        assert_eq!(status(3), NodeStatus::Locked);
    }

    #[test]
    fn test_paths_stay_within_seasons() {
        let cat = catalog(3);
        let profile = PlayerProfile::default();
        let paths = map_paths(&cat, &profile);
        // 3 seasons x 2 connectors
        assert_eq!(paths.len(), 6);
        assert!(!paths.iter().any(|p| p.from == 3 && p.to == 4));
        assert!(!paths[0].unlocked);
    }

    #[test]
    fn test_scroll_to_current() {
        let mut cat = catalog(3);
        let layout = layout_map(&mut cat, &MapLayoutConfig::default());
        let profile = PlayerProfile::default();
        let offset = scroll_to_current(&cat, &profile, &layout).unwrap();
        assert!(offset > 0.0 && offset < 0.2);
    }
}
