// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map collaborator.
//!
//! The controller only ever centers the view and drops markers; clicks on
//! the map come back in through `SessionController::select_point`.

use crate::models::{Coordinates, MarkerView};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};

pub trait MapView {
    /// Move the view to `coordinates` at `zoom`.
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8);

    /// Add a marker with an open popup.
    fn place_marker(&mut self, marker: &MarkerView);

    fn clear_markers(&mut self);
}

/// Headless map that keeps its markers as GeoJSON point features.
///
/// Each feature carries `id`, `popup` and `className` properties, which is
/// enough for a web host to redraw the layer.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonMap {
    view: Option<(Coordinates, u8)>,
    features: Vec<Feature>,
}

impl GeoJsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current center and zoom, if the view was ever set.
    pub fn view(&self) -> Option<(Coordinates, u8)> {
        self.view
    }

    pub fn marker_count(&self) -> usize {
        self.features.len()
    }

    /// Ids of the placed markers, in placement order.
    pub fn marker_ids(&self) -> Vec<String> {
        self.features
            .iter()
            .filter_map(|f| f.property("id"))
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features.clone(),
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> String {
        GeoJson::FeatureCollection(self.to_feature_collection()).to_string()
    }
}

impl MapView for GeoJsonMap {
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8) {
        self.view = Some((coordinates, zoom));
    }

    fn place_marker(&mut self, marker: &MarkerView) {
        let point: geo::Point<f64> = marker.coordinates.into();

        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), marker.workout_id.clone().into());
        properties.insert("popup".to_string(), marker.popup_content.clone().into());
        properties.insert("className".to_string(), marker.style_class.clone().into());

        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(&point))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    fn clear_markers(&mut self) {
        self.features.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Workout;

    #[test]
    fn test_marker_becomes_point_feature() {
        let mut map = GeoJsonMap::new();
        let run = Workout::running(Coordinates::new(39.0, -12.0), 5.2, 20.0, 178.0).unwrap();
        map.place_marker(&MarkerView::for_workout(&run));

        let collection = map.to_feature_collection();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        let geometry = feature.geometry.as_ref().unwrap();
        // GeoJSON positions are [lng, lat]
        assert_eq!(geometry.value, geojson::Value::Point(vec![-12.0, 39.0]));
        assert_eq!(
            feature.property("className").and_then(|v| v.as_str()),
            Some("running-popup")
        );
        assert_eq!(map.marker_ids(), vec![run.id().to_string()]);
    }

    #[test]
    fn test_geojson_string_parses_back() {
        let mut map = GeoJsonMap::new();
        let ride = Workout::cycling(Coordinates::new(39.0, -12.0), 27.0, 95.0, 523.0).unwrap();
        map.place_marker(&MarkerView::for_workout(&ride));

        let parsed: GeoJson = map.to_geojson_string().parse().unwrap();
        match parsed {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 1),
            other => panic!("expected a FeatureCollection, got {other:?}"),
        }
    }

    #[test]
    fn test_center_and_clear() {
        let mut map = GeoJsonMap::new();
        assert_eq!(map.view(), None);
        map.center_on(Coordinates::new(1.0, 2.0), 13);
        assert_eq!(map.view(), Some((Coordinates::new(1.0, 2.0), 13)));

        let run = Workout::running(Coordinates::new(1.0, 2.0), 5.0, 25.0, 170.0).unwrap();
        map.place_marker(&MarkerView::for_workout(&run));
        map.clear_markers();
        assert_eq!(map.marker_count(), 0);
    }
}
