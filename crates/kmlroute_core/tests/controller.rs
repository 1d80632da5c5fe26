/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use kmlroute_core::controller::{
    storage_key, ControllerError, DetailFetchFailed, InfoContent, MapDisplay, RouteDisplay,
};
use kmlroute_core::{
    Controller, FilterStore, GroupInfo, LatLng, MemoryStore, OptionModel, PlaceDetails, PlaceId,
    ResolvedStyle, RouteOption, TravelMode,
};

fn point(label: &str, group: usize, lat: f64, lng: f64, place: Option<&str>) -> RouteOption {
    RouteOption {
        label: label.to_string(),
        coordinates: Some(LatLng::new(lat, lng)),
        group: Some(group),
        style: ResolvedStyle::unresolved(),
        place_id: place.and_then(PlaceId::new),
    }
}

/// Three groups, two points each.
fn three_groups() -> OptionModel {
    OptionModel::new(
        "mid-123",
        "Trip",
        (0..3)
            .map(|index| GroupInfo {
                index,
                name: format!("Group {index}"),
            })
            .collect(),
        vec![
            point("Station", 0, 35.0, 139.0, Some("ChIJstation")),
            point("Hotel", 0, 35.1, 139.1, None),
            point("Ramen", 1, 35.2, 139.2, None),
            point("Sushi", 1, 35.3, 139.3, Some("ChIJsushi")),
            point("Temple", 2, 35.4, 139.4, None),
            point("Park", 2, 35.5, 139.5, None),
        ],
    )
}

fn labels<S: FilterStore>(c: &Controller<S>) -> Vec<String> {
    c.visible_options().iter().map(|o| o.label.clone()).collect()
}

#[test]
fn test_default_is_all_groups_active() {
    let c = Controller::new(three_groups(), Some(MemoryStore::new()));
    assert_eq!(c.active_groups(), vec![0, 1, 2]);
    assert_eq!(c.visible_options().len(), 7);
    assert_eq!(labels(&c)[0], "Current Location");
}

#[test]
fn test_toggle_twice_restores_visible_list() {
    let mut c = Controller::ephemeral(three_groups());
    let before = labels(&c);

    c.toggle_group(1).unwrap();
    assert!(!c.is_active(1));
    assert_eq!(
        labels(&c),
        vec!["Current Location", "Station", "Hotel", "Temple", "Park"]
    );

    c.toggle_group(1).unwrap();
    assert_eq!(labels(&c), before);
}

#[test]
fn test_rederive_is_idempotent() {
    let mut c = Controller::new(three_groups(), Some(MemoryStore::new()));
    c.toggle_group(0).unwrap();
    let once = c.visible_indices().to_vec();

    c.restore();
    assert_eq!(c.visible_indices(), once.as_slice());
    c.restore();
    assert_eq!(c.visible_indices(), once.as_slice());
    assert_eq!(c.active_groups(), vec![1, 2]);
}

#[test]
fn test_toggle_persists_under_document_key() {
    let mut store = MemoryStore::new();
    {
        let mut c = Controller::new(three_groups(), Some(&mut store));
        c.toggle_group(1).unwrap();
    }
    assert_eq!(store.get(&storage_key("mid-123")), Some(&[0, 2][..]));
    assert_eq!(store.get(&storage_key("other")), None);
}

#[test]
fn test_restore_persisted_filter() {
    let mut store = MemoryStore::new();
    store.save(&storage_key("mid-123"), &[0, 2]);

    let c = Controller::new(three_groups(), Some(store));
    assert!(c.is_active(0));
    assert!(!c.is_active(1));
    assert!(c.is_active(2));
    assert!(c.visible_options().iter().all(|o| o.group != Some(1)));
    assert_eq!(
        labels(&c),
        vec!["Current Location", "Station", "Hotel", "Temple", "Park"]
    );
}

#[test]
fn test_restore_drops_unknown_groups() {
    let mut store = MemoryStore::new();
    store.save(&storage_key("mid-123"), &[2, 9]);

    let c = Controller::new(three_groups(), Some(store));
    assert_eq!(c.active_groups(), vec![2]);
}

#[test]
fn test_empty_persisted_filter_shows_only_current_location() {
    let mut store = MemoryStore::new();
    store.save(&storage_key("mid-123"), &[]);

    let c = Controller::new(three_groups(), Some(store));
    assert_eq!(labels(&c), vec!["Current Location"]);
}

#[test]
fn test_driving_route_links() {
    let mut c = Controller::ephemeral(three_groups());
    c.select_from(Some(1)).unwrap();
    c.select_to(Some(2)).unwrap();
    c.set_mode(TravelMode::from_code(2));

    let route = c.route().unwrap().clone();
    assert_eq!(route.from_label, "Station");
    assert_eq!(route.to_label, "Hotel");
    assert_eq!(route.mode, TravelMode::Driving);
    assert!(route.links.apple.contains("dirflg=d"));
    assert!(route.links.apple.contains("saddr=35,139&daddr=35.1,139.1"));
    assert!(route.links.google.contains("travelmode=driving"));
    assert!(route.links.google.contains("origin=35,139&destination=35.1,139.1"));
    assert_eq!(c.route_display(), &RouteDisplay::Computed(route));
}

#[test]
fn test_selection_change_resets_route() {
    let mut c = Controller::ephemeral(three_groups());
    c.select_to(Some(3)).unwrap();
    c.route().unwrap();

    c.select_to(Some(4)).unwrap();
    assert_eq!(c.route_display(), &RouteDisplay::None);

    c.route().unwrap();
    c.set_mode(TravelMode::Walking);
    assert_eq!(c.route_display(), &RouteDisplay::None);

    c.route().unwrap();
    c.select_from(Some(5)).unwrap();
    assert_eq!(c.route_display(), &RouteDisplay::None);
}

#[test]
fn test_incomplete_selection_is_explicit() {
    let mut c = Controller::ephemeral(three_groups());
    c.select_to(None).unwrap();
    assert_eq!(c.route().unwrap_err(), ControllerError::IncompleteSelection);
    assert_eq!(c.route_display(), &RouteDisplay::None);
}

#[test]
fn test_hidden_option_cannot_be_selected() {
    let mut c = Controller::ephemeral(three_groups());
    c.toggle_group(0).unwrap();
    assert_eq!(c.select_from(Some(1)), Err(ControllerError::NotVisible(1)));
    assert_eq!(c.select_to(Some(2)), Err(ControllerError::NotVisible(2)));
}

#[test]
fn test_toggle_resets_selection_and_marker() {
    let mut c = Controller::ephemeral(three_groups());
    c.select_from(Some(3)).unwrap();
    c.select_to(Some(5)).unwrap();
    c.route().unwrap();

    c.toggle_group(2).unwrap();
    assert_eq!(c.from(), Some(0));
    assert_eq!(c.to(), Some(0));
    assert_eq!(c.route_display(), &RouteDisplay::None);
    assert_eq!(c.map_display(), &MapDisplay::Idle);
}

#[test]
fn test_from_selection_centers_marker_and_requests_details() {
    let mut c = Controller::ephemeral(three_groups()).with_zoom(17);
    let request = c.select_from(Some(4)).unwrap().unwrap();
    assert_eq!(request.place_id.as_str(), "ChIJsushi");

    let MapDisplay::Centered(marker) = c.map_display() else {
        panic!("expected a centered marker");
    };
    assert_eq!(marker.position, LatLng::new(35.3, 139.3));
    assert_eq!(marker.zoom, 17);
    assert!(marker.info.is_none());

    let details = PlaceDetails {
        rating: Some(4.5),
        url: Some("https://maps.google.com/?cid=1".to_string()),
        website: None,
    };
    assert!(c.resolve_details(request.generation, Ok(details)));

    let MapDisplay::Centered(marker) = c.map_display() else {
        panic!("expected a centered marker");
    };
    assert_eq!(
        marker.info,
        Some(InfoContent::Place {
            name: "Sushi".to_string(),
            rating: Some(4.5),
            url: Some("https://maps.google.com/?cid=1".to_string()),
            website: None,
        })
    );
}

#[test]
fn test_detail_failure_degrades_to_generic_link() {
    let mut c = Controller::ephemeral(three_groups());
    let request = c.select_from(Some(1)).unwrap().unwrap();
    assert!(c.resolve_details(
        request.generation,
        Err(DetailFetchFailed("ZERO_RESULTS".to_string()))
    ));

    let MapDisplay::Centered(marker) = c.map_display() else {
        panic!("expected a centered marker");
    };
    match &marker.info {
        Some(InfoContent::Generic { name, link }) => {
            assert_eq!(name, "Station");
            assert!(link.starts_with("https://www.google.com/maps/search/"));
        }
        other => panic!("unexpected info: {other:?}"),
    }
}

#[test]
fn test_current_location_clears_marker() {
    let mut c = Controller::ephemeral(three_groups());
    let request = c.select_from(Some(1)).unwrap().unwrap();
    assert!(c.select_from(Some(0)).unwrap().is_none());
    assert_eq!(c.map_display(), &MapDisplay::Idle);

    // The earlier fetch lands after the marker was cleared.
    assert!(!c.resolve_details(request.generation, Ok(PlaceDetails::default())));
    assert_eq!(c.map_display(), &MapDisplay::Idle);
}
