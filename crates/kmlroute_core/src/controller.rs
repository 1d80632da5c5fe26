/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Route-picker interaction state.
//!
//! The controller owns presentation state only: the active group set, the
//! from/to selections, the travel mode, the computed route and the map
//! marker. The option list it is built from is never modified; the visible
//! list is always re-derived from the full backing list, so deriving twice
//! from the same filter gives the same result.
//!
//! ## Detail fetches
//!
//! Place details arrive asynchronously. Every marker change bumps a
//! generation counter; [`Controller::select_from`] hands out a
//! [`DetailRequest`] tagged with the generation of the marker it belongs to,
//! and [`Controller::resolve_details`] drops responses whose generation is no
//! longer current. A slow response for a replaced marker is discarded.

use crate::geo::LatLng;
use crate::option::{OptionModel, RouteOption};
use crate::place::{PlaceDetails, PlaceId};
use crate::route::{search_link, RouteLinks, TravelMode};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Zoom level used when centering on a selected point.
pub const DEFAULT_ZOOM: u8 = 19;

/// Storage key for a document's persisted filter.
pub fn storage_key(document_id: &str) -> String {
    format!("kmlroute:groups:{document_id}")
}

/// Durable client storage for active group sets.
pub trait FilterStore {
    fn load(&self, key: &str) -> Option<Vec<usize>>;
    fn save(&mut self, key: &str, groups: &[usize]);
}

impl<S: FilterStore + ?Sized> FilterStore for &mut S {
    fn load(&self, key: &str) -> Option<Vec<usize>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, groups: &[usize]) {
        (**self).save(key, groups)
    }
}

/// In-process store, one entry per key.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl FilterStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<usize>> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, groups: &[usize]) {
        self.entries.insert(key.to_string(), groups.to_vec());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("route needs both a from and a to selection")]
    IncompleteSelection,

    #[error("option {0} is not in the visible list")]
    NotVisible(usize),

    #[error("group {0} does not exist")]
    UnknownGroup(usize),
}

/// The place-detail service could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("place detail fetch failed: {0}")]
pub struct DetailFetchFailed(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRoute {
    pub from_label: String,
    pub to_label: String,
    pub mode: TravelMode,
    pub links: RouteLinks,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteDisplay {
    #[default]
    None,
    Computed(ComputedRoute),
}

/// Content shown when the marker is clicked.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoContent {
    Place {
        name: String,
        rating: Option<f64>,
        url: Option<String>,
        website: Option<String>,
    },
    Generic {
        name: String,
        link: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub generation: u64,
    pub option: usize,
    pub position: LatLng,
    pub zoom: u8,
    pub info: Option<InfoContent>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapDisplay {
    #[default]
    Idle,
    Centered(Marker),
}

/// A detail fetch the host should perform, then report back through
/// [`Controller::resolve_details`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub generation: u64,
    pub place_id: PlaceId,
}

pub struct Controller<S> {
    model: OptionModel,
    store: Option<S>,
    key: String,
    active: BTreeSet<usize>,
    visible: Vec<usize>,
    from: Option<usize>,
    to: Option<usize>,
    mode: TravelMode,
    route: RouteDisplay,
    map: MapDisplay,
    generation: u64,
    zoom: u8,
}

impl Controller<MemoryStore> {
    /// A controller that neither reads nor writes persisted filters.
    pub fn ephemeral(model: OptionModel) -> Self {
        Self::new(model, None)
    }
}

impl<S: FilterStore> Controller<S> {
    /// Load the option list and restore the persisted filter, if any.
    pub fn new(model: OptionModel, store: Option<S>) -> Self {
        let key = storage_key(&model.document_id);
        let mut controller = Self {
            model,
            store,
            key,
            active: BTreeSet::new(),
            visible: Vec::new(),
            from: None,
            to: None,
            mode: TravelMode::default(),
            route: RouteDisplay::None,
            map: MapDisplay::Idle,
            generation: 0,
            zoom: DEFAULT_ZOOM,
        };
        controller.restore();
        controller
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Re-read the persisted filter. No entry means every group is active;
    /// indices that no longer name a group are dropped.
    pub fn restore(&mut self) {
        let known: BTreeSet<usize> = self.model.groups.iter().map(|g| g.index).collect();
        let saved = self.store.as_ref().and_then(|s| s.load(&self.key));
        self.active = match saved {
            Some(groups) => groups.into_iter().filter(|g| known.contains(g)).collect(),
            None => known,
        };
        self.rerender();
    }

    /// Flip one group tab, persist, and re-derive the selectors.
    pub fn toggle_group(&mut self, group: usize) -> Result<(), ControllerError> {
        if !self.model.groups.iter().any(|g| g.index == group) {
            return Err(ControllerError::UnknownGroup(group));
        }
        if !self.active.remove(&group) {
            self.active.insert(group);
        }
        if let Some(store) = self.store.as_mut() {
            let groups: Vec<usize> = self.active.iter().copied().collect();
            store.save(&self.key, &groups);
        }
        self.rerender();
        Ok(())
    }

    /// Both selectors are rebuilt from the backing list, which puts each
    /// back on its first entry and clears whatever the old selection showed.
    fn rerender(&mut self) {
        let active = &self.active;
        self.visible = self
            .model
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_visible_under(|g| active.contains(&g)))
            .map(|(i, _)| i)
            .collect();

        let first = self.visible.first().copied();
        self.from = first;
        self.to = first;
        self.route = RouteDisplay::None;
        self.place_marker(first);
    }

    fn check_visible(&self, index: Option<usize>) -> Result<(), ControllerError> {
        match index {
            Some(i) if !self.visible.contains(&i) => Err(ControllerError::NotVisible(i)),
            _ => Ok(()),
        }
    }

    /// Select the origin. Returns a detail fetch to run when the new marker
    /// has a place id.
    pub fn select_from(
        &mut self,
        index: Option<usize>,
    ) -> Result<Option<DetailRequest>, ControllerError> {
        self.check_visible(index)?;
        self.from = index;
        self.route = RouteDisplay::None;
        Ok(self.place_marker(index))
    }

    pub fn select_to(&mut self, index: Option<usize>) -> Result<(), ControllerError> {
        self.check_visible(index)?;
        self.to = index;
        self.route = RouteDisplay::None;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: TravelMode) {
        self.mode = mode;
        self.route = RouteDisplay::None;
    }

    fn place_marker(&mut self, index: Option<usize>) -> Option<DetailRequest> {
        self.generation += 1;
        let Some((i, option)) = index.and_then(|i| self.model.options.get(i).map(|o| (i, o)))
        else {
            self.map = MapDisplay::Idle;
            return None;
        };
        let Some(position) = option.coordinates else {
            self.map = MapDisplay::Idle;
            return None;
        };

        let request = option.place_id.clone().map(|place_id| DetailRequest {
            generation: self.generation,
            place_id,
        });
        // Without a place id there is nothing to wait for.
        let info = if request.is_none() {
            Some(generic_info(option, position))
        } else {
            None
        };

        self.map = MapDisplay::Centered(Marker {
            generation: self.generation,
            option: i,
            position,
            zoom: self.zoom,
            info,
        });
        request
    }

    /// Apply a detail response. Returns `false` when the response belongs to
    /// a marker that has since been replaced or cleared.
    pub fn resolve_details(
        &mut self,
        generation: u64,
        result: Result<PlaceDetails, DetailFetchFailed>,
    ) -> bool {
        let MapDisplay::Centered(marker) = &mut self.map else {
            return false;
        };
        if marker.generation != generation {
            return false;
        }
        let Some(option) = self.model.options.get(marker.option) else {
            return false;
        };

        marker.info = Some(match result {
            Ok(details) => InfoContent::Place {
                name: option.label.clone(),
                rating: details.rating,
                url: details.url,
                website: details.website,
            },
            Err(_) => generic_info(option, marker.position),
        });
        true
    }

    /// Compute both deep-links for the current selection.
    pub fn route(&mut self) -> Result<&ComputedRoute, ControllerError> {
        let (Some(from), Some(to)) = (self.from_option(), self.to_option()) else {
            return Err(ControllerError::IncompleteSelection);
        };
        let computed = ComputedRoute {
            from_label: from.label.clone(),
            to_label: to.label.clone(),
            mode: self.mode,
            links: RouteLinks::build(from, to, self.mode),
        };
        self.route = RouteDisplay::Computed(computed);
        match &self.route {
            RouteDisplay::Computed(route) => Ok(route),
            RouteDisplay::None => Err(ControllerError::IncompleteSelection),
        }
    }

    pub fn model(&self) -> &OptionModel {
        &self.model
    }

    pub fn active_groups(&self) -> Vec<usize> {
        self.active.iter().copied().collect()
    }

    pub fn is_active(&self, group: usize) -> bool {
        self.active.contains(&group)
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_options(&self) -> Vec<&RouteOption> {
        self.visible
            .iter()
            .filter_map(|&i| self.model.options.get(i))
            .collect()
    }

    pub fn from(&self) -> Option<usize> {
        self.from
    }

    pub fn to(&self) -> Option<usize> {
        self.to
    }

    pub fn from_option(&self) -> Option<&RouteOption> {
        self.from.and_then(|i| self.model.options.get(i))
    }

    pub fn to_option(&self) -> Option<&RouteOption> {
        self.to.and_then(|i| self.model.options.get(i))
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn route_display(&self) -> &RouteDisplay {
        &self.route
    }

    pub fn map_display(&self) -> &MapDisplay {
        &self.map
    }
}

fn generic_info(option: &RouteOption, position: LatLng) -> InfoContent {
    InfoContent::Generic {
        name: option.label.clone(),
        link: search_link(position),
    }
}
