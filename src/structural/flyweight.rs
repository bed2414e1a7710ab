//! # Flyweight: map rendering
//!
//! Every vehicle of a given type draws with the same [`VehicleIcon`]. The
//! icon (intrinsic state) is created once per type and shared through an
//! `Arc`; position, speed and heading (extrinsic state) live on each vehicle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ICON_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bus,
    Truck,
    Motorcycle,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Car => "car",
            Self::Bus => "bus",
            Self::Truck => "truck",
            Self::Motorcycle => "motorcycle",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Idle,
    Moving,
    Stopped,
    Offline,
}

#[derive(Debug, PartialEq, Eq)]
pub struct VehicleIcon {
    pub vehicle_type: VehicleType,
    pub image_data: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// `(latitude, longitude)`
    pub position: (f64, f64),
    pub speed: f64,
    pub status: VehicleStatus,
    pub heading: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: (0.0, 0.0),
            speed: 0.0,
            status: VehicleStatus::Idle,
            heading: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct VehicleIconFactory {
    icons: HashMap<VehicleType, Arc<VehicleIcon>>,
}

impl VehicleIconFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_icon(&mut self, vehicle_type: VehicleType) -> Arc<VehicleIcon> {
        let icon = self.icons.entry(vehicle_type).or_insert_with(|| {
            debug!(%vehicle_type, "creating icon");
            Arc::new(VehicleIcon {
                vehicle_type,
                image_data: format!("icon_data_for_{vehicle_type}"),
                width: ICON_SIZE,
                height: ICON_SIZE,
            })
        });
        Arc::clone(icon)
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }
}

#[derive(Debug)]
pub struct Vehicle {
    id: String,
    icon: Arc<VehicleIcon>,
    state: VehicleState,
}

impl Vehicle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn icon(&self) -> &Arc<VehicleIcon> {
        &self.icon
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn render(&self) -> String {
        let (lat, lon) = self.state.position;
        format!(
            "Rendering {} at ({lat:?}, {lon:?}) with icon {}",
            self.id, self.icon.image_data
        )
    }
}

/// Keeps vehicles in the order they were added.
#[derive(Debug, Default)]
pub struct MapRenderer {
    icons: VehicleIconFactory,
    vehicles: Vec<Vehicle>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the map untouched if `vehicle_id` exists.
    pub fn add_vehicle(&mut self, vehicle_id: &str, vehicle_type: VehicleType) -> bool {
        if self.vehicle(vehicle_id).is_some() {
            debug!(vehicle_id, "vehicle already on the map");
            return false;
        }
        let icon = self.icons.get_icon(vehicle_type);
        self.vehicles.push(Vehicle {
            id: vehicle_id.to_string(),
            icon,
            state: VehicleState::default(),
        });
        true
    }

    pub fn update_vehicle(&mut self, vehicle_id: &str, state: VehicleState) -> bool {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
            Some(vehicle) => {
                vehicle.state = state;
                true
            }
            None => {
                warn!(vehicle_id, "update for unknown vehicle ignored");
                false
            }
        }
    }

    pub fn vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    pub fn render_map(&self) -> Vec<String> {
        self.vehicles.iter().map(Vehicle::render).collect()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn icon_count(&self) -> usize {
        self.icons.icon_count()
    }
}
