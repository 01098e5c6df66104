//! In-memory port and ship catalog.
//!
//! The catalog is immutable once built, so one instance can back any number
//! of concurrent planning calls without locking.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::lookup::{PortLookup, ShipLookup};
use crate::models::{Port, Ship, ShipType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    ports: Vec<Port>,
    #[serde(default)]
    ships: Vec<Ship>,
}

impl Catalog {
    /// Build a catalog. Later entries with a repeated id are dropped.
    pub fn new(ports: Vec<Port>, ships: Vec<Ship>) -> Self {
        let mut catalog = Self::default();
        for port in ports {
            if catalog.find_port(&port.id).is_none() {
                catalog.ports.push(port);
            }
        }
        for ship in ships {
            if catalog.find_ship(&ship.id).is_none() {
                catalog.ships.push(ship);
            }
        }
        catalog
    }

    /// Parse a `{ "ports": [...], "ships": [...] }` document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Catalog = serde_json::from_str(json)?;
        Ok(Self::new(raw.ports, raw.ships))
    }

    /// Yellow Sea and East China Sea ports with a small demo fleet.
    pub fn seeded() -> Self {
        let ports = [
            ("CNSHA", "Shanghai", "China", 121.4737, 31.2304),
            ("CNTAO", "Qingdao", "China", 120.3162, 36.0839),
            ("CNNGB", "Ningbo-Zhoushan", "China", 121.8500, 29.8683),
            ("CNLYG", "Lianyungang", "China", 119.2216, 34.5966),
            ("CNRZH", "Rizhao", "China", 119.5269, 35.4161),
            ("CNYNT", "Yantai", "China", 121.3914, 37.5393),
            ("CNWEI", "Weihai", "China", 122.1200, 37.5100),
            ("CNDLC", "Dalian", "China", 121.6147, 38.9140),
            ("CNTSN", "Tianjin", "China", 117.7000, 38.9800),
            ("CNXMN", "Xiamen", "China", 118.0894, 24.4798),
            ("KRPUS", "Busan", "South Korea", 129.0403, 35.1028),
            ("KRINC", "Incheon", "South Korea", 126.6052, 37.4563),
        ]
        .into_iter()
        .map(|(id, name, country, lon, lat)| Port {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            position: GeoPoint::new(lon, lat),
        })
        .collect();

        let ships = [
            ("SHIP-001", "COSCO Star", ShipType::Container, 121.4737, 31.2304),
            ("SHIP-002", "Yellow Sea Pioneer", ShipType::Bulk, 120.3162, 36.0839),
            ("SHIP-003", "Bohai Spirit", ShipType::Tanker, 121.6147, 38.9140),
            ("SHIP-004", "Pacific Harmony", ShipType::GeneralCargo, 129.0403, 35.1028),
            ("SHIP-005", "Zhoushan Express", ShipType::Roro, 122.5000, 30.5000),
        ]
        .into_iter()
        .map(|(id, name, ship_type, lon, lat)| Ship {
            id: id.to_string(),
            name: name.to_string(),
            ship_type,
            position: GeoPoint::new(lon, lat),
        })
        .collect();

        Self::new(ports, ships)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}

impl PortLookup for Catalog {
    fn find_port(&self, port_id: &str) -> Option<Port> {
        self.ports.iter().find(|port| port.id == port_id).cloned()
    }

    fn ports(&self) -> Vec<Port> {
        self.ports.clone()
    }
}

impl ShipLookup for Catalog {
    fn find_ship(&self, ship_id: &str) -> Option<Ship> {
        self.ships.iter().find(|ship| ship.id == ship_id).cloned()
    }
}
