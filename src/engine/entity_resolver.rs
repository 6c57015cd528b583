//! Maps a deal's free-text country to the billing entity that settles it.

use crate::domain::EntityDescriptor;

pub const CHILE: EntityDescriptor = EntityDescriptor {
    id: "CL-05",
    name: "Odoo Chile SpA",
    region: "LATAM",
    currency: "CLP",
};

pub const MEXICO: EntityDescriptor = EntityDescriptor {
    id: "MX-06",
    name: "Odoo México",
    region: "LATAM",
    currency: "MXN",
};

pub const NORTH_AMERICA: EntityDescriptor = EntityDescriptor {
    id: "US-01",
    name: "Odoo Inc (North America)",
    region: "US",
    currency: "USD",
};

pub const UK_IRELAND: EntityDescriptor = EntityDescriptor {
    id: "UK-02",
    name: "Odoo Ltd (UK & Ireland)",
    region: "UK",
    currency: "GBP",
};

pub const EUROPE: EntityDescriptor = EntityDescriptor {
    id: "EU-03",
    name: "Odoo Europe (Mainland)",
    region: "EU",
    currency: "EUR",
};

pub const ASIA_PACIFIC: EntityDescriptor = EntityDescriptor {
    id: "AP-04",
    name: "Odoo Asia Pacific",
    region: "APAC",
    currency: "USD",
};

const US_NAMES: [&str; 3] = ["united states", "usa", "us"];
const UK_NAMES: [&str; 3] = ["united kingdom", "uk", "ireland"];
const EU_NAMES: [&str; 5] = ["germany", "france", "spain", "italy", "netherlands"];

/// Resolve the billing entity for a country name. Never fails.
///
/// Substring rules (Chile, Mexico) are checked before the exact-name
/// tables; anything unmatched settles through Asia Pacific.
pub fn resolve(country: &str) -> EntityDescriptor {
    let c = country.to_lowercase();

    if c.contains("chile") {
        CHILE
    } else if c.contains("mexico") {
        MEXICO
    } else if US_NAMES.contains(&c.as_str()) {
        NORTH_AMERICA
    } else if UK_NAMES.contains(&c.as_str()) {
        UK_IRELAND
    } else if EU_NAMES.contains(&c.as_str()) {
        EUROPE
    } else {
        ASIA_PACIFIC
    }
}
