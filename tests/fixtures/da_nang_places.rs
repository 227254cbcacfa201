//! Da Nang, Vietnam locations for realistic test fixtures.
//!
//! Coordinates are approximate (OpenStreetMap). `CENTRE_*` places all lie
//! within about one kilometre of each other along the Han River, so every
//! leg between them is walkable.

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// City centre (Hai Chau, west bank of the Han River)
// ============================================================================

pub const CENTRE_RESTAURANTS: &[Location] = &[
    Location::new("Pho Bac Hai", 16.0650, 108.2230),
    Location::new("Bep Hen", 16.0640, 108.2215),
    Location::new("Madame Lan", 16.0660, 108.2245),
];

pub const CENTRE_HOTELS: &[Location] = &[
    Location::new("Riverside Boutique Hotel", 16.0655, 108.2260),
    Location::new("Bach Dang Hotel", 16.0630, 108.2250),
];

pub const CENTRE_ACTIVITIES: &[Location] = &[
    Location::new("Dragon Bridge", 16.0613, 108.2270),
    Location::new("Han Market", 16.0684, 108.2242),
    Location::new("Da Nang Cathedral", 16.0667, 108.2233),
];

pub const CHAM_MUSEUM: Location = Location::new("Museum of Cham Sculpture", 16.0604, 108.2237);

// ============================================================================
// Wider city
// ============================================================================

pub const RESTAURANTS: &[Location] = &[
    Location::new("Be Man Seafood", 16.0610, 108.2470),
    Location::new("Banh Xeo Ba Duong", 16.0617, 108.2136),
    Location::new("Mi Quang 1A", 16.0697, 108.2188),
    Location::new("Com Ga A Hai", 16.0706, 108.2160),
    Location::new("Hai San Moc", 16.0570, 108.2455),
    Location::new("Nam Danh Seafood", 16.1001, 108.2460),
];

pub const HOTELS: &[Location] = &[
    Location::new("Novotel Danang Premier Han River", 16.0770, 108.2237),
    Location::new("Fusion Suites Danang", 16.0580, 108.2470),
    Location::new("Hyatt Regency Danang", 16.0165, 108.2610),
];

pub const ACTIVITIES: &[Location] = &[
    Location::new("My Khe Beach", 16.0600, 108.2470),
    Location::new("Marble Mountains", 16.0040, 108.2630),
    Location::new("Linh Ung Pagoda", 16.1003, 108.2775),
    Location::new("Asia Park", 16.0390, 108.2260),
    Location::new("Helio Night Market", 16.0365, 108.2240),
    Location::new("Museum of Da Nang", 16.0765, 108.2230),
    Location::new("Love Lock Bridge", 16.0629, 108.2295),
    Location::new("Son Tra Peninsula Viewpoint", 16.1190, 108.2960),
];

// ============================================================================
// Outside the city
// ============================================================================

/// About 25 km west of the centre.
pub const BA_NA_HILLS: Location = Location::new("Ba Na Hills", 15.9950, 107.9960);

/// About 25 km south-east of the centre.
pub const HOI_AN_ANCIENT_TOWN: Location = Location::new("Hoi An Ancient Town", 15.8801, 108.3380);
