/// Accepted city spellings.
pub const CANONICAL_CITIES: [&str; 24] = [
    "Springfield",
    "Seattle",
    "Miami Beach",
    "San Francisco",
    "Bludhaven",
    "Hub City",
    "Metropolis",
    "Opal City",
    "Gateway City",
    "Houston",
    "Central City",
    "Bellevue",
    "Riverside",
    "New York",
    "Gotham",
    "Coast City",
    "Los Angeles",
    "Star City",
    "Miami",
    "National City",
    "Mumbai",
    "Newark",
    "Dallas",
    "Unknown",
];
