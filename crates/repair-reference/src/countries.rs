/// Accepted country spellings.
pub const CANONICAL_COUNTRIES: [&str; 104] = [
    "United States",
    "India",
    "Canada",
    "United Kingdom",
    "Australia",
    "Germany",
    "France",
    "Japan",
    "China",
    "Brazil",
    "South Korea",
    "Italy",
    "Spain",
    "Mexico",
    "Russia",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Switzerland",
    "Austria",
    "Belgium",
    "Ireland",
    "New Zealand",
    "Singapore",
    "Malaysia",
    "Thailand",
    "Indonesia",
    "Turkey",
    "Saudi Arabia",
    "UAE",
    "South Africa",
    "Egypt",
    "Argentina",
    "Chile",
    "Colombia",
    "Peru",
    "Poland",
    "Portugal",
    "Greece",
    "Czech Republic",
    "Hungary",
    "Romania",
    "Slovakia",
    "Slovenia",
    "Croatia",
    "Estonia",
    "Latvia",
    "Lithuania",
    "Philippines",
    "Vietnam",
    "Pakistan",
    "Bangladesh",
    "Sri Lanka",
    "Nepal",
    "Israel",
    "Qatar",
    "Kuwait",
    "Oman",
    "Morocco",
    "Kenya",
    "Nigeria",
    "Ghana",
    "Venezuela",
    "Ecuador",
    "Uruguay",
    "Paraguay",
    "Bolivia",
    "Costa Rica",
    "Panama",
    "Guatemala",
    "Honduras",
    "El Salvador",
    "Dominican Republic",
    "Cuba",
    "Jamaica",
    "Trinidad and Tobago",
    "Iceland",
    "Luxembourg",
    "Liechtenstein",
    "Monaco",
    "Andorra",
    "San Marino",
    "Malta",
    "Cyprus",
    "Bahrain",
    "Jordan",
    "Lebanon",
    "Syria",
    "Iraq",
    "Iran",
    "Afghanistan",
    "Uzbekistan",
    "Kazakhstan",
    "Azerbaijan",
    "Georgia",
    "Armenia",
    "Mongolia",
    "Cambodia",
    "Laos",
    "Myanmar",
    "Brunei",
    "Timor-Leste",
];
