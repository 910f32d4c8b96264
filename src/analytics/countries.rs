// ============================================================================
// Countries : normalisation des nationalités pour la carte
// ============================================================================
// La source écrit certaines nationalités autrement que la carte du monde
// ("England", "Korea, South"...). On les ramène au nom attendu par la carte,
// et on fournit la liste complète des pays affichables.
// ============================================================================

/// Noms de la source -> noms de la carte
const NAME_MAP: &[(&str, &str)] = &[
    ("Cote d'Ivoire", "Ivory Coast"),
    ("England", "United Kingdom"),
    ("Scotland", "United Kingdom"),
    ("Wales", "United Kingdom"),
    ("Northern Ireland", "United Kingdom"),
    ("Bosnia-Herzegovina", "Bosnia and Herzegovina"),
    ("Congo", "Republic of the Congo"),
    ("Korea, South", "South Korea"),
    ("DR Congo", "Democratic Republic of the Congo"),
    ("North Macedonia", "Macedonia"),
    ("The Gambia", "Gambia"),
    ("Türkiye", "Turkey"),
    ("Bonaire", "Bonaire, Saint Eustatius and Saba"),
    ("St. Kitts & Nevis", "Saint Kitts and Nevis"),
    ("Palestine", "Palestinian Territory"),
];

/// Tous les pays de la carte, triés alphabétiquement
pub const MAP_COUNTRIES: &[&str] = &[
    "Afghanistan", "Aland Islands", "Albania", "Algeria", "American Samoa",
    "Andorra", "Angola", "Anguilla", "Antarctica", "Antigua and Barbuda",
    "Argentina", "Armenia", "Aruba", "Australia", "Austria", "Azerbaijan",
    "Bahamas", "Bahrain", "Bangladesh", "Barbados", "Belarus", "Belgium",
    "Belize", "Benin", "Bermuda", "Bhutan", "Bolivia",
    "Bonaire, Saint Eustatius and Saba", "Bosnia and Herzegovina", "Botswana",
    "Bouvet Island", "Brazil", "British Indian Ocean Territory",
    "British Virgin Islands", "Brunei", "Bulgaria", "Burkina Faso", "Burundi",
    "Cambodia", "Cameroon", "Canada", "Cape Verde", "Cayman Islands",
    "Central African Republic", "Chad", "Chile", "China", "Christmas Island",
    "Cocos Islands", "Colombia", "Comoros", "Cook Islands", "Costa Rica",
    "Croatia", "Cuba", "Curacao", "Cyprus", "Czech Republic",
    "Democratic Republic of the Congo", "Denmark", "Djibouti", "Dominica",
    "Dominican Republic", "East Timor", "Ecuador", "Egypt", "El Salvador",
    "Equatorial Guinea", "Eritrea", "Estonia", "Ethiopia", "Falkland Islands",
    "Faroe Islands", "Fiji", "Finland", "France", "French Guiana",
    "French Polynesia", "French Southern Territories", "Gabon", "Gambia",
    "Georgia", "Germany", "Ghana", "Gibraltar", "Greece", "Greenland",
    "Grenada", "Guadeloupe", "Guam", "Guatemala", "Guernsey", "Guinea",
    "Guinea-Bissau", "Guyana", "Haiti", "Heard Island and McDonald Islands",
    "Honduras", "Hong Kong", "Hungary", "Iceland", "India", "Indonesia", "Iran",
    "Iraq", "Ireland", "Isle of Man", "Israel", "Italy", "Ivory Coast",
    "Jamaica", "Japan", "Jersey", "Jordan", "Kazakhstan", "Kenya", "Kiribati",
    "Kosovo", "Kuwait", "Kyrgyzstan", "Laos", "Latvia", "Lebanon", "Lesotho",
    "Liberia", "Libya", "Liechtenstein", "Lithuania", "Luxembourg", "Macao",
    "Macedonia", "Madagascar", "Malawi", "Malaysia", "Maldives", "Mali",
    "Malta", "Marshall Islands", "Martinique", "Mauritania", "Mauritius",
    "Mayotte", "Mexico", "Micronesia", "Moldova", "Monaco", "Mongolia",
    "Montenegro", "Montserrat", "Morocco", "Mozambique", "Myanmar", "Namibia",
    "Nauru", "Nepal", "Netherlands", "New Caledonia", "New Zealand",
    "Nicaragua", "Niger", "Nigeria", "Niue", "Norfolk Island", "North Korea",
    "Northern Mariana Islands", "Norway", "Oman", "Pakistan", "Palau",
    "Palestinian Territory", "Panama", "Papua New Guinea", "Paraguay", "Peru",
    "Philippines", "Pitcairn", "Poland", "Portugal", "Puerto Rico", "Qatar",
    "Republic of the Congo", "Reunion", "Romania", "Russia", "Rwanda",
    "Saint Barthelemy", "Saint Helena", "Saint Kitts and Nevis", "Saint Lucia",
    "Saint Martin", "Saint Pierre and Miquelon",
    "Saint Vincent and the Grenadines", "Samoa", "San Marino",
    "Sao Tome and Principe", "Saudi Arabia", "Senegal", "Serbia", "Seychelles",
    "Sierra Leone", "Singapore", "Sint Maarten", "Slovakia", "Slovenia",
    "Solomon Islands", "Somalia", "South Africa",
    "South Georgia and the South Sandwich Islands", "South Korea",
    "South Sudan", "Spain", "Sri Lanka", "Sudan", "Suriname",
    "Svalbard and Jan Mayen", "Swaziland", "Sweden", "Switzerland", "Syria",
    "Taiwan", "Tajikistan", "Tanzania", "Thailand", "Togo", "Tokelau", "Tonga",
    "Trinidad and Tobago", "Tunisia", "Turkey", "Turkmenistan",
    "Turks and Caicos Islands", "Tuvalu", "U.S. Virgin Islands", "Uganda",
    "Ukraine", "United Arab Emirates", "United Kingdom", "United States",
    "United States Minor Outlying Islands", "Uruguay", "Uzbekistan", "Vanuatu",
    "Vatican", "Venezuela", "Vietnam", "Wallis and Futuna", "Western Sahara",
    "Yemen", "Zambia", "Zimbabwe",
];

/// Ramène une nationalité de la source au nom utilisé par la carte
///
/// Un nom absent de la table est retourné tel quel.
pub fn normalize_country(name: &str) -> &str {
    let name = name.trim();
    NAME_MAP
        .iter()
        .find(|(source, _)| *source == name)
        .map(|(_, map_name)| *map_name)
        .unwrap_or(name)
}

/// Indique si un nom (déjà normalisé) fait partie de la carte
pub fn is_map_country(name: &str) -> bool {
    MAP_COUNTRIES.binary_search(&name).is_ok()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_nations_become_united_kingdom() {
        for nation in ["England", "Scotland", "Wales", "Northern Ireland"] {
            assert_eq!(normalize_country(nation), "United Kingdom");
        }
    }

    #[test]
    fn test_renamed_countries() {
        assert_eq!(normalize_country("Cote d'Ivoire"), "Ivory Coast");
        assert_eq!(normalize_country("Korea, South"), "South Korea");
        assert_eq!(normalize_country("Türkiye"), "Turkey");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(normalize_country("France"), "France");
        assert_eq!(normalize_country(" Brazil "), "Brazil");
        assert_eq!(normalize_country("Atlantis"), "Atlantis");
    }

    #[test]
    fn test_map_countries_sorted_and_searchable() {
        assert!(MAP_COUNTRIES.windows(2).all(|w| w[0] < w[1]));
        assert!(is_map_country("United Kingdom"));
        assert!(is_map_country("Ivory Coast"));
        assert!(!is_map_country("England"));
    }

    #[test]
    fn test_every_mapped_name_is_on_the_map() {
        for (_, map_name) in NAME_MAP {
            assert!(is_map_country(map_name), "{} missing from map", map_name);
        }
    }
}
