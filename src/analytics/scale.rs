// ============================================================================
// Scale : choix de l'unité d'affichage des montants
// ============================================================================
// Décide si un graphique affiche les montants bruts, en milliers, en
// millions ou en milliards, et formate une valeur isolée avec son suffixe
//
// CONCEPTS RUST :
// 1. Enum + méthodes : l'unité porte son diviseur et son suffixe
// 2. Fonctions totales : aucune erreur possible, pas de Result
// 3. f64::is_finite : une valeur non numérique devient "N/A"
// ============================================================================

use serde::{Deserialize, Serialize};

const THOUSAND: f64 = 1e3;
const MILLION: f64 = 1e6;
const BILLION: f64 = 1e9;

/// Unité d'affichage choisie pour un graphique entier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleChoice {
    Raw,
    Thousand,
    Million,
    Billion,
}

impl ScaleChoice {
    /// Diviseur à appliquer aux valeurs brutes
    pub fn divisor(&self) -> f64 {
        match self {
            ScaleChoice::Raw => 1.0,
            ScaleChoice::Thousand => THOUSAND,
            ScaleChoice::Million => MILLION,
            ScaleChoice::Billion => BILLION,
        }
    }

    /// Suffixe pour les titres et les axes ("" pour Raw)
    pub fn suffix(&self) -> &'static str {
        match self {
            ScaleChoice::Raw => "",
            ScaleChoice::Thousand => "(K)",
            ScaleChoice::Million => "(M)",
            ScaleChoice::Billion => "(B)",
        }
    }

    /// Convertit une valeur brute dans cette unité
    pub fn apply(&self, raw: f64) -> f64 {
        raw / self.divisor()
    }
}

/// Choisit l'unité d'un graphique à partir de sa plus grande valeur
///
/// L'appelant garantit `max_value >= 0`. Une valeur NaN (série vide)
/// tombe sur `Raw`, comme 0.
pub fn choose_scale(max_value: f64) -> ScaleChoice {
    if max_value == 0.0 {
        return ScaleChoice::Raw;
    }

    if max_value >= BILLION {
        ScaleChoice::Billion
    } else if max_value >= MILLION {
        ScaleChoice::Million
    } else if max_value >= THOUSAND {
        ScaleChoice::Thousand
    } else {
        ScaleChoice::Raw
    }
}

/// Choisit l'unité à partir d'une série de valeurs (max de la série)
pub fn choose_scale_for<I: IntoIterator<Item = f64>>(values: I) -> ScaleChoice {
    let max = values.into_iter().fold(0.0_f64, f64::max);
    choose_scale(max)
}

/// Formate une valeur isolée avec son propre suffixe, deux décimales
///
/// L'unité est choisie pour cette valeur seule, indépendamment de l'unité
/// du graphique : 2_500_000 -> "2.50M", 500 -> "500.00".
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    if value >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("{:.2}K", value / THOUSAND)
    } else {
        format!("{:.2}", value)
    }
}

/// Formate une valeur brute textuelle ; "N/A" si elle n'est pas numérique
pub fn format_raw(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) => format_value(value),
        Err(_) => "N/A".to_string(),
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_scale_zero_is_raw() {
        assert_eq!(choose_scale(0.0), ScaleChoice::Raw);
        assert_eq!(choose_scale(0.0).divisor(), 1.0);
        assert_eq!(choose_scale(0.0).suffix(), "");
    }

    #[test]
    fn test_choose_scale_boundaries() {
        assert_eq!(choose_scale(999.0), ScaleChoice::Raw);
        assert_eq!(choose_scale(1_000.0), ScaleChoice::Thousand);
        assert_eq!(choose_scale(999_999.0), ScaleChoice::Thousand);
        assert_eq!(choose_scale(1_000_000.0), ScaleChoice::Million);
        assert_eq!(choose_scale(999_999_999.0), ScaleChoice::Million);
        assert_eq!(choose_scale(1_000_000_000.0), ScaleChoice::Billion);
        assert_eq!(choose_scale(42e12), ScaleChoice::Billion);
    }

    #[test]
    fn test_scale_pairs() {
        assert_eq!(ScaleChoice::Thousand.divisor(), 1e3);
        assert_eq!(ScaleChoice::Thousand.suffix(), "(K)");
        assert_eq!(ScaleChoice::Million.divisor(), 1e6);
        assert_eq!(ScaleChoice::Million.suffix(), "(M)");
        assert_eq!(ScaleChoice::Billion.divisor(), 1e9);
        assert_eq!(ScaleChoice::Billion.suffix(), "(B)");
        assert_eq!(ScaleChoice::Million.apply(222_000_000.0), 222.0);
    }

    #[test]
    fn test_choose_scale_nan_is_raw() {
        assert_eq!(choose_scale(f64::NAN), ScaleChoice::Raw);
    }

    #[test]
    fn test_choose_scale_for_series() {
        assert_eq!(choose_scale_for(vec![10.0, 5e6, 3e3]), ScaleChoice::Million);
        assert_eq!(choose_scale_for(Vec::new()), ScaleChoice::Raw);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(2_500_000_000.0), "2.50B");
        assert_eq!(format_value(2_500_000.0), "2.50M");
        assert_eq!(format_value(750_000.0), "750.00K");
        assert_eq!(format_value(500.0), "500.00");
        assert_eq!(format_value(42.0), "42.00");
        assert_eq!(format_value(0.0), "0.00");
    }

    #[test]
    fn test_format_value_non_numeric() {
        assert_eq!(format_value(f64::NAN), "N/A");
        assert_eq!(format_value(f64::INFINITY), "N/A");
        assert_eq!(format_raw("abc"), "N/A");
        assert_eq!(format_raw(""), "N/A");
        assert_eq!(format_raw(" 1500 "), "1.50K");
    }
}
