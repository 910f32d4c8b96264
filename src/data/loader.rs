// ============================================================================
// Loader : chargement du fichier CSV des transferts
// ============================================================================
// Lit le CSV (compressé gzip ou non) et construit le Dataset en mémoire
//
// CONCEPTS RUST AVANCÉS :
// 1. Box<dyn Read> : même code pour un fichier brut ou décompressé
// 2. Serde + csv : chaque ligne est désérialisée dans une struct
// 3. Result<T, E> : erreurs d'I/O propagées avec contexte (anyhow)
// 4. Génériques : read_transfers accepte n'importe quel Read (tests en mémoire)
// ============================================================================

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::models::{Dataset, Foot, TransferRecord};

/// Colonnes indispensables au tableau de bord
const REQUIRED_COLUMNS: &[&str] = &["transfer_date", "transfer_fee", "league_name_to"];

// ============================================================================
// Structure pour parser une ligne du CSV
// ============================================================================
// CONCEPT RUST : Option<T> pour chaque colonne
// - Une cellule vide devient None au lieu d'une erreur
// - Une colonne absente du fichier devient aussi None
// - Les colonnes en trop sont ignorées
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawTransferRow {
    player_name: Option<String>,
    club_name_from: Option<String>,
    club_name_to: Option<String>,
    league_name_to: Option<String>,
    transfer_date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    transfer_fee: Option<f64>,
    date_of_birth: Option<String>,
    position: Option<String>,
    foot: Option<String>,
    country_of_citizenship: Option<String>,
}

/// Statistiques de chargement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lignes lues (hors en-tête)
    pub rows_read: usize,
    /// Lignes ignorées (date de transfert illisible ou ligne malformée)
    pub rows_skipped: usize,
}

// ============================================================================
// Fonctions publiques
// ============================================================================

/// Charge le Dataset depuis un fichier CSV (gzip si l'extension est .gz)
///
/// # Arguments
/// * `path` - Chemin du fichier (ex: "master_cleaned_reduced.csv.gz")
///
/// # Retourne
/// * `Result<Dataset>` - La table en mémoire, ou une erreur d'I/O
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Impossible d'ouvrir le fichier {}", path.display()))?;

    // CONCEPT RUST : Trait objects
    // - Box<dyn Read> cache le type concret (File ou GzDecoder<File>)
    // - Le reste du code ne voit qu'un Read
    let reader: Box<dyn Read> = if is_gzip(path) {
        debug!("Reading gzip-compressed CSV");
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let (dataset, stats) = read_transfers(reader)
        .with_context(|| format!("Lecture du CSV {} impossible", path.display()))?;

    info!(
        rows = dataset.len(),
        read = stats.rows_read,
        skipped = stats.rows_skipped,
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Lit des transferts depuis n'importe quelle source CSV
pub fn read_transfers<R: Read>(reader: R) -> Result<(Dataset, LoadStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("En-tête CSV illisible")?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            anyhow::bail!("Colonne obligatoire absente du CSV : {}", column);
        }
    }

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for (idx, result) in csv_reader.deserialize::<RawTransferRow>().enumerate() {
        // +2 : l'en-tête est la ligne 1, les numéros de ligne commencent à 1
        let line = idx + 2;
        stats.rows_read += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "Skipping malformed CSV row");
                stats.rows_skipped += 1;
                continue;
            }
        };

        match to_record(row) {
            Some(record) => records.push(record),
            None => {
                warn!(line, "Skipping row without a readable transfer date");
                stats.rows_skipped += 1;
            }
        }
    }

    Ok((Dataset::new(records), stats))
}

/// Normalise un nom de championnat : tirets -> espaces, casse "Titre"
///
/// "premier-league" -> "Premier League", "ligue-1" -> "Ligue 1"
pub fn normalize_league_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_is_letter = false;

    for c in raw.chars() {
        let c = if c == '-' { ' ' } else { c };

        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

// ============================================================================
// Helpers
// ============================================================================

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Convertit une ligne brute en TransferRecord (None si pas de date)
///
/// CONCEPT RUST : Option chaining avec ?
/// - as_deref()? : early return si la date est absente
/// - parse_date(..)? : early return si elle est illisible
fn to_record(row: RawTransferRow) -> Option<TransferRecord> {
    let transfer_date = parse_date(row.transfer_date.as_deref()?)?;
    let transfer_year = transfer_date.year();

    let player_age = row
        .date_of_birth
        .as_deref()
        .and_then(parse_date)
        .map(|birth| transfer_year - birth.year());

    Some(TransferRecord {
        player_name: row.player_name.unwrap_or_default(),
        club_from: row.club_name_from.unwrap_or_default(),
        club_to: row.club_name_to.unwrap_or_default(),
        league_to: row
            .league_name_to
            .as_deref()
            .map(normalize_league_name)
            .unwrap_or_default(),
        transfer_year,
        fee: row.transfer_fee.filter(|fee| fee.is_finite()).unwrap_or(0.0),
        player_age,
        position: row.position.as_deref().and_then(|p| p.parse().ok()),
        foot: Foot::parse_lenient(row.foot.as_deref()),
        country: row.country_of_citizenship.filter(|c| !c.is_empty()),
    })
}

/// Lit une date "YYYY-MM-DD", avec éventuellement une heure derrière
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    use std::io::Write;

    const SAMPLE: &str = "\
player_name,club_name_from,club_name_to,league_name_to,transfer_date,transfer_fee,date_of_birth,position,foot,country_of_citizenship,extra
Neymar,FC Barcelona,Paris Saint-Germain,ligue-1,2017-08-03,222000000,1992-02-05,Attacker,right,Brazil,x
Free Agent,Club A,Club B,premier-league,2019-07-01 00:00:00,,,Defender,,England,y
Broken,Club A,Club B,serie-a,not-a-date,1000,1990-01-01,Midfielder,left,Italy,z
";

    #[test]
    fn test_read_transfers() {
        let (dataset, stats) = read_transfers(SAMPLE.as_bytes()).unwrap();

        assert_eq!(stats, LoadStats { rows_read: 3, rows_skipped: 1 });
        assert_eq!(dataset.len(), 2);

        let neymar = &dataset.records()[0];
        assert_eq!(neymar.player_name, "Neymar");
        assert_eq!(neymar.club_to, "Paris Saint-Germain");
        assert_eq!(neymar.league_to, "Ligue 1");
        assert_eq!(neymar.transfer_year, 2017);
        assert_eq!(neymar.fee, 222_000_000.0);
        assert_eq!(neymar.player_age, Some(25));
        assert_eq!(neymar.position, Some(Position::Attacker));
        assert_eq!(neymar.foot, Foot::Right);
        assert_eq!(neymar.country.as_deref(), Some("Brazil"));

        let free = &dataset.records()[1];
        assert_eq!(free.league_to, "Premier League");
        assert_eq!(free.transfer_year, 2019);
        assert_eq!(free.fee, 0.0);
        assert_eq!(free.player_age, None);
        assert_eq!(free.foot, Foot::Unknown);
    }

    #[test]
    fn test_read_gzip_transfers() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let (dataset, _) = read_transfers(GzDecoder::new(&compressed[..])).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "player_name,transfer_fee\nSomeone,10\n";
        assert!(read_transfers(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_non_numeric_fee_becomes_zero() {
        let csv = "transfer_date,transfer_fee,league_name_to\n2020-01-01,unknown,serie-a\n";
        let (dataset, stats) = read_transfers(csv.as_bytes()).unwrap();
        assert_eq!(stats.rows_skipped, 0);
        assert_eq!(dataset.records()[0].fee, 0.0);
    }

    #[test]
    fn test_normalize_league_name() {
        assert_eq!(normalize_league_name("premier-league"), "Premier League");
        assert_eq!(normalize_league_name("serie-a"), "Serie A");
        assert_eq!(normalize_league_name("ligue-1"), "Ligue 1");
        assert_eq!(normalize_league_name("LALIGA"), "Laliga");
        assert_eq!(normalize_league_name(""), "");
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(Path::new("data/master.csv.gz")));
        assert!(!is_gzip(Path::new("data/master.csv")));
    }

    #[test]
    fn test_load_dataset_missing_file() {
        assert!(load_dataset(Path::new("/definitely/not/here.csv")).is_err());
    }
}
