use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// One raw row of the match log.
///
/// Every field defaults to empty when the column is absent; the ingest stage
/// decides whether the row is usable, so nothing is rejected here beyond
/// records the CSV decoder cannot read at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatchRow {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub hero_played: String,
    /// Combat field, formatted "kills/deaths/assists".
    #[serde(default)]
    pub kda: String,
    /// "1" = win.
    #[serde(default)]
    pub result: String,
    /// "1" = scrim.
    #[serde(default)]
    pub is_scrim: String,
}

/// Read match rows from headered CSV, skipping records that fail to decode.
/// Recovery from bad input happens at row granularity only.
pub fn read_match_rows<R: Read>(rdr: R) -> Vec<RawMatchRow> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    reader
        .deserialize::<RawMatchRow>()
        .filter_map(|record| record.ok())
        .collect()
}

/// Mapping from player id to display name, fed by the player directory CSV.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDirectory {
    names: HashMap<String, String>,
}

impl PlayerDirectory {
    pub fn from_entries(names: HashMap<String, String>) -> Self {
        PlayerDirectory { names }
    }

    /// Parse "id,name" lines. The export carries no header row; rows with a
    /// blank id or name are dropped.
    pub fn read<R: Read>(rdr: R) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(rdr);

        let mut names = HashMap::new();
        for record in reader.records().flatten() {
            let id = record.get(0).unwrap_or("");
            let name = record.get(1).unwrap_or("");
            if id.is_empty() || name.is_empty() {
                continue;
            }
            names.insert(id.to_string(), name.to_string());
        }

        PlayerDirectory { names }
    }

    /// Display name for a player id, with a synthesized fallback label for
    /// ids the directory does not know.
    pub fn display_name(&self, id: &str) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown ({})", id))
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_headered_match_rows() {
        let csv_text = "\
player_id,hero_played,kda,result,is_scrim
101,Axe,5/2/3,1,1
102,Puck,1/4/9,0,0
";
        let rows = read_match_rows(csv_text.as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_id, "101");
        assert_eq!(rows[0].hero_played, "Axe");
        assert_eq!(rows[0].kda, "5/2/3");
        assert_eq!(rows[1].result, "0");
    }

    #[test]
    fn missing_columns_surface_as_empty_fields() {
        let csv_text = "\
player_id,hero_played,result
101,Axe,1
";
        let rows = read_match_rows(csv_text.as_bytes());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kda, "");
        assert_eq!(rows[0].is_scrim, "");
    }

    #[test]
    fn short_records_still_decode() {
        let csv_text = "\
player_id,hero_played,kda,result,is_scrim
101,Axe
";
        let rows = read_match_rows(csv_text.as_bytes());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hero_played, "Axe");
        assert_eq!(rows[0].kda, "");
    }

    #[test]
    fn directory_lookup_and_fallback() {
        let csv_text = "101,gosu\n102,enesy\n,\n";
        let directory = PlayerDirectory::read(csv_text.as_bytes());
        assert_eq!(directory.display_name("101"), "gosu");
        assert_eq!(directory.display_name("999"), "Unknown (999)");
    }
}
