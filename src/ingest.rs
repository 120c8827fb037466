use crate::heroes::HeroDirectory;
use crate::source::models::RawMatchRow;

/// A single validated match record. Built once per usable row, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub player_id: String,
    pub hero_key: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub is_win: bool,
    #[allow(dead_code)]
    pub is_scrim: bool,
}

/// Outcome of normalizing one raw row.
///
/// `FilteredOut` is distinct from `Discarded` so callers can report how many
/// rows the scrim filter excluded versus how many were unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Event(MatchEvent),
    FilteredOut,
    Discarded,
}

/// Validate and canonicalize one raw row.
///
/// Rows missing the player id, hero, or combat field are discarded, as are
/// combat fields that do not parse into exactly three non-negative integers.
/// With `scrim_only` set, non-scrim rows are filtered out before any
/// aggregate is touched.
pub fn normalize(row: &RawMatchRow, scrim_only: bool, heroes: &HeroDirectory) -> Normalized {
    if row.player_id.is_empty() || row.hero_played.is_empty() || row.kda.is_empty() {
        return Normalized::Discarded;
    }

    let is_scrim = row.is_scrim == "1";
    if scrim_only && !is_scrim {
        return Normalized::FilteredOut;
    }

    let (kills, deaths, assists) = match parse_combat(&row.kda) {
        Some(triple) => triple,
        None => return Normalized::Discarded,
    };

    Normalized::Event(MatchEvent {
        player_id: row.player_id.clone(),
        hero_key: heroes.canonical(&row.hero_played),
        kills,
        deaths,
        assists,
        is_win: row.result == "1",
        is_scrim,
    })
}

fn parse_combat(field: &str) -> Option<(u32, u32, u32)> {
    let mut parts = field.split('/');
    let kills = parts.next()?.trim().parse::<u32>().ok()?;
    let deaths = parts.next()?.trim().parse::<u32>().ok()?;
    let assists = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((kills, deaths, assists))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heroes() -> HeroDirectory {
        HeroDirectory::bundled().unwrap()
    }

    fn row(player_id: &str, hero: &str, kda: &str, result: &str, is_scrim: &str) -> RawMatchRow {
        RawMatchRow {
            player_id: player_id.to_string(),
            hero_played: hero.to_string(),
            kda: kda.to_string(),
            result: result.to_string(),
            is_scrim: is_scrim.to_string(),
        }
    }

    #[test]
    fn valid_row_becomes_event() {
        let normalized = normalize(&row("101", "Axe", "5/2/3", "1", "1"), false, &heroes());
        let Normalized::Event(event) = normalized else {
            panic!("expected event");
        };
        assert_eq!(event.player_id, "101");
        assert_eq!(event.hero_key, "axe");
        assert_eq!((event.kills, event.deaths, event.assists), (5, 2, 3));
        assert!(event.is_win);
        assert!(event.is_scrim);
    }

    #[test]
    fn missing_fields_discard() {
        let h = heroes();
        assert_eq!(
            normalize(&row("", "Axe", "1/2/3", "1", "1"), false, &h),
            Normalized::Discarded
        );
        assert_eq!(
            normalize(&row("101", "", "1/2/3", "1", "1"), false, &h),
            Normalized::Discarded
        );
        assert_eq!(
            normalize(&row("101", "Axe", "", "1", "1"), false, &h),
            Normalized::Discarded
        );
    }

    #[test]
    fn malformed_combat_field_discards() {
        let h = heroes();
        for bad in ["1/2", "1/2/3/4", "a/2/3", "1/-2/3", "1//3", "1.5/2/3"] {
            assert_eq!(
                normalize(&row("101", "Axe", bad, "1", "1"), false, &h),
                Normalized::Discarded,
                "combat field {:?} should discard",
                bad
            );
        }
    }

    #[test]
    fn scrim_filter_excludes_before_aggregation() {
        let h = heroes();
        assert_eq!(
            normalize(&row("101", "Axe", "1/2/3", "1", "0"), true, &h),
            Normalized::FilteredOut
        );
        // Same row passes once the filter is off.
        assert!(matches!(
            normalize(&row("101", "Axe", "1/2/3", "1", "0"), false, &h),
            Normalized::Event(_)
        ));
    }

    #[test]
    fn hero_key_is_canonicalized_with_identity_fallback() {
        let h = heroes();
        let Normalized::Event(aliased) =
            normalize(&row("101", "Nevermore", "1/2/3", "0", "1"), false, &h)
        else {
            panic!("expected event");
        };
        assert_eq!(aliased.hero_key, "shadow_fiend");

        let Normalized::Event(unknown) =
            normalize(&row("101", "Brand_New_Hero", "1/2/3", "0", "1"), false, &h)
        else {
            panic!("expected event");
        };
        assert_eq!(unknown.hero_key, "brand_new_hero");
    }

    #[test]
    fn result_flag_only_wins_on_literal_one() {
        let h = heroes();
        for (raw, expected) in [("1", true), ("0", false), ("", false), ("2", false)] {
            let Normalized::Event(event) =
                normalize(&row("101", "Axe", "1/2/3", raw, "1"), false, &h)
            else {
                panic!("expected event");
            };
            assert_eq!(event.is_win, expected, "result flag {:?}", raw);
        }
    }
}
