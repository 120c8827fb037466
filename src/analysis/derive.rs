use super::aggregate::HeroAggregate;
use crate::heroes::HeroDirectory;

/// Rate metrics for one bucket, computed on demand and never stored back.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedHeroStat {
    pub hero_key: String,
    pub display_name: String,
    pub games: u32,
    /// Winrate percentage, one decimal.
    pub winrate_pct: f64,
    /// (kills + assists) / deaths, two decimals; kills + assists when
    /// deaths is zero.
    pub kda: f64,
}

/// Half-way values round away from zero (`f64::round` semantics).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive rate metrics from a bucket. A bucket only exists after at least
/// one event, so `games` is never zero here.
pub fn derive(aggregate: &HeroAggregate, heroes: &HeroDirectory) -> DerivedHeroStat {
    debug_assert!(aggregate.games > 0);

    let winrate_pct = round1(100.0 * aggregate.wins as f64 / aggregate.games as f64);
    let kills_assists = (aggregate.kills + aggregate.assists) as f64;
    let kda = if aggregate.deaths == 0 {
        round2(kills_assists)
    } else {
        round2(kills_assists / aggregate.deaths as f64)
    };

    DerivedHeroStat {
        hero_key: aggregate.key.clone(),
        display_name: heroes.display_name(&aggregate.key),
        games: aggregate.games,
        winrate_pct,
        kda,
    }
}
