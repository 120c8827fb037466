use crate::ingest::MatchEvent;
use std::collections::HashMap;

/// Running sums for one bucket (a hero, or a hero under one player).
/// Owned by the tracker for the lifetime of a single aggregation run and
/// rebuilt wholesale on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroAggregate {
    pub key: String,
    pub games: u32,
    pub wins: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl HeroAggregate {
    pub fn new(key: String) -> Self {
        HeroAggregate {
            key,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
        }
    }

    fn record(&mut self, event: &MatchEvent) {
        self.games += 1;
        if event.is_win {
            self.wins += 1;
        }
        self.kills += event.kills;
        self.deaths += event.deaths;
        self.assists += event.assists;
    }
}

/// Folds events into per-hero and per-(player, hero) buckets in one linear
/// pass. Summation is commutative, so any permutation of the same events
/// produces identical buckets.
pub struct StatsTracker {
    by_hero: HashMap<String, HeroAggregate>,
    by_player: HashMap<String, HashMap<String, HeroAggregate>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        StatsTracker {
            by_hero: HashMap::new(),
            by_player: HashMap::new(),
        }
    }

    pub fn from_events(events: &[MatchEvent]) -> Self {
        let mut tracker = StatsTracker::new();
        for event in events {
            tracker.add_event(event);
        }
        tracker
    }

    pub fn add_event(&mut self, event: &MatchEvent) {
        self.by_hero
            .entry(event.hero_key.clone())
            .or_insert_with(|| HeroAggregate::new(event.hero_key.clone()))
            .record(event);

        self.by_player
            .entry(event.player_id.clone())
            .or_default()
            .entry(event.hero_key.clone())
            .or_insert_with(|| HeroAggregate::new(event.hero_key.clone()))
            .record(event);
    }

    /// Overall buckets, ordered by hero key so downstream stable sorts see a
    /// deterministic base order.
    pub fn hero_aggregates(&self) -> Vec<HeroAggregate> {
        let mut aggregates: Vec<HeroAggregate> = self.by_hero.values().cloned().collect();
        aggregates.sort_by(|a, b| a.key.cmp(&b.key));
        aggregates
    }

    /// Per-player buckets, ordered by player id, heroes ordered by key.
    pub fn player_aggregates(&self) -> Vec<(String, Vec<HeroAggregate>)> {
        let mut players: Vec<(String, Vec<HeroAggregate>)> = self
            .by_player
            .iter()
            .map(|(player_id, heroes)| {
                let mut aggregates: Vec<HeroAggregate> = heroes.values().cloned().collect();
                aggregates.sort_by(|a, b| a.key.cmp(&b.key));
                (player_id.clone(), aggregates)
            })
            .collect();
        players.sort_by(|a, b| a.0.cmp(&b.0));
        players
    }

    #[allow(dead_code)]
    pub fn get_hero(&self, key: &str) -> Option<&HeroAggregate> {
        self.by_hero.get(key)
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        StatsTracker::new()
    }
}
