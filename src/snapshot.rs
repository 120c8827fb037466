use crate::analysis::aggregate::StatsTracker;
use crate::analysis::derive::{derive, DerivedHeroStat};
use crate::heroes::HeroDirectory;
use crate::ingest::MatchEvent;
use crate::source::models::PlayerDirectory;

/// Parameters that change which events are folded into aggregates. Anything
/// here forces a fresh run; view-stage parameters never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    pub scrim_only: bool,
}

/// One player's derived stats, in hero-key order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregateView {
    pub player_id: String,
    pub display_name: String,
    pub heroes: Vec<DerivedHeroStat>,
}

/// Self-contained result of one full pipeline run. Rebuilt wholesale every
/// run; downstream readers never see partial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub params: RunParams,
    pub heroes: Vec<DerivedHeroStat>,
    pub players: Vec<PlayerAggregateView>,
}

impl Snapshot {
    pub fn from_events(
        events: &[MatchEvent],
        params: RunParams,
        heroes: &HeroDirectory,
        directory: &PlayerDirectory,
    ) -> Self {
        let tracker = StatsTracker::from_events(events);

        let hero_stats = tracker
            .hero_aggregates()
            .iter()
            .map(|aggregate| derive(aggregate, heroes))
            .collect();

        let players = tracker
            .player_aggregates()
            .into_iter()
            .map(|(player_id, aggregates)| PlayerAggregateView {
                display_name: directory.display_name(&player_id),
                heroes: aggregates
                    .iter()
                    .map(|aggregate| derive(aggregate, heroes))
                    .collect(),
                player_id,
            })
            .collect();

        Snapshot {
            params,
            heroes: hero_stats,
            players,
        }
    }
}

/// Handle for one initiated pipeline run.
#[derive(Debug)]
pub struct RunTicket {
    id: u64,
    pub params: RunParams,
}

/// Publication point for pipeline runs.
///
/// Runs are ticketed in initiation order; only the most recently initiated
/// run may publish. A slower run completing after a newer one started is
/// rejected, so a stale result can never clobber a fresher snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    last_started: u64,
    published: Option<(u64, Snapshot)>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        SnapshotStore::default()
    }

    pub fn begin_run(&mut self, params: RunParams) -> RunTicket {
        self.last_started += 1;
        RunTicket {
            id: self.last_started,
            params,
        }
    }

    /// Returns false when the ticket's run was superseded; the snapshot is
    /// dropped in that case.
    pub fn publish(&mut self, ticket: &RunTicket, snapshot: Snapshot) -> bool {
        if ticket.id != self.last_started {
            return false;
        }
        self.published = Some((ticket.id, snapshot));
        true
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.published.as_ref().map(|(_, snapshot)| snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{normalize, Normalized};
    use crate::source::models::RawMatchRow;
    use pretty_assertions::assert_eq;

    fn row(player_id: &str, hero: &str, kda: &str, result: &str, is_scrim: &str) -> RawMatchRow {
        RawMatchRow {
            player_id: player_id.to_string(),
            hero_played: hero.to_string(),
            kda: kda.to_string(),
            result: result.to_string(),
            is_scrim: is_scrim.to_string(),
        }
    }

    fn events_from(rows: &[RawMatchRow], scrim_only: bool, heroes: &HeroDirectory) -> Vec<crate::ingest::MatchEvent> {
        rows.iter()
            .filter_map(|r| match normalize(r, scrim_only, heroes) {
                Normalized::Event(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    fn mixed_rows() -> Vec<RawMatchRow> {
        vec![
            row("101", "Axe", "5/2/3", "1", "1"),
            row("101", "Axe", "1/2/1", "0", "0"),
            row("102", "Puck", "2/0/7", "1", "1"),
        ]
    }

    #[test]
    fn snapshot_holds_both_modes() {
        let heroes = HeroDirectory::bundled().unwrap();
        let directory = PlayerDirectory::read("101,gosu\n".as_bytes());
        let events = events_from(&mixed_rows(), false, &heroes);
        let params = RunParams { scrim_only: false };

        let snapshot = Snapshot::from_events(&events, params, &heroes, &directory);

        assert_eq!(snapshot.heroes.len(), 2);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0].display_name, "gosu");
        assert_eq!(snapshot.players[1].display_name, "Unknown (102)");
    }

    #[test]
    fn scrim_mode_changes_aggregate_values_not_just_visibility() {
        let heroes = HeroDirectory::bundled().unwrap();
        let directory = PlayerDirectory::default();
        let rows = mixed_rows();

        let all = Snapshot::from_events(
            &events_from(&rows, false, &heroes),
            RunParams { scrim_only: false },
            &heroes,
            &directory,
        );
        let scrim = Snapshot::from_events(
            &events_from(&rows, true, &heroes),
            RunParams { scrim_only: true },
            &heroes,
            &directory,
        );

        let axe_all = all.heroes.iter().find(|s| s.hero_key == "axe").unwrap();
        let axe_scrim = scrim.heroes.iter().find(|s| s.hero_key == "axe").unwrap();

        assert_eq!(axe_all.games, 2);
        assert_eq!(axe_scrim.games, 1);
        assert_eq!(axe_all.winrate_pct, 50.0);
        assert_eq!(axe_scrim.winrate_pct, 100.0);
        assert_eq!(axe_all.kda, 2.5);
        assert_eq!(axe_scrim.kda, 4.0);
    }

    #[test]
    fn stale_run_cannot_clobber_a_newer_snapshot() {
        let heroes = HeroDirectory::bundled().unwrap();
        let directory = PlayerDirectory::default();
        let rows = mixed_rows();
        let mut store = SnapshotStore::new();

        // Run A starts first, run B second; B finishes and publishes first.
        let ticket_a = store.begin_run(RunParams { scrim_only: false });
        let ticket_b = store.begin_run(RunParams { scrim_only: true });

        let snapshot_b = Snapshot::from_events(
            &events_from(&rows, true, &heroes),
            ticket_b.params,
            &heroes,
            &directory,
        );
        assert!(store.publish(&ticket_b, snapshot_b));

        let snapshot_a = Snapshot::from_events(
            &events_from(&rows, false, &heroes),
            ticket_a.params,
            &heroes,
            &directory,
        );
        assert!(!store.publish(&ticket_a, snapshot_a));

        let published = store.latest().unwrap();
        assert_eq!(published.params, RunParams { scrim_only: true });
    }

    #[test]
    fn latest_is_empty_until_a_run_publishes() {
        let store = SnapshotStore::new();
        assert!(store.latest().is_none());
    }
}
