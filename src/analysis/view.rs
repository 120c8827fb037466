use super::derive::DerivedHeroStat;
use crate::snapshot::{PlayerAggregateView, Snapshot};
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Name,
    Games,
    Winrate,
    Kda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One page of a windowed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Head of a windowed sequence, with the reveal toggle applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncated<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub has_more: bool,
}

/// Case-insensitive substring filter over hero display names.
pub fn filter_heroes(stats: &[DerivedHeroStat], query: &str) -> Vec<DerivedHeroStat> {
    let query = query.to_lowercase();
    stats
        .iter()
        .filter(|stat| stat.display_name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Player filter matches the display name or the raw player id.
pub fn filter_players(players: &[PlayerAggregateView], query: &str) -> Vec<PlayerAggregateView> {
    let query = query.to_lowercase();
    players
        .iter()
        .filter(|player| {
            player.display_name.to_lowercase().contains(&query)
                || player.player_id.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Stable sort; rows with equal key values keep their incoming order.
/// Numeric fields compare as floats.
pub fn sort_heroes(stats: &mut [DerivedHeroStat], field: SortField, order: SortOrder) {
    stats.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &DerivedHeroStat, b: &DerivedHeroStat, field: SortField) -> Ordering {
    match field {
        SortField::Name => a
            .display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase()),
        SortField::Games => a.games.cmp(&b.games),
        SortField::Winrate => a
            .winrate_pct
            .partial_cmp(&b.winrate_pct)
            .unwrap_or(Ordering::Equal),
        SortField::Kda => a.kda.partial_cmp(&b.kda).unwrap_or(Ordering::Equal),
    }
}

/// Page window `[page_size * (page - 1), page_size * page)`; pages past the
/// end come back empty rather than erroring.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    if page_size == 0 {
        return Page {
            rows: Vec::new(),
            current_page: page,
            total_pages: 0,
        };
    }
    let page = page.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let rows = items
        .iter()
        .skip(page_size * (page - 1))
        .take(page_size)
        .cloned()
        .collect();

    Page {
        rows,
        current_page: page,
        total_pages,
    }
}

/// First `limit` rows, or everything once the reveal toggle is set.
pub fn truncate_rows<T: Clone>(items: &[T], limit: usize, show_all: bool) -> Truncated<T> {
    if show_all {
        return Truncated {
            rows: items.to_vec(),
            total: items.len(),
            has_more: false,
        };
    }
    Truncated {
        rows: items.iter().take(limit).cloned().collect(),
        total: items.len(),
        has_more: items.len() > limit,
    }
}

/// View parameters plus the page-reset rule: changing the text filter or the
/// scrim mode resets the page to 1, changing the sort does not.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub query: String,
    pub scrim_only: bool,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: usize,
    pub limit: usize,
    pub show_all: bool,
}

impl ViewState {
    pub fn new(sort_field: SortField, sort_order: SortOrder, page_size: usize, limit: usize) -> Self {
        ViewState {
            query: String::new(),
            scrim_only: false,
            sort_field,
            sort_order,
            page: 1,
            page_size,
            limit,
            show_all: false,
        }
    }

    pub fn set_query(&mut self, query: &str) {
        if query != self.query {
            self.query = query.to_string();
            self.page = 1;
        }
    }

    /// Returns true when the scrim mode actually changed, which means the
    /// caller has to start a new ingestion run.
    pub fn set_scrim_only(&mut self, scrim_only: bool) -> bool {
        if scrim_only == self.scrim_only {
            return false;
        }
        self.scrim_only = scrim_only;
        self.page = 1;
        true
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Overall mode: filter, stable sort, truncate.
    pub fn hero_rows(&self, snapshot: &Snapshot) -> Truncated<DerivedHeroStat> {
        let mut rows = filter_heroes(&snapshot.heroes, &self.query);
        sort_heroes(&mut rows, self.sort_field, self.sort_order);
        truncate_rows(&rows, self.limit, self.show_all)
    }

    /// Player mode: filter players, sort each player's heroes, paginate the
    /// player sequence.
    pub fn player_page(&self, snapshot: &Snapshot) -> Page<PlayerAggregateView> {
        let mut players = filter_players(&snapshot.players, &self.query);
        for player in &mut players {
            sort_heroes(&mut player.heroes, self.sort_field, self.sort_order);
        }
        paginate(&players, self.page, self.page_size)
    }
}
