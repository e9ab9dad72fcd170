//! Derived Views
//!
//! Pure functions computing what the explore and detail pages show:
//! search filtering, sort orders, the "load more" cursor, funding
//! percentages and relative timestamps. Nothing here is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::RallyError;
use super::types::Rally;

/// Rallies shown before the first "load more"
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Rallies added by each "load more"
pub const DEFAULT_PAGE_STEP: usize = 3;

/// Rallies highlighted on the landing page
pub const FEATURED_COUNT: usize = 3;

/// Funded share of a goal, rounded to a whole percent
///
/// A goal that is not positive yields 0. Halves round up (towards positive
/// infinity), so -2.5 becomes -2.
pub fn percent_complete(raised: f64, goal: f64) -> i64 {
    if goal <= 0.0 {
        return 0;
    }
    (raised / goal * 100.0 + 0.5).floor() as i64
}

/// The `count` most recently created rallies, newest first
pub fn featured(rallies: &[Rally], count: usize) -> Vec<&Rally> {
    let mut newest: Vec<&Rally> = rallies.iter().collect();
    SortOrder::Newest.sort(&mut newest);
    newest.truncate(count);
    newest
}

/// Sort orders offered on the explore page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently created first
    #[default]
    Newest,
    /// Largest amount raised first
    Popular,
    /// Fewest days left first
    EndingSoon,
    /// Highest raised/goal ratio first
    MostFunded,
}

impl SortOrder {
    pub fn all() -> &'static [SortOrder] {
        &[
            SortOrder::Newest,
            SortOrder::Popular,
            SortOrder::EndingSoon,
            SortOrder::MostFunded,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Popular => "Most Popular",
            SortOrder::EndingSoon => "Ending Soon",
            SortOrder::MostFunded => "Most Funded",
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, rallies: &mut [&Rally]) {
        match self {
            SortOrder::Newest => rallies.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Popular => rallies.sort_by(|a, b| b.raised.total_cmp(&a.raised)),
            SortOrder::EndingSoon => rallies.sort_by_key(|r| r.days_left),
            SortOrder::MostFunded => {
                rallies.sort_by(|a, b| b.funded_ratio().total_cmp(&a.funded_ratio()))
            }
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Newest => write!(f, "newest"),
            SortOrder::Popular => write!(f, "popular"),
            SortOrder::EndingSoon => write!(f, "ending-soon"),
            SortOrder::MostFunded => write!(f, "most-funded"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = RallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "popular" => Ok(SortOrder::Popular),
            "ending-soon" => Ok(SortOrder::EndingSoon),
            "most-funded" => Ok(SortOrder::MostFunded),
            other => Err(RallyError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// State of the explore page: search box, sort selector and visible count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreQuery {
    pub search: String,
    pub sort: SortOrder,
    /// How many matches are currently shown
    pub visible: usize,
    /// How many more each `load_more` reveals
    pub step: usize,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_STEP)
    }
}

impl ExploreQuery {
    pub fn new(page_size: usize, step: usize) -> Self {
        Self {
            search: String::new(),
            sort: SortOrder::default(),
            visible: page_size,
            step,
        }
    }

    /// Builder method: set the search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Builder method: set the sort order
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Reveal the next step of results
    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(self.step);
    }

    /// Filter, sort and truncate
    pub fn apply<'a>(&self, rallies: &'a [Rally]) -> ExplorePage<'a> {
        let mut matches: Vec<&Rally> = rallies.iter().filter(|r| r.matches(&self.search)).collect();
        self.sort.sort(&mut matches);

        let total = matches.len();
        matches.truncate(self.visible);

        ExplorePage {
            rallies: matches,
            total,
            has_more: self.visible < total,
        }
    }
}

/// One rendering of the explore page
#[derive(Debug, Clone)]
pub struct ExplorePage<'a> {
    /// Visible rallies in display order
    pub rallies: Vec<&'a Rally>,
    /// Matches before truncation
    pub total: usize,
    /// Whether "load more" should be offered
    pub has_more: bool,
}

impl ExplorePage<'_> {
    pub fn is_empty(&self) -> bool {
        self.rallies.is_empty()
    }
}

/// "5 minutes ago" style distance between `then` and `now`
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let future = delta.num_seconds() < 0;
    let seconds = delta.num_seconds().unsigned_abs();

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let distance = if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if hours < 24 {
        format!("about {} hours", hours)
    } else if hours < 42 {
        "1 day".to_string()
    } else if days < 30 {
        format!("{} days", days)
    } else if days < 45 {
        "about 1 month".to_string()
    } else if days < 365 {
        format!("{} months", days / 30)
    } else if days < 730 {
        "about 1 year".to_string()
    } else {
        format!("{} years", days / 365)
    };

    if future {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

/// Avatar fallback: first two characters, upper-cased
pub fn initials(address: &str) -> String {
    address.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::seed::sample_rallies;
    use crate::rally::types::Token;
    use chrono::Duration;

    fn ids<'a>(page: &ExplorePage<'a>) -> Vec<&'a str> {
        page.rallies.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(percent_complete(3200.0, 5000.0), 64);
        assert_eq!(percent_complete(6800.0, 7500.0), 91);
        assert_eq!(percent_complete(0.0, 100.0), 0);
        assert_eq!(percent_complete(150.0, 100.0), 150);
        assert_eq!(percent_complete(10.0, 0.0), 0);
    }

    #[test]
    fn test_percent_complete_rounds_halves_up() {
        assert_eq!(percent_complete(1.0, 8.0), 13);
        assert_eq!(percent_complete(-1.0, 8.0), -12);
        assert_eq!(percent_complete(-3.0, 8.0), -37);
        assert_eq!(percent_complete(-1.0, 16.0), -6);
    }

    #[test]
    fn test_featured() {
        let rallies = sample_rallies();
        let picked: Vec<&str> = featured(&rallies, FEATURED_COUNT)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(picked, vec!["1", "2", "3"]);

        // Newest by creation time, not by position in the list
        let mut shuffled = rallies.clone();
        shuffled.reverse();
        let picked: Vec<&str> = featured(&shuffled, 2).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(picked, vec!["1", "2"]);

        assert_eq!(featured(&rallies[..2], FEATURED_COUNT).len(), 2);
        assert!(featured(&[], FEATURED_COUNT).is_empty());
    }

    #[test]
    fn test_most_funded_ordering() {
        let a = Rally::new("a", "A", "", 5000.0, Token::Ntrn).raised(3200.0);
        let b = Rally::new("b", "B", "", 7500.0, Token::Ntrn).raised(6800.0);
        let rallies = vec![a, b];

        let page = ExploreQuery::default()
            .sort(SortOrder::MostFunded)
            .apply(&rallies);
        assert_eq!(ids(&page), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_orders_on_samples() {
        let rallies = sample_rallies();
        let query = ExploreQuery::default();

        let newest = query.clone().sort(SortOrder::Newest).apply(&rallies);
        assert_eq!(ids(&newest), vec!["1", "2", "3", "4", "5", "6"]);

        let popular = query.clone().sort(SortOrder::Popular).apply(&rallies);
        assert_eq!(ids(&popular), vec!["6", "3", "2", "1", "4", "5"]);

        let ending = query.clone().sort(SortOrder::EndingSoon).apply(&rallies);
        assert_eq!(ids(&ending), vec!["3", "6", "1", "2", "5", "4"]);

        let funded = query.sort(SortOrder::MostFunded).apply(&rallies);
        assert_eq!(ids(&funded), vec!["3", "6", "1", "2", "4", "5"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let rallies = vec![
            Rally::new("x", "X", "", 100.0, Token::Ntrn).days_left(5),
            Rally::new("y", "Y", "", 100.0, Token::Ntrn).days_left(5),
        ];
        let page = ExploreQuery::default()
            .sort(SortOrder::EndingSoon)
            .apply(&rallies);
        assert_eq!(ids(&page), vec!["x", "y"]);
    }

    #[test]
    fn test_search_filter() {
        let rallies = sample_rallies();

        let page = ExploreQuery::default().search("WATER").apply(&rallies);
        assert_eq!(ids(&page), vec!["3"]);

        // Description matches count too
        let page = ExploreQuery::default().search("habitats").apply(&rallies);
        assert_eq!(ids(&page), vec!["6"]);

        let page = ExploreQuery::default().search("nothing like this").apply(&rallies);
        assert!(page.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_load_more() {
        let mut rallies = sample_rallies();
        for i in 0..4 {
            rallies.push(Rally::new(format!("extra-{}", i), "Extra", "", 10.0, Token::Usdc));
        }

        let mut query = ExploreQuery::default();
        let page = query.apply(&rallies);
        assert_eq!(page.rallies.len(), 6);
        assert_eq!(page.total, 10);
        assert!(page.has_more);

        query.load_more();
        let page = query.apply(&rallies);
        assert_eq!(page.rallies.len(), 9);
        assert!(page.has_more);

        query.load_more();
        let page = query.apply(&rallies);
        assert_eq!(page.rallies.len(), 10);
        assert!(!page.has_more);
    }

    #[test]
    fn test_load_more_saturates() {
        let mut query = ExploreQuery::new(DEFAULT_PAGE_SIZE, usize::MAX);
        query.load_more();
        query.load_more();
        assert_eq!(query.visible, usize::MAX);

        let rallies = sample_rallies();
        let page = query.apply(&rallies);
        assert_eq!(page.rallies.len(), 6);
        assert!(!page.has_more);
    }

    #[test]
    fn test_sort_order_parse() {
        for order in SortOrder::all() {
            assert_eq!(order.to_string().parse::<SortOrder>().unwrap(), *order);
        }
        assert!(matches!(
            "oldest".parse::<SortOrder>(),
            Err(RallyError::UnknownSortOrder(_))
        ));
    }

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now), "less than a minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "about 3 hours ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_relative(now - Duration::days(800), now), "2 years ago");
        assert_eq!(format_relative(now + Duration::days(2), now), "in 2 days");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("neutron1abc..."), "NE");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "");
    }
}
