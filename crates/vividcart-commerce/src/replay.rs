//! Event-log recording and replay.
//!
//! A storefront session is the cart plus the current search query. Every user
//! event is a pure step from one session to the next, so a recorded event log
//! replayed against the same catalog always lands on the same session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cart::{Cart, CartAction, CartSummary, LineSummary};
use crate::catalog::Catalog;
use crate::checkout::CheckoutRequest;
use crate::error::CommerceError;
use crate::ids::{CheckoutId, ProductId};
use crate::money::Money;
use crate::search::{SearchQuery, SearchResults};

/// A recorded storefront event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// "Add to Cart" pressed on a product card.
    Add { product: ProductId },
    /// Quantity plus button.
    Increment { product: ProductId },
    /// Quantity minus button.
    Decrement { product: ProductId },
    /// Trash button on a cart line.
    Remove { product: ProductId },
    /// Search box changed.
    Search { query: String },
    /// "Proceed to Checkout" pressed.
    Checkout,
    /// Cart emptied, e.g. after a checkout the collaborator accepted.
    Clear,
}

/// Cart plus search query: everything a replay reconstructs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Current cart.
    pub cart: Cart,
    /// Current search query.
    pub query: SearchQuery,
}

impl Session {
    /// A fresh session with an empty cart and no query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, producing the next session.
    ///
    /// Adding a product the catalog does not know is a no-op. Checkout
    /// events leave the session unchanged; see [`replay`] for how they are
    /// reported.
    #[must_use]
    pub fn apply(&self, catalog: &Catalog, event: &StoreEvent) -> Session {
        match event {
            StoreEvent::Search { query } => Session {
                cart: self.cart.clone(),
                query: SearchQuery::new(query.as_str()),
            },
            StoreEvent::Checkout => self.clone(),
            _ => match cart_action(catalog, event) {
                Some(action) => Session {
                    cart: self.cart.apply(&action),
                    query: self.query.clone(),
                },
                None => self.clone(),
            },
        }
    }

    /// Products visible for the current query.
    pub fn visible_products(&self, catalog: &Catalog) -> SearchResults {
        SearchResults::run(catalog, self.query.clone())
    }
}

/// Translate a cart event into a cart action, resolving products by id.
pub fn cart_action(catalog: &Catalog, event: &StoreEvent) -> Option<CartAction> {
    match event {
        StoreEvent::Add { product } => match catalog.get(product) {
            Some(product) => Some(CartAction::AddItem(product)),
            None => {
                warn!(product = %product, "ignoring add for product not in catalog");
                None
            }
        },
        StoreEvent::Increment { product } => Some(CartAction::IncrementQty(product.clone())),
        StoreEvent::Decrement { product } => Some(CartAction::DecrementQty(product.clone())),
        StoreEvent::Remove { product } => Some(CartAction::RemoveItem(product.clone())),
        StoreEvent::Clear => Some(CartAction::Clear),
        StoreEvent::Search { .. } | StoreEvent::Checkout => None,
    }
}

/// Result of replaying an event log.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Final session.
    pub session: Session,
    /// Checkout requests raised along the way, in order.
    pub checkouts: Vec<CheckoutRequest>,
}

/// Replay events from a fresh session.
pub fn replay(catalog: &Catalog, events: &[StoreEvent]) -> ReplayOutcome {
    let mut session = Session::new();
    let mut checkouts = Vec::new();

    for (step, event) in events.iter().enumerate() {
        if let StoreEvent::Checkout = event {
            checkouts.push(CheckoutRequest::with_id(
                CheckoutId::for_replay_step(step),
                &session.cart,
            ));
        }
        session = session.apply(catalog, event);
        debug!(step, ?event, item_count = session.cart.item_count(), "replayed event");
    }

    ReplayOutcome { session, checkouts }
}

/// A saved event log, optionally with the cart it is expected to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recording format version.
    pub version: u32,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Events in dispatch order.
    pub events: Vec<StoreEvent>,
    /// Cart summary the events should produce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<CartSummary>,
}

impl Recording {
    /// Current recording format version.
    pub const VERSION: u32 = 1;

    /// Wrap events in a recording stamped now.
    pub fn new(events: Vec<StoreEvent>) -> Self {
        Self {
            version: Self::VERSION,
            recorded_at: Utc::now(),
            events,
            expected: None,
        }
    }

    /// Attach the expected cart summary.
    pub fn with_expected(mut self, expected: CartSummary) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let recording: Recording = serde_json::from_str(json)?;
        if recording.version != Self::VERSION {
            return Err(CommerceError::UnsupportedRecording {
                found: recording.version,
                expected: Self::VERSION,
            });
        }
        Ok(recording)
    }

    /// Replay this recording against a catalog.
    pub fn replay(&self, catalog: &Catalog) -> ReplayOutcome {
        replay(catalog, &self.events)
    }
}

/// Collects events as they happen so a session can be saved.
#[derive(Debug, Default)]
pub struct ReplayRecorder {
    events: Vec<StoreEvent>,
}

impl ReplayRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn record(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finish the recording, storing the final cart as the expectation.
    pub fn finalize(self, session: &Session) -> Recording {
        Recording::new(self.events).with_expected(session.cart.summary())
    }
}

/// Kind of difference in a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Line expected but not in the replayed cart.
    Missing,
    /// Line in the replayed cart but not expected.
    Added,
    /// Line present in both with different quantities.
    QuantityMismatch,
}

/// Difference in one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    /// Product of the line.
    pub product_id: ProductId,
    /// Type of difference.
    pub diff_type: DiffType,
    /// Expected quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u64>,
    /// Replayed quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<u64>,
}

/// Comparison of an expected cart summary with a replayed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayDiff {
    /// Whether the carts match exactly, order included.
    pub matches: bool,
    /// Per-line differences.
    pub line_diffs: Vec<LineDiff>,
    /// Whether shared lines appear in the same order.
    pub order_matches: bool,
    /// Expected and replayed subtotal, when they differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<(Money, Money)>,
    /// Expected and replayed item count, when they differ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<(u64, u64)>,
}

impl ReplayDiff {
    /// Compare two cart summaries.
    pub fn compare(expected: &CartSummary, actual: &CartSummary) -> Self {
        let mut line_diffs = Vec::new();

        for exp in &expected.lines {
            match actual.lines.iter().find(|a| a.product_id == exp.product_id) {
                None => line_diffs.push(LineDiff {
                    product_id: exp.product_id.clone(),
                    diff_type: DiffType::Missing,
                    expected: Some(exp.qty),
                    actual: None,
                }),
                Some(act) if act.qty != exp.qty => line_diffs.push(LineDiff {
                    product_id: exp.product_id.clone(),
                    diff_type: DiffType::QuantityMismatch,
                    expected: Some(exp.qty),
                    actual: Some(act.qty),
                }),
                Some(_) => {}
            }
        }

        for act in &actual.lines {
            if !expected.lines.iter().any(|e| e.product_id == act.product_id) {
                line_diffs.push(LineDiff {
                    product_id: act.product_id.clone(),
                    diff_type: DiffType::Added,
                    expected: None,
                    actual: Some(act.qty),
                });
            }
        }

        let order_matches = shared_order(&expected.lines, &actual.lines)
            == shared_order(&actual.lines, &expected.lines);

        let subtotal =
            (expected.subtotal != actual.subtotal).then_some((expected.subtotal, actual.subtotal));
        let item_count = (expected.item_count != actual.item_count)
            .then_some((expected.item_count, actual.item_count));

        Self {
            matches: line_diffs.is_empty()
                && order_matches
                && subtotal.is_none()
                && item_count.is_none(),
            line_diffs,
            order_matches,
            subtotal,
            item_count,
        }
    }
}

/// Ids of `lines` that also appear in `other`, in `lines` order.
fn shared_order<'a>(lines: &'a [LineSummary], other: &[LineSummary]) -> Vec<&'a ProductId> {
    lines
        .iter()
        .filter(|l| other.iter().any(|o| o.product_id == l.product_id))
        .map(|l| &l.product_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: &str) -> StoreEvent {
        StoreEvent::Add {
            product: ProductId::new(id),
        }
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"[
            {"type":"add","product":"laptop"},
            {"type":"decrement","product":"laptop"},
            {"type":"search","query":"ultra"},
            {"type":"checkout"}
        ]"#;
        let events: Vec<StoreEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], add("laptop"));
        assert_eq!(
            events[2],
            StoreEvent::Search {
                query: "ultra".to_string()
            }
        );
        assert_eq!(events[3], StoreEvent::Checkout);
    }

    #[test]
    fn test_replay_builds_cart_and_query() {
        let catalog = Catalog::demo();
        let events = vec![
            add("laptop"),
            StoreEvent::Search {
                query: "aura".to_string(),
            },
            add("headphones"),
            add("laptop"),
        ];

        let outcome = replay(&catalog, &events);
        let summary = outcome.session.cart.summary();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, Money::new(279_997));
        assert_eq!(outcome.session.query.as_str(), "aura");
        assert_eq!(outcome.session.visible_products(&catalog).total(), 2);
    }

    #[test]
    fn test_unknown_product_add_is_noop() {
        let catalog = Catalog::demo();
        let outcome = replay(&catalog, &[add("ghost"), add("sneakers")]);
        assert_eq!(outcome.session.cart.len(), 1);
    }

    #[test]
    fn test_checkout_captures_totals_without_clearing() {
        let catalog = Catalog::demo();
        let outcome = replay(
            &catalog,
            &[add("sneakers"), StoreEvent::Checkout, add("sneakers")],
        );

        assert_eq!(outcome.checkouts.len(), 1);
        assert_eq!(outcome.checkouts[0].item_count, 1);
        assert_eq!(outcome.checkouts[0].subtotal, Money::new(8_999));
        assert_eq!(outcome.session.cart.item_count(), 2);
    }

    #[test]
    fn test_replayed_checkouts_are_identical_across_runs() {
        let catalog = Catalog::demo();
        let events = [add("laptop"), StoreEvent::Checkout, add("sneakers"), StoreEvent::Checkout];

        let first = replay(&catalog, &events).checkouts;
        let second = replay(&catalog, &events).checkouts;
        assert_eq!(first, second);
        assert_eq!(first[0].id, CheckoutId::for_replay_step(1));
        assert_eq!(first[1].id.as_str(), "chk-replay-3");
    }

    #[test]
    fn test_clear_event_empties_cart() {
        let catalog = Catalog::demo();
        let events = [add("laptop"), StoreEvent::Checkout, StoreEvent::Clear, add("sneakers")];

        let outcome = replay(&catalog, &events);
        assert_eq!(outcome.checkouts[0].item_count, 1);
        let ids: Vec<String> = outcome
            .session
            .cart
            .entries()
            .map(|e| e.product().id.to_string())
            .collect();
        assert_eq!(ids, ["sneakers"]);

        let json = serde_json::to_string(&StoreEvent::Clear).unwrap();
        assert_eq!(json, r#"{"type":"clear"}"#);
    }

    #[test]
    fn test_recording_round_trip_and_version_check() {
        let recording = Recording::new(vec![add("laptop")]);
        let json = recording.to_json().unwrap();
        let parsed = Recording::from_json(&json).unwrap();
        assert_eq!(parsed.events, recording.events);

        let bumped = json.replacen("\"version\": 1", "\"version\": 9", 1);
        assert!(matches!(
            Recording::from_json(&bumped),
            Err(CommerceError::UnsupportedRecording { found: 9, .. })
        ));
    }

    #[test]
    fn test_recorder_captures_expected_summary() {
        let catalog = Catalog::demo();
        let mut recorder = ReplayRecorder::new();
        let mut session = Session::new();
        for event in [add("laptop"), add("laptop")] {
            session = session.apply(&catalog, &event);
            recorder.record(event);
        }

        let recording = recorder.finalize(&session);
        assert_eq!(recording.events.len(), 2);
        let expected = recording.expected.clone().unwrap();
        let replayed = recording.replay(&catalog).session.cart.summary();
        assert!(ReplayDiff::compare(&expected, &replayed).matches);
    }

    #[test]
    fn test_diff_reports_line_changes() {
        let catalog = Catalog::demo();
        let expected = replay(&catalog, &[add("laptop"), add("sneakers"), add("sneakers")])
            .session
            .cart
            .summary();
        let actual = replay(&catalog, &[add("laptop"), add("sneakers"), add("headphones")])
            .session
            .cart
            .summary();

        let diff = ReplayDiff::compare(&expected, &actual);
        assert!(!diff.matches);
        assert_eq!(
            diff.line_diffs,
            vec![
                LineDiff {
                    product_id: ProductId::new("sneakers"),
                    diff_type: DiffType::QuantityMismatch,
                    expected: Some(2),
                    actual: Some(1),
                },
                LineDiff {
                    product_id: ProductId::new("headphones"),
                    diff_type: DiffType::Added,
                    expected: None,
                    actual: Some(1),
                },
            ]
        );
        assert!(diff.order_matches);
        assert!(diff.subtotal.is_some());
        assert_eq!(diff.item_count, None);
    }

    #[test]
    fn test_diff_detects_reordering() {
        let catalog = Catalog::demo();
        let expected = replay(&catalog, &[add("laptop"), add("sneakers")])
            .session
            .cart
            .summary();
        let actual = replay(&catalog, &[add("sneakers"), add("laptop")])
            .session
            .cart
            .summary();

        let diff = ReplayDiff::compare(&expected, &actual);
        assert!(diff.line_diffs.is_empty());
        assert!(!diff.order_matches);
        assert!(!diff.matches);
    }
}
