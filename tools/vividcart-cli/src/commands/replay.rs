//! Session recording replay.

use std::fs;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use vividcart_commerce::cart::CartSummary;
use vividcart_commerce::checkout::CheckoutRequest;
use vividcart_commerce::replay::{DiffType, Recording, ReplayDiff, StoreEvent};

use super::{ReplayArgs, ReplayCommand};
use crate::context::Context;

/// Run the replay command.
pub fn run(args: ReplayArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ReplayCommand::Play { recording, strict } => play_recording(&recording, strict, ctx),
        ReplayCommand::Show { recording } => show_recording(&recording, ctx),
    }
}

/// Machine-readable replay result.
#[derive(Serialize)]
struct ReplayReport<'a> {
    events: usize,
    query: &'a str,
    cart: CartSummary,
    checkouts: &'a [CheckoutRequest],
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<ReplayDiff>,
}

fn load_recording(recording: &str, ctx: &Context) -> Result<Recording> {
    let path = ctx.resolve_path(recording);
    if !path.exists() {
        bail!("Recording '{}' not found", recording);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read recording: {}", path.display()))?;
    Recording::from_json(&content)
        .with_context(|| format!("Failed to parse recording: {}", path.display()))
}

fn play_recording(recording: &str, strict: bool, ctx: &Context) -> Result<()> {
    let rec = load_recording(recording, ctx)?;
    let catalog = ctx.catalog()?;

    let outcome = rec.replay(&catalog);
    let cart = outcome.session.cart.summary();
    let diff = rec
        .expected
        .as_ref()
        .map(|expected| ReplayDiff::compare(expected, &cart));
    let mismatch = diff.as_ref().is_some_and(|d| !d.matches);

    if ctx.output.is_json() {
        ctx.output.json(&ReplayReport {
            events: rec.events.len(),
            query: outcome.session.query.as_str(),
            cart,
            checkouts: &outcome.checkouts,
            diff,
        });
    } else {
        ctx.output.header(&format!("Replaying: {}", recording));
        ctx.output.kv("Recorded", &rec.recorded_at.to_rfc3339());
        ctx.output.kv("Events", &rec.events.len().to_string());
        if !outcome.session.query.is_blank() {
            ctx.output.kv("Search", outcome.session.query.as_str());
        }

        ctx.output.header("Cart");
        ctx.output.cart(&cart);

        if !outcome.checkouts.is_empty() {
            ctx.output.header("Checkouts");
            for request in &outcome.checkouts {
                ctx.output.list_item(&format!(
                    "{}  {} ({} items)",
                    request.id, request.subtotal, request.item_count
                ));
            }
        }

        match &diff {
            None => ctx.output.info("Recording has no expected cart to compare."),
            Some(d) if d.matches => ctx.output.success("Replayed cart matches the recording"),
            Some(d) => print_diff(d, ctx),
        }
    }

    if strict && mismatch {
        bail!("Replayed cart differs from the recording");
    }
    Ok(())
}

fn print_diff(diff: &ReplayDiff, ctx: &Context) {
    ctx.output.warn("Replayed cart differs from the recording");

    for line in &diff.line_diffs {
        let detail = match line.diff_type {
            DiffType::Missing => "missing".to_string(),
            DiffType::Added => "unexpected".to_string(),
            DiffType::QuantityMismatch => format!(
                "qty {} -> {}",
                line.expected.unwrap_or_default(),
                line.actual.unwrap_or_default()
            ),
        };
        ctx.output.list_item(&format!("{}: {}", line.product_id, detail));
    }
    if !diff.order_matches {
        ctx.output.list_item("line order differs");
    }
    if let Some((expected, actual)) = diff.subtotal {
        ctx.output
            .list_item(&format!("subtotal {} -> {}", expected, actual));
    }
    if let Some((expected, actual)) = diff.item_count {
        ctx.output
            .list_item(&format!("item count {} -> {}", expected, actual));
    }
}

fn show_recording(recording: &str, ctx: &Context) -> Result<()> {
    let rec = load_recording(recording, ctx)?;

    if ctx.output.is_json() {
        ctx.output.json(&rec);
        return Ok(());
    }

    ctx.output.header(&format!("Recording: {}", recording));
    ctx.output.kv("Version", &rec.version.to_string());
    ctx.output.kv("Recorded", &rec.recorded_at.to_rfc3339());
    ctx.output.kv("Events", &rec.events.len().to_string());

    for (i, event) in rec.events.iter().enumerate() {
        ctx.output
            .list_item(&format!("{:>3}. {}", i + 1, describe(event)));
    }

    if let Some(expected) = &rec.expected {
        ctx.output.header("Expected cart");
        ctx.output.cart(expected);
    }
    Ok(())
}

fn describe(event: &StoreEvent) -> String {
    match event {
        StoreEvent::Add { product } => format!("add {}", product),
        StoreEvent::Increment { product } => format!("increment {}", product),
        StoreEvent::Decrement { product } => format!("decrement {}", product),
        StoreEvent::Remove { product } => format!("remove {}", product),
        StoreEvent::Search { query } => format!("search \"{}\"", query),
        StoreEvent::Checkout => "checkout".to_string(),
        StoreEvent::Clear => "clear cart".to_string(),
    }
}
